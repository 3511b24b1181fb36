//! Strongly-typed server identity.
//!
//! All lifecycle state is scoped to one guild + game-server pair. The key is
//! opaque to the tracking engine; hosts derive it from whatever configuration
//! store they use.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one tracked game server within one guild.
///
/// Renders as `<guild_id>_<server_id>` for interop with hosts that key
/// their storage by that composite string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerKey {
    guild_id: u64,
    server_id: String,
}

impl ServerKey {
    /// Build a key from its two halves.
    ///
    /// # Panics
    /// Panics on a zero guild id or an empty server id. Both indicate a bug
    /// in the caller, not bad log input, so failing loudly is deliberate.
    pub fn new(guild_id: u64, server_id: impl Into<String>) -> Self {
        let server_id = server_id.into();
        assert!(guild_id != 0, "ServerKey requires a non-zero guild id");
        assert!(
            !server_id.is_empty(),
            "ServerKey requires a non-empty server id"
        );
        Self {
            guild_id,
            server_id,
        }
    }

    pub fn guild_id(&self) -> u64 {
        self.guild_id
    }

    pub fn server_id(&self) -> &str {
        &self.server_id
    }
}

impl fmt::Display for ServerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.guild_id, self.server_id)
    }
}

/// Error produced when parsing the `<guild_id>_<server_id>` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseServerKeyError(String);

impl fmt::Display for ParseServerKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid server key {:?}", self.0)
    }
}

impl std::error::Error for ParseServerKeyError {}

impl FromStr for ServerKey {
    type Err = ParseServerKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (guild, server) = s
            .split_once('_')
            .ok_or_else(|| ParseServerKeyError(s.to_string()))?;
        let guild_id: u64 = guild
            .parse()
            .map_err(|_| ParseServerKeyError(s.to_string()))?;
        if guild_id == 0 || server.is_empty() {
            return Err(ParseServerKeyError(s.to_string()));
        }
        Ok(Self {
            guild_id,
            server_id: server.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_composite_form() {
        let key = ServerKey::new(690129185314118, "emerald-eu-1");
        assert_eq!(key.to_string(), "690129185314118_emerald-eu-1");
    }

    #[test]
    fn parse_roundtrips_display() {
        let key = ServerKey::new(42, "us-west_2");
        let parsed: ServerKey = key.to_string().parse().unwrap();
        // server ids may themselves contain underscores; only the first
        // separator belongs to the guild id
        assert_eq!(parsed, key);
        assert_eq!(parsed.server_id(), "us-west_2");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("no-separator".parse::<ServerKey>().is_err());
        assert!("abc_server".parse::<ServerKey>().is_err());
        assert!("0_server".parse::<ServerKey>().is_err());
        assert!("42_".parse::<ServerKey>().is_err());
    }

    #[test]
    #[should_panic(expected = "non-zero guild id")]
    fn zero_guild_id_is_a_caller_bug() {
        let _ = ServerKey::new(0, "srv");
    }

    #[test]
    #[should_panic(expected = "non-empty server id")]
    fn empty_server_id_is_a_caller_bug() {
        let _ = ServerKey::new(1, "");
    }

    #[test]
    fn serializes_as_plain_fields() {
        let key = ServerKey::new(7, "srv");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"guild_id":7,"server_id":"srv"}"#);
    }
}
