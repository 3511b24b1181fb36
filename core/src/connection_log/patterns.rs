use regex::{Captures, Regex};
use std::sync::LazyLock;

// The four record shapes are an external text contract with the game server.
// Pattern source text must not drift: hosts rely on exactly these matches.

/// Join request carrying a display name and either a console platform id or
/// an online-service id.
static QUEUE_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)LogNet: Join request: /Game/Maps/world_0/World_0\?.*\?Name=([^&\s]+).*(?:platformid=PS5:(\w+)|eosid=\|(\w+))",
    )
    .expect("queue-join pattern")
});

/// Successful registration into the active session.
static PLAYER_REGISTERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)LogOnline: Warning: Player \|(\w+) successfully registered!")
        .expect("player-registered pattern")
});

/// Channel close with an EOS-tagged unique id (pipe required).
static CLOSE_EOS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)UChannel::Close: Sending CloseBunch.*UniqueId: EOS:\|(\w+)")
        .expect("eos close pattern")
});

/// Channel close, looser form: PS5 or EOS tag, pipe optional. Only ever
/// produces a pre-join disconnect; kept as a separate pattern because the
/// EOS-tagged form above shadows it for piped EOS ids.
static CLOSE_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)UChannel::Close: Sending CloseBunch.*UniqueId: (?:PS5|EOS):\|?(\w+)")
        .expect("loose close pattern")
});

/// Lexical classification of one log line.
///
/// Close variants are not lifecycle events yet: the tracker decides between
/// pre- and post-join (or drops the record) based on current server state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    QueueJoin {
        player_id: String,
        player_name: String,
    },
    Registered {
        player_id: String,
    },
    ChannelCloseEos {
        player_id: String,
    },
    ChannelCloseLoose {
        player_id: String,
    },
}

/// Match a raw line against the four record shapes, first match wins.
///
/// Returns `None` for lines that match nothing, and for matched records whose
/// identifier capture is missing or empty (malformed extraction is treated as
/// no-match, never as an error). A line consumed by an earlier pattern never
/// falls through to a later one, even if the tracker later drops the record.
pub fn classify_line(line: &str) -> Option<LineMatch> {
    if let Some(caps) = QUEUE_JOIN.captures(line) {
        // Identifier is whichever platform encoding is present
        let player_id = capture_id(&caps, 2).or_else(|| capture_id(&caps, 3))?;
        let player_name = caps.get(1)?.as_str().to_string();
        return Some(LineMatch::QueueJoin {
            player_id,
            player_name,
        });
    }

    if let Some(caps) = PLAYER_REGISTERED.captures(line) {
        return Some(LineMatch::Registered {
            player_id: capture_id(&caps, 1)?,
        });
    }

    if let Some(caps) = CLOSE_EOS.captures(line) {
        return Some(LineMatch::ChannelCloseEos {
            player_id: capture_id(&caps, 1)?,
        });
    }

    if let Some(caps) = CLOSE_LOOSE.captures(line) {
        return Some(LineMatch::ChannelCloseLoose {
            player_id: capture_id(&caps, 1)?,
        });
    }

    None
}

fn capture_id(caps: &Captures<'_>, idx: usize) -> Option<String> {
    let id = caps.get(idx)?.as_str();
    (!id.is_empty()).then(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_line_eos(name: &str, id: &str) -> String {
        format!(
            "[2025.08.07-12.41.03:217][412]LogNet: Join request: /Game/Maps/world_0/World_0?login?Name={name}&eosid=|{id}"
        )
    }

    fn queue_line_ps5(name: &str, id: &str) -> String {
        format!(
            "[2025.08.07-12.41.03:217][412]LogNet: Join request: /Game/Maps/world_0/World_0?login?Name={name}&platformid=PS5:{id}"
        )
    }

    fn registered_line(id: &str) -> String {
        format!(
            "[2025.08.07-12.42.11:050][563]LogOnline: Warning: Player |{id} successfully registered!"
        )
    }

    fn close_line(tag: &str, id: &str) -> String {
        format!(
            "[2025.08.07-13.02.44:981][902]UChannel::Close: Sending CloseBunch. ChIndex == 2. Name: [UChannel] UniqueId: {tag}:{id}"
        )
    }

    #[test]
    fn queue_join_extracts_eos_id_and_name() {
        let m = classify_line(&queue_line_eos("Flux", "0002a7b9c1")).unwrap();
        assert_eq!(
            m,
            LineMatch::QueueJoin {
                player_id: "0002a7b9c1".into(),
                player_name: "Flux".into(),
            }
        );
    }

    #[test]
    fn queue_join_extracts_ps5_id() {
        let m = classify_line(&queue_line_ps5("ConsoleGuy", "ps5abc123")).unwrap();
        assert_eq!(
            m,
            LineMatch::QueueJoin {
                player_id: "ps5abc123".into(),
                player_name: "ConsoleGuy".into(),
            }
        );
    }

    #[test]
    fn registered_extracts_id() {
        let m = classify_line(&registered_line("0002a7b9c1")).unwrap();
        assert_eq!(
            m,
            LineMatch::Registered {
                player_id: "0002a7b9c1".into()
            }
        );
    }

    #[test]
    fn piped_eos_close_hits_strict_pattern_first() {
        let m = classify_line(&close_line("EOS", "|0002a7b9c1")).unwrap();
        assert_eq!(
            m,
            LineMatch::ChannelCloseEos {
                player_id: "0002a7b9c1".into()
            }
        );
    }

    #[test]
    fn ps5_close_falls_to_loose_pattern() {
        let m = classify_line(&close_line("PS5", "|ps5abc123")).unwrap();
        assert_eq!(
            m,
            LineMatch::ChannelCloseLoose {
                player_id: "ps5abc123".into()
            }
        );
    }

    #[test]
    fn unpiped_close_falls_to_loose_pattern() {
        // The strict EOS pattern requires the pipe; without it only the
        // loose form matches, for either tag
        let eos = classify_line(&close_line("EOS", "0002a7b9c1")).unwrap();
        assert_eq!(
            eos,
            LineMatch::ChannelCloseLoose {
                player_id: "0002a7b9c1".into()
            }
        );
        let ps5 = classify_line(&close_line("PS5", "ps5abc123")).unwrap();
        assert_eq!(
            ps5,
            LineMatch::ChannelCloseLoose {
                player_id: "ps5abc123".into()
            }
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        let line = registered_line("abc123").to_lowercase();
        assert!(classify_line(&line).is_some());
    }

    #[test]
    fn unrelated_lines_match_nothing() {
        assert_eq!(classify_line(""), None);
        assert_eq!(
            classify_line("[2025.08.07-12.41.03:217][412]LogSparseDelegate: sparse delegate fired"),
            None
        );
        assert_eq!(
            classify_line("LogNet: Join request: /Game/Maps/lobby/Lobby?Name=Flux&eosid=|abc"),
            None,
            "only the world_0 map path is a queue join"
        );
    }

    #[test]
    fn close_without_unique_id_matches_nothing() {
        assert_eq!(
            classify_line("UChannel::Close: Sending CloseBunch. ChIndex == 2."),
            None
        );
    }
}
