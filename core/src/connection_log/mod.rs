//! Lexical classification of raw game-server log lines.
//!
//! Four record shapes matter for connection tracking:
//! - join request (player enters the queue)
//! - successful registration (player enters the game session)
//! - channel close, EOS-tagged
//! - channel close, PS5-or-EOS-tagged (looser alternate form)
//!
//! This module is purely lexical. Close records cannot be classified into a
//! lifecycle event without consulting per-server state, so the output here is
//! a [`LineMatch`] that the tracker resolves under the server's lock.

mod patterns;

pub use patterns::{LineMatch, classify_line};
