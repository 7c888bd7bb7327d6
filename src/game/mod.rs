//! # Game State Machine
//!
//! A session walks through a fixed sequence of phases, narrating through a
//! [`Terminal`](crate::terminal::Terminal) and asking an
//! [`Oracle`](crate::oracle::Oracle) for riddles, hints and verdicts:
//!
//! ```text
//! Boot -> Midnight -> Appear -> Question -> Guessing -> {Win, Lose} -> Restart -> {Question, End}
//! ```
//!
//! - [`state`] - the single [`GameState`] record and the [`Phase`] enum
//! - [`session`] - the [`Game`] runner and one async function per phase
//! - [`loading`] - the dotted indicator shown while an oracle call is out
//! - [`text`] - word wrap and the attempts gauge
//! - [`script`] and [`art`] - narration lines and block art
//!
//! A riddle that cannot be fetched stops the session where it stands
//! ([`SessionEnd::RiddleUnavailable`]); declining to play again ends it with
//! [`SessionEnd::Declined`].

pub mod art;
pub mod loading;
pub mod script;
pub mod session;
pub mod state;
pub mod text;

pub use session::{Game, SessionEnd, DEFAULT_WRAP_WIDTH};
pub use state::{GameState, Phase, MAX_ATTEMPTS};
pub use text::{gems_display, wrap_text};
