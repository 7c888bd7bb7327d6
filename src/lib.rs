//! # Lady Black - a riddle game played in the terminal
//!
//! At midnight a ghost appears in the drawing room of Black Manor and poses a
//! riddle. The player has five attempts; every wrong answer buys a hint that
//! grows plainer as attempts run out. Riddles, hints and fuzzy verdicts come
//! from a language model behind the [`oracle`] module.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ladyblack::config::Config;
//! use ladyblack::game::Game;
//! use ladyblack::terminal::ConsoleTerminal;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("ladyblack.toml").await?;
//!     let oracle = ladyblack::oracle::from_config(&config.oracle)?;
//!     let term = ConsoleTerminal::stdio(config.display.color, config.display.pacing);
//!
//!     let mut game = Game::new(term, oracle).with_wrap_width(config.display.wrap_width);
//!     let end = game.run().await?;
//!     println!("session ended: {:?}", end);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`terminal`] - output/input surface: typewriter text, art, input prompts
//! - [`game`] - the phase state machine and everything it displays
//! - [`oracle`] - riddle generation, hints and guess judgement
//! - [`config`] - TOML configuration
//! - [`validation`] - guess checks applied before the oracle is asked
//! - [`stats`] - process-wide session counters
//! - [`logutil`] - log-safe rendering of player and model text
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │      Game       │ ← phases, attempts, hints
//! └─────────────────┘
//!      │        │
//! ┌─────────┐ ┌─────────┐
//! │Terminal │ │ Oracle  │ ← display/input, and model-backed content
//! └─────────┘ └─────────┘
//! ```

pub mod config;
pub mod game;
pub mod logutil;
pub mod oracle;
pub mod stats;
pub mod terminal;
pub mod validation;
