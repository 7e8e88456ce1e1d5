//! Canvas Blaster - a frame-driven arcade shooter simulation.
//!
//! - `entities`: plain game data (player, bullets, foes, snapshot)
//! - `compute`: the per-frame simulation step
//! - `config`: tunable constants, loadable from JSON
//! - `input`: key-name tracking with a one-shot fire edge
//! - `display`: terminal rendering of a snapshot

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod input;

pub use config::{ConfigError, DifficultyPolicy, GameConfig};
pub use entities::{FrameInput, GameState, GameStatus, Snapshot};
pub use input::{InputState, Key};
