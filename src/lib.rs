//! Pure state-transition engine for grid Snake.
//!
//! A [`GameState`] is an immutable value. Every operation borrows a state and
//! returns a new one, so independent sessions can be advanced on separate
//! threads without synchronization.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod snake;

pub use config::{GameConfig, GridSize};
pub use error::{ConfigError, ParseDirectionError, TurnRejected};
pub use game::{Event, GameState, GameStatus, LayoutSpec, change_direction, new_game, step_game};
pub use input::{Direction, GameInput};
pub use snake::{Position, Snake};
