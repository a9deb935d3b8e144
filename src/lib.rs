pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod river;
pub mod snapshot;

pub use config::{ConfigError, GameConfig};
pub use entities::{GameOverCause, GameStatus, Input, TargetKind};
pub use game::Game;
pub use snapshot::RenderState;
