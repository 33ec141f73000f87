pub mod config;
pub mod error;
pub mod types;

pub use config::{AvoidanceMode, NavigationMode, StrategyConfig};
pub use error::{ArenaError, Result};
