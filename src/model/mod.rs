//! Host-facing data model
//!
//! Mirrors the simulation host's schema: the units delivered in each tick's
//! snapshot, the static game constants, and the command record sent back.
//! These types carry geometry helpers only - all decision logic lives in
//! `crate::strategy`.

pub mod command;
pub mod game;
pub mod units;
pub mod world;

pub use command::{ActionKind, Command};
pub use game::GameConstants;
pub use units::{
    Bonus, Building, BuildingKind, Faction, Minion, MinionKind, Skill, Tree, Wizard,
};
pub use world::{Lane, World};
