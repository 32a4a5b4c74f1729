//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, with cosmetic draws on their own stream
//! - Stable iteration order (shards by entity ID)
//! - No rendering, audio or platform dependencies; those hear about the
//!   game through `GameEvent`s

pub mod autopilot;
pub mod collision;
pub mod events;
pub mod firewall;
pub mod maze;
pub mod progression;
pub mod rect;
pub mod scanner;
pub mod state;
pub mod tick;

pub use collision::{MoveIntent, MoveOutcome, hits_wall, reaches_goal, resolve_move};
pub use events::{AlertKind, DamageSource, EntitySnapshot, GameEvent, ShardView, SoundKind};
pub use progression::{advance_level, reset_level};
pub use rect::Rect;
pub use state::{
    DataShard, Decoy, Firewall, GamePhase, GameState, Heading, Player, Scanner, SecurityNode,
    WallVisibility, World,
};
pub use tick::{TickInput, tick};
