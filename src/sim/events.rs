//! Events sent from the simulation to the presentation layer
//!
//! Fire-and-forget: the core pushes them into a caller-owned buffer during a
//! tick and never waits on them. A backend with no audio or no screen shake
//! just drops the ones it can't use.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundKind {
    Impact,
    Collect,
    AmbientLoop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    /// Firewall contact or respawn
    SystemAlert,
    /// Level complete
    AccessGranted,
    /// Final level complete
    ServerBreached,
    WallsDisabled,
    WallsRestored,
    /// Decoy cooldown finished
    DecoyReady,
    /// First decoy of the campaign
    DecoyTutorial,
    /// First shard of the campaign
    ShardTutorial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageSource {
    Firewall,
    Wall,
}

/// Per-shard render data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShardView {
    pub pos: Vec2,
    pub rotation: f32,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub level: u32,
    pub score: u32,
    pub world: (u32, u32),
    pub player: Vec2,
    pub health: u32,
    pub node: Vec2,
    pub firewall: Rect,
    /// Firewall alpha for this frame (cosmetic)
    pub firewall_alpha: u8,
    pub decoy: Option<Vec2>,
    pub scanner: Option<Vec2>,
    pub shards: Vec<ShardView>,
    pub walls_visible: bool,
    /// Seconds until hidden walls come back
    pub walls_restore_in: Option<f32>,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EntitiesUpdated(EntitySnapshot),
    PlaySound(SoundKind),
    Shake { duration: f32, intensity: f32 },
    ShowAlert(AlertKind),
    LevelTransition {
        level: u32,
        world_width: u32,
        world_height: u32,
    },
    PlayerDamaged {
        source: DamageSource,
        amount: u32,
        health: u32,
    },
    PlayerDied { deaths: u32 },
    ShardCollected { score: u32 },
    DecoySpawned { pos: Vec2 },
    DecoyExpired,
    DecoyCaught,
    ScannerSpawned { pos: Vec2 },
}

impl GameEvent {
    pub fn shake(duration: f32, intensity: f32) -> Self {
        GameEvent::Shake {
            duration,
            intensity,
        }
    }
}
