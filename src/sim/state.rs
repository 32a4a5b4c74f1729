//! Game state and core simulation types
//!
//! One `GameState` owns every entity. Level-scoped parts are rebuilt by
//! `progression::reset_level`; campaign-scoped counters (score, decoy uses,
//! deaths) survive it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{EntitySnapshot, ShardView};
use super::rect::Rect;
use crate::consts::COSMETIC_STREAM_SALT;
use crate::tuning::{LevelTuning, PatrolMode, PursuitProfile, Tuning};

/// Current phase of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal play
    Active,
    /// Security node reached; gameplay frozen until the player advances
    Won,
}

/// Vertical travel direction of the firewall (screen y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up => -1.0,
            Heading::Down => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum WallPhase {
    Visible,
    /// `elapsed` is f64: summing thousands of f32 ticks drifts short
    Hidden { elapsed: f64, duration: f32 },
}

/// Whether maze walls currently block movement
///
/// `hide` is the only way to turn walls off and `advance` reaching the end of
/// the window is the only way back on, so logical and drawn state can't
/// drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallVisibility(WallPhase);

impl Default for WallVisibility {
    fn default() -> Self {
        Self(WallPhase::Visible)
    }
}

impl WallVisibility {
    pub fn is_visible(&self) -> bool {
        matches!(self.0, WallPhase::Visible)
    }

    /// Seconds until walls return, if hidden
    pub fn remaining(&self) -> Option<f32> {
        match self.0 {
            WallPhase::Visible => None,
            WallPhase::Hidden { elapsed, duration } => {
                Some((f64::from(duration) - elapsed).max(0.0) as f32)
            }
        }
    }

    /// Hide the walls for `duration` seconds. No-op (false) if already hidden.
    pub fn hide(&mut self, duration: f32) -> bool {
        match self.0 {
            WallPhase::Visible => {
                self.0 = WallPhase::Hidden {
                    elapsed: 0.0,
                    duration,
                };
                true
            }
            WallPhase::Hidden { .. } => false,
        }
    }

    /// Advance the hide timer. Returns true on the tick walls come back.
    pub fn advance(&mut self, dt: f32) -> bool {
        if let WallPhase::Hidden { elapsed, duration } = self.0 {
            let elapsed = elapsed + f64::from(dt);
            if elapsed >= f64::from(duration) {
                self.0 = WallPhase::Visible;
                return true;
            }
            self.0 = WallPhase::Hidden { elapsed, duration };
        }
        false
    }
}

/// The level's playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: u32,
    pub height: u32,
    pub walls: Vec<Rect>,
    pub visibility: WallVisibility,
}

impl World {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
            visibility: WallVisibility::default(),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Walls that currently block movement (none while hidden)
    pub fn solid_walls(&self) -> &[Rect] {
        if self.visibility.is_visible() {
            &self.walls
        } else {
            &[]
        }
    }
}

/// The player avatar (position is the centre of its box)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    /// Seconds of invulnerability left
    pub damage_cooldown: f32,
    /// Fractional regen carried between ticks
    #[serde(default)]
    pub regen_carry: f32,
}

impl Player {
    pub fn new(pos: Vec2, size: f32, max_health: u32) -> Self {
        Self {
            pos,
            size,
            health: max_health,
            max_health,
            damage_cooldown: 0.0,
            regen_carry: 0.0,
        }
    }

    #[inline]
    pub fn half(&self) -> f32 {
        self.size / 2.0
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Box the player would occupy at `pos`
    #[inline]
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::centered(pos, self.size)
    }

    pub fn can_take_damage(&self) -> bool {
        self.damage_cooldown <= 0.0
    }

    /// Apply damage if not invulnerable. Returns true if it landed.
    pub fn take_damage(&mut self, amount: u32, cooldown: f32) -> bool {
        if !self.can_take_damage() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.damage_cooldown = cooldown;
        true
    }

    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    pub fn restore(&mut self) {
        self.health = self.max_health;
        self.regen_carry = 0.0;
    }
}

/// The level goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityNode {
    pub pos: Vec2,
    pub radius: f32,
}

impl SecurityNode {
    /// Square footprint used by the square hitbox and the maze safe area
    pub fn rect(&self) -> Rect {
        Rect::centered(self.pos, self.radius * 2.0)
    }
}

/// The patrolling hazard (position is the top-left corner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Firewall {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub vertical_speed: f32,
    pub heading: Heading,
    pub patrol: PatrolMode,
    pub flicker: f32,
}

impl Firewall {
    /// Firewall for a level tier, parked just off the left edge at `y`
    pub fn for_level(level: &LevelTuning, y: f32) -> Self {
        Self {
            pos: Vec2::new(-level.firewall_width, y),
            size: Vec2::new(level.firewall_width, level.firewall_height),
            speed: level.firewall_speed,
            vertical_speed: level.firewall_vertical_speed,
            heading: Heading::Down,
            patrol: level.patrol,
            flicker: level.firewall_flicker,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Stationary bait left where the player stood
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decoy {
    pub pos: Vec2,
    pub remaining: f32,
}

/// Decoy hunter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scanner {
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub profile: PursuitProfile,
}

/// Collectible worth one point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataShard {
    pub id: u32,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Degrees per second
    pub rotation_speed: f32,
}

/// One-shot hints already shown this campaign
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TutorialFlags {
    pub decoy_shown: bool,
    pub shard_shown: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub phase: GamePhase,
    /// Campaign score (shards collected minus spent)
    pub score: u32,
    /// Campaign decoy uses; drives scanner escalation
    pub decoy_uses: u32,
    /// Campaign health-depletion resets
    pub deaths: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub world: World,
    pub player: Player,
    pub node: SecurityNode,
    pub firewall: Firewall,
    pub decoy: Option<Decoy>,
    /// Seconds until the decoy can be used again
    pub decoy_cooldown: f32,
    pub scanner: Option<Scanner>,
    /// Live shards (sorted by id)
    pub shards: Vec<DataShard>,
    pub shard_spawn_timer: f32,
    pub tutorials: TutorialFlags,
    /// Gameplay randomness: maze, AI, spawns
    pub rng: Pcg32,
    /// Cosmetic randomness: shard spin, firewall flicker
    pub fx_rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new campaign at level 1
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let level = tuning.level(1).clone();
        let (width, height) = tuning.world_dims(1);
        let start = Vec2::new(tuning.player.start_x, tuning.player.start_y);
        let mut state = Self {
            seed,
            level: 1,
            phase: GamePhase::Active,
            score: 0,
            decoy_uses: 0,
            deaths: 0,
            time_ticks: 0,
            world: World::new(width, height),
            player: Player::new(start, tuning.player.size, tuning.player.max_health),
            node: SecurityNode {
                pos: Vec2::ZERO,
                radius: tuning.node_radius,
            },
            firewall: Firewall::for_level(&level, 0.0),
            decoy: None,
            decoy_cooldown: 0.0,
            scanner: None,
            shards: Vec::new(),
            shard_spawn_timer: 0.0,
            tutorials: TutorialFlags::default(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ COSMETIC_STREAM_SALT),
            next_id: 1,
            tuning,
        };

        super::progression::reset_level(&mut state, 1);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Where the player (re)spawns on this level
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.tuning.player.start_x, self.tuning.player.start_y)
    }

    /// Constants for the current level tier
    pub fn level_tuning(&self) -> &LevelTuning {
        self.tuning.level(self.level)
    }

    pub fn decoy_ready(&self) -> bool {
        self.decoy_cooldown <= 0.0
    }

    pub fn decoy_active(&self) -> bool {
        self.decoy.is_some()
    }

    pub fn scanner_active(&self) -> bool {
        self.scanner.is_some()
    }

    pub fn is_won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Final level beaten
    pub fn campaign_complete(&self) -> bool {
        self.is_won() && self.level >= self.tuning.max_level
    }

    /// Render data for this frame
    pub fn snapshot(&self, firewall_alpha: u8) -> EntitySnapshot {
        EntitySnapshot {
            level: self.level,
            score: self.score,
            world: (self.world.width, self.world.height),
            player: self.player.pos,
            health: self.player.health,
            node: self.node.pos,
            firewall: self.firewall.rect(),
            firewall_alpha,
            decoy: self.decoy.as_ref().map(|d| d.pos),
            scanner: self.scanner.as_ref().map(|s| s.pos),
            shards: self
                .shards
                .iter()
                .map(|s| ShardView {
                    pos: s.pos,
                    rotation: s.rotation,
                })
                .collect(),
            walls_visible: self.world.visibility.is_visible(),
            walls_restore_in: self.world.visibility.remaining(),
            won: self.is_won(),
        }
    }
}
