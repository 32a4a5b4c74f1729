//! Data-driven game balance
//!
//! Global values sit at the top level and level-dependent ones in `levels`,
//! indexed by tier (`min(level, levels.len())`). Rule variants such as the
//! goal hitbox and the lose rule are plain settings here too.
//! Speeds are in pixels per second; per-tick chances assume a 60 Hz tick.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, Validate};

/// How the firewall patrols when no decoy is out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolMode {
    /// Constant drift right, vertical ping-pong
    Drift,
    /// Drift with random speed blips, faster ping-pong, random flips
    Jittery,
    /// Paces itself against the player and tracks the player's height
    Tracking,
}

/// How the scanner homes in on a decoy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitProfile {
    /// No scanner on this tier
    Dormant,
    /// Constant speed, noisy heading
    Wobbly,
    /// Distance-scaled speed, target leading and lunges
    Predictive,
}

/// Shape used to test whether the player reached the security node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalHitbox {
    /// Player box against a square of side `2 * radius`
    #[default]
    Square,
    /// Centre distance against `half_size + radius`
    Circle,
}

/// What touching the firewall costs the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoseRule {
    /// Firewall deals damage; hitting zero health resets to the start
    #[default]
    Health,
    /// Any firewall touch resets to the start
    InstantReset,
}

/// Constants for one level tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTuning {
    pub firewall_speed: f32,
    pub firewall_width: f32,
    pub firewall_height: f32,
    pub firewall_vertical_speed: f32,
    /// Alpha wobble of the firewall (cosmetic)
    pub firewall_flicker: f32,
    pub patrol: PatrolMode,
    pub scanner_speed: f32,
    pub scanner_radius: f32,
    pub pursuit: PursuitProfile,
    /// Distance of the security node from the right edge
    pub node_margin: f32,
    /// Seconds the walls stay down after the wall-disable power
    pub wall_hide_duration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: f32,
    pub speed: f32,
    pub max_health: u32,
    pub start_x: f32,
    pub start_y: f32,
    /// Invulnerability after a firewall hit (seconds)
    pub damage_cooldown: f32,
    pub firewall_damage: u32,
    pub wall_damage: u32,
    /// Invulnerability after a wall bump (seconds)
    pub wall_damage_cooldown: f32,
    /// Health regained per second (0 disables)
    pub health_regen: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 30.0,
            speed: 300.0,
            max_health: 100,
            start_x: 200.0,
            start_y: 300.0,
            damage_cooldown: 1.0,
            firewall_damage: 5,
            wall_damage: 1,
            wall_damage_cooldown: 0.5,
            health_regen: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoyTuning {
    pub duration: f32,
    pub cooldown: f32,
    /// Decoy uses (campaign-wide) before scanners start hunting decoys
    pub scanner_threshold: u32,
}

impl Default for DecoyTuning {
    fn default() -> Self {
        Self {
            duration: 2.0,
            cooldown: 5.0,
            scanner_threshold: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardTuning {
    pub max_alive: usize,
    pub spawn_interval: f32,
    /// Pickup radius and half-extent of the wall-clearance box
    pub size: f32,
    /// Spawn attempts per level number at level start
    pub per_level: u32,
    pub placement_attempts: u32,
    pub edge_margin: f32,
    pub min_player_distance: f32,
    pub min_node_distance: f32,
    pub min_shard_distance: f32,
    /// Max spin in degrees per frame at 60 FPS
    pub max_spin: f32,
}

impl Default for ShardTuning {
    fn default() -> Self {
        Self {
            max_alive: 3,
            spawn_interval: 5.0,
            size: 15.0,
            per_level: 3,
            placement_attempts: 50,
            edge_margin: 50.0,
            min_player_distance: 100.0,
            min_node_distance: 100.0,
            min_shard_distance: 80.0,
            max_spin: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeTuning {
    pub wall_thickness: f32,
    pub wall_length: f32,
    /// Wall count for the baseline area; scaled by world area
    pub baseline_walls: u32,
    pub baseline_width: f32,
    pub baseline_height: f32,
    pub max_attempts: u32,
    pub edge_margin: f32,
    /// Clearance kept around the player start and the node
    pub safe_padding: f32,
}

impl Default for MazeTuning {
    fn default() -> Self {
        Self {
            wall_thickness: 10.0,
            wall_length: 50.0,
            baseline_walls: 20,
            baseline_width: 800.0,
            baseline_height: 600.0,
            max_attempts: 200,
            edge_margin: 50.0,
            safe_padding: 150.0,
        }
    }
}

/// Complete game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_level: u32,
    pub base_world_width: u32,
    pub base_world_height: u32,
    /// World growth per level past the first (0.3 = +30%)
    pub world_growth: f64,
    pub node_radius: f32,
    /// Score spent on the wall-disable power
    pub wall_disable_cost: u32,
    pub goal_hitbox: GoalHitbox,
    pub lose_rule: LoseRule,
    pub player: PlayerTuning,
    pub decoy: DecoyTuning,
    pub shards: ShardTuning,
    pub maze: MazeTuning,
    pub levels: Vec<LevelTuning>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_level: 3,
            base_world_width: 1600,
            base_world_height: 1200,
            world_growth: 0.3,
            node_radius: 20.0,
            wall_disable_cost: 5,
            goal_hitbox: GoalHitbox::Square,
            lose_rule: LoseRule::Health,
            player: PlayerTuning::default(),
            decoy: DecoyTuning::default(),
            shards: ShardTuning::default(),
            maze: MazeTuning::default(),
            levels: default_levels(),
        }
    }
}

fn default_levels() -> Vec<LevelTuning> {
    vec![
        LevelTuning {
            firewall_speed: 180.0,
            firewall_width: 8.0,
            firewall_height: 200.0,
            firewall_vertical_speed: 60.0,
            firewall_flicker: 20.0,
            patrol: PatrolMode::Drift,
            scanner_speed: 360.0,
            scanner_radius: 5.0,
            pursuit: PursuitProfile::Dormant,
            node_margin: 150.0,
            wall_hide_duration: 15.0,
        },
        LevelTuning {
            firewall_speed: 240.0,
            firewall_width: 10.0,
            firewall_height: 300.0,
            firewall_vertical_speed: 90.0,
            firewall_flicker: 25.0,
            patrol: PatrolMode::Jittery,
            scanner_speed: 240.0,
            scanner_radius: 4.0,
            pursuit: PursuitProfile::Wobbly,
            node_margin: 200.0,
            wall_hide_duration: 15.0,
        },
        LevelTuning {
            firewall_speed: 300.0,
            firewall_width: 12.0,
            firewall_height: 400.0,
            firewall_vertical_speed: 120.0,
            firewall_flicker: 30.0,
            patrol: PatrolMode::Tracking,
            scanner_speed: 360.0,
            scanner_radius: 5.0,
            pursuit: PursuitProfile::Predictive,
            node_margin: 250.0,
            wall_hide_duration: 15.0,
        },
    ]
}

impl Tuning {
    /// Tier constants for a level; levels past the table reuse the last row
    ///
    /// Callers must have validated the table (non-empty).
    pub fn level(&self, level: u32) -> &LevelTuning {
        let tier = (level.max(1) as usize).min(self.levels.len());
        &self.levels[tier - 1]
    }

    /// World (width, height) for a level
    pub fn world_dims(&self, level: u32) -> (u32, u32) {
        (
            crate::scaled_dimension(self.base_world_width, self.world_growth, level),
            crate::scaled_dimension(self.base_world_height, self.world_growth, level),
        )
    }
}

impl Validate for Tuning {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("levels table is empty".into()));
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid("max_level must be at least 1".into()));
        }
        if self.base_world_width == 0 || self.base_world_height == 0 {
            return Err(ConfigError::Invalid("base world size must be positive".into()));
        }
        if self.player.size <= 0.0 || self.player.speed <= 0.0 || self.player.max_health == 0 {
            return Err(ConfigError::Invalid(
                "player size, speed and max_health must be positive".into(),
            ));
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.firewall_width <= 0.0 || level.firewall_height <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "level tier {} firewall size must be positive",
                    i + 1
                )));
            }
            if level.wall_hide_duration < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "level tier {} wall_hide_duration is negative",
                    i + 1
                )));
            }
        }
        self.maze.validate()
    }
}

impl Validate for MazeTuning {
    fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("wall_thickness", self.wall_thickness),
            ("wall_length", self.wall_length),
            ("baseline_width", self.baseline_width),
            ("baseline_height", self.baseline_height),
        ];
        for (name, v) in sizes {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::Invalid(format!("maze {name} must be positive, got {v}")));
            }
        }
        if !(self.edge_margin.is_finite() && self.edge_margin >= 0.0) {
            return Err(ConfigError::Invalid("maze edge_margin must be non-negative".into()));
        }
        if !self.safe_padding.is_finite() {
            return Err(ConfigError::Invalid("maze safe_padding must be finite".into()));
        }
        Ok(())
    }
}
