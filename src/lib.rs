//! Hacker Duel - a top-down stealth-chase arcade game core
//!
//! Core modules:
//! - `sim`: Simulation (maze, movement, firewall/scanner AI, progression)
//! - `tuning`: Data-driven game balance, indexed by level tier
//! - `settings`: Presentation preferences applied to outgoing events
//! - `config`: JSON config loading

pub mod config;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use config::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frames per second the per-frame tuning values were authored at
    pub const FRAME_RATE: f32 = 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest dt a single tick will accept (seconds)
    pub const MAX_TICK_DT: f32 = 0.25;

    /// Viewport dimensions (the camera window onto the world)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Seed salt for the cosmetic RNG stream
    pub const COSMETIC_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;
}

/// World dimension for a level: `trunc(base * (1 + growth * (level - 1)))`
///
/// Computed in f64 so 1600 * 1.3 lands on 2080 rather than 2079.
#[inline]
pub fn scaled_dimension(base: u32, growth: f64, level: u32) -> u32 {
    let factor = 1.0 + f64::from(level.saturating_sub(1)) * growth;
    (f64::from(base) * factor) as u32
}

/// Unit vector from `from` toward `to`, with the distance floored so a
/// zero-length offset never divides by zero
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> (Vec2, f32) {
    let delta = to - from;
    let distance = delta.length().max(0.1);
    (delta / distance, distance)
}

/// Clamp a centre position so a square of `half` extent stays inside `bounds`
#[inline]
pub fn clamp_to_bounds(pos: Vec2, half: f32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(half, (bounds.x - half).max(half)),
        pos.y.clamp(half, (bounds.y - half).max(half)),
    )
}
