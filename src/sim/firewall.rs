//! Firewall movement
//!
//! While a decoy is out the firewall is lured toward it on every tier.
//! Otherwise it patrols according to the tier's `PatrolMode`. Per-tick
//! chances are tuned for a 60 Hz tick.

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{Firewall, Heading};
use crate::consts::{FRAME_RATE, VIEWPORT_WIDTH};
use crate::tuning::PatrolMode;

/// Distance at which the decoy lure reaches full horizontal speed
const LURE_DISTANCE_SCALE: f32 = 300.0;
/// Vertical offset (px) below which the lure leaves y alone
const LURE_DEADZONE: f32 = 10.0;
const LURE_VERTICAL_SCALE: f32 = 200.0;
const LURE_JITTER_CHANCE: f64 = 0.2;

const JITTERY_BLIP_CHANCE: f64 = 0.05;
const JITTERY_FLIP_CHANCE: f64 = 0.02;
const JITTERY_VERTICAL_BOOST: f32 = 1.5;

const TRACKING_PACE_CHANCE: f64 = 0.3;
const TRACKING_CATCH_UP: f32 = 1.3;
const TRACKING_EASE_OFF: f32 = 0.9;
const TRACKING_VERTICAL_CHANCE: f64 = 0.5;
const TRACKING_VERTICAL_BOOST: f32 = 2.0;

const BASE_ALPHA: f32 = 200.0;

/// What the firewall can see this tick
#[derive(Debug, Clone, Copy)]
pub struct HazardView {
    pub world: Vec2,
    pub level: u32,
    /// Player centre
    pub player: Vec2,
    /// Live decoy centre, if any
    pub decoy: Option<Vec2>,
}

/// Advance the firewall by one tick
pub fn update(fw: &mut Firewall, view: &HazardView, dt: f32, rng: &mut impl Rng) {
    match view.decoy {
        Some(decoy) => chase_decoy(fw, decoy, view.level, dt, rng),
        None => match fw.patrol {
            PatrolMode::Drift => drift(fw, view.world.y, dt),
            PatrolMode::Jittery => jittery(fw, view.world.y, dt, rng),
            PatrolMode::Tracking => tracking(fw, view, dt, rng),
        },
    }

    if fw.pos.x > view.world.x {
        fw.pos.x = -fw.size.x;
        let max_y = (view.world.y - fw.size.y).max(0.0);
        fw.pos.y = rng.random_range(0.0..=max_y).floor();
    }

    clamp_vertical(fw, view.world.y);
}

/// Whether the firewall overlaps the player box
#[inline]
pub fn touches(fw: &Firewall, player: &Rect) -> bool {
    fw.rect().intersects(player)
}

/// Per-frame alpha wobble for rendering (cosmetic stream only)
pub fn flicker_alpha(fw: &Firewall, fx_rng: &mut impl Rng) -> u8 {
    let wobble = if fw.flicker > 0.0 {
        fx_rng.random_range(-fw.flicker..=fw.flicker)
    } else {
        0.0
    };
    (BASE_ALPHA + wobble).clamp(100.0, 255.0) as u8
}

fn chase_decoy(fw: &mut Firewall, decoy: Vec2, level: u32, dt: f32, rng: &mut impl Rng) {
    let center = fw.center();
    let delta = decoy - center;
    let distance = delta.length();
    let level = level as f32;

    if delta.x != 0.0 {
        let attraction = 1.0 + level * 0.2;
        let speed_factor = (distance / LURE_DISTANCE_SCALE).clamp(1.0, 2.0);
        let step = (fw.speed * speed_factor * attraction * dt).min(delta.x.abs());
        fw.pos.x += step * delta.x.signum();
    }

    if delta.y.abs() > LURE_DEADZONE {
        let attraction = 0.5 + level * 0.25;
        let speed_factor = (delta.y.abs() / LURE_VERTICAL_SCALE).clamp(0.5, 1.5);
        fw.pos.y += fw.vertical_speed * speed_factor * attraction * dt * delta.y.signum();
    }

    if rng.random_bool(LURE_JITTER_CHANCE) {
        fw.pos.y += rng.random_range(-1.0f32..=1.0) * dt * FRAME_RATE;
    }
}

fn drift(fw: &mut Firewall, world_h: f32, dt: f32) {
    fw.pos.x += fw.speed * dt;
    ping_pong(fw, world_h, fw.vertical_speed * dt);
}

fn jittery(fw: &mut Firewall, world_h: f32, dt: f32, rng: &mut impl Rng) {
    let variation = if rng.random_bool(JITTERY_BLIP_CHANCE) {
        rng.random_range(0.8f32..=1.2)
    } else {
        1.0
    };
    fw.pos.x += fw.speed * variation * dt;

    if rng.random_bool(JITTERY_FLIP_CHANCE) {
        fw.heading = fw.heading.flipped();
    }
    ping_pong(fw, world_h, fw.vertical_speed * JITTERY_VERTICAL_BOOST * dt);
}

fn tracking(fw: &mut Firewall, view: &HazardView, dt: f32, rng: &mut impl Rng) {
    let pace = if rng.random_bool(TRACKING_PACE_CHANCE) {
        if view.player.x > fw.pos.x + VIEWPORT_WIDTH / 2.0 {
            TRACKING_CATCH_UP
        } else {
            TRACKING_EASE_OFF
        }
    } else {
        1.0
    };
    fw.pos.x += fw.speed * pace * dt;

    let step = fw.vertical_speed * TRACKING_VERTICAL_BOOST * dt;
    if rng.random_bool(TRACKING_VERTICAL_CHANCE) {
        let center_y = fw.center().y;
        if view.player.y > center_y {
            fw.pos.y += step;
        } else if view.player.y < center_y {
            fw.pos.y -= step;
        }
    } else {
        ping_pong(fw, view.world.y, step);
    }
}

/// Step along the current heading, turning around at the world edges
fn ping_pong(fw: &mut Firewall, world_h: f32, step: f32) {
    fw.pos.y += step * fw.heading.sign();
    if fw.pos.y <= 0.0 {
        fw.heading = Heading::Down;
    } else if fw.pos.y + fw.size.y >= world_h {
        fw.heading = Heading::Up;
    }
}

fn clamp_vertical(fw: &mut Firewall, world_h: f32) {
    let max_y = (world_h - fw.size.y).max(0.0);
    fw.pos.y = fw.pos.y.clamp(0.0, max_y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;

    fn firewall(level: u32, y: f32) -> Firewall {
        let tuning = Tuning::default();
        Firewall::for_level(tuning.level(level), y)
    }

    fn view(level: u32) -> HazardView {
        HazardView {
            world: Vec2::new(1600.0, 1200.0),
            level,
            player: Vec2::new(200.0, 300.0),
            decoy: None,
        }
    }

    #[test]
    fn test_level_one_bounces_off_top() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut fw = firewall(1, 0.0);
        fw.heading = Heading::Up;

        update(&mut fw, &view(1), DT, &mut rng);
        assert_eq!(fw.heading, Heading::Down);
        assert!(fw.pos.y >= 0.0);

        update(&mut fw, &view(1), DT, &mut rng);
        assert!(fw.pos.y > 0.0);
    }

    #[test]
    fn test_level_one_bounces_off_bottom() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut fw = firewall(1, 1000.0);
        fw.heading = Heading::Down;
        update(&mut fw, &view(1), DT, &mut rng);
        assert_eq!(fw.heading, Heading::Up);
        assert!(fw.pos.y + fw.size.y <= 1200.0);
    }

    #[test]
    fn test_level_one_drifts_right_at_speed() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut fw = firewall(1, 500.0);
        fw.pos.x = 100.0;
        update(&mut fw, &view(1), 0.5, &mut rng);
        assert!((fw.pos.x - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_wraps_to_left_edge() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut fw = firewall(1, 500.0);
        fw.pos.x = 1599.0;
        update(&mut fw, &view(1), DT, &mut rng);
        assert_eq!(fw.pos.x, -fw.size.x);
        assert!(fw.pos.y >= 0.0 && fw.pos.y + fw.size.y <= 1200.0);
    }

    #[test]
    fn test_stays_in_vertical_bounds_every_tier() {
        for level in 1..=3 {
            let mut rng = Pcg32::seed_from_u64(level as u64);
            let mut fw = firewall(level, 0.0);
            let mut v = view(level);
            for i in 0..5000 {
                v.player.y = if i % 700 < 350 { 0.0 } else { 1200.0 };
                update(&mut fw, &v, DT, &mut rng);
                assert!(fw.pos.y >= 0.0, "tier {level} went above the world");
                assert!(fw.pos.y + fw.size.y <= 1200.0, "tier {level} went below the world");
            }
        }
    }

    #[test]
    fn test_decoy_lures_horizontally() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fw = firewall(2, 500.0);
        fw.pos.x = 100.0;
        let mut v = view(2);
        v.decoy = Some(Vec2::new(900.0, 650.0));
        let start = fw.pos.x;
        for _ in 0..30 {
            update(&mut fw, &v, DT, &mut rng);
        }
        assert!(fw.pos.x > start);

        v.decoy = Some(Vec2::new(-500.0, 650.0));
        let before = fw.pos.x;
        update(&mut fw, &v, DT, &mut rng);
        assert!(fw.pos.x < before, "lure pulls left too");
    }

    #[test]
    fn test_decoy_lure_does_not_overshoot() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fw = firewall(3, 500.0);
        fw.pos.x = 100.0;
        let mut v = view(3);
        let target_x = fw.center().x + 1.0;
        v.decoy = Some(Vec2::new(target_x, fw.center().y));
        update(&mut fw, &v, DT, &mut rng);
        assert!((fw.center().x - target_x).abs() < 1e-3);
    }

    #[test]
    fn test_decoy_lures_vertically_outside_deadzone() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut fw = firewall(1, 100.0);
        fw.pos.x = 400.0;
        let mut v = view(1);
        v.decoy = Some(Vec2::new(fw.center().x, 900.0));
        let start = fw.pos.y;
        for _ in 0..60 {
            update(&mut fw, &v, DT, &mut rng);
        }
        assert!(fw.pos.y > start + 20.0);
    }

    #[test]
    fn test_flicker_alpha_range() {
        let mut fx = Pcg32::seed_from_u64(3);
        let fw = firewall(3, 0.0);
        for _ in 0..200 {
            let alpha = flicker_alpha(&fw, &mut fx);
            assert!((170..=230).contains(&alpha));
        }
    }

    #[test]
    fn test_touches_player() {
        let mut fw = firewall(1, 200.0);
        fw.pos.x = 190.0;
        assert!(touches(&fw, &Rect::centered(Vec2::new(200.0, 300.0), 30.0)));
        assert!(!touches(&fw, &Rect::centered(Vec2::new(400.0, 300.0), 30.0)));
    }
}
