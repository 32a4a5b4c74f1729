//! Scanner pursuit of the decoy
//!
//! A scanner only exists alongside a decoy. It homes on the decoy with a
//! tier-dependent profile and, on contact, takes the decoy down with it.

use glam::Vec2;
use rand::Rng;

use super::collision::circles_touch;
use super::state::{Decoy, Firewall, Scanner};
use crate::direction_to;
use crate::tuning::{LevelTuning, PursuitProfile};

const WOBBLE: f32 = 0.2;
const SPEED_DISTANCE_SCALE: f32 = 200.0;
const MIN_SPEED_FACTOR: f32 = 0.8;
const MAX_SPEED_FACTOR: f32 = 1.5;
const PREDICT_CHANCE: f64 = 0.5;
const LUNGE_CHANCE: f64 = 0.05;
const LUNGE_FACTOR: f32 = 1.5;
/// Spawn band kept clear of the top and bottom edges
const SPAWN_MARGIN: f32 = 50.0;

/// Result of one pursuit update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitOutcome {
    /// No scanner
    Idle,
    /// Scanner removed because its decoy is gone
    Dismissed,
    Chasing,
    /// Scanner reached the decoy; both are gone
    Caught,
}

/// Launch a scanner from the firewall, if this tier has one
pub fn spawn(
    fw: &Firewall,
    world_h: f32,
    level: &LevelTuning,
    rng: &mut impl Rng,
) -> Option<Scanner> {
    if level.pursuit == PursuitProfile::Dormant {
        return None;
    }
    let max_y = (world_h - SPAWN_MARGIN).max(SPAWN_MARGIN);
    let y = rng.random_range(SPAWN_MARGIN..=max_y).floor();
    Some(Scanner {
        pos: Vec2::new(fw.pos.x + fw.size.x / 2.0, y),
        speed: level.scanner_speed,
        radius: level.scanner_radius,
        profile: level.pursuit,
    })
}

/// Advance the scanner against the decoy
///
/// `decoy_radius` is the decoy's contact radius (half the player size).
/// Contact is checked before and after moving so a scanner already on top
/// of the decoy never flies past it.
pub fn update(
    scanner: &mut Option<Scanner>,
    decoy: &mut Option<Decoy>,
    decoy_radius: f32,
    dt: f32,
    rng: &mut impl Rng,
) -> PursuitOutcome {
    let Some(s) = scanner.as_mut() else {
        return PursuitOutcome::Idle;
    };
    let Some(target) = decoy.as_ref().map(|d| d.pos) else {
        *scanner = None;
        return PursuitOutcome::Dismissed;
    };

    let caught = |s: &Scanner| circles_touch(s.pos, s.radius, target, decoy_radius);

    if !caught(&*s) {
        let step = pursuit_step(s, target, dt, rng);
        s.pos += step;
    }

    if caught(&*s) {
        *scanner = None;
        *decoy = None;
        return PursuitOutcome::Caught;
    }
    PursuitOutcome::Chasing
}

/// Displacement for one tick under the scanner's profile
fn pursuit_step(s: &Scanner, target: Vec2, dt: f32, rng: &mut impl Rng) -> Vec2 {
    let (dir, distance) = direction_to(s.pos, target);
    match s.profile {
        PursuitProfile::Dormant => Vec2::ZERO,
        PursuitProfile::Wobbly => {
            let noise = Vec2::new(
                rng.random_range(-WOBBLE..=WOBBLE),
                rng.random_range(-WOBBLE..=WOBBLE),
            );
            renormalize(dir + noise) * s.speed * dt
        }
        PursuitProfile::Predictive => {
            let speed_factor =
                (distance / SPEED_DISTANCE_SCALE).clamp(MIN_SPEED_FACTOR, MAX_SPEED_FACTOR);
            let mut heading = dir;
            if rng.random_bool(PREDICT_CHANCE) {
                let lead = Vec2::new(
                    rng.random_range(-10.0f32..=30.0),
                    rng.random_range(-20.0f32..=20.0),
                );
                let (lead_dir, _) = direction_to(s.pos, target + lead);
                heading = renormalize((dir + lead_dir) / 2.0);
            }
            let mut step = heading * s.speed * speed_factor * dt;
            if rng.random_bool(LUNGE_CHANCE) {
                step += heading * s.speed * LUNGE_FACTOR * dt;
            }
            step
        }
    }
}

/// Normalize with the same 0.1 length floor used for direction vectors
#[inline]
fn renormalize(v: Vec2) -> Vec2 {
    v / v.length().max(0.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 1.0 / 60.0;
    const DECOY_RADIUS: f32 = 15.0;

    fn scanner(level: u32, pos: Vec2) -> Scanner {
        let tuning = Tuning::default();
        let lvl = tuning.level(level);
        Scanner {
            pos,
            speed: lvl.scanner_speed,
            radius: lvl.scanner_radius,
            profile: lvl.pursuit,
        }
    }

    fn decoy(pos: Vec2) -> Option<Decoy> {
        Some(Decoy {
            pos,
            remaining: 2.0,
        })
    }

    #[test]
    fn test_no_scanner_on_level_one() {
        let tuning = Tuning::default();
        let fw = Firewall::for_level(tuning.level(1), 0.0);
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(spawn(&fw, 1200.0, tuning.level(1), &mut rng).is_none());
    }

    #[test]
    fn test_spawn_at_firewall() {
        let tuning = Tuning::default();
        let mut fw = Firewall::for_level(tuning.level(2), 0.0);
        fw.pos.x = 300.0;
        let mut rng = Pcg32::seed_from_u64(1);
        let s = spawn(&fw, 1200.0, tuning.level(2), &mut rng).unwrap();
        assert_eq!(s.pos.x, 305.0);
        assert!(s.pos.y >= 50.0 && s.pos.y <= 1150.0);
        assert_eq!(s.profile, PursuitProfile::Wobbly);
        assert_eq!(s.radius, 4.0);
    }

    #[test]
    fn test_dismissed_without_decoy() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut s = Some(scanner(2, Vec2::ZERO));
        let mut d = None;
        let out = update(&mut s, &mut d, DECOY_RADIUS, DT, &mut rng);
        assert_eq!(out, PursuitOutcome::Dismissed);
        assert!(s.is_none());
    }

    #[test]
    fn test_idle_without_scanner() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut s = None;
        let mut d = decoy(Vec2::ZERO);
        assert_eq!(update(&mut s, &mut d, DECOY_RADIUS, DT, &mut rng), PursuitOutcome::Idle);
        assert!(d.is_some());
    }

    #[test]
    fn test_contact_destroys_both() {
        for level in [2, 3] {
            let mut rng = Pcg32::seed_from_u64(level as u64);
            let target = Vec2::new(500.0, 500.0);
            // Inside scanner_radius + decoy radius
            let mut s = Some(scanner(level, target + Vec2::new(18.0, 0.0)));
            let mut d = decoy(target);
            let out = update(&mut s, &mut d, DECOY_RADIUS, DT, &mut rng);
            assert_eq!(out, PursuitOutcome::Caught);
            assert!(s.is_none());
            assert!(d.is_none());
        }
    }

    #[test]
    fn test_closes_distance_every_profile() {
        for level in [2, 3] {
            let mut rng = Pcg32::seed_from_u64(99);
            let target = Vec2::new(800.0, 600.0);
            let mut s = Some(scanner(level, Vec2::new(100.0, 100.0)));
            let mut d = decoy(target);
            let start = s.as_ref().unwrap().pos.distance(target);

            for _ in 0..30 {
                update(&mut s, &mut d, DECOY_RADIUS, DT, &mut rng);
            }
            let now = s.as_ref().unwrap().pos.distance(target);
            assert!(now < start - 50.0, "tier {level} didn't close in: {start} -> {now}");
        }
    }

    #[test]
    fn test_eventually_catches() {
        for level in [2, 3] {
            let mut rng = Pcg32::seed_from_u64(7);
            let mut s = Some(scanner(level, Vec2::new(100.0, 1000.0)));
            let mut d = decoy(Vec2::new(900.0, 200.0));
            let mut caught = false;
            for _ in 0..600 {
                if update(&mut s, &mut d, DECOY_RADIUS, DT, &mut rng) == PursuitOutcome::Caught {
                    caught = true;
                    break;
                }
            }
            assert!(caught, "tier {level} never caught the decoy");
        }
    }

    #[test]
    fn test_wobbly_moves_at_constant_speed() {
        let mut rng = Pcg32::seed_from_u64(4);
        let s = scanner(2, Vec2::new(0.0, 0.0));
        let step = pursuit_step(&s, Vec2::new(1000.0, 0.0), DT, &mut rng);
        assert!((step.length() - s.speed * DT).abs() < 1e-3);
    }
}
