//! Demo autopilot
//!
//! Picks inputs from the current state alone. It keeps no memory between
//! ticks, so an idle-mode run is as reproducible as a scripted one.

use glam::Vec2;

use super::collision::hits_wall;
use super::state::GameState;
use super::tick::TickInput;

/// Firewall distance that counts as a threat
const THREAT_DISTANCE: f32 = 260.0;
/// Shards farther than this are left for later
const SHARD_DETOUR: f32 = 350.0;
/// Axis offsets smaller than this don't press a key
const DEADZONE: f32 = 4.0;
/// Look-ahead for wall checks
const PROBE: f32 = 20.0;

/// Inputs the autopilot would press this tick
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    if state.is_won() {
        input.advance = !state.campaign_complete();
        return input;
    }

    let player = state.player.pos;
    let fw = state.firewall.rect();
    let nearest_fw = player.clamp(Vec2::new(fw.x, fw.y), Vec2::new(fw.right(), fw.bottom()));
    let threatened = player.distance(nearest_fw) < THREAT_DISTANCE;

    if threatened && state.decoy_ready() && !state.decoy_active() {
        input.spawn_decoy = true;
    }

    let shard = state
        .shards
        .iter()
        .map(|s| s.pos)
        .filter(|pos| pos.distance(player) < SHARD_DETOUR)
        .min_by(|a, b| {
            a.distance(player)
                .partial_cmp(&b.distance(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    let target = match shard {
        Some(pos) if !threatened => pos,
        _ => state.node.pos,
    };

    let mut dir = target - player;

    // No decoy to hide behind: get out of the firewall's band
    if threatened && !state.decoy_active() && !input.spawn_decoy {
        let away = player.y - state.firewall.center().y;
        dir.y = if away >= 0.0 { THREAT_DISTANCE } else { -THREAT_DISTANCE };
    }

    let probe = player + dir.normalize_or_zero() * PROBE;
    if hits_wall(&state.player.rect_at(probe), state.world.solid_walls()) {
        if state.score >= state.tuning.wall_disable_cost {
            input.disable_walls = true;
        }
        // Slide around the obstacle, switching sides every so often
        let t = state.time_ticks as f32 * 0.02;
        let side = if t.sin() >= 0.0 { 1.0 } else { -1.0 };
        dir += Vec2::new(-dir.y, dir.x) * side;
    }

    input.right = dir.x > DEADZONE;
    input.left = dir.x < -DEADZONE;
    input.down = dir.y > DEADZONE;
    input.up = dir.y < -DEADZONE;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::consts::SIM_DT;
    use crate::sim::rect::Rect;
    use crate::sim::state::GamePhase;
    use crate::sim::tick::tick;

    fn open_field() -> GameState {
        let mut state = GameState::new(777, Tuning::default());
        state.world.walls.clear();
        state.shards.clear();
        state
    }

    #[test]
    fn test_heads_for_node() {
        let state = open_field();
        let input = drive(&state);
        assert!(input.right && !input.left);
        assert!(input.down && !input.up);
        assert!(!input.advance);
    }

    #[test]
    fn test_advances_after_win() {
        let mut state = open_field();
        state.phase = GamePhase::Won;
        assert!(drive(&state).advance);

        state.level = state.tuning.max_level;
        assert!(!drive(&state).advance, "nothing after the last level");
    }

    #[test]
    fn test_drops_decoy_when_firewall_close() {
        let mut state = open_field();
        state.firewall.pos = state.player.pos - Vec2::new(60.0, 100.0);
        let input = drive(&state);
        assert!(input.spawn_decoy);

        state.decoy_cooldown = 3.0;
        assert!(!drive(&state).spawn_decoy);
    }

    #[test]
    fn test_buys_wall_disable_when_blocked() {
        let mut state = open_field();
        state.node.pos = state.player.pos + Vec2::new(500.0, 0.0);
        state.world.walls.push(Rect::new(state.player.pos.x + 20.0, 0.0, 10.0, 1200.0));
        state.score = 4;
        assert!(!drive(&state).disable_walls);
        state.score = 5;
        assert!(drive(&state).disable_walls);
    }

    #[test]
    fn test_idle_mode_makes_progress() {
        let mut state = open_field();
        let mut events = Vec::new();
        let start = state.player.pos.distance(state.node.pos);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..120 {
            tick(&mut state, &input, SIM_DT, &mut events);
        }
        let now = state.player.pos.distance(state.node.pos);
        assert!(now < start - 300.0, "{start} -> {now}");
    }
}
