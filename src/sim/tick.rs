//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by one step. Order within a
//! tick: input actions, movement, hazard and pursuit AI, timers, outcome
//! checks, then resolution of death or victory.

use super::autopilot;
use super::collision::{MoveIntent, resolve_move};
use super::events::{GameEvent, SoundKind};
use super::firewall::{self, HazardView};
use super::progression;
use super::scanner::{self, PursuitOutcome};
use super::state::GameState;
use crate::consts::MAX_TICK_DT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Drop a decoy (edge-triggered)
    pub spawn_decoy: bool,
    /// Spend score to drop the walls (edge-triggered)
    pub disable_walls: bool,
    /// Continue past the level-complete screen
    pub advance: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

impl TickInput {
    pub fn intent(&self) -> MoveIntent {
        MoveIntent {
            left: self.left,
            right: self.right,
            up: self.up,
            down: self.down,
        }
    }
}

/// Advance the game state by one timestep
///
/// `dt` is clamped to `[0, MAX_TICK_DT]`. Everything the presentation layer
/// needs to hear about is pushed onto `events`, ending with a snapshot.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, events: &mut Vec<GameEvent>) {
    let dt = if dt.is_finite() {
        dt.clamp(0.0, MAX_TICK_DT)
    } else {
        0.0
    };

    if state.time_ticks == 0 {
        events.push(GameEvent::PlaySound(SoundKind::AmbientLoop));
        events.push(GameEvent::LevelTransition {
            level: state.level,
            world_width: state.world.width,
            world_height: state.world.height,
        });
    }
    state.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot::drive(state)
    } else {
        input.clone()
    };

    if state.is_won() {
        // Frozen until the player moves on; only the shard spin keeps going
        progression::spin_shards(state, dt);
        if input.advance {
            progression::advance_level(state, events);
        }
        push_snapshot(state, events);
        return;
    }

    // Actions
    if input.spawn_decoy {
        progression::try_spawn_decoy(state, events);
    }
    if input.disable_walls {
        progression::try_disable_walls(state, events);
    }

    // Movement
    let outcome = resolve_move(
        state.player.pos,
        input.intent(),
        state.tuning.player.speed,
        dt,
        state.player.size,
        state.world.size(),
        state.world.solid_walls(),
    );
    progression::apply_move(state, outcome, events);

    // Hazards
    let view = HazardView {
        world: state.world.size(),
        level: state.level,
        player: state.player.pos,
        decoy: state.decoy.as_ref().map(|d| d.pos),
    };
    firewall::update(&mut state.firewall, &view, dt, &mut state.rng);

    let decoy_radius = state.player.half();
    let pursuit = scanner::update(
        &mut state.scanner,
        &mut state.decoy,
        decoy_radius,
        dt,
        &mut state.rng,
    );
    if pursuit == PursuitOutcome::Caught {
        events.push(GameEvent::DecoyCaught);
        log::debug!("Scanner caught the decoy");
    }

    progression::update_timers(state, dt, events);

    // Outcomes
    progression::collect_shards(state, events);
    let hit_reset = progression::check_firewall(state, events);
    let depleted = hit_reset || state.player.is_depleted();

    if depleted {
        progression::resolve_death(state, events);
    } else if progression::check_goal(state) {
        progression::resolve_win(state, events);
    }

    push_snapshot(state, events);
}

fn push_snapshot(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let alpha = firewall::flicker_alpha(&state.firewall, &mut state.fx_rng);
    events.push(GameEvent::EntitiesUpdated(state.snapshot(alpha)));
}
