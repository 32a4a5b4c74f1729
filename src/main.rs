//! Hacker Duel entry point
//!
//! Headless native driver: the autopilot plays the campaign on a fixed-step
//! loop and every event a frontend would receive is logged instead.
//! `RUST_LOG=debug` shows the event stream, `trace` adds frame snapshots.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use hacker_duel::consts::*;
use hacker_duel::sim::{GameEvent, GameState, TickInput, tick};
use hacker_duel::{Settings, Tuning, config};

/// Give up after this much wall-clock play
const MAX_RUN_SECONDS: f32 = 180.0;
/// Target frame pacing for the outer loop
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    accumulator: f32,
    input: TickInput,
    events: Vec<GameEvent>,
}

impl Game {
    fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            settings,
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            events: Vec::new(),
        }
    }

    /// Run simulation ticks for `dt` seconds of real time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT, &mut self.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.spawn_decoy = false;
            self.input.disable_walls = false;
            self.input.advance = false;
        }

        for event in self.events.drain(..) {
            present(&self.settings, &event);
        }
    }
}

/// Stand-in for a renderer and mixer
fn present(settings: &Settings, event: &GameEvent) {
    if !settings.allows(event) {
        return;
    }
    match event {
        GameEvent::EntitiesUpdated(snapshot) => {
            if log::log_enabled!(log::Level::Trace) {
                match serde_json::to_string(snapshot) {
                    Ok(json) => log::trace!("frame {json}"),
                    Err(err) => log::warn!("snapshot encode failed: {err}"),
                }
            }
        }
        GameEvent::Shake {
            duration,
            intensity,
        } => {
            let scaled = settings.effective_shake_intensity(*intensity);
            log::debug!("shake {duration:.1}s @ {scaled:.1}");
        }
        GameEvent::PlaySound(kind) => {
            log::debug!("sound {kind:?} @ {:.2}", settings.volume_for(*kind));
        }
        GameEvent::LevelTransition {
            level,
            world_width,
            world_height,
        } => {
            log::info!("Entering level {level} ({world_width}x{world_height})");
        }
        other => match serde_json::to_string(other) {
            Ok(json) => log::debug!("{json}"),
            Err(err) => log::warn!("event encode failed: {err}"),
        },
    }
}

fn seed_from_env() -> u64 {
    if let Ok(raw) = std::env::var("HACKER_DUEL_SEED") {
        match raw.trim().parse() {
            Ok(seed) => return seed,
            Err(err) => log::warn!("HACKER_DUEL_SEED={raw:?} is not a u64 ({err}); picking one"),
        }
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Hacker Duel (headless) starting...");

    let tuning: Tuning = config::load_or_default("HACKER_DUEL_TUNING");
    let settings: Settings = config::load_or_default("HACKER_DUEL_SETTINGS");
    let seed = seed_from_env();
    log::info!("Seed {seed}");

    let mut game = Game::new(seed, tuning, settings);
    let started = Instant::now();
    let mut last = started;

    while !game.state.campaign_complete() && started.elapsed().as_secs_f32() < MAX_RUN_SECONDS {
        let now = Instant::now();
        game.update(now.duration_since(last).as_secs_f32());
        last = now;

        let spent = now.elapsed();
        if spent < FRAME_TIME {
            thread::sleep(FRAME_TIME - spent);
        }
    }

    let state = &game.state;
    if state.campaign_complete() {
        log::info!(
            "Server breached after {:.1}s: score {}, deaths {}, decoys {}",
            state.time_ticks as f32 * SIM_DT,
            state.score,
            state.deaths,
            state.decoy_uses
        );
    } else {
        log::info!(
            "Stopped on level {} after {:.1}s: score {}, deaths {}",
            state.level,
            state.time_ticks as f32 * SIM_DT,
            state.score,
            state.deaths
        );
    }
}
