//! End-to-end gameplay scenarios driven through `tick`

use glam::Vec2;

use hacker_duel::Tuning;
use hacker_duel::consts::SIM_DT;
use hacker_duel::sim::events::{AlertKind, DamageSource};
use hacker_duel::sim::{GameEvent, GamePhase, GameState, Heading, TickInput, tick};

fn game() -> GameState {
    GameState::new(2024, Tuning::default())
}

fn idle() -> TickInput {
    TickInput::default()
}

fn press_disable() -> TickInput {
    TickInput {
        disable_walls: true,
        ..Default::default()
    }
}

/// Keep the firewall away from the player so long runs stay quiet
fn park_firewall(state: &mut GameState) {
    state.firewall.speed = 0.0;
    state.firewall.vertical_speed = 0.0;
    state.firewall.pos = Vec2::new(-state.firewall.size.x, 0.0);
}

#[test]
fn disable_walls_costs_five_and_lasts_fifteen_seconds() {
    for dt in [0.25, 0.125, SIM_DT] {
        let mut state = game();
        park_firewall(&mut state);
        state.score = 7;
        let mut events = Vec::new();

        // The action tick also counts toward the window
        tick(&mut state, &press_disable(), dt, &mut events);
        assert_eq!(state.score, 2);
        assert!(!state.world.visibility.is_visible());
        assert!(events.contains(&GameEvent::ShowAlert(AlertKind::WallsDisabled)));

        let ticks = (15.0 / dt).round() as usize;
        for _ in 1..ticks - 1 {
            tick(&mut state, &idle(), dt, &mut events);
            assert!(!state.world.visibility.is_visible(), "walls back early at dt={dt}");
        }
        tick(&mut state, &idle(), dt, &mut events);
        assert!(state.world.visibility.is_visible(), "walls missing at dt={dt}");
        assert!(events.contains(&GameEvent::ShowAlert(AlertKind::WallsRestored)));
    }
}

#[test]
fn disable_walls_without_score_is_a_no_op() {
    let mut state = game();
    state.score = 4;
    let mut events = Vec::new();
    tick(&mut state, &press_disable(), SIM_DT, &mut events);
    assert_eq!(state.score, 4);
    assert!(state.world.visibility.is_visible());
}

#[test]
fn hidden_walls_let_the_player_through() {
    let mut state = game();
    park_firewall(&mut state);
    state.world.walls.clear();
    let wall = hacker_duel::sim::Rect::new(state.player.pos.x + 20.0, 0.0, 10.0, 1200.0);
    state.world.walls.push(wall);
    let right = TickInput {
        right: true,
        ..Default::default()
    };
    let mut events = Vec::new();

    for _ in 0..30 {
        tick(&mut state, &right, SIM_DT, &mut events);
    }
    assert!(state.player.pos.x < wall.x, "wall holds while visible");

    state.score = 5;
    tick(&mut state, &press_disable(), SIM_DT, &mut events);
    for _ in 0..30 {
        tick(&mut state, &right, SIM_DT, &mut events);
    }
    assert!(state.player.pos.x > wall.right());
}

#[test]
fn scanner_catch_removes_decoy_and_scanner() {
    let mut state = game();
    hacker_duel::sim::reset_level(&mut state, 2);
    park_firewall(&mut state);
    state.decoy_uses = 1;
    let mut events = Vec::new();

    let decoy = TickInput {
        spawn_decoy: true,
        ..Default::default()
    };
    tick(&mut state, &decoy, SIM_DT, &mut events);
    assert!(state.decoy_active());
    assert!(state.scanner_active());

    // Drop the scanner right next to the decoy
    let target = state.decoy.as_ref().map(|d| d.pos).unwrap_or_default();
    if let Some(scanner) = state.scanner.as_mut() {
        scanner.pos = target + Vec2::new(10.0, 0.0);
    }
    events.clear();
    tick(&mut state, &idle(), SIM_DT, &mut events);

    assert!(!state.decoy_active());
    assert!(!state.scanner_active());
    assert!(events.contains(&GameEvent::DecoyCaught));
}

#[test]
fn level_one_firewall_bounces_off_the_top() {
    let mut state = game();
    state.firewall.pos = Vec2::new(800.0, 0.0);
    state.firewall.heading = Heading::Up;
    let mut events = Vec::new();

    tick(&mut state, &idle(), SIM_DT, &mut events);
    assert_eq!(state.firewall.heading, Heading::Down);
    for _ in 0..120 {
        tick(&mut state, &idle(), SIM_DT, &mut events);
        assert!(state.firewall.pos.y >= 0.0);
    }
}

#[test]
fn last_health_point_resets_to_start() {
    let mut state = game();
    state.world.walls.clear();
    state.player.pos = Vec2::new(700.0, 700.0);
    state.player.health = 1;
    state.player.damage_cooldown = 0.0;
    state.firewall.speed = 0.0;
    state.firewall.vertical_speed = 0.0;
    state.firewall.pos = Vec2::new(700.0, 600.0);
    let mut events = Vec::new();

    tick(&mut state, &idle(), SIM_DT, &mut events);

    let hits = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::PlayerDamaged {
                    source: DamageSource::Firewall,
                    ..
                }
            )
        })
        .count();
    assert_eq!(hits, 1);
    assert_eq!(state.player.pos, state.player_start());
    assert_eq!(state.player.health, state.player.max_health);
    assert_eq!(state.deaths, 1);
    assert_eq!(state.phase, GamePhase::Active);
}

#[test]
fn campaign_runs_to_server_breached() {
    let mut state = game();
    let mut events = Vec::new();
    let advance = TickInput {
        advance: true,
        ..Default::default()
    };

    for level in 1..=3 {
        assert_eq!(state.level, level);
        park_firewall(&mut state);
        state.player.pos = state.node.pos;
        tick(&mut state, &idle(), SIM_DT, &mut events);
        assert!(state.is_won());
        if level < 3 {
            tick(&mut state, &advance, SIM_DT, &mut events);
        }
    }

    assert!(state.campaign_complete());
    assert!(events.contains(&GameEvent::ShowAlert(AlertKind::ServerBreached)));
    let transitions = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelTransition { .. }))
        .count();
    assert_eq!(transitions, 3);

    // Nothing past the last level
    tick(&mut state, &advance, SIM_DT, &mut events);
    assert_eq!(state.level, 3);
}
