//! Level lifecycle, player powers and outcome checks
//!
//! Systems here mutate `GameState` in place and report what happened by
//! pushing `GameEvent`s into the caller's buffer.

use glam::Vec2;
use rand::Rng;

use super::collision::{MoveOutcome, hits_wall, reaches_goal};
use super::events::{AlertKind, DamageSource, GameEvent, SoundKind};
use super::firewall;
use super::maze;
use super::rect::Rect;
use super::scanner;
use super::state::{DataShard, Decoy, Firewall, GamePhase, GameState, World};
use crate::consts::FRAME_RATE;
use crate::tuning::LoseRule;

/// Rebuild all level-scoped state for `level`
///
/// Score, decoy uses, deaths and tutorial flags are campaign-scoped and
/// survive. Levels outside `1..=max_level` are clamped.
pub fn reset_level(state: &mut GameState, level: u32) {
    let level = level.clamp(1, state.tuning.max_level);
    let tier = state.tuning.level(level).clone();
    let (width, height) = state.tuning.world_dims(level);

    state.level = level;
    state.phase = GamePhase::Active;
    state.world = World::new(width, height);
    let world = state.world.size();

    state.node.pos = Vec2::new(world.x - tier.node_margin, world.y / 2.0);
    state.node.radius = state.tuning.node_radius;

    let fw_max_y = (world.y - tier.firewall_height).max(0.0);
    let fw_y = state.rng.random_range(0.0..=fw_max_y).floor();
    state.firewall = Firewall::for_level(&tier, fw_y);

    state.player.pos = state.player_start();
    state.player.restore();
    state.player.damage_cooldown = 0.0;

    state.decoy = None;
    state.decoy_cooldown = 0.0;
    state.scanner = None;
    state.shards.clear();
    state.shard_spawn_timer = 0.0;

    let padding = state.tuning.maze.safe_padding;
    let safe_areas = [
        state.player.rect().padded(padding),
        state.node.rect().padded(padding),
    ];
    state.world.walls =
        maze::generate_walls(&mut state.rng, &state.tuning.maze, world, &safe_areas);

    let attempts = level * state.tuning.shards.per_level;
    for _ in 0..attempts {
        if state.shards.len() >= state.tuning.shards.max_alive {
            break;
        }
        spawn_shard(state);
    }

    log::info!(
        "Level {}: world {}x{}, {} walls, {} shards, patrol {:?}",
        level,
        width,
        height,
        state.world.walls.len(),
        state.shards.len(),
        tier.patrol
    );
}

/// Move on from a won level. Returns false if there's nothing to advance to.
pub fn advance_level(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.is_won() || state.campaign_complete() {
        return false;
    }
    reset_level(state, state.level + 1);
    events.push(GameEvent::LevelTransition {
        level: state.level,
        world_width: state.world.width,
        world_height: state.world.height,
    });
    true
}

/// Drop a decoy at the player, if the cooldown allows
pub fn try_spawn_decoy(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !state.decoy_ready() {
        return false;
    }

    let pos = state.player.pos;
    state.decoy = Some(Decoy {
        pos,
        remaining: state.tuning.decoy.duration,
    });
    state.decoy_cooldown = state.tuning.decoy.cooldown;
    state.decoy_uses += 1;
    events.push(GameEvent::DecoySpawned { pos });
    log::debug!("Decoy #{} at ({:.0}, {:.0})", state.decoy_uses, pos.x, pos.y);

    if !state.tutorials.decoy_shown {
        state.tutorials.decoy_shown = true;
        events.push(GameEvent::ShowAlert(AlertKind::DecoyTutorial));
    }

    if state.decoy_uses >= state.tuning.decoy.scanner_threshold && state.level > 1 {
        let world_h = state.world.size().y;
        let tier = state.tuning.level(state.level);
        if let Some(s) = scanner::spawn(&state.firewall, world_h, tier, &mut state.rng) {
            log::debug!("Scanner launched ({:?})", s.profile);
            events.push(GameEvent::ScannerSpawned { pos: s.pos });
            state.scanner = Some(s);
        }
    }
    true
}

/// Spend score to take the walls down for the tier's hide duration
pub fn try_disable_walls(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let cost = state.tuning.wall_disable_cost;
    if state.score < cost || !state.world.visibility.is_visible() {
        return false;
    }
    let duration = state.level_tuning().wall_hide_duration;
    if !state.world.visibility.hide(duration) {
        return false;
    }
    state.score -= cost;
    events.push(GameEvent::ShowAlert(AlertKind::WallsDisabled));
    log::info!("Walls disabled for {duration}s (score now {})", state.score);
    true
}

/// Count down every gameplay timer by `dt`
pub fn update_timers(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    player.damage_cooldown = (player.damage_cooldown - dt).max(0.0);

    let regen = state.tuning.player.health_regen;
    if regen > 0.0 && player.health < player.max_health {
        player.regen_carry += regen * dt;
        let whole = player.regen_carry.floor();
        if whole >= 1.0 {
            player.regen_carry -= whole;
            player.health = (player.health + whole as u32).min(player.max_health);
        }
    }

    if let Some(decoy) = state.decoy.as_mut() {
        decoy.remaining -= dt;
        if decoy.remaining <= 0.0 {
            state.decoy = None;
            events.push(GameEvent::DecoyExpired);
            log::debug!("Decoy expired");
        }
    }
    // A scanner never outlives its decoy
    if state.decoy.is_none() && state.scanner.take().is_some() {
        log::debug!("Scanner recalled");
    }

    if state.decoy_cooldown > 0.0 {
        state.decoy_cooldown = (state.decoy_cooldown - dt).max(0.0);
        if state.decoy_cooldown == 0.0 {
            events.push(GameEvent::ShowAlert(AlertKind::DecoyReady));
        }
    }

    spin_shards(state, dt);

    state.shard_spawn_timer += dt;
    if state.shard_spawn_timer >= state.tuning.shards.spawn_interval
        && state.shards.len() < state.tuning.shards.max_alive
    {
        spawn_shard(state);
        state.shard_spawn_timer = 0.0;
    }

    if state.world.visibility.advance(dt) {
        events.push(GameEvent::ShowAlert(AlertKind::WallsRestored));
        log::info!("Walls restored");
    }
}

/// Advance shard rotation (cosmetic)
pub fn spin_shards(state: &mut GameState, dt: f32) {
    for shard in &mut state.shards {
        shard.rotation = (shard.rotation + shard.rotation_speed * dt).rem_euclid(360.0);
    }
}

/// Try to place one shard away from the player, node, other shards and walls
pub fn spawn_shard(state: &mut GameState) -> bool {
    let cfg = state.tuning.shards.clone();
    if state.shards.len() >= cfg.max_alive {
        return false;
    }

    let world = state.world.size();
    let max_x = (world.x - cfg.edge_margin).max(cfg.edge_margin);
    let max_y = (world.y - cfg.edge_margin).max(cfg.edge_margin);

    for _ in 0..cfg.placement_attempts {
        let pos = Vec2::new(
            state.rng.random_range(cfg.edge_margin..=max_x).floor(),
            state.rng.random_range(cfg.edge_margin..=max_y).floor(),
        );

        if pos.distance(state.player.pos) < cfg.min_player_distance
            || pos.distance(state.node.pos) < cfg.min_node_distance
            || state
                .shards
                .iter()
                .any(|s| pos.distance(s.pos) < cfg.min_shard_distance)
            || hits_wall(&Rect::centered(pos, cfg.size * 2.0), &state.world.walls)
        {
            continue;
        }

        let spin = cfg.max_spin.abs();
        let shard = DataShard {
            id: state.next_entity_id(),
            pos,
            rotation: state.fx_rng.random_range(0.0..360.0),
            rotation_speed: state.fx_rng.random_range(-spin..=spin) * FRAME_RATE,
        };
        state.shards.push(shard);
        return true;
    }
    false
}

/// Pick up every shard in reach. Returns how many were collected.
pub fn collect_shards(state: &mut GameState, events: &mut Vec<GameEvent>) -> u32 {
    let reach = state.player.half() + state.tuning.shards.size;
    let player = state.player.pos;
    let before = state.shards.len();
    state.shards.retain(|s| player.distance(s.pos) >= reach);
    let collected = (before - state.shards.len()) as u32;
    if collected == 0 {
        return 0;
    }

    for _ in 0..collected {
        state.score += 1;
        events.push(GameEvent::ShardCollected { score: state.score });
    }
    events.push(GameEvent::PlaySound(SoundKind::Collect));
    events.push(GameEvent::shake(0.2, 3.0));

    if !state.tutorials.shard_shown {
        state.tutorials.shard_shown = true;
        events.push(GameEvent::ShowAlert(AlertKind::ShardTutorial));
    }
    collected
}

/// Apply a resolved move, including the wall bump penalty
pub fn apply_move(state: &mut GameState, outcome: MoveOutcome, events: &mut Vec<GameEvent>) {
    state.player.pos = outcome.pos;
    if !outcome.wall_contact {
        return;
    }
    let amount = state.tuning.player.wall_damage;
    let cooldown = state.tuning.player.wall_damage_cooldown;
    if state.player.take_damage(amount, cooldown) {
        events.push(GameEvent::PlayerDamaged {
            source: DamageSource::Wall,
            amount,
            health: state.player.health,
        });
        events.push(GameEvent::shake(0.1, 2.0));
    }
}

/// Firewall contact. Returns true if the player must be reset.
pub fn check_firewall(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    if !firewall::touches(&state.firewall, &state.player.rect()) {
        return false;
    }

    match state.tuning.lose_rule {
        LoseRule::Health => {
            let amount = state.tuning.player.firewall_damage;
            let cooldown = state.tuning.player.damage_cooldown;
            if !state.player.take_damage(amount, cooldown) {
                return false;
            }
            events.push(GameEvent::PlayerDamaged {
                source: DamageSource::Firewall,
                amount,
                health: state.player.health,
            });
            events.push(GameEvent::PlaySound(SoundKind::Impact));
            events.push(GameEvent::shake(0.3, 5.0));
            events.push(GameEvent::ShowAlert(AlertKind::SystemAlert));
            state.player.is_depleted()
        }
        LoseRule::InstantReset => {
            state.player.pos = state.player_start();
            events.push(GameEvent::PlaySound(SoundKind::Impact));
            events.push(GameEvent::shake(0.4, 5.0));
            events.push(GameEvent::ShowAlert(AlertKind::SystemAlert));
            log::info!("Firewall contact on level {}, back to start", state.level);
            false
        }
    }
}

/// Whether the player is touching the security node
pub fn check_goal(state: &GameState) -> bool {
    reaches_goal(
        &state.player.rect(),
        state.node.pos,
        state.node.radius,
        state.tuning.goal_hitbox,
    )
}

/// Freeze the level as won
pub fn resolve_win(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::Won;
    state.decoy = None;
    state.scanner = None;
    let alert = if state.campaign_complete() {
        AlertKind::ServerBreached
    } else {
        AlertKind::AccessGranted
    };
    events.push(GameEvent::ShowAlert(alert));
    events.push(GameEvent::PlaySound(SoundKind::Collect));
    events.push(GameEvent::shake(0.5, 10.0));
    log::info!(
        "Level {} cleared (score {}, deaths {})",
        state.level,
        state.score,
        state.deaths
    );
}

/// Health ran out: back to the start of the level, fully healed
pub fn resolve_death(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.player.pos = state.player_start();
    state.player.restore();
    state.deaths += 1;
    events.push(GameEvent::PlayerDied {
        deaths: state.deaths,
    });
    events.push(GameEvent::PlaySound(SoundKind::Impact));
    events.push(GameEvent::shake(0.7, 15.0));
    events.push(GameEvent::ShowAlert(AlertKind::SystemAlert));
    log::info!("Player reset on level {} (deaths {})", state.level, state.deaths);
}
