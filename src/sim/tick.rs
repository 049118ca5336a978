//! Fixed timestep simulation
//!
//! Two periodic tasks run on the session clock while playing: the physics
//! tick and the spawn check. Host time is fed in through `advance`, which
//! replays every due task and deferred action in time order.

use super::collision::first_collision;
use super::schedule::DeferredAction;
use super::spawner::spawn_check;
use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::consts::MAX_FRAME_MS;

/// Start (or restart) a session. Legal from the menu and after a game over.
pub fn start(state: &mut GameState) -> bool {
    if !matches!(state.phase, GamePhase::Menu | GamePhase::GameOver) {
        return false;
    }

    state.score = 0;
    state.speed = state.tuning.min_speed;
    state.obstacles.clear();
    state.reset_obstacle_ids();
    state.player = Player::default();
    state.deferred.clear();
    state.phase = GamePhase::Playing;
    start_tasks(state);
    state.emit(GameEvent::Started);

    log::info!("Run started (seed {})", state.seed);
    true
}

/// Pause while playing, resume while paused
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => {
            leave_playing(state, GamePhase::Paused);
            log::info!("Paused at score {}", state.score);
            true
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Playing;
            start_tasks(state);
            log::info!("Resumed");
            true
        }
        _ => false,
    }
}

/// Return to the menu after a game over, or stop a run in progress.
///
/// A score above the session's high score becomes the new high score and is
/// reported with `GameEvent::NewHighScore`.
pub fn to_menu(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Playing => leave_playing(state, GamePhase::Menu),
        GamePhase::GameOver => state.phase = GamePhase::Menu,
        _ => return false,
    }

    if state.score > state.high_score {
        state.high_score = state.score;
        state.emit(GameEvent::NewHighScore(state.score));
        log::info!("New high score: {}", state.score);
    }
    state.obstacles.clear();
    true
}

/// Jump. Ignored while airborne or when not playing.
pub fn jump(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.player.jumping {
        return false;
    }

    state.player.take_off();
    let due = state.clock_ms.saturating_add(state.tuning.jump_duration_ms);
    state.deferred.schedule(due, DeferredAction::Land);
    state.emit(GameEvent::Jumped);
    true
}

/// Boost. Each boost schedules its own partial decay.
pub fn boost(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }

    state.speed = state.tuning.clamp_speed(state.speed + state.tuning.boost_amount);
    let due = state.clock_ms.saturating_add(state.tuning.boost_decay_delay_ms);
    state.deferred.schedule(due, DeferredAction::BoostDecay);
    state.emit(GameEvent::Boosted);
    true
}

/// Advance one physics tick: score, scroll, cull, collide.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Speed never drops below 1, so every tick scores at least one point
    state.score += state.speed.floor() as u64;

    let scroll = state.tuning.base_scroll + state.speed;
    let cull_x = state.tuning.cull_x;
    for obstacle in &mut state.obstacles {
        obstacle.x -= scroll;
    }
    state.obstacles.retain(|o| o.x > cull_x);

    if let Some(hit) = first_collision(&state.player, &state.obstacles) {
        log::info!(
            "Crashed into {:?} #{} with score {}",
            hit.kind,
            hit.id,
            state.score
        );
        let score = state.score;
        leave_playing(state, GamePhase::GameOver);
        state.emit(GameEvent::Crashed { score });
    }
}

/// Feed `elapsed_ms` of host time into the session.
///
/// Processes every deferred action, tick and spawn check that falls due, in
/// time order. Simultaneous events run deferred actions first, then the tick,
/// then the spawn check. Nothing happens unless playing, and processing stops
/// the moment play ends.
pub fn advance(state: &mut GameState, elapsed_ms: u64) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let target = state.clock_ms.saturating_add(elapsed_ms.min(MAX_FRAME_MS));

    while state.phase == GamePhase::Playing {
        let Some(next) = next_event_time(state) else {
            break;
        };
        if next > target {
            break;
        }
        state.clock_ms = next;

        if let Some(action) = state.deferred.pop_due(next) {
            apply_deferred(state, action);
            continue;
        }
        if state.tasks.next_tick_ms == Some(next) {
            state.tasks.next_tick_ms = Some(next.saturating_add(state.tuning.tick_ms));
            tick(state);
            continue;
        }
        if state.tasks.next_spawn_ms == Some(next) {
            state.tasks.next_spawn_ms = Some(next.saturating_add(state.tuning.spawn_interval_ms));
            spawn_check(state);
        }
    }

    if state.phase == GamePhase::Playing {
        state.clock_ms = target;
    }
}

fn next_event_time(state: &GameState) -> Option<u64> {
    [
        state.deferred.next_due(),
        state.tasks.next_tick_ms,
        state.tasks.next_spawn_ms,
    ]
    .into_iter()
    .flatten()
    .min()
}

fn apply_deferred(state: &mut GameState, action: DeferredAction) {
    match action {
        DeferredAction::Land => state.player.land(),
        DeferredAction::BoostDecay => {
            state.speed = state.tuning.clamp_speed(state.speed - state.tuning.boost_decay);
        }
    }
    log::debug!("{:?} applied at {} ms", action, state.clock_ms);
}

/// Both periodic tasks start together, one full period from now
fn start_tasks(state: &mut GameState) {
    state.tasks.next_tick_ms = Some(state.clock_ms.saturating_add(state.tuning.tick_ms));
    state.tasks.next_spawn_ms = Some(state.clock_ms.saturating_add(state.tuning.spawn_interval_ms));
}

/// Stop periodic tasks and settle every pending one-shot action so nothing
/// fires after play ends
fn leave_playing(state: &mut GameState, phase: GamePhase) {
    state.tasks.next_tick_ms = None;
    state.tasks.next_spawn_ms = None;
    if !state.deferred.is_empty() {
        log::debug!("Settling {} pending actions", state.deferred.len());
    }
    for action in state.deferred.drain() {
        apply_deferred(state, action);
    }
    state.phase = phase;
}
