//! Fixed timestep simulation tick
//!
//! One call advances everything a single 60 Hz step: start handling, the
//! jump input, the per-step movement loop, position integration, wall and
//! obstacle collisions, the offscreen cull, and the spawn task. The
//! movement loop and the spawn task are the two cooperative "coroutines"
//! of the original, each resumed at most once per tick.

use glam::Vec2;

use super::collision::{WallSide, player_obstacle_collision, player_wall_collision};
use super::state::{GameEvent, GamePhase, GameState};
use crate::config::Config;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Start signal (the start button)
    pub start: bool,
    /// Touch anywhere on the screen: jump to the other side
    pub touch: bool,
    /// Demo mode: synthesize touches so the ball keeps bouncing
    pub autoplay: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, cfg: &Config, dt: f32) {
    match state.phase {
        GamePhase::Waiting => {
            if input.start {
                begin_round(state, cfg);
            }
        }
        GamePhase::Playing => {
            state.time_ticks += 1;
            step_playing(state, input, cfg, dt);
        }
        // Inert until the external reset; late touches and collision
        // signals land here and do nothing
        GamePhase::GameOver => {}
    }
}

/// Waiting → Playing: launch leftward and arm the jump after a short delay
fn begin_round(state: &mut GameState, cfg: &Config) {
    state.score = 0;
    state.spawner.reset();
    state.player.pos = Vec2::ZERO;
    state.player.vel = Vec2::new(-cfg.jump_force, cfg.rise_force);
    state.player.can_jump = false;
    state.player.start_delay = START_DELAY_TICKS;
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Started);
    log::info!("round started (profile {})", cfg.profile.as_str());
}

fn step_playing(state: &mut GameState, input: &TickInput, cfg: &Config, dt: f32) {
    // Start delay: the ball is already moving, but taps are ignored
    if state.player.start_delay > 0 {
        state.player.start_delay -= 1;
        if state.player.start_delay == 0 {
            state.player.can_jump = true;
        }
    }

    let mut touch = input.touch;
    if input.autoplay {
        // Demo pilot: after a wall bounce the ball drifts straight up
        // (vx == 0), so tap to send it back across
        touch |= state.player.vel.x == 0.0;
    }

    if touch && state.player.can_jump {
        jump(state, cfg);
    }

    // Per-step movement loop: force the vertical speed back to the rise
    // constant, counteracting whatever the last collision response did
    if state.player.can_jump {
        state.player.vel.y = cfg.rise_force;
    }

    state.player.pos += state.player.vel * dt;

    resolve_collisions(state, cfg);

    if state.phase == GamePhase::GameOver {
        return;
    }

    // Obstacles far below the player will never be touched again; recycle
    // them so the density ceiling does not starve the spawner
    let culled = state.pool.release_below(state.player.pos.y - CULL_MARGIN);
    if culled > 0 {
        log::trace!("culled {culled} obstacles below y={}", state.player.pos.y);
    }

    state
        .spawner
        .step(&mut state.pool, &mut state.rng, cfg.density_ceiling);
}

/// Tap handler: flip sides. Direction depends only on which half of the
/// field the ball occupies; at or right of center jumps left.
fn jump(state: &mut GameState, cfg: &Config) {
    let to_left = state.player.pos.x >= 0.0;
    let dir = if to_left { -1.0 } else { 1.0 };
    state.player.vel = Vec2::new(dir * cfg.jump_force, cfg.rise_force);
    state.events.push(GameEvent::Jump { to_left });
}

fn resolve_collisions(state: &mut GameState, cfg: &Config) {
    // Obstacles first: a terminal hit wins over a same-tick wall graze
    let hit = state
        .pool
        .iter_active()
        .find_map(|slot| {
            player_obstacle_collision(state.player.pos, PLAYER_RADIUS, slot)
                .map(|contact| (slot.kind, contact))
        });
    if let Some((kind, contact)) = hit {
        // Snap to the contact point and freeze; physics response stops here
        state.player.pos = contact;
        state.player.vel = Vec2::ZERO;
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            kind,
            score: state.score,
        });
        log::info!("game over on {kind:?} at {contact}, score {}", state.score);
        return;
    }

    if let Some((side, contact)) = player_wall_collision(state.player.pos, PLAYER_RADIUS, WALL_X)
    {
        // A bounce is a contact entry: the ball must be moving into the
        // wall. The clamped resting position still overlaps the plane on
        // later ticks but scores nothing until the next crossing.
        let entering = match side {
            WallSide::Left => state.player.vel.x < 0.0,
            WallSide::Right => state.player.vel.x > 0.0,
        };
        if !entering {
            return;
        }

        // Clamp back inside and kill the horizontal speed; the next tap
        // sends the ball across again
        let inner = WALL_X - PLAYER_RADIUS;
        state.player.pos.x = match side {
            WallSide::Left => -inner,
            WallSide::Right => inner,
        };
        state.player.vel = Vec2::new(0.0, cfg.rise_force);
        state.score += 1;
        state.events.push(GameEvent::WallBounce { side, at: contact });
        log::debug!("wall bounce {side:?}, score {}", state.score);
    }
}
