//! Game state and core simulation types
//!
//! All per-round state lives here. The sim is deterministic for a given
//! seed and input stream: seeded RNG, fixed timestep, stable slot order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::WallSide;
use super::pool::{ObstacleKind, ObstaclePool};
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Idle on the title screen, waiting for the start signal
    #[default]
    Waiting,
    /// Active gameplay
    Playing,
    /// Run ended; inert until the external reset
    GameOver,
}

/// Events produced by the sim for the session layer to dispatch
/// (sounds, broadcasts, persistence are all delegated upward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A round began (fires once per start signal)
    Started,
    /// The player jumped; `to_left` is the new travel direction
    Jump { to_left: bool },
    /// Scored a bounce off a side wall
    WallBounce { side: WallSide, at: Vec2 },
    /// Terminal obstacle hit (fires exactly once per round)
    GameOver { kind: ObstacleKind, score: u32 },
}

/// The player ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Jump input is honored only once the start delay has elapsed
    pub can_jump: bool,
    /// Ticks remaining before `can_jump` flips on (0.3 s after start)
    pub start_delay: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            can_jump: false,
            start_delay: 0,
        }
    }
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving obstacle placement
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// The player ball
    pub player: Player,
    /// Reusable obstacle slots
    pub pool: ObstaclePool,
    /// Cooperative spawn task
    pub spawner: Spawner,
    /// Wall bounces this round
    pub score: u32,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh state with warmed-up pools
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Waiting,
            player: Player::default(),
            pool: ObstaclePool::with_warmup(POOL_WARMUP),
            spawner: Spawner::new(),
            score: 0,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Full round reset back to Waiting: despawn everything, rewind the
    /// spawner, re-center the player. The score was already persisted at
    /// game over; it resets here so the next start reads 0.
    pub fn round_reset(&mut self) {
        self.pool.release_all();
        self.spawner.reset();
        self.player = Player::default();
        self.score = 0;
        self.phase = GamePhase::Waiting;
        log::debug!("round reset after {} ticks", self.time_ticks);
    }
}
