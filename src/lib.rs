//! Gravity Ball - an endless wall-bouncing arcade game, headless core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle pool, spawner, player state machine)
//! - `session`: Embedding driver (fixed-timestep loop, score/leaderboard wiring)
//! - `signals`: Lifecycle broadcasts for external subscribers
//! - `scores`: Best-score and lives persistence, local leaderboard
//! - `config`: Platform-profile game balance

pub mod config;
pub mod scores;
pub mod session;
pub mod signals;
pub mod sim;

pub use config::{Config, PlatformProfile};
pub use scores::{FileScores, Leaderboard, LocalLeaderboard, MemoryScores, ScoreStore};
pub use session::Session;
pub use signals::Signal;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the original targets 60 fps)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Side walls sit at x = ±WALL_X; rectangle obstacles anchor around them
    pub const WALL_X: f32 = 12.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.5;
    /// Delay between the start signal and jump capability (0.3 s at 60 Hz)
    pub const START_DELAY_TICKS: u32 = 18;

    /// Obstacle pool warm-up size per kind
    pub const POOL_WARMUP: usize = 20;
    /// Active obstacles this far below the player are recycled
    pub const CULL_MARGIN: f32 = 30.0;
}
