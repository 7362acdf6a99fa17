//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable slot iteration order (insertion order per kind)
//! - No rendering, audio, or platform dependencies (events only)

pub mod collision;
pub mod pool;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{WallSide, player_obstacle_collision, player_wall_collision};
pub use pool::{ObstacleKind, ObstaclePool, ObstacleSlot};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
