//! Fixed-growth obstacle pool
//!
//! Obstacles are never destroyed during a session: slots are warmed up once
//! and toggled active/inactive. The pool appends a new slot only when every
//! slot of the requested kind is in play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Obstacle variants spawned by the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Wide bar protruding from a side wall
    Rectangle,
    /// Small block in the central band
    Square,
}

impl ObstacleKind {
    /// Half extents of the obstacle's bounding box
    pub fn half_extents(self) -> Vec2 {
        match self {
            ObstacleKind::Rectangle => Vec2::new(4.0, 0.5),
            ObstacleKind::Square => Vec2::new(0.75, 0.75),
        }
    }
}

/// One reusable obstacle handle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleSlot {
    pub kind: ObstacleKind,
    pub active: bool,
    pub pos: Vec2,
}

impl ObstacleSlot {
    fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            active: false,
            pos: Vec2::ZERO,
        }
    }

    /// Place the slot and put it in play
    pub fn activate_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.active = true;
    }
}

/// Free-lists of reusable obstacle slots, one per kind
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstaclePool {
    rectangles: Vec<ObstacleSlot>,
    squares: Vec<ObstacleSlot>,
}

impl ObstaclePool {
    /// Create a pool with `warmup` pre-instantiated slots per kind
    pub fn with_warmup(warmup: usize) -> Self {
        let mut pool = Self::default();
        for _ in 0..warmup {
            pool.rectangles.push(ObstacleSlot::new(ObstacleKind::Rectangle));
            pool.squares.push(ObstacleSlot::new(ObstacleKind::Square));
        }
        pool
    }

    fn list(&self, kind: ObstacleKind) -> &Vec<ObstacleSlot> {
        match kind {
            ObstacleKind::Rectangle => &self.rectangles,
            ObstacleKind::Square => &self.squares,
        }
    }

    fn list_mut(&mut self, kind: ObstacleKind) -> &mut Vec<ObstacleSlot> {
        match kind {
            ObstacleKind::Rectangle => &mut self.rectangles,
            ObstacleKind::Square => &mut self.squares,
        }
    }

    /// First-fit scan for an inactive slot of `kind`, appending one when the
    /// free-list is exhausted. The caller activates the returned slot.
    pub fn acquire(&mut self, kind: ObstacleKind) -> &mut ObstacleSlot {
        let slots = self.list_mut(kind);
        let i = match slots.iter().position(|s| !s.active) {
            Some(i) => i,
            None => {
                log::debug!("{kind:?} pool exhausted, growing to {}", slots.len() + 1);
                slots.push(ObstacleSlot::new(kind));
                slots.len() - 1
            }
        };
        &mut slots[i]
    }

    /// Deactivate every slot of both kinds (round reset)
    pub fn release_all(&mut self) {
        for slot in self.rectangles.iter_mut().chain(self.squares.iter_mut()) {
            slot.active = false;
        }
    }

    /// Recycle active slots that have fallen below `y` (offscreen cull).
    /// Returns how many were released.
    pub fn release_below(&mut self, y: f32) -> usize {
        let mut released = 0;
        for slot in self.rectangles.iter_mut().chain(self.squares.iter_mut()) {
            if slot.active && slot.pos.y < y {
                slot.active = false;
                released += 1;
            }
        }
        released
    }

    /// Count of currently active obstacles across both kinds.
    /// Linear scan; pools stay in the tens of entries.
    pub fn active_count(&self) -> usize {
        self.rectangles
            .iter()
            .chain(self.squares.iter())
            .filter(|s| s.active)
            .count()
    }

    /// Iterate over obstacles currently in play
    pub fn iter_active(&self) -> impl Iterator<Item = &ObstacleSlot> {
        self.rectangles
            .iter()
            .chain(self.squares.iter())
            .filter(|s| s.active)
    }

    /// Total slot count for a kind (active or not)
    pub fn capacity(&self, kind: ObstacleKind) -> usize {
        self.list(kind).len()
    }
}
