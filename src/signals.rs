//! Lifecycle broadcasts
//!
//! The original exposes multicast delegates ("game started" / "game ended")
//! that other components subscribe to. Here that is an observer list:
//! zero-argument callbacks invoked synchronously in registration order.
//! Callers fire a signal only on a genuine transition, never on re-entrant
//! no-ops, so subscribers see each lifecycle edge exactly once.

/// A zero-argument multicast signal
#[derive(Default)]
pub struct Signal {
    subscribers: Vec<Box<dyn FnMut()>>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; callbacks run in registration order
    pub fn subscribe<F: FnMut() + 'static>(&mut self, f: F) {
        self.subscribers.push(Box::new(f));
    }

    /// Invoke every subscriber once
    pub fn emit(&mut self) {
        for f in &mut self.subscribers {
            f();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
