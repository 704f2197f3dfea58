use std::time::{Duration, Instant};

/// Deferred focus request armed when the search bar expands
///
/// Every `schedule`/`cancel` bumps the generation, so a deadline armed
/// before a collapse can never fire after it.
#[derive(Debug, Default, Clone)]
pub struct FocusTimer {
    pending: Option<PendingFocus>,
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct PendingFocus {
    due: Instant,
    generation: u64,
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `delay` after `now`, replacing any pending request
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(PendingFocus {
            due: now + delay,
            generation: self.generation,
        });
        log::debug!(
            "Focus request {} scheduled in {}ms",
            self.generation,
            delay.as_millis()
        );
    }

    /// Drop the pending request, if any
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Focus request {} cancelled", self.generation);
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns true exactly once, when the armed deadline has passed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if pending.generation == self.generation && now >= pending.due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
