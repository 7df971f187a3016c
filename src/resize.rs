/*
 * Resize Module
 *
 * Coalesces bursts of window resize events. Each event restarts the delay;
 * once the window has been still for the full delay, the latest size is
 * released exactly once.
 */

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<((f32, f32), Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn notify(&mut self, width: f32, height: f32, now: Instant) {
        self.pending = Some(((width, height), now + self.delay));
    }

    // The settled size, once the delay has passed since the last event
    pub fn poll(&mut self, now: Instant) -> Option<(f32, f32)> {
        match self.pending {
            Some((size, deadline)) if now >= deadline => {
                self.pending = None;
                Some(size)
            }
            _ => None,
        }
    }
}
