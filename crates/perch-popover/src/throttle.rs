//! Rate limiting for resize and scroll repositioning.
//!
//! Layout reads are synchronous, so a burst of resize or scroll events must
//! not turn into a burst of measurements. The throttle lets the first event
//! through, drops the rest until the interval has passed, and remembers that
//! something was dropped so the host can flush it later.

use std::time::{Duration, Instant};

/// Leading-edge throttle with a trailing flush.
///
/// Time is passed in by the caller so behavior is reproducible in tests.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
    pending: bool,
}

impl Throttle {
    /// At most one call per `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            pending: false,
        }
    }

    /// At most `fps` calls per second; `0` is treated as 1.
    #[must_use]
    pub fn per_second(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    /// No throttling at all.
    #[must_use]
    pub const fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Record a call at `now`. Returns `true` if it may run.
    pub fn hit(&mut self, now: Instant) -> bool {
        let ready = self
            .last
            .is_none_or(|last| now.duration_since(last) >= self.interval);
        if ready {
            self.last = Some(now);
            self.pending = false;
        } else {
            self.pending = true;
        }
        ready
    }

    /// Run a previously dropped call if the interval has passed since the
    /// last one. Returns `true` if the caller should run it now.
    pub fn flush(&mut self, now: Instant) -> bool {
        self.pending && self.hit(now)
    }

    /// Whether a dropped call is waiting for [`flush`](Self::flush).
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}
