use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{after, bounded, Receiver};

/// Timer primitive behind `pace`: the returned channel yields exactly one
/// message once `delay` has elapsed.
pub trait Clock: Send {
    fn after(&self, delay: Duration) -> Receiver<Instant>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn after(&self, delay: Duration) -> Receiver<Instant> {
        after(delay)
    }
}

/// Fires immediately and adds the requested delay to a virtual elapsed
/// time shared by all clones.
#[derive(Debug, Default, Clone)]
pub struct InstantClock {
    elapsed_nanos: Arc<AtomicU64>,
    timers: Arc<AtomicU64>,
}

impl InstantClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Acquire))
    }

    pub fn timers(&self) -> u64 {
        self.timers.load(Ordering::Acquire)
    }
}

impl Clock for InstantClock {
    fn after(&self, delay: Duration) -> Receiver<Instant> {
        let nanos = u64::try_from(delay.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.fetch_add(nanos, Ordering::AcqRel);
        self.timers.fetch_add(1, Ordering::AcqRel);
        let (tx, rx) = bounded(1);
        // capacity 1 and a fresh channel, so this never blocks or fails
        let _ = tx.send(Instant::now());
        rx
    }
}
