//! Run-generation guard.
//!
//! Every run holds a [`RunToken`] stamped with a generation number. The
//! [`RunController`] owns the current generation: bumping it makes every
//! older token stale, and dropping the run's cancel sender wakes a runner
//! that is asleep inside `pace`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, never, Receiver, Sender};
use log::{debug, info};

use crate::error::{Result, VisualizerError};

#[derive(Debug)]
pub struct RunToken {
    generation: u64,
    current: Arc<AtomicU64>,
    active: Option<Arc<AtomicBool>>,
    cancelled: Receiver<()>,
}

impl RunToken {
    /// A token nobody can cancel, for runs outside a session.
    pub fn detached() -> Self {
        RunToken {
            generation: 0,
            current: Arc::new(AtomicU64::new(0)),
            active: None,
            cancelled: never(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    pub fn check(&self) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            Err(VisualizerError::Cancelled { generation: self.generation })
        }
    }

    /// Becomes ready (disconnected) once the run is cancelled.
    pub fn cancelled(&self) -> &Receiver<()> {
        &self.cancelled
    }
}

impl Drop for RunToken {
    fn drop(&mut self) {
        if let Some(active) = &self.active {
            active.store(false, Ordering::Release);
        }
    }
}

#[derive(Debug, Default)]
pub struct RunController {
    current: Arc<AtomicU64>,
    active: Arc<AtomicBool>,
    cancel: Option<Sender<()>>,
}

impl RunController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.current.load(Ordering::Acquire)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Issues the token for a new run, rejecting it while another run still
    /// holds its token.
    pub fn begin(&mut self) -> Result<RunToken> {
        if self
            .active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(VisualizerError::ConcurrentRun { active: self.generation() });
        }

        let generation = self.current.fetch_add(1, Ordering::AcqRel) + 1;
        let (tx, rx) = bounded(0);
        self.cancel = Some(tx);
        info!("Starting run {generation}");

        Ok(RunToken {
            generation,
            current: Arc::clone(&self.current),
            active: Some(Arc::clone(&self.active)),
            cancelled: rx,
        })
    }

    /// Marks the active run stale. Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let stale = self.current.fetch_add(1, Ordering::AcqRel);
        self.cancel.take();
        debug!("Cancelled run {stale}");
        true
    }
}
