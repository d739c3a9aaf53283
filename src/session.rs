//! The controls side of the visualizer: one array, one renderer, at most
//! one sort in flight.
//!
//! A run takes the array and the renderer onto a worker thread and hands
//! them back when it finishes. While it is out, `shuffle` and `start` are
//! rejected with `ConcurrentRun`; `cancel` wakes the worker at its current
//! pace and `restart` is cancel, join, start. A sort that panics is
//! caught on the worker, so the parts still come back and a shuffle
//! recovers.

use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithm::Algorithm;
use crate::array_model::ArrayModel;
use crate::clock::Clock;
use crate::error::{Result, VisualizerError};
use crate::generation::RunController;
use crate::render::{HighlightKind, RenderPort};
use crate::scheduler::{Speed, StepScheduler};
use crate::sorter::{sort, RunReport};

type Outcome<R> = (ArrayModel, R, Result<RunReport>);

pub struct Session<R, C>
where
    R: RenderPort + Send + 'static,
    C: Clock + Clone + 'static,
{
    parts: Option<(ArrayModel, R)>,
    worker: Option<JoinHandle<Outcome<R>>>,
    controller: RunController,
    clock: C,
    speed: Speed,
    rng: StdRng,
    size: usize,
}

impl<R, C> Session<R, C>
where
    R: RenderPort + Send + 'static,
    C: Clock + Clone + 'static,
{
    /// Creates the first random array and draws it.
    pub fn new(mut render: R, clock: C, seed: u64, size: usize) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let arr = ArrayModel::shuffled(&mut rng, size);
        render.draw_frame(arr.as_slice(), &[], HighlightKind::Comparing)?;
        render.flush()?;
        Ok(Session {
            parts: Some((arr, render)),
            worker: None,
            controller: RunController::new(),
            clock,
            speed: Speed::default(),
            rng,
            size,
        })
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Takes effect from the next run.
    pub fn set_speed(&mut self, speed: i64) -> Speed {
        self.speed = Speed::new(speed);
        self.speed
    }

    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// The array, unless a run currently owns it.
    pub fn array(&self) -> Option<&ArrayModel> {
        self.parts.as_ref().map(|(arr, _)| arr)
    }

    pub fn renderer(&self) -> Option<&R> {
        self.parts.as_ref().map(|(_, render)| render)
    }

    pub fn shuffle(&mut self) -> Result<()> {
        self.reap_finished();
        self.ensure_idle()?;
        let fresh = ArrayModel::shuffled(&mut self.rng, self.size);
        let (arr, render) = self.parts.as_mut().ok_or(VisualizerError::WorkerPanicked)?;
        *arr = fresh;
        debug!("Shuffled: {}", arr);
        render.draw_frame(arr.as_slice(), &[], HighlightKind::Comparing)?;
        render.flush()?;
        Ok(())
    }

    /// Starts `algorithm` on a worker thread and returns the run's
    /// generation.
    pub fn start(&mut self, algorithm: Algorithm) -> Result<u64> {
        self.reap_finished();
        self.ensure_idle()?;
        let token = self.controller.begin()?;
        let generation = token.generation();
        let Some((mut arr, mut render)) = self.parts.take() else {
            return Err(VisualizerError::WorkerPanicked);
        };

        let scheduler = StepScheduler::new(self.clock.clone(), self.speed, token);
        info!("Run {generation}: {algorithm} sort at speed {}", self.speed);
        let handle = thread::Builder::new()
            .name(format!("sort-{generation}"))
            .spawn(move || {
                let run = panic::catch_unwind(AssertUnwindSafe(|| sort(&mut arr, algorithm, &mut render, scheduler)));
                let result = run.unwrap_or_else(|_| {
                    error!("Run {generation}: {algorithm} sort panicked");
                    Err(VisualizerError::WorkerPanicked)
                });
                (arr, render, result)
            })?;
        self.worker = Some(handle);
        Ok(generation)
    }

    /// Returns false when nothing was running.
    pub fn cancel(&mut self) -> bool {
        self.controller.cancel()
    }

    /// Blocks until the current run ends; `None` when there was none.
    pub fn wait(&mut self) -> Option<Result<RunReport>> {
        let worker = self.worker.take()?;
        Some(self.join(worker))
    }

    /// Collects a finished run without blocking.
    pub fn poll(&mut self) -> Option<Result<RunReport>> {
        if self.worker.as_ref()?.is_finished() {
            self.wait()
        } else {
            None
        }
    }

    pub fn restart(&mut self, algorithm: Algorithm) -> Result<u64> {
        if self.cancel() {
            if let Some(Err(e)) = self.wait() {
                if !e.is_cancelled() {
                    warn!("Previous run ended with: {e}");
                }
            }
        }
        self.start(algorithm)
    }

    fn join(&mut self, worker: JoinHandle<Outcome<R>>) -> Result<RunReport> {
        match worker.join() {
            Ok((arr, render, result)) => {
                self.parts = Some((arr, render));
                result
            }
            Err(_) => Err(VisualizerError::WorkerPanicked),
        }
    }

    fn reap_finished(&mut self) {
        if let Some(outcome) = self.poll() {
            match outcome {
                Ok(report) => debug!("Collected finished run: {report}"),
                Err(e) => debug!("Collected failed run: {e}"),
            }
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.worker.is_some() {
            return Err(VisualizerError::ConcurrentRun { active: self.controller.generation() });
        }
        // only a worker that died outside the sort loses the array
        if self.parts.is_none() {
            return Err(VisualizerError::WorkerPanicked);
        }
        Ok(())
    }
}

impl<R, C> Drop for Session<R, C>
where
    R: RenderPort + Send + 'static,
    C: Clock + Clone + 'static,
{
    fn drop(&mut self) {
        self.controller.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
