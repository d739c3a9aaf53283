use std::fmt;
use std::fmt::Display;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::algorithm::Algorithm;
use crate::array_model::{ArrayModel, SortKey};
use crate::clock::Clock;
use crate::error::Result;
use crate::render::{HighlightKind, RenderPort};
use crate::scheduler::StepScheduler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub comparisons: u64,
    pub writes: u64,
    pub steps: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub generation: u64,
    pub len: usize,
    pub stats: RunStats,
    pub elapsed: Duration,
}

impl Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sort on {} elements: {} comparisons, {} writes, {} steps in {:?}",
            self.algorithm, self.len, self.stats.comparisons, self.stats.writes, self.stats.steps, self.elapsed
        )
    }
}

/// Drives one algorithm over one array. Every mutation a runner makes is
/// followed by [`Sorter::step`]: overlay, pace, frame, in that order.
pub struct Sorter<'a, T: SortKey, R: RenderPort, C: Clock> {
    pub(crate) arr: &'a mut ArrayModel<T>,
    pub(crate) render: &'a mut R,
    pub(crate) scheduler: StepScheduler<C>,
    pub(crate) algorithm: Algorithm,
    pub(crate) stats: RunStats,
}

impl<'a, T: SortKey, R: RenderPort, C: Clock> Sorter<'a, T, R, C> {
    pub fn new(
        arr: &'a mut ArrayModel<T>,
        render: &'a mut R,
        scheduler: StepScheduler<C>,
        algorithm: Algorithm,
    ) -> Self {
        Sorter {
            arr,
            render,
            scheduler,
            algorithm,
            stats: RunStats::default(),
        }
    }

    pub fn run(mut self) -> Result<RunReport> {
        let start = Instant::now();
        let len = self.arr.len();
        debug!("Input: {}", self.arr);

        // nothing to reorder, and bucket/counting ranges would be degenerate
        if len > 1 {
            match self.algorithm {
                Algorithm::Bubble => self.bubble_sort()?,
                Algorithm::Selection => self.selection_sort()?,
                Algorithm::Insertion => self.insertion_sort()?,
                Algorithm::Merge => self.merge_sort(0, len - 1)?,
                Algorithm::Quick => self.quick_sort()?,
                Algorithm::Heap => self.heap_sort()?,
                Algorithm::Counting => self.counting_sort()?,
                Algorithm::Radix => self.radix_sort()?,
                Algorithm::Bucket => self.bucket_sort()?,
            }
        }
        self.render.clear_overlay()?;

        debug!("Output: {}", self.arr);
        debug_assert!(self.arr.is_sorted(), "{} sort left the array unsorted", self.algorithm);
        debug_assert_eq!(self.stats.steps, self.scheduler.paces());

        let report = RunReport {
            algorithm: self.algorithm,
            generation: self.scheduler.generation(),
            len,
            stats: self.stats,
            elapsed: start.elapsed(),
        };
        info!("{}", report);
        Ok(report)
    }

    /// One observable step: banner, pause, then the frame.
    pub(crate) fn step(&mut self, status: &str, highlight: &[usize], kind: HighlightKind) -> Result<()> {
        self.render.draw_overlay(status, self.algorithm.complexity())?;
        self.scheduler.pace(&mut *self.render)?;
        self.render.draw_frame(self.arr.as_slice(), highlight, kind)?;
        self.stats.steps += 1;
        Ok(())
    }

    #[inline]
    pub(crate) fn greater(&mut self, a: u32, b: u32) -> bool {
        self.stats.comparisons += 1;
        a > b
    }

    #[inline]
    pub(crate) fn less(&mut self, a: u32, b: u32) -> bool {
        self.stats.comparisons += 1;
        a < b
    }

    /// Mutations refuse to touch the array once the run is stale.
    #[inline]
    pub(crate) fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.scheduler.check()?;
        self.arr.swap(i, j);
        self.stats.writes += 2;
        Ok(())
    }

    #[inline]
    pub(crate) fn write(&mut self, i: usize, value: T) -> Result<()> {
        self.scheduler.check()?;
        self.arr.set(i, value);
        self.stats.writes += 1;
        Ok(())
    }
}

/// Runs `algorithm` to completion on `arr`, drawing through `render` and
/// pacing with `scheduler`.
pub fn sort<T: SortKey, R: RenderPort, C: Clock>(
    arr: &mut ArrayModel<T>,
    algorithm: Algorithm,
    render: &mut R,
    scheduler: StepScheduler<C>,
) -> Result<RunReport> {
    Sorter::new(arr, render, scheduler, algorithm).run()
}
