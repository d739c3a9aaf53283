//! Error types for visualizer runs and controls.

use std::io;
use thiserror::Error;

/// Errors that can end a sort run or reject a control action.
///
/// Out-of-range indices are not represented here: they are logic defects
/// and panic inside [`ArrayModel`](crate::ArrayModel).
#[derive(Debug, Error)]
pub enum VisualizerError {
    /// A run was started while another one is still in flight.
    #[error("run {active} is still in progress")]
    ConcurrentRun {
        /// Generation of the run that currently owns the array.
        active: u64,
    },

    /// The run was superseded by a cancel or restart.
    #[error("run {generation} was cancelled")]
    Cancelled {
        /// Generation of the stale run.
        generation: u64,
    },

    /// Counting sort would need a frequency table wider than the limit.
    #[error("value range [{min}, {max}] exceeds the counting limit of {limit}")]
    RangeTooLarge { min: u32, max: u32, limit: u32 },

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Writing a frame failed, or the sort thread could not be spawned.
    #[error("i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("sort worker panicked")]
    WorkerPanicked,
}

impl VisualizerError {
    /// Cancellation is the expected end of a superseded run, not a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, VisualizerError::Cancelled { .. })
    }
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
