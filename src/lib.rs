pub mod algorithm;
pub mod array_model;
pub mod batch;
pub mod clock;
pub mod config;
pub mod controls;
pub mod distribution;
pub mod error;
pub mod generation;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod sorter;
mod heap;
mod merge;
mod quick;
mod simple;

pub use algorithm::Algorithm;
pub use array_model::{ArrayModel, SortKey};
pub use batch::{sort_headless, verify, Summary};
pub use clock::{Clock, InstantClock, SystemClock};
pub use controls::Command;
pub use error::{Result, VisualizerError};
pub use generation::{RunController, RunToken};
pub use render::{HighlightKind, NullRenderer, RecordingRenderer, RenderEvent, RenderPort, TerminalRenderer};
pub use scheduler::{Speed, StepScheduler};
pub use session::Session;
pub use sorter::{sort, RunReport, RunStats, Sorter};
