//! Optimizer run logs.
//!
//! Parses the CSV logs population-based optimizers write while running and
//! derives the series `mesh-plot log` charts: the global best value per step
//! and each group's reported value over time.

pub mod error;
pub mod log;

pub use error::{LogError, LogResult};
pub use log::{GroupSeries, LogRecord, RunLog};
