//! Simulation harness and its outputs.
//!
//! # Components
//! - [`run_single_simulation`] / [`compare_all_algorithms`] - Entry points
//! - [`HistoryRecorder`] / [`StepRecord`] - Per-step frame snapshots
//! - [`SimulationResult`] / [`VisualizationPayload`] - One run's trace
//! - [`ComparisonReport`] / [`ComparisonEntry`] - Side-by-side fault counts
//! - [`RunStats`] - Fault and hit counters

mod harness;
mod history;
mod result;
mod stats;

pub use harness::{
    compare_all_algorithms, compare_all_algorithms_parallel, run_single_simulation, simulate,
};
pub use history::{HistoryRecorder, StepRecord};
pub use result::{
    ComparisonEntry, ComparisonReport, SimulationResult, VisualizationPayload, FAILED_SENTINEL,
};
pub use stats::RunStats;
