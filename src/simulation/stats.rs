//! Fault statistics for a run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hit and fault counters for one policy over one stream.
///
/// Unlike a [`SimulationResult`](crate::simulation::SimulationResult), this
/// carries no history and is cheap to copy, print, and compare.
///
/// # Example
/// ```
/// use pagesim::simulation::RunStats;
///
/// let stats = RunStats::new(3, 7);
/// assert_eq!(stats.references(), 10);
/// assert_eq!(stats.fault_rate(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub faults: usize,
    pub hits: usize,
}

impl RunStats {
    pub fn new(faults: usize, hits: usize) -> Self {
        Self { faults, hits }
    }

    /// Total references processed.
    pub fn references(&self) -> usize {
        self.faults + self.hits
    }

    /// Faults as a percentage of references (0.0 to 100.0).
    pub fn fault_rate(&self) -> f64 {
        match self.references() {
            0 => 0.0,
            total => self.faults as f64 * 100.0 / total as f64,
        }
    }

    /// Hits as a fraction of references (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        match self.references() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ faults: {}, hits: {}, fault_rate: {:.2}% }}",
            self.faults,
            self.hits,
            self.fault_rate()
        )
    }
}
