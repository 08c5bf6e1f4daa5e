//! Configuration for a simulation run.
//!
//! The constants here are literal values the policies depend on. Changing
//! any of them changes eviction order and therefore every recorded trace.

use crate::common::{Error, Result};

/// Number of recent fault outcomes the Adaptive policy looks at.
pub const ADAPTIVE_WINDOW: usize = 5;

/// Faults within the window at which Adaptive switches FIFO → LRU.
///
/// Falling below this count while on LRU switches back to FIFO.
pub const ADAPTIVE_FAULT_THRESHOLD: usize = 3;

/// Share of frames LIRS reserves for LIR pages.
pub const LIRS_LIR_RATIO: f64 = 0.99;

/// Validated parameters for one simulation run.
///
/// # Example
/// ```
/// use pagesim::common::config::SimulationConfig;
///
/// let config = SimulationConfig::new(3).unwrap();
/// assert_eq!(config.frame_count(), 3);
/// assert!(SimulationConfig::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    frame_count: usize,
}

impl SimulationConfig {
    /// Create a config, rejecting a frame count of zero.
    pub fn new(frame_count: usize) -> Result<Self> {
        if frame_count == 0 {
            return Err(Error::InvalidConfig(
                "frame count must be greater than 0".to_string(),
            ));
        }
        Ok(Self { frame_count })
    }

    /// Create a config from a signed count, as collected from a form field.
    pub fn from_signed(frame_count: i64) -> Result<Self> {
        if frame_count <= 0 {
            return Err(Error::InvalidConfig(format!(
                "frame count must be greater than 0, got {}",
                frame_count
            )));
        }
        let count = usize::try_from(frame_count)
            .map_err(|_| Error::InvalidConfig(format!("frame count {} too large", frame_count)))?;
        Self::new(count)
    }

    /// Number of frames in the pool.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}

/// LIR capacity for a pool of `frame_count` frames: `max(1, floor(0.99 * c))`.
pub fn lirs_lir_size(frame_count: usize) -> usize {
    ((frame_count as f64 * LIRS_LIR_RATIO).floor() as usize).max(1)
}
