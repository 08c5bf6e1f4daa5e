//! Per-step history of a simulation run.

use serde::{Deserialize, Serialize};

use crate::common::PageId;
use crate::frames::FrameSet;
use crate::policy::StepExtras;

/// What one reference did to the frame set.
///
/// `frames` is a copy taken after the step; later steps never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// The referenced page.
    pub page: PageId,

    /// Resident pages after the reference, in slot order.
    pub frames: Vec<PageId>,

    /// Whether the reference faulted.
    pub fault: bool,

    /// Policy-specific state after the reference.
    pub extras: StepExtras,
}

/// Append-only log of [`StepRecord`]s for one run.
#[derive(Debug, Default)]
pub struct HistoryRecorder {
    steps: Vec<StepRecord>,
    faults: usize,
}

impl HistoryRecorder {
    /// Create a recorder sized for `steps` references.
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            steps: Vec::with_capacity(steps),
            faults: 0,
        }
    }

    /// Append the outcome of one step.
    pub fn record(&mut self, page: PageId, frames: &FrameSet, fault: bool, extras: StepExtras) {
        if fault {
            self.faults += 1;
        }
        self.steps.push(StepRecord {
            page,
            frames: frames.snapshot(),
            fault,
            extras,
        });
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of recorded faults.
    pub fn fault_count(&self) -> usize {
        self.faults
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Consume the recorder, yielding the steps in order.
    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }
}
