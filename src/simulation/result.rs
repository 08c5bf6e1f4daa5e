//! Simulation outputs handed to the visualization and report layers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::{PageId, ReferenceStream};
use crate::policy::{PolicyKind, StepExtras};
use crate::simulation::{RunStats, StepRecord};

static NO_EXTRAS: StepExtras = StepExtras::None;

/// Full trace of one policy over one reference stream.
///
/// Invariants: `steps.len() == pages.len()` and `total_faults` equals the
/// number of faulting steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub policy: PolicyKind,
    pub pages: ReferenceStream,
    pub frame_count: usize,
    pub total_faults: usize,
    pub steps: Vec<StepRecord>,
}

impl SimulationResult {
    /// Fault and hit counters.
    pub fn stats(&self) -> RunStats {
        RunStats::new(self.total_faults, self.hit_count())
    }

    /// Number of steps that did not fault.
    pub fn hit_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.fault).count()
    }

    /// Faults as a percentage of references.
    pub fn fault_rate(&self) -> f64 {
        self.stats().fault_rate()
    }

    /// Frame contents after each step.
    pub fn history(&self) -> Vec<Vec<PageId>> {
        self.steps.iter().map(|s| s.frames.clone()).collect()
    }

    /// Fault flag of each step.
    pub fn fault_history(&self) -> Vec<bool> {
        self.steps.iter().map(|s| s.fault).collect()
    }

    /// Clock hand position after each step. Empty for other policies.
    pub fn pointer_history(&self) -> Vec<usize> {
        self.steps
            .iter()
            .filter_map(|s| match &s.extras {
                StepExtras::Clock { pointer, .. } => Some(*pointer),
                _ => None,
            })
            .collect()
    }

    /// Clock reference bits after each step. Empty for other policies.
    pub fn ref_bits_history(&self) -> Vec<Vec<u8>> {
        self.steps
            .iter()
            .filter_map(|s| match &s.extras {
                StepExtras::Clock { ref_bits, .. } => Some(ref_bits.clone()),
                _ => None,
            })
            .collect()
    }

    /// Sub-policy Adaptive used at each step. Empty for other policies.
    pub fn algo_history(&self) -> Vec<PolicyKind> {
        self.steps
            .iter()
            .filter_map(|s| match s.extras {
                StepExtras::Adaptive { active } => Some(active),
                _ => None,
            })
            .collect()
    }

    /// Auxiliary state after the last step.
    pub fn final_extras(&self) -> &StepExtras {
        self.steps
            .last()
            .map(|s| &s.extras)
            .unwrap_or(&NO_EXTRAS)
    }

    /// Final LFU reference counts. Empty for other policies.
    pub fn frequencies(&self) -> Vec<(PageId, u32)> {
        match self.final_extras() {
            StepExtras::Lfu { frequencies } => frequencies.clone(),
            _ => Vec::new(),
        }
    }

    /// Flatten into the record shape the visualization layer reads.
    pub fn to_contract(&self) -> VisualizationPayload {
        let (adaptive_parameter, t1_size, t2_size, b1_size, b2_size) = match *self.final_extras()
        {
            StepExtras::Arc { p, t1, t2, b1, b2 } => (p, t1, t2, b1, b2),
            _ => (0, 0, 0, 0, 0),
        };
        let (lir_count, hir_count, stack_size) = match *self.final_extras() {
            StepExtras::Lirs { lir, hir, stack } => (lir, hir, stack),
            _ => (0, 0, 0),
        };

        VisualizationPayload {
            algorithm_name: self.policy,
            pages: self.pages.to_vec(),
            frame_size: self.frame_count,
            total_faults: self.total_faults,
            history: self.history(),
            fault_history: self.fault_history(),
            pointer_history: self.pointer_history(),
            ref_bits_history: self.ref_bits_history(),
            algo_history: self.algo_history(),
            frequencies: self.frequencies(),
            adaptive_parameter,
            t1_size,
            t2_size,
            b1_size,
            b2_size,
            lir_count,
            hir_count,
            stack_size,
        }
    }
}

/// Flat per-run record consumed by the frame grid and charts.
///
/// Policy-specific sequences are empty and final values are zero for
/// policies that do not produce them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationPayload {
    pub algorithm_name: PolicyKind,
    pub pages: Vec<PageId>,
    pub frame_size: usize,
    pub total_faults: usize,
    pub history: Vec<Vec<PageId>>,
    pub fault_history: Vec<bool>,
    pub pointer_history: Vec<usize>,
    pub ref_bits_history: Vec<Vec<u8>>,
    pub algo_history: Vec<PolicyKind>,
    pub frequencies: Vec<(PageId, u32)>,
    pub adaptive_parameter: usize,
    #[serde(rename = "T1Size")]
    pub t1_size: usize,
    #[serde(rename = "T2Size")]
    pub t2_size: usize,
    #[serde(rename = "B1Size")]
    pub b1_size: usize,
    #[serde(rename = "B2Size")]
    pub b2_size: usize,
    #[serde(rename = "LIRCount")]
    pub lir_count: usize,
    #[serde(rename = "HIRCount")]
    pub hir_count: usize,
    pub stack_size: usize,
}

/// Placeholder `faults` and `faultRate` of a failed comparison entry.
pub const FAILED_SENTINEL: i64 = -1;

fn failed_faults() -> i64 {
    FAILED_SENTINEL
}

fn failed_fault_rate() -> f64 {
    FAILED_SENTINEL as f64
}

/// One policy's line in a comparison.
///
/// A failed run still carries `faults` and `faultRate`, both set to
/// [`FAILED_SENTINEL`], so readers that expect the counts always find them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparisonEntry {
    Completed {
        faults: usize,
        #[serde(rename = "faultRate")]
        fault_rate: f64,
    },
    Failed {
        #[serde(default = "failed_faults")]
        faults: i64,
        #[serde(rename = "faultRate", default = "failed_fault_rate")]
        fault_rate: f64,
        error: String,
    },
}

impl ComparisonEntry {
    pub fn completed(stats: RunStats) -> Self {
        ComparisonEntry::Completed {
            faults: stats.faults,
            fault_rate: stats.fault_rate(),
        }
    }

    /// Entry for a run that stopped with `error`.
    pub fn failed(error: impl Into<String>) -> Self {
        ComparisonEntry::Failed {
            faults: failed_faults(),
            fault_rate: failed_fault_rate(),
            error: error.into(),
        }
    }

    /// Fault count, or `None` if the run failed.
    pub fn faults(&self) -> Option<usize> {
        match self {
            ComparisonEntry::Completed { faults, .. } => Some(*faults),
            ComparisonEntry::Failed { .. } => None,
        }
    }

    pub fn fault_rate(&self) -> Option<f64> {
        match self {
            ComparisonEntry::Completed { fault_rate, .. } => Some(*fault_rate),
            ComparisonEntry::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ComparisonEntry::Failed { .. })
    }
}

/// Results of every policy over the same stream, in canonical order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonReport {
    entries: BTreeMap<PolicyKind, ComparisonEntry>,
}

impl ComparisonReport {
    pub fn new(entries: BTreeMap<PolicyKind, ComparisonEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, kind: PolicyKind) -> Option<&ComparisonEntry> {
        self.entries.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PolicyKind, &ComparisonEntry)> {
        self.entries.iter().map(|(&k, e)| (k, e))
    }

    /// Policy with the fewest faults; earlier policies win ties.
    pub fn best(&self) -> Option<(PolicyKind, usize)> {
        self.iter()
            .filter_map(|(kind, entry)| entry.faults().map(|f| (kind, f)))
            .min_by_key(|&(_, faults)| faults)
    }
}
