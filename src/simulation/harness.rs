//! Simulation harness - drives policies over a reference stream.
//!
//! - [`run_single_simulation`] - one policy, full per-step history
//! - [`compare_all_algorithms`] - every policy, fault counts only
//! - [`compare_all_algorithms_parallel`] - same, one thread per policy
//!
//! Each run owns a fresh policy and [`FrameSet`], so runs never observe
//! each other and can execute in any order.

use std::collections::BTreeMap;

use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::common::config::SimulationConfig;
use crate::common::{Error, ReferenceStream, Result};
use crate::frames::FrameSet;
use crate::policy::{Policy, PolicyKind};
use crate::simulation::{
    ComparisonEntry, ComparisonReport, HistoryRecorder, RunStats, SimulationResult,
};

/// Run one policy by name and capture its full history.
///
/// # Errors
/// - `Error::UnknownPolicy` if `policy_name` names no policy
/// - `Error::InvalidConfig` if `frame_count` is 0
/// - `Error::PolicyInvariant` if the policy's bookkeeping breaks mid-run
///
/// # Example
/// ```
/// use pagesim::{run_single_simulation, ReferenceStream};
///
/// let pages = ReferenceStream::from_ids([1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]).unwrap();
/// let result = run_single_simulation("FIFO", &pages, 3).unwrap();
/// assert_eq!(result.total_faults, 9);
/// assert_eq!(result.steps.len(), pages.len());
/// ```
pub fn run_single_simulation(
    policy_name: &str,
    pages: &ReferenceStream,
    frame_count: usize,
) -> Result<SimulationResult> {
    let kind: PolicyKind = policy_name.parse()?;
    let config = SimulationConfig::new(frame_count)?;
    simulate(kind, pages, config)
}

/// Run one policy and capture its full history.
pub fn simulate(
    kind: PolicyKind,
    pages: &ReferenceStream,
    config: SimulationConfig,
) -> Result<SimulationResult> {
    let mut recorder = HistoryRecorder::with_capacity(pages.len());
    let stats = drive(
        kind.build(config.frame_count()),
        pages,
        config,
        Some(&mut recorder),
    )?;

    debug_assert_eq!(stats.faults, recorder.fault_count());
    Ok(SimulationResult {
        policy: kind,
        pages: pages.clone(),
        frame_count: config.frame_count(),
        total_faults: stats.faults,
        steps: recorder.into_steps(),
    })
}

/// Run every policy independently and report fault counts.
///
/// A policy that fails mid-run becomes a [`ComparisonEntry::Failed`]; the
/// others still run.
///
/// # Errors
/// - `Error::InvalidConfig` if `frame_count` is 0
pub fn compare_all_algorithms(
    pages: &ReferenceStream,
    frame_count: usize,
) -> Result<ComparisonReport> {
    let config = SimulationConfig::new(frame_count)?;
    Ok(compare_with(pages, config, |kind, frames| kind.build(frames)))
}

/// [`compare_all_algorithms`] with each policy on its own thread.
///
/// Produces the same report as the sequential version.
pub fn compare_all_algorithms_parallel(
    pages: &ReferenceStream,
    frame_count: usize,
) -> Result<ComparisonReport> {
    let config = SimulationConfig::new(frame_count)?;
    let entries = Mutex::new(BTreeMap::new());

    std::thread::scope(|scope| {
        for kind in PolicyKind::ALL {
            let entries = &entries;
            scope.spawn(move || {
                let entry = compare_one(kind.build(config.frame_count()), pages, config);
                entries.lock().insert(kind, entry);
            });
        }
    });

    Ok(ComparisonReport::new(entries.into_inner()))
}

// ============================================================================
// Internal
// ============================================================================

/// Compare every policy, building each instance with `build`.
fn compare_with<F>(pages: &ReferenceStream, config: SimulationConfig, build: F) -> ComparisonReport
where
    F: Fn(PolicyKind, usize) -> Box<dyn Policy>,
{
    let entries = PolicyKind::ALL
        .iter()
        .map(|&kind| {
            let entry = compare_one(build(kind, config.frame_count()), pages, config);
            (kind, entry)
        })
        .collect();
    ComparisonReport::new(entries)
}

fn compare_one(
    policy: Box<dyn Policy>,
    pages: &ReferenceStream,
    config: SimulationConfig,
) -> ComparisonEntry {
    let kind = policy.kind();
    match drive(policy, pages, config, None) {
        Ok(stats) => ComparisonEntry::completed(stats),
        Err(err) => {
            warn!("{} failed during comparison: {}", kind, err);
            ComparisonEntry::failed(err.to_string())
        }
    }
}

/// Step a fresh policy instance through every reference.
fn drive(
    mut policy: Box<dyn Policy>,
    pages: &ReferenceStream,
    config: SimulationConfig,
    mut recorder: Option<&mut HistoryRecorder>,
) -> Result<RunStats> {
    let kind = policy.kind();
    let mut frames = FrameSet::new(config.frame_count());
    let mut stats = RunStats::default();

    debug!(
        "running {} over {} references with {} frames",
        kind,
        pages.len(),
        config.frame_count()
    );

    for (step, &page) in pages.iter().enumerate() {
        let fault = policy
            .step(page, &mut frames)
            .map_err(|e| e.in_policy(kind.name()))?;

        if frames.len() > frames.capacity() {
            return Err(Error::invariant(
                kind.name(),
                format!(
                    "{} resident pages exceed {} frames at step {}",
                    frames.len(),
                    frames.capacity(),
                    step
                ),
            ));
        }

        if fault {
            stats.faults += 1;
        } else {
            stats.hits += 1;
        }
        trace!(
            "{} step {}: page {} {} -> {:?}",
            kind,
            step,
            page,
            if fault { "fault" } else { "hit" },
            frames.as_slice()
        );

        if let Some(recorder) = recorder.as_deref_mut() {
            recorder.record(page, &frames, fault, policy.extras());
        }
    }

    debug!("{} finished: {}", kind, stats);
    Ok(stats)
}
