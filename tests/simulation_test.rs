//! Simulation harness tests.
//!
//! Fixed traces for every policy over the classic Belady stream, plus the
//! worked scenarios the visualization fixtures were built from.

use pagesim::simulation::simulate;
use pagesim::{
    compare_all_algorithms, run_single_simulation, Error, PageId, PolicyKind, ReferenceStream,
    StepExtras,
};
use pagesim::common::config::SimulationConfig;

const BELADY: [u32; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

fn stream(ids: &[u32]) -> ReferenceStream {
    ReferenceStream::from_ids(ids.iter().copied()).unwrap()
}

fn pids(ids: &[u32]) -> Vec<PageId> {
    ids.iter().copied().map(PageId::new).collect()
}

// ============================================================================
// Belady stream, 3 frames
// ============================================================================

#[test]
fn test_fifo_belady() {
    let result = run_single_simulation("FIFO", &stream(&BELADY), 3).unwrap();

    assert_eq!(result.total_faults, 9);
    assert_eq!(
        result.fault_history(),
        vec![true, true, true, true, true, true, true, false, false, true, true, false]
    );
    assert_eq!(result.steps[6].frames, pids(&[1, 2, 5]));
    assert_eq!(result.steps[11].frames, pids(&[5, 3, 4]));
}

#[test]
fn test_lru_belady() {
    let result = run_single_simulation("LRU", &stream(&BELADY), 3).unwrap();

    assert_eq!(result.total_faults, 10);
    assert_eq!(result.steps[11].frames, pids(&[3, 4, 5]));
}

#[test]
fn test_clock_belady_trace() {
    let result = run_single_simulation("Clock", &stream(&BELADY), 3).unwrap();

    assert_eq!(result.total_faults, 10);
    assert_eq!(
        result.pointer_history(),
        vec![0, 0, 0, 1, 2, 0, 1, 1, 1, 1, 2, 0]
    );
    // hits on 1 and 2 set their bits; the sweep for 3 clears them
    assert_eq!(result.ref_bits_history()[7], vec![0, 1, 0]);
    assert_eq!(result.ref_bits_history()[8], vec![0, 1, 1]);
    assert_eq!(result.ref_bits_history()[9], vec![0, 0, 0]);
    assert_eq!(result.steps[9].frames, pids(&[3, 1, 2]));
    assert_eq!(result.steps[11].frames, pids(&[3, 4, 5]));
}

#[test]
fn test_arc_belady() {
    let result = run_single_simulation("ARC", &stream(&BELADY), 3).unwrap();

    assert_eq!(result.total_faults, 10);
    assert_eq!(
        *result.final_extras(),
        StepExtras::Arc {
            p: 1,
            t1: 0,
            t2: 3,
            b1: 2,
            b2: 0
        }
    );
    assert_eq!(result.steps[11].frames, pids(&[1, 2, 5]));

    let payload = result.to_contract();
    assert_eq!(payload.adaptive_parameter, 1);
    assert_eq!(payload.t2_size, 3);
    assert_eq!(payload.b1_size, 2);
}

#[test]
fn test_lirs_belady() {
    let result = run_single_simulation("LIRS", &stream(&BELADY), 3).unwrap();

    // 1 and 2 become LIR and are never displaced by the one-off pages
    assert_eq!(result.total_faults, 8);
    assert_eq!(
        *result.final_extras(),
        StepExtras::Lirs {
            lir: 2,
            hir: 1,
            stack: 2
        }
    );
    assert_eq!(result.steps[11].frames, pids(&[1, 2, 5]));
}

#[test]
fn test_adaptive_belady() {
    let result = run_single_simulation("Adaptive", &stream(&BELADY), 3).unwrap();

    assert_eq!(result.total_faults, 10);
    let mut expected = vec![PolicyKind::Fifo; 5];
    expected.extend(vec![PolicyKind::Lru; 7]);
    assert_eq!(result.algo_history(), expected);
    // LRU takes over with the recency order built up during the FIFO steps
    assert_eq!(result.steps[5].frames, pids(&[4, 1, 2]));
    assert_eq!(result.steps[6].frames, pids(&[1, 2, 5]));
}

// ============================================================================
// LFU tie-break scenario
// ============================================================================

#[test]
fn test_lfu_tie_break_scenario() {
    let pages = stream(&[1, 1, 1, 2, 2, 2, 3, 3, 3, 1, 1, 1]);
    let result = run_single_simulation("LFU", &pages, 2).unwrap();

    // before 3 arrives, 1 and 2 are both at 3
    assert_eq!(
        result.steps[5].extras,
        StepExtras::Lfu {
            frequencies: vec![(PageId::new(1), 3), (PageId::new(2), 3)]
        }
    );
    // tie → 1 was loaded first and goes
    assert_eq!(result.steps[6].frames, pids(&[3, 2]));
    // second tie (2 and 3 at 3) → 2 goes
    assert_eq!(result.steps[9].frames, pids(&[3, 1]));
    assert_eq!(result.total_faults, 4);
    assert_eq!(
        result.frequencies(),
        vec![(PageId::new(1), 3), (PageId::new(3), 3)]
    );
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_single_frame_faults_except_repeats() {
    let ids = [3, 3, 1, 2, 2, 2, 3, 1, 1];
    for name in ["FIFO", "LRU"] {
        let result = run_single_simulation(name, &stream(&ids), 1).unwrap();
        let expected: Vec<bool> = ids
            .iter()
            .enumerate()
            .map(|(i, p)| i == 0 || ids[i - 1] != *p)
            .collect();
        assert_eq!(result.fault_history(), expected, "{}", name);
    }
}

#[test]
fn test_distinct_pages_with_room_fault_once() {
    let ids = [5, 1, 4, 2, 3, 5, 1, 4, 2, 3];
    for kind in PolicyKind::ALL {
        let result = run_single_simulation(kind.name(), &stream(&ids), 10).unwrap();
        assert_eq!(result.total_faults, 5, "{}", kind);
    }
}

#[test]
fn test_validation_errors_leave_no_result() {
    let pages = stream(&BELADY);

    assert!(matches!(
        run_single_simulation("Optimal", &pages, 3),
        Err(Error::UnknownPolicy(_))
    ));
    assert!(matches!(
        run_single_simulation("Clock", &pages, 0),
        Err(Error::InvalidConfig(_))
    ));
    assert!(matches!(
        ReferenceStream::parse(" , ,"),
        Err(Error::Parse(_))
    ));
}

#[test]
fn test_parsed_stream_runs() {
    let pages = ReferenceStream::parse("7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2").unwrap();
    let result = simulate(PolicyKind::Lru, &pages, SimulationConfig::new(3).unwrap()).unwrap();

    // textbook LRU on this stream with 3 frames
    assert_eq!(result.total_faults, 9);
}

// ============================================================================
// Comparison mode
// ============================================================================

#[test]
fn test_compare_matches_single_runs() {
    let pages = stream(&[1, 2, 3, 1, 4, 5, 2, 1, 6, 7, 1, 2, 3, 8, 3, 9, 2, 1, 5, 4]);
    let report = compare_all_algorithms(&pages, 3).unwrap();

    assert_eq!(report.len(), 7);
    for kind in PolicyKind::ALL {
        let single = run_single_simulation(kind.name(), &pages, 3).unwrap();
        let entry = report.get(kind).unwrap();
        assert_eq!(entry.faults(), Some(single.total_faults), "{}", kind);
        assert_eq!(entry.fault_rate(), Some(single.fault_rate()), "{}", kind);
    }
}

#[test]
fn test_compare_belady_best() {
    let report = compare_all_algorithms(&stream(&BELADY), 3).unwrap();
    assert_eq!(report.best(), Some((PolicyKind::Lirs, 8)));
}

#[test]
fn test_runs_are_deterministic() {
    let pages = stream(&[4, 2, 4, 1, 3, 2, 5, 4, 1, 1, 2, 6, 3, 4, 2, 5]);
    for kind in PolicyKind::ALL {
        let a = run_single_simulation(kind.name(), &pages, 3).unwrap();
        let b = run_single_simulation(kind.name(), &pages, 3).unwrap();
        assert_eq!(a, b, "{}", kind);
    }
}
