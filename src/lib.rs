//! pagesim - page replacement policy simulator.
//!
//! Replays a page reference stream against a fixed pool of frames under
//! seven eviction policies and reports faults plus per-step frame contents.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Harness (simulation/)                       │   │
//! │  │   run_single_simulation · compare_all_algorithms         │   │
//! │  │        HistoryRecorder → SimulationResult                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Policies (policy/)                          │   │
//! │  │   FIFO | LRU | Clock | LFU | Adaptive | ARC | LIRS       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              FrameSet (frames/)                          │   │
//! │  │        bounded, slot-ordered resident pages              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, ReferenceStream, Error, config)
//! - [`frames`] - The resident page set
//! - [`policy`] - Replacement policy implementations
//! - [`simulation`] - Harness, history, and results
//!
//! # Quick Start
//! ```
//! use pagesim::{compare_all_algorithms, run_single_simulation, PolicyKind, ReferenceStream};
//!
//! let pages = ReferenceStream::parse("1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5").unwrap();
//!
//! let clock = run_single_simulation("Clock", &pages, 3).unwrap();
//! assert_eq!(clock.pointer_history().len(), pages.len());
//!
//! let report = compare_all_algorithms(&pages, 3).unwrap();
//! assert_eq!(report.get(PolicyKind::Lru).unwrap().faults(), Some(10));
//! ```

pub mod common;
pub mod frames;
pub mod policy;
pub mod simulation;

// Re-export commonly used items at crate root for convenience
pub use common::{Error, PageId, ReferenceStream, Result};
pub use frames::FrameSet;
pub use policy::{available_policies, Policy, PolicyKind, StepExtras};
pub use simulation::{
    compare_all_algorithms, compare_all_algorithms_parallel, run_single_simulation,
    ComparisonEntry, ComparisonReport, RunStats, SimulationResult, StepRecord,
};
