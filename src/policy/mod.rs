//! Page replacement policies.
//!
//! Implements:
//! - [`FifoPolicy`] - First-In-First-Out
//! - [`LruPolicy`] - Least Recently Used
//! - [`ClockPolicy`] - Second chance with a sweeping hand
//! - [`LfuPolicy`] - Least Frequently Used, FIFO among ties
//! - [`AdaptivePolicy`] - Switches between FIFO and LRU on recent fault density
//! - [`ArcPolicy`] - Adaptive Replacement Cache
//! - [`LirsPolicy`] - Low Inter-reference Recency Set
//!
//! Every policy implements [`Policy`]: advance by one reference, mutate the
//! [`FrameSet`] the harness lends it, report whether the reference faulted.

mod adaptive;
mod arc;
mod clock;
mod fifo;
mod lfu;
mod lirs;
mod lru;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::{Error, PageId, Result};
use crate::frames::FrameSet;

pub use adaptive::AdaptivePolicy;
pub use arc::ArcPolicy;
pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lirs::{LirsPolicy, LirsStatus};
pub use lru::LruPolicy;

/// A page replacement state machine.
///
/// A fresh instance is built for every run and never shared between runs.
pub trait Policy: Send {
    /// Which policy this is.
    fn kind(&self) -> PolicyKind;

    /// Process one reference.
    ///
    /// Returns `true` if `page` was not resident (a fault). On return,
    /// `frames` holds the resident set after the reference.
    ///
    /// # Errors
    /// - `Error::PolicyInvariant` if internal bookkeeping is inconsistent
    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool>;

    /// Auxiliary state worth recording after the latest step.
    fn extras(&self) -> StepExtras {
        StepExtras::None
    }
}

/// Policy-specific state captured after each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StepExtras {
    /// FIFO and LRU have nothing beyond the frame contents.
    None,

    /// Hand position and one reference bit per occupied slot.
    Clock { pointer: usize, ref_bits: Vec<u8> },

    /// Sub-policy that handled the step.
    Adaptive { active: PolicyKind },

    /// Access count of every resident page, sorted by page.
    Lfu { frequencies: Vec<(PageId, u32)> },

    /// Adaptation target and list sizes.
    Arc {
        p: usize,
        t1: usize,
        t2: usize,
        b1: usize,
        b2: usize,
    },

    /// LIR pages, resident HIR pages, and stack depth.
    Lirs { lir: usize, hir: usize, stack: usize },
}

/// The seven simulated policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyKind {
    #[serde(rename = "FIFO")]
    Fifo,
    #[serde(rename = "LRU")]
    Lru,
    #[serde(rename = "Clock")]
    Clock,
    #[serde(rename = "Adaptive")]
    Adaptive,
    #[serde(rename = "LFU")]
    Lfu,
    #[serde(rename = "ARC")]
    Arc,
    #[serde(rename = "LIRS")]
    Lirs,
}

impl PolicyKind {
    /// All policies, in the order comparisons report them.
    pub const ALL: [PolicyKind; 7] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Clock,
        PolicyKind::Adaptive,
        PolicyKind::Lfu,
        PolicyKind::Arc,
        PolicyKind::Lirs,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Clock => "Clock",
            PolicyKind::Adaptive => "Adaptive",
            PolicyKind::Lfu => "LFU",
            PolicyKind::Arc => "ARC",
            PolicyKind::Lirs => "LIRS",
        }
    }

    /// One-line description for reports.
    pub fn description(&self) -> &'static str {
        match self {
            PolicyKind::Fifo => "First In, First Out - Replaces the oldest page in memory",
            PolicyKind::Lru => {
                "Least Recently Used - Replaces the page that hasn't been used for the longest time"
            }
            PolicyKind::Clock => {
                "Clock/Second Chance - Uses reference bits in a circular buffer approach"
            }
            PolicyKind::Adaptive => {
                "Adaptive Algorithm - Dynamically adjusts between different strategies"
            }
            PolicyKind::Lfu => {
                "Least Frequently Used - Replaces the page with the lowest access frequency"
            }
            PolicyKind::Arc => {
                "Adaptive Replacement Cache - IBM's algorithm balancing recency and frequency"
            }
            PolicyKind::Lirs => {
                "Low Inter-reference Recency Set - Advanced algorithm using inter-reference recency"
            }
        }
    }

    /// Build a fresh policy instance for a pool of `frame_count` frames.
    pub fn build(&self, frame_count: usize) -> Box<dyn Policy> {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Clock => Box::new(ClockPolicy::new(frame_count)),
            PolicyKind::Adaptive => Box::new(AdaptivePolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
            PolicyKind::Arc => Box::new(ArcPolicy::new(frame_count)),
            PolicyKind::Lirs => Box::new(LirsPolicy::new(frame_count)),
        }
    }
}

/// Names of every available policy, in comparison order.
pub fn available_policies() -> Vec<&'static str> {
    PolicyKind::ALL.iter().map(PolicyKind::name).collect()
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    /// Parse a policy name, ignoring case.
    ///
    /// `ML` and `MLPageReplacement` are legacy names for plain LRU.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        match name.to_ascii_uppercase().as_str() {
            "FIFO" => Ok(PolicyKind::Fifo),
            "LRU" | "ML" | "MLPAGEREPLACEMENT" => Ok(PolicyKind::Lru),
            "CLOCK" => Ok(PolicyKind::Clock),
            "ADAPTIVE" => Ok(PolicyKind::Adaptive),
            "LFU" => Ok(PolicyKind::Lfu),
            "ARC" => Ok(PolicyKind::Arc),
            "LIRS" => Ok(PolicyKind::Lirs),
            _ => Err(Error::UnknownPolicy(name.to_string())),
        }
    }
}

/// Evict the oldest resident page according to `candidates`.
///
/// Entries no longer resident are dropped first, then the front entry goes.
/// Only when no listed page is resident does a resident page missing from
/// `candidates` go instead, lowest slot first. That happens when a policy
/// takes over a frame set it never loaded (see [`AdaptivePolicy`]).
fn evict_oldest(
    candidates: &mut std::collections::VecDeque<PageId>,
    frames: &mut FrameSet,
) -> Result<PageId> {
    candidates.retain(|&p| frames.contains(p));

    let victim = match candidates.pop_front() {
        Some(page) => page,
        None => frames
            .get(0)
            .ok_or_else(|| Error::invariant("frame set", "eviction requested from an empty set"))?,
    };

    frames.remove(victim);
    Ok(victim)
}
