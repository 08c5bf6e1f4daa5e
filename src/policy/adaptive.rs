//! Adaptive meta-policy: FIFO while faults are rare, LRU while they are not.
//!
//! Both sub-policies live for the whole run and share the caller's frame
//! set. Only the selected one decides each reference; the other just
//! tracks arrival or recency, so after a switch it evicts in its own order. After every step the
//! last [`ADAPTIVE_WINDOW`] fault outcomes are counted:
//! - on FIFO, `>= ADAPTIVE_FAULT_THRESHOLD` faults switches to LRU
//! - on LRU, fewer than that switches back to FIFO
//!
//! A switch applies from the next reference on.

use std::collections::VecDeque;

use crate::common::config::{ADAPTIVE_FAULT_THRESHOLD, ADAPTIVE_WINDOW};
use crate::common::{PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{FifoPolicy, LruPolicy, Policy, PolicyKind, StepExtras};

/// Delegates to FIFO or LRU depending on recent fault density.
#[derive(Debug)]
pub struct AdaptivePolicy {
    fifo: FifoPolicy,
    lru: LruPolicy,

    /// Sub-policy that will handle the next reference.
    use_lru: bool,

    /// Most recent fault outcomes (back = latest).
    window: VecDeque<bool>,

    /// Sub-policy that handled the latest reference.
    last_active: PolicyKind,
}

impl AdaptivePolicy {
    /// Create a new Adaptive policy, starting on FIFO.
    pub fn new() -> Self {
        Self {
            fifo: FifoPolicy::new(),
            lru: LruPolicy::new(),
            use_lru: false,
            window: VecDeque::with_capacity(ADAPTIVE_WINDOW + 1),
            last_active: PolicyKind::Fifo,
        }
    }

    /// Sub-policy that will handle the next reference.
    pub fn selected(&self) -> PolicyKind {
        if self.use_lru {
            PolicyKind::Lru
        } else {
            PolicyKind::Fifo
        }
    }

    fn record(&mut self, fault: bool) {
        self.window.push_back(fault);
        if self.window.len() > ADAPTIVE_WINDOW {
            self.window.pop_front();
        }

        if self.window.len() == ADAPTIVE_WINDOW {
            let faults = self.window.iter().filter(|&&f| f).count();
            if !self.use_lru && faults >= ADAPTIVE_FAULT_THRESHOLD {
                self.use_lru = true;
            } else if self.use_lru && faults < ADAPTIVE_FAULT_THRESHOLD {
                self.use_lru = false;
            }
        }
    }
}

impl Default for AdaptivePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for AdaptivePolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Adaptive
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        self.last_active = self.selected();
        let fault = if self.use_lru {
            let fault = self.lru.step(page, frames)?;
            self.fifo.observe(page, fault, frames);
            fault
        } else {
            let fault = self.fifo.step(page, frames)?;
            self.lru.observe(page, frames);
            fault
        };

        self.record(fault);
        Ok(fault)
    }

    fn extras(&self) -> StepExtras {
        StepExtras::Adaptive {
            active: self.last_active,
        }
    }
}
