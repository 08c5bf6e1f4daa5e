//! LFU (Least Frequently Used) replacement policy.
//!
//! The victim is the resident page with the lowest reference count. Ties
//! go to the page that became resident earliest. A page's count is
//! forgotten when it is evicted.

use std::collections::BTreeMap;

use crate::common::{Error, PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{Policy, PolicyKind, StepExtras};

/// Evicts the least frequently referenced page, FIFO among ties.
#[derive(Debug, Default)]
pub struct LfuPolicy {
    /// Reference count per resident page.
    frequencies: BTreeMap<PageId, u32>,

    /// Resident pages in the order they were loaded. Only used to break ties.
    load_order: Vec<PageId>,
}

impl LfuPolicy {
    /// Create a new LFU policy.
    pub fn new() -> Self {
        Self {
            frequencies: BTreeMap::new(),
            load_order: Vec::new(),
        }
    }

    /// Reference count of a resident page.
    pub fn frequency(&self, page: PageId) -> Option<u32> {
        self.frequencies.get(&page).copied()
    }

    fn frequency_or_zero(&self, page: PageId) -> u32 {
        self.frequency(page).unwrap_or(0)
    }

    fn load_rank(&self, page: PageId) -> usize {
        self.load_order
            .iter()
            .position(|&p| p == page)
            .unwrap_or(usize::MAX)
    }

    /// Pick a victim among resident pages.
    fn select_victim(&self, frames: &FrameSet) -> Option<PageId> {
        let min_frequency = frames
            .as_slice()
            .iter()
            .map(|&p| self.frequency_or_zero(p))
            .min()?;

        frames
            .as_slice()
            .iter()
            .copied()
            .filter(|&p| self.frequency_or_zero(p) == min_frequency)
            .min_by_key(|&p| self.load_rank(p))
    }
}

impl Policy for LfuPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        if frames.contains(page) {
            *self.frequencies.entry(page).or_insert(0) += 1;
            return Ok(false);
        }

        if frames.is_full() {
            let victim = self
                .select_victim(frames)
                .ok_or_else(|| Error::invariant("LFU", "full frame set has no victim"))?;
            let slot = frames
                .position(victim)
                .ok_or_else(|| Error::invariant("LFU", format!("victim {} not resident", victim)))?;

            // new page takes the victim's slot
            frames.replace(slot, page)?;
            self.frequencies.remove(&victim);
            self.load_order.retain(|&p| p != victim);
        } else {
            frames.push(page)?;
        }

        self.frequencies.insert(page, 1);
        self.load_order.push(page);
        Ok(true)
    }

    fn extras(&self) -> StepExtras {
        StepExtras::Lfu {
            frequencies: self.frequencies.iter().map(|(&p, &f)| (p, f)).collect(),
        }
    }
}
