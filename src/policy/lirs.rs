//! LIRS (Low Inter-reference Recency Set) replacement policy.
//!
//! Pages are classified as LIR (low inter-reference recency, the protected
//! bulk of the cache) or HIR (everything else). Only a small share of frames
//! holds resident HIR pages, in a FIFO queue `Q`.
//!
//! # Structures
//! - stack `S` (front = bottom): LIR pages by recency, plus any HIR pages
//!   that it still covers. Non-LIR pages at the bottom are pruned.
//! - queue `Q`: resident HIR pages, front = next to evict
//! - status per page ever seen
//!
//! With `c` frames, `LIRSize = max(1, floor(0.99c))` and
//! `HIRSize = c - LIRSize`. When `HIRSize` is 0 (a single frame) a page
//! admitted as HIR is not kept resident.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::common::config::lirs_lir_size;
use crate::common::{Error, PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{Policy, PolicyKind, StepExtras};

/// Classification of a page that has been referenced at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LirsStatus {
    Lir,
    HirResident,
    HirNonResident,
}

/// Protects pages with short reuse distance from one-off scans.
#[derive(Debug)]
pub struct LirsPolicy {
    stack: VecDeque<PageId>,
    queue: VecDeque<PageId>,
    status: HashMap<PageId, LirsStatus>,

    /// Pages in the order they were first referenced; fixes output order.
    first_seen: Vec<PageId>,

    /// Timestamp of each page's latest reference.
    last_access: HashMap<PageId, u64>,

    lir_count: usize,
    lir_size: usize,
    hir_size: usize,

    /// Logical clock, incremented on every reference.
    timestamp: u64,
}

impl LirsPolicy {
    /// Create a new LIRS policy for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        let lir_size = lirs_lir_size(capacity);
        Self {
            stack: VecDeque::new(),
            queue: VecDeque::new(),
            status: HashMap::new(),
            first_seen: Vec::new(),
            last_access: HashMap::new(),
            lir_count: 0,
            lir_size,
            hir_size: capacity.saturating_sub(lir_size),
            timestamp: 0,
        }
    }

    /// Status of `page`, or `None` if it was never referenced.
    pub fn status(&self, page: PageId) -> Option<LirsStatus> {
        self.status.get(&page).copied()
    }

    /// Logical time of the latest reference to `page`.
    pub fn last_access(&self, page: PageId) -> Option<u64> {
        self.last_access.get(&page).copied()
    }

    /// `(LIRSize, HIRSize)` for this pool.
    pub fn sizes(&self) -> (usize, usize) {
        (self.lir_size, self.hir_size)
    }

    /// Stack contents, bottom first.
    pub fn stack(&self) -> impl Iterator<Item = PageId> + '_ {
        self.stack.iter().copied()
    }

    /// Resident HIR queue, oldest first.
    pub fn queue(&self) -> impl Iterator<Item = PageId> + '_ {
        self.queue.iter().copied()
    }

    fn is_lir(&self, page: PageId) -> bool {
        self.status(page) == Some(LirsStatus::Lir)
    }

    fn in_stack(&self, page: PageId) -> bool {
        self.stack.contains(&page)
    }

    fn move_to_top(&mut self, page: PageId) {
        if let Some(pos) = self.stack.iter().position(|&p| p == page) {
            self.stack.remove(pos);
        }
        self.stack.push_back(page);
    }

    /// Pop non-LIR pages off the stack bottom.
    fn prune(&mut self) {
        while let Some(&bottom) = self.stack.front() {
            if self.is_lir(bottom) {
                break;
            }
            self.stack.pop_front();
        }
    }

    /// Demote the bottom-most LIR page to non-resident HIR.
    fn evict_lir(&mut self) -> Result<()> {
        let pos = self
            .stack
            .iter()
            .position(|&p| self.is_lir(p))
            .ok_or_else(|| {
                Error::invariant(
                    "LIRS",
                    format!("{} LIR pages counted but none on the stack", self.lir_count),
                )
            })?;

        if let Some(victim) = self.stack.remove(pos) {
            self.status.insert(victim, LirsStatus::HirNonResident);
            self.lir_count -= 1;
        }
        Ok(())
    }

    fn make_lir(&mut self, page: PageId) -> Result<()> {
        if self.lir_count >= self.lir_size {
            self.evict_lir()?;
        }
        self.status.insert(page, LirsStatus::Lir);
        self.lir_count += 1;
        self.move_to_top(page);
        self.prune();
        Ok(())
    }

    /// Hit on a resident HIR page.
    fn hir_hit(&mut self, page: PageId) -> Result<()> {
        if self.in_stack(page) {
            self.queue.retain(|&p| p != page);
            self.make_lir(page)
        } else {
            self.queue.retain(|&p| p != page);
            self.queue.push_back(page);
            Ok(())
        }
    }

    /// Fault on a new or non-resident page.
    fn admit(&mut self, page: PageId) -> Result<()> {
        if self.status(page).is_none() {
            self.first_seen.push(page);
        }

        if self.in_stack(page) || self.lir_count < self.lir_size {
            return self.make_lir(page);
        }

        if self.hir_size == 0 {
            self.status.insert(page, LirsStatus::HirNonResident);
            return Ok(());
        }

        if self.queue.len() >= self.hir_size {
            if let Some(victim) = self.queue.pop_front() {
                self.status.insert(victim, LirsStatus::HirNonResident);
            }
        }
        self.status.insert(page, LirsStatus::HirResident);
        self.queue.push_back(page);
        Ok(())
    }

    /// LIR pages in first-seen order, then the HIR queue.
    fn resident(&self) -> impl Iterator<Item = PageId> + '_ {
        self.first_seen
            .iter()
            .copied()
            .filter(|&p| self.is_lir(p))
            .chain(self.queue.iter().copied())
    }
}

impl Policy for LirsPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lirs
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        self.timestamp += 1;

        let fault = match self.status(page) {
            Some(LirsStatus::Lir) => {
                self.move_to_top(page);
                self.prune();
                false
            }
            Some(LirsStatus::HirResident) => {
                self.hir_hit(page)?;
                false
            }
            Some(LirsStatus::HirNonResident) | None => {
                self.admit(page)?;
                true
            }
        };
        self.last_access.insert(page, self.timestamp);

        frames.rebuild(self.resident())?;
        Ok(fault)
    }

    fn extras(&self) -> StepExtras {
        StepExtras::Lirs {
            lir: self.lir_count,
            hir: self.queue.len(),
            stack: self.stack.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u32) -> PageId {
        PageId::new(id)
    }

    fn run(policy: &mut LirsPolicy, frames: &mut FrameSet, pages: &[u32]) -> Vec<bool> {
        pages
            .iter()
            .map(|&p| policy.step(pid(p), frames).unwrap())
            .collect()
    }

    #[test]
    fn test_lirs_sizes() {
        assert_eq!(LirsPolicy::new(1).sizes(), (1, 0));
        assert_eq!(LirsPolicy::new(3).sizes(), (2, 1));
        assert_eq!(LirsPolicy::new(10).sizes(), (9, 1));
    }

    #[test]
    fn test_lirs_fills_lir_set_first() {
        let mut policy = LirsPolicy::new(3);
        let mut frames = FrameSet::new(3);

        let faults = run(&mut policy, &mut frames, &[1, 2, 3]);
        assert_eq!(faults, vec![true, true, true]);
        assert_eq!(policy.status(pid(1)), Some(LirsStatus::Lir));
        assert_eq!(policy.status(pid(2)), Some(LirsStatus::Lir));
        assert_eq!(policy.status(pid(3)), Some(LirsStatus::HirResident));
        assert_eq!(frames.as_slice(), &[pid(1), pid(2), pid(3)]);
        assert_eq!(
            policy.extras(),
            StepExtras::Lirs {
                lir: 2,
                hir: 1,
                stack: 2
            }
        );
    }

    #[test]
    fn test_lirs_hir_queue_is_fifo() {
        let mut policy = LirsPolicy::new(3);
        let mut frames = FrameSet::new(3);

        run(&mut policy, &mut frames, &[1, 2, 3, 4]);
        assert_eq!(policy.status(pid(3)), Some(LirsStatus::HirNonResident));
        assert_eq!(policy.status(pid(4)), Some(LirsStatus::HirResident));
        assert_eq!(frames.as_slice(), &[pid(1), pid(2), pid(4)]);

        // LIR pages survive the scan
        let faults = run(&mut policy, &mut frames, &[1, 2, 5, 1]);
        assert_eq!(faults, vec![false, false, true, false]);
        assert_eq!(frames.as_slice(), &[pid(1), pid(2), pid(5)]);
    }

    #[test]
    fn test_lirs_lir_hit_moves_to_top() {
        let mut policy = LirsPolicy::new(3);
        let mut frames = FrameSet::new(3);

        run(&mut policy, &mut frames, &[1, 2, 1]);
        assert_eq!(policy.stack().collect::<Vec<_>>(), vec![pid(2), pid(1)]);
        assert_eq!(policy.last_access(pid(1)), Some(3));
        assert_eq!(policy.last_access(pid(2)), Some(2));
    }

    #[test]
    fn test_lirs_hir_hit_requeues() {
        let mut policy = LirsPolicy::new(4);
        let mut frames = FrameSet::new(4);

        // LIRSize 3, HIRSize 1
        let faults = run(&mut policy, &mut frames, &[1, 2, 3, 4, 4]);
        assert_eq!(faults, vec![true, true, true, true, false]);
        assert_eq!(policy.status(pid(4)), Some(LirsStatus::HirResident));
        assert_eq!(policy.queue().collect::<Vec<_>>(), vec![pid(4)]);
    }

    #[test]
    fn test_lirs_single_frame_keeps_lir_page() {
        let mut policy = LirsPolicy::new(1);
        let mut frames = FrameSet::new(1);

        let faults = run(&mut policy, &mut frames, &[1, 2, 2, 1]);
        assert_eq!(faults, vec![true, true, true, false]);
        assert_eq!(frames.as_slice(), &[pid(1)]);
        assert_eq!(policy.queue().count(), 0);
    }

    #[test]
    fn test_lirs_queue_never_exceeds_hir_size() {
        let mut policy = LirsPolicy::new(3);
        let mut frames = FrameSet::new(3);

        for p in [1, 2, 3, 4, 5, 6, 1, 7, 2, 8, 3, 3, 9, 1] {
            policy.step(pid(p), &mut frames).unwrap();
            assert!(policy.queue().count() <= 1);
            assert!(frames.len() <= 3);
            // after pruning the bottom is LIR
            if let Some(bottom) = policy.stack().next() {
                assert_eq!(policy.status(bottom), Some(LirsStatus::Lir));
            }
        }
    }
}
