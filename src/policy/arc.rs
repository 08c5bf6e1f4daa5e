//! ARC (Adaptive Replacement Cache) replacement policy.
//!
//! # Lists
//! ```text
//!   B1 ghosts ← T1 seen once │ T2 seen twice+ → B2 ghosts
//!                        ◄── p ──►
//! ```
//! - `T1`, `T2`: resident, front = oldest
//! - `B1`, `B2`: recently evicted from `T1`/`T2`, not resident
//! - `p`: target size of `T1`, nudged up by `B1` hits and down by `B2` hits
//!
//! Each ghost list is capped at `c` entries.

use std::collections::{HashMap, VecDeque};

use crate::common::{PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{Policy, PolicyKind, StepExtras};

/// Which of the four ARC lists a page is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArcList {
    T1,
    T2,
    B1,
    B2,
}

/// Balances recency (`T1`) against frequency (`T2`) using ghost hits.
#[derive(Debug)]
pub struct ArcPolicy {
    t1: VecDeque<PageId>,
    t2: VecDeque<PageId>,
    b1: VecDeque<PageId>,
    b2: VecDeque<PageId>,

    /// List membership for every page on any list.
    location: HashMap<PageId, ArcList>,

    /// Adaptation target for `|T1|`, always in `[0, c]`.
    p: usize,

    /// Cache size.
    c: usize,
}

impl ArcPolicy {
    /// Create a new ARC policy for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            t1: VecDeque::new(),
            t2: VecDeque::new(),
            b1: VecDeque::new(),
            b2: VecDeque::new(),
            location: HashMap::new(),
            p: 0,
            c: capacity,
        }
    }

    /// Current adaptation parameter.
    pub fn target(&self) -> usize {
        self.p
    }

    /// Sizes of `(T1, T2, B1, B2)`.
    pub fn list_sizes(&self) -> (usize, usize, usize, usize) {
        (self.t1.len(), self.t2.len(), self.b1.len(), self.b2.len())
    }

    fn list_mut(&mut self, list: ArcList) -> &mut VecDeque<PageId> {
        match list {
            ArcList::T1 => &mut self.t1,
            ArcList::T2 => &mut self.t2,
            ArcList::B1 => &mut self.b1,
            ArcList::B2 => &mut self.b2,
        }
    }

    fn push(&mut self, list: ArcList, page: PageId) {
        self.list_mut(list).push_back(page);
        self.location.insert(page, list);
    }

    fn pop_oldest(&mut self, list: ArcList) -> Option<PageId> {
        let page = self.list_mut(list).pop_front()?;
        self.location.remove(&page);
        Some(page)
    }

    /// Take `page` off `list` if it is still there.
    fn unlink(&mut self, list: ArcList, page: PageId) {
        let entries = self.list_mut(list);
        if let Some(pos) = entries.iter().position(|&p| p == page) {
            entries.remove(pos);
            if self.location.get(&page) == Some(&list) {
                self.location.remove(&page);
            }
        }
    }

    /// Demote one resident page into its ghost list.
    ///
    /// `T1` gives up its oldest page when it is over target, or at target
    /// on a `B1` hit; otherwise `T2` does. An empty `T2` falls back to `T1`.
    fn replace(&mut self, prefer_t1: bool) {
        let t1 = self.t1.len();
        let from_t1 = t1 > 0 && (t1 > self.p || (prefer_t1 && t1 == self.p));

        if from_t1 || self.t2.is_empty() {
            if let Some(victim) = self.pop_oldest(ArcList::T1) {
                self.push(ArcList::B1, victim);
            }
        } else if let Some(victim) = self.pop_oldest(ArcList::T2) {
            self.push(ArcList::B2, victim);
        }

        while self.b1.len() > self.c {
            self.pop_oldest(ArcList::B1);
        }
        while self.b2.len() > self.c {
            self.pop_oldest(ArcList::B2);
        }
    }

    fn admit_new(&mut self, page: PageId) {
        let c = self.c;
        let l1 = self.t1.len() + self.b1.len();

        if l1 == c {
            if self.t1.len() < c {
                self.pop_oldest(ArcList::B1);
                self.replace(false);
            } else {
                // T1 alone fills the cache: drop its oldest outright
                self.pop_oldest(ArcList::T1);
            }
        } else if l1 < c {
            let total = l1 + self.t2.len() + self.b2.len();
            if total >= c {
                if total == 2 * c {
                    self.pop_oldest(ArcList::B2);
                }
                self.replace(false);
            }
        }

        self.push(ArcList::T1, page);
    }
}

impl Policy for ArcPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Arc
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        let fault = match self.location.get(&page).copied() {
            Some(ArcList::T1) => {
                self.unlink(ArcList::T1, page);
                self.push(ArcList::T2, page);
                false
            }
            Some(ArcList::T2) => {
                self.unlink(ArcList::T2, page);
                self.push(ArcList::T2, page);
                false
            }
            Some(ArcList::B1) => {
                let delta = (self.b2.len() / self.b1.len()).max(1);
                self.p = (self.p + delta).min(self.c);
                self.replace(true);
                self.unlink(ArcList::B1, page);
                self.push(ArcList::T2, page);
                true
            }
            Some(ArcList::B2) => {
                let delta = (self.b1.len() / self.b2.len()).max(1);
                self.p = self.p.saturating_sub(delta);
                self.replace(false);
                self.unlink(ArcList::B2, page);
                self.push(ArcList::T2, page);
                true
            }
            None => {
                self.admit_new(page);
                true
            }
        };

        frames.rebuild(self.t1.iter().chain(self.t2.iter()).copied())?;
        Ok(fault)
    }

    fn extras(&self) -> StepExtras {
        StepExtras::Arc {
            p: self.p,
            t1: self.t1.len(),
            t2: self.t2.len(),
            b1: self.b1.len(),
            b2: self.b2.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u32) -> PageId {
        PageId::new(id)
    }

    fn run(policy: &mut ArcPolicy, frames: &mut FrameSet, pages: &[u32]) -> Vec<bool> {
        pages
            .iter()
            .map(|&p| policy.step(pid(p), frames).unwrap())
            .collect()
    }

    #[test]
    fn test_arc_second_hit_promotes_to_t2() {
        let mut policy = ArcPolicy::new(3);
        let mut frames = FrameSet::new(3);

        let faults = run(&mut policy, &mut frames, &[1, 2, 1]);
        assert_eq!(faults, vec![true, true, false]);
        assert_eq!(policy.list_sizes(), (1, 1, 0, 0));
        // T1 then T2
        assert_eq!(frames.as_slice(), &[pid(2), pid(1)]);
    }

    #[test]
    fn test_arc_t1_full_drops_without_ghost() {
        let mut policy = ArcPolicy::new(2);
        let mut frames = FrameSet::new(2);

        run(&mut policy, &mut frames, &[1, 2, 3]);
        assert_eq!(policy.list_sizes(), (2, 0, 0, 0));
        assert_eq!(frames.as_slice(), &[pid(2), pid(3)]);
    }

    #[test]
    fn test_arc_ghost_hit_in_b1_grows_target() {
        let mut policy = ArcPolicy::new(2);
        let mut frames = FrameSet::new(2);

        // 1 → T2, 2 in T1; 3 pushes 2 into B1
        run(&mut policy, &mut frames, &[1, 1, 2, 3]);
        assert_eq!(policy.list_sizes(), (1, 1, 1, 0));
        assert_eq!(frames.as_slice(), &[pid(3), pid(1)]);

        // 2 returns from B1: p grows, T1's 3 is demoted
        let faults = run(&mut policy, &mut frames, &[2]);
        assert_eq!(faults, vec![true]);
        assert_eq!(policy.target(), 1);
        assert_eq!(policy.list_sizes(), (0, 2, 1, 0));
        assert_eq!(frames.as_slice(), &[pid(1), pid(2)]);
    }

    #[test]
    fn test_arc_ghost_hit_in_b2_shrinks_target() {
        let mut policy = ArcPolicy::new(2);
        let mut frames = FrameSet::new(2);

        run(&mut policy, &mut frames, &[1, 1, 2, 3, 2]);
        assert_eq!(policy.target(), 1);
        // T2 = [1, 2]; 4 lands in T1 by demoting 1 to B2
        run(&mut policy, &mut frames, &[4]);
        assert_eq!(policy.list_sizes(), (1, 1, 1, 1));

        // 1 returns from B2: p shrinks back to 0
        let faults = run(&mut policy, &mut frames, &[1]);
        assert_eq!(faults, vec![true]);
        assert_eq!(policy.target(), 0);
        assert!(frames.len() <= 2);
    }

    #[test]
    fn test_arc_bounds_hold_on_mixed_stream() {
        let mut policy = ArcPolicy::new(3);
        let mut frames = FrameSet::new(3);

        for p in [1, 2, 3, 1, 4, 5, 2, 1, 6, 7, 1, 2, 3, 8, 3, 9, 2, 1, 5, 4] {
            policy.step(pid(p), &mut frames).unwrap();
            let (t1, t2, b1, b2) = policy.list_sizes();
            assert!(t1 + t2 <= 3);
            assert!(b1 <= 3 && b2 <= 3);
            assert!(policy.target() <= 3);
            assert_eq!(frames.len(), t1 + t2);
        }
    }
}
