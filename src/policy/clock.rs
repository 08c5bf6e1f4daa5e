//! CLOCK (Second Chance) replacement policy.
//!
//! Frames form a circle with one reference bit per slot. A hit sets the
//! bit. On a fault with every slot occupied, the hand sweeps forward,
//! clearing set bits, until it reaches a slot whose bit is clear; that
//! slot's page is replaced and the hand moves one past it.
//!
//! ```text
//!        hand
//!         ↓
//!   [ 5:0 ][ 1:1 ][ 2:1 ]     fault on 3: clear 1, clear 2, wrap,
//!                             slot 0 has bit 0 → replace 5 with 3
//! ```

use crate::common::{Error, PageId, Result};
use crate::frames::FrameSet;
use crate::policy::{Policy, PolicyKind, StepExtras};

/// Approximates LRU with a circular sweep over reference bits.
#[derive(Debug)]
pub struct ClockPolicy {
    /// Reference bit per occupied slot, parallel to the frame set.
    ref_bits: Vec<bool>,

    /// Next slot the sweep examines, in `[0, capacity)`.
    hand: usize,

    capacity: usize,
}

impl ClockPolicy {
    /// Create a new CLOCK policy for `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            ref_bits: Vec::with_capacity(capacity),
            hand: 0,
            capacity,
        }
    }

    /// Current hand position.
    pub fn hand(&self) -> usize {
        self.hand
    }

    fn advance(&mut self) {
        self.hand = (self.hand + 1) % self.capacity;
    }

    /// Sweep to a slot with a clear bit and put `page` there.
    fn replace(&mut self, page: PageId, frames: &mut FrameSet) -> Result<()> {
        // One lap clears every bit, so the second lap must find a victim.
        for _ in 0..=2 * self.capacity {
            if self.ref_bits[self.hand] {
                self.ref_bits[self.hand] = false;
                self.advance();
            } else {
                frames.replace(self.hand, page)?;
                self.advance();
                return Ok(());
            }
        }
        Err(Error::invariant(
            "Clock",
            "sweep found no slot with a clear reference bit",
        ))
    }
}

impl Policy for ClockPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Clock
    }

    fn step(&mut self, page: PageId, frames: &mut FrameSet) -> Result<bool> {
        if self.ref_bits.len() != frames.len() || frames.capacity() != self.capacity {
            return Err(Error::invariant(
                "Clock",
                format!(
                    "{} reference bits for {} resident pages",
                    self.ref_bits.len(),
                    frames.len()
                ),
            ));
        }

        if let Some(slot) = frames.position(page) {
            self.ref_bits[slot] = true;
            return Ok(false);
        }

        if frames.is_full() {
            // the incoming page keeps bit 0 in the victim's slot
            self.replace(page, frames)?;
        } else {
            frames.push(page)?;
            self.ref_bits.push(false);
        }
        Ok(true)
    }

    fn extras(&self) -> StepExtras {
        StepExtras::Clock {
            pointer: self.hand,
            ref_bits: self.ref_bits.iter().map(|&bit| u8::from(bit)).collect(),
        }
    }
}
