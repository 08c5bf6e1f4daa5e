//! Resident page storage.
//!
//! # Components
//! - [`FrameSet`] - The bounded, slot-ordered set of resident pages

mod frame_set;

pub use frame_set::FrameSet;
