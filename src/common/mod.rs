//! Common types and utilities shared across pagesim.
//!
//! This module contains the primitives every policy and the harness use:
//! - Configuration constants
//! - Error types
//! - Identifiers and the validated reference stream

pub mod config;
pub mod error;
mod page_id;
mod reference_stream;

pub use error::{Error, Result};
pub use page_id::PageId;
pub use reference_stream::ReferenceStream;
