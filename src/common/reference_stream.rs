//! Validated page reference streams.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::common::{Error, PageId, Result};

/// An ordered, non-empty sequence of page references.
///
/// Immutable once built. Every constructor rejects empty input, so a
/// simulation always has at least one step.
///
/// # Example
/// ```
/// use pagesim::{PageId, ReferenceStream};
///
/// let stream = ReferenceStream::parse("1, 2, x, 3").unwrap();
/// assert_eq!(stream.len(), 3);
/// assert_eq!(stream[2], PageId::new(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PageId>", into = "Vec<PageId>")]
pub struct ReferenceStream {
    pages: Vec<PageId>,
}

impl ReferenceStream {
    /// Build a stream from page ids, rejecting an empty sequence.
    pub fn new(pages: Vec<PageId>) -> Result<Self> {
        if pages.is_empty() {
            return Err(Error::Parse("reference stream is empty".to_string()));
        }
        Ok(Self { pages })
    }

    /// Build a stream from raw integers.
    pub fn from_ids<I>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        Self::new(ids.into_iter().map(PageId::new).collect())
    }

    /// Parse a comma-separated list of page numbers.
    ///
    /// Each trimmed token contributes its leading digits (after an optional
    /// `+`), so `"12abc"` reads as 12 and `"3.5"` as 3. Tokens with no
    /// leading digits, negative numbers, and values beyond `u32` are
    /// dropped. Fails if nothing valid remains.
    pub fn parse(input: &str) -> Result<Self> {
        let pages: Vec<PageId> = input.split(',').filter_map(leading_page_id).collect();

        if pages.is_empty() {
            return Err(Error::Parse(format!(
                "no valid page numbers in {:?}",
                input
            )));
        }
        Ok(Self { pages })
    }

    /// The references as a slice.
    #[inline]
    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }
}

/// Page number at the start of `token`, if any.
fn leading_page_id(token: &str) -> Option<PageId> {
    let token = token.trim();
    let digits = token.strip_prefix('+').unwrap_or(token);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<u32>().ok().map(PageId::new)
}

impl Deref for ReferenceStream {
    type Target = [PageId];

    fn deref(&self) -> &[PageId] {
        &self.pages
    }
}

impl TryFrom<Vec<PageId>> for ReferenceStream {
    type Error = Error;

    fn try_from(pages: Vec<PageId>) -> Result<Self> {
        Self::new(pages)
    }
}

impl From<ReferenceStream> for Vec<PageId> {
    fn from(stream: ReferenceStream) -> Self {
        stream.pages
    }
}
