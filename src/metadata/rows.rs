//! Forward-only enumeration of contiguous row-id ranges.
//!
//! Metadata tables reference runs of rows in other tables by their first row id (for example
//! the field list of a type). [`RowRange`] walks such a run: it takes the row count of the
//! target table and an inclusive `[first, last]` bound and yields one [`RowId`] per row.
//! The range cannot be rewound; create a new one to start over.

use std::fmt;

use crate::Result;

/// Opaque, 1-based handle to a row in a metadata table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(u32);

impl RowId {
    /// The raw 1-based row index
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RowId({})", self.0)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential iterator over the row ids `first..=last`, clamped to the table's row count.
///
/// # Examples
///
/// ```rust
/// use asmident::RowRange;
///
/// // the bound reaches past the end of a 4 row table
/// let rows: Vec<u32> = RowRange::new(4, 3, 9)?.map(|row| row.value()).collect();
/// assert_eq!(rows, vec![3, 4]);
///
/// // `last = first - 1` is the conventional empty run
/// assert_eq!(RowRange::new(4, 3, 2)?.count(), 0);
/// # Ok::<(), asmident::Error>(())
/// ```
#[derive(Debug)]
pub struct RowRange {
    /// Next row id to hand out
    next: u64,
    /// Last row id to hand out (inclusive); below `next` once exhausted
    last: u64,
}

impl RowRange {
    /// Create a range over `[first, last]` in a table with `row_count` rows.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `first` is 0 or `last < first - 1`.
    pub fn new(row_count: u32, first: u32, last: u32) -> Result<Self> {
        if first == 0 {
            return Err(malformed_error!("Row ids are 1-based, got first row 0"));
        }
        if last < first - 1 {
            return Err(malformed_error!(
                "Invalid row range [{}, {}] in a table of {} rows",
                first,
                last,
                row_count
            ));
        }

        let last = last.min(row_count);
        log::trace!("row range [{}, {}] of {}", first, last, row_count);
        Ok(RowRange {
            next: u64::from(first),
            last: u64::from(last),
        })
    }
}

impl Iterator for RowRange {
    type Item = RowId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.last {
            return None;
        }

        let row = RowId(u32::try_from(self.next).ok()?);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowRange {}
