//! Forward-only paging over a dataset's rows.

use crate::types::{TripDataset, TripRecord};

/// A forward cursor over a [`TripDataset`]'s records.
///
/// Once exhausted it stays exhausted; create a new cursor (e.g. with [`TripDataset::cursor`])
/// to page from the start again.
///
/// ```rust
/// use bikeshare_stats::config::City;
/// use bikeshare_stats::cursor::RowCursor;
/// use bikeshare_stats::types::{TripDataset, TripSchema};
///
/// let ds = TripDataset::new(City::Washington, TripSchema::default(), Vec::new());
/// let mut cursor = RowCursor::new(&ds);
/// assert!(cursor.next_page(5).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct RowCursor<'a> {
    records: &'a [TripRecord],
    position: usize,
}

impl<'a> RowCursor<'a> {
    pub fn new(dataset: &'a TripDataset) -> Self {
        Self {
            records: &dataset.records,
            position: 0,
        }
    }

    /// Returns the next up to `n` records and advances past them.
    ///
    /// Returns fewer than `n` (possibly none) when the end is near; never fails.
    pub fn next_page(&mut self, n: usize) -> &'a [TripRecord] {
        let end = self.position.saturating_add(n).min(self.records.len());
        let page = &self.records[self.position..end];
        self.position = end;
        page
    }

    /// Number of records already returned.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of records not yet returned.
    pub fn remaining(&self) -> usize {
        self.records.len() - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl<'a> Iterator for RowCursor<'a> {
    type Item = &'a TripRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_page(1).first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for RowCursor<'_> {}
