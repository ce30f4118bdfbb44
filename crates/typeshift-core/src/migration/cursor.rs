//! Offset pagination over a table's raw rows.

use crate::entity::EntityStore;
use crate::error::Error;
use crate::storage::RowRecord;

/// Walks a table page by page until an empty page is returned.
///
/// Offsets are positional, so the table must not receive inserts or
/// deletes while the cursor is live.
pub struct PageCursor<'a> {
    store: &'a dyn EntityStore,
    table: String,
    offset: u64,
    page_size: usize,
    exhausted: bool,
}

impl<'a> PageCursor<'a> {
    /// Start at offset 0. A zero page size is treated as 1.
    pub fn new(store: &'a dyn EntityStore, table: impl Into<String>, page_size: usize) -> Self {
        Self {
            store,
            table: table.into(),
            offset: 0,
            page_size: page_size.max(1),
            exhausted: false,
        }
    }

    /// Whether another fetch may yield rows.
    pub fn has_next(&self) -> bool {
        !self.exhausted
    }

    /// Fetch the next page. Returns `None` once an empty page was seen.
    pub fn next_page(&mut self) -> Result<Option<Vec<RowRecord>>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        let rows = self.store.fetch_page(&self.table, self.offset, self.page_size)?;
        if rows.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.offset += rows.len() as u64;
        Ok(Some(rows))
    }
}

impl Iterator for PageCursor<'_> {
    type Item = Result<Vec<RowRecord>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_page() {
            Ok(Some(rows)) => Some(Ok(rows)),
            Ok(None) => None,
            Err(e) => {
                self.exhausted = true;
                Some(Err(e))
            }
        }
    }
}
