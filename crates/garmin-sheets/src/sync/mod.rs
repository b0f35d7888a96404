//! Spreadsheet reconciliation
//!
//! Upserts daily records against a snapshot of the sheet taken once before
//! any write. Dates present in the snapshot update in place; new dates
//! append. The snapshot is never refreshed mid-run, so every record in the
//! batch is classified against the sheet's pre-run state.

use std::collections::HashMap;

use crate::error::{Result, SheetSyncError};
use crate::metrics::DailyRecord;
use crate::sheets::SheetsClient;

/// Pre-run snapshot of which dates the sheet already holds, and where.
/// Row numbers are 1-indexed with the header at row 1.
///
/// Because the snapshot is fixed, two batch records for the same date not
/// yet in the sheet would both append; the window generator emits one
/// record per date, so no dedup guard is applied here.
#[derive(Debug, Default)]
pub struct SheetIndex {
    rows_by_date: HashMap<String, usize>,
}

impl SheetIndex {
    /// Build the index from a full read of the sheet.
    ///
    /// The first row is the header; rows with a blank first cell are
    /// skipped. An entirely empty sheet is fatal: the header must exist
    /// before any write.
    pub fn from_rows(rows: &[Vec<String>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(SheetSyncError::EmptySheet);
        }

        let mut rows_by_date = HashMap::new();
        for (i, row) in rows.iter().skip(1).enumerate() {
            let date = match row.first() {
                Some(date) if !date.is_empty() => date,
                _ => continue,
            };
            // +2: the header occupies row 1 and sheet rows are 1-indexed
            rows_by_date.insert(date.clone(), i + 2);
        }

        Ok(Self { rows_by_date })
    }

    /// Number of dates already stored
    pub fn len(&self) -> usize {
        self.rows_by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows_by_date.is_empty()
    }

    /// Row number for a date, if the sheet already holds it
    pub fn position(&self, date: &str) -> Option<usize> {
        self.rows_by_date.get(date).copied()
    }
}

/// Outcome tally for one reconciliation run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Rows overwritten in place
    pub updated: u32,
    /// Rows appended for new dates
    pub inserted: u32,
}

impl std::fmt::Display for SyncStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Updated: {} rows, Inserted: {} rows", self.updated, self.inserted)
    }
}

/// Write each record through the snapshot: update in place when the date
/// is already stored, append otherwise.
///
/// Not transactional: a write failure aborts the rest of the batch and
/// rows already written stay in place.
pub async fn reconcile(
    sheets: &SheetsClient,
    index: &SheetIndex,
    records: &[DailyRecord],
) -> Result<SyncStats> {
    let mut stats = SyncStats::default();

    for record in records {
        let date = record.date.to_string();
        let row = record.to_row();

        match index.position(&date) {
            Some(row_number) => {
                sheets.update_row(row_number, &row).await?;
                println!("  Updated row {} for {}", row_number, date);
                stats.updated += 1;
            }
            None => {
                sheets.append_row(&row).await?;
                println!("  Inserted new row for {}", date);
                stats.inserted += 1;
            }
        }
    }

    Ok(stats)
}
