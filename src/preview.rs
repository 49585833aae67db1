//! Bounded previews for confirmation views.

use crate::types::{PreviewSlice, RawTable};

/// Project the first `n` rows of `table`.
///
/// Pure and cheap: callers may recompute it after every remap. The window is re-clamped here
/// even though preview tables are normally parsed with the same cap.
pub fn project(table: &RawTable, n: usize) -> PreviewSlice {
    let take = n.min(table.rows.len());
    PreviewSlice {
        headers: table.headers.clone(),
        rows: table.rows[..take].to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: usize) -> RawTable {
        RawTable::new(
            vec!["id".to_string()],
            (0..rows).map(|i| vec![i.to_string()]).collect(),
        )
    }

    #[test]
    fn clamps_to_window() {
        let slice = project(&table(50), 10);
        assert_eq!(slice.row_count(), 10);
        assert_eq!(slice.rows[9], vec!["9"]);
    }

    #[test]
    fn short_tables_are_shown_whole() {
        assert_eq!(project(&table(3), 10).row_count(), 3);
        assert_eq!(project(&table(0), 10).row_count(), 0);
    }

    #[test]
    fn idempotent() {
        let t = table(25);
        assert_eq!(project(&t, 5), project(&t, 5));
        assert_eq!(project(&t, 0).headers, vec!["id"]);
    }
}
