//! Human-readable import summary

use std::fmt;

use serde::Serialize;

use super::counters::ImportTotals;

/// Outcome of a completed run, printed by `feiras import`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub totals: ImportTotals,
    /// Present when the id sequence could not be re-synced after the run
    pub sync_error: Option<String>,
}

impl ImportSummary {
    pub fn new(totals: ImportTotals, sync_error: Option<String>) -> Self {
        Self { totals, sync_error }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Import finished! Read {} registers, {} imported and {} errors.",
            self.totals.total_read(),
            self.totals.imported(),
            self.totals.total_errors()
        )?;
        if let Some(err) = &self.sync_error {
            writeln!(f, "could not sync sequence: {err}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_without_sync_error() {
        let summary = ImportSummary::new(
            ImportTotals {
                records_read: 3,
                read_errors: 0,
                import_errors: 0,
            },
            None,
        );
        assert_eq!(
            summary.to_string(),
            "Import finished! Read 3 registers, 3 imported and 0 errors.\n"
        );
    }

    #[test]
    fn test_report_with_sync_error() {
        let summary = ImportSummary::new(
            ImportTotals {
                records_read: 3,
                read_errors: 1,
                import_errors: 1,
            },
            Some("boom".to_string()),
        );
        assert_eq!(
            summary.to_string(),
            "Import finished! Read 4 registers, 2 imported and 2 errors.\n\
             could not sync sequence: boom\n"
        );
    }

    #[test]
    fn test_report_for_empty_run() {
        let summary = ImportSummary::new(ImportTotals::default(), None);
        assert_eq!(
            summary.to_string(),
            "Import finished! Read 0 registers, 0 imported and 0 errors.\n"
        );
    }
}
