//! vintages::table — fixed-shape result tables with per-row statuses.
//!
//! Purpose
//! -------
//! Define the outcome shape shared by every diagnostics family: a
//! pre-sized numeric matrix whose row count and positions are stable even
//! under partial failure, plus a parallel status channel that records,
//! per row, whether the underlying estimation succeeded or why it failed.
//!
//! Key behaviors
//! -------------
//! - Rows for pairs whose estimator failed keep their pre-allocated
//!   default value (all-NaN), so downstream consumers can index the table
//!   positionally regardless of failures.
//! - [`RowStatus`] makes "computed zero" and "estimation failed"
//!   distinguishable without changing the numeric layout.
//!
//! Invariants & assumptions
//! ------------------------
//! - `statuses.len() == values.nrows()` always; row `r`'s status
//!   describes row `r`'s values.
//! - A table is immutable once built; families construct it row by row
//!   and never revisit a finished row.
use ndarray::{Array2, ArrayView2};

use crate::statistical_tests::errors::StatTestError;

/// Per-row outcome of a diagnostics family.
#[derive(Debug, Clone, PartialEq)]
pub enum RowStatus {
    /// The estimator ran and the row holds its serialized result.
    Computed,
    /// The estimator failed; the row holds the all-NaN default.
    Failed(StatTestError),
}

impl RowStatus {
    /// Whether this row holds a computed result.
    pub fn is_computed(&self) -> bool {
        matches!(self, RowStatus::Computed)
    }

    /// The failure behind a defaulted row, if any.
    pub fn error(&self) -> Option<&StatTestError> {
        match self {
            RowStatus::Computed => None,
            RowStatus::Failed(err) => Some(err),
        }
    }
}

/// DiagnosticsTable — one family's fully-shaped result.
///
/// Purpose
/// -------
/// Hold the fixed-width numeric rows of one family call together with
/// the per-row status channel. Row count equals the number of evaluated
/// pairs/lags/columns; column count equals the family's schema width.
///
/// Invariants
/// ----------
/// - Failed rows are entirely NaN; computed rows hold their serializer's
///   output from offset 0.
#[derive(Debug, Clone)]
pub struct DiagnosticsTable {
    values: Array2<f64>,
    statuses: Vec<RowStatus>,
}

impl DiagnosticsTable {
    pub(crate) fn new(values: Array2<f64>, statuses: Vec<RowStatus>) -> Self {
        debug_assert_eq!(values.nrows(), statuses.len());
        DiagnosticsTable { values, statuses }
    }

    /// The numeric rows, fixed-width per family.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Consume the table, keeping only the numeric rows.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Per-row statuses, aligned with the rows of [`values`](Self::values).
    pub fn statuses(&self) -> &[RowStatus] {
        &self.statuses
    }

    /// Number of evaluated pairs/lags/columns.
    pub fn num_rows(&self) -> usize {
        self.values.nrows()
    }

    /// The family's schema width.
    pub fn schema_width(&self) -> usize {
        self.values.ncols()
    }

    /// Whether every row was computed.
    pub fn is_complete(&self) -> bool {
        self.statuses.iter().all(RowStatus::is_computed)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the status accessors and completeness summary.
    //
    // Given
    // -----
    // - A 2×2 table with one computed and one failed row.
    //
    // Expect
    // ------
    // - `is_complete()` is false; the failed row exposes its error; the
    //   computed row exposes none.
    fn diagnostics_table_reports_row_statuses() {
        // Arrange
        let values = array![[1.0, 2.0], [f64::NAN, f64::NAN]];
        let statuses =
            vec![RowStatus::Computed, RowStatus::Failed(StatTestError::ZeroVariance)];

        // Act
        let table = DiagnosticsTable::new(values, statuses);

        // Assert
        assert!(!table.is_complete());
        assert!(table.statuses()[0].is_computed());
        assert_eq!(table.statuses()[1].error(), Some(&StatTestError::ZeroVariance));
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.schema_width(), 2);
    }
}
