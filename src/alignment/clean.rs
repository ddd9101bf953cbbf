//! alignment::clean — listwise deletion and fill for vintage data.
//!
//! Purpose
//! -------
//! Remove or replace missing observations (encoded as non-finite values)
//! so that downstream statistics always operate on aligned, NaN-free
//! inputs. Three deletion shapes are supported — pairwise, single-series,
//! and row-wise across a full matrix — plus a shape-preserving fill.
//!
//! Key behaviors
//! -------------
//! - [`clean_pair`] keeps a row only where *both* sequences are finite and
//!   returns the survivors as an n×2 matrix, preserving relative order.
//! - [`clean_single`] keeps the finite subsequence of one series.
//! - [`clean_rowwise`] keeps a matrix row only if *every* column is finite
//!   at that row; column order and count are untouched.
//! - [`fill_missing`] replaces every non-finite cell by a supplied value
//!   without dropping any row.
//!
//! Invariants & assumptions
//! ------------------------
//! - Zero surviving rows is a valid outcome of every deletion routine,
//!   never an error; structural violations (mismatched lengths, empty
//!   inputs) fail fast with [`CleanError`] before any row is inspected.
//! - Outputs are freshly allocated; inputs are never mutated, so cleaned
//!   intermediates can be created per diagnostic call and discarded.
//! - The row-wise rebuild copies each kept row's values per column in the
//!   original column order. Closed-form index redistribution over the
//!   flattened buffer is deliberately not used; see the 7×3 scenario in
//!   the tests below for the layout this must reproduce.
//!
//! Downstream usage
//! ----------------
//! - The diagnostics orchestrator in `vintages` calls these routines on
//!   the relevant column(s) of the vintage matrix immediately before
//!   invoking an estimator, so estimators never see non-finite inputs.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the literal 7×3 row-wise scenario, pairwise survivor
//!   counts, order preservation, the zero-survivor outcome, and the
//!   fail-fast error branches.
use ndarray::{Array2, ArrayView2};

use crate::alignment::errors::{CleanError, CleanResult};

/// Pairwise listwise deletion of two equal-length sequences.
///
/// Parameters
/// ----------
/// - `a`: `&[f64]`
///   First sequence. Must be non-empty and the same length as `b`.
/// - `b`: `&[f64]`
///   Second sequence. Must be non-empty and the same length as `a`.
///
/// Returns
/// -------
/// `CleanResult<Array2<f64>>`
///   An m×2 matrix whose column 0 holds the surviving values of `a` and
///   column 1 those of `b`, in original relative order, where m is the
///   number of indices at which both inputs are finite. m = 0 is a valid
///   result.
///
/// Errors
/// ------
/// - `CleanError::EmptyInput` when either sequence has zero length.
/// - `CleanError::IncompatibleLength` when the lengths differ.
///
/// Notes
/// -----
/// - The output is row-major with rows appended in survivor order, so the
///   pairing `(a[i], b[i])` is preserved exactly.
pub fn clean_pair(a: &[f64], b: &[f64]) -> CleanResult<Array2<f64>> {
    if a.is_empty() || b.is_empty() {
        return Err(CleanError::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(CleanError::IncompatibleLength(a.len(), b.len()));
    }

    let mut kept: Vec<f64> = Vec::new();
    for (&av, &bv) in a.iter().zip(b) {
        if av.is_finite() && bv.is_finite() {
            kept.push(av);
            kept.push(bv);
        }
    }

    let rows = kept.len() / 2;
    // from_shape_vec with a row-major shape cannot fail here: len == rows * 2.
    Ok(Array2::from_shape_vec((rows, 2), kept).expect("kept buffer has rows * 2 elements"))
}

/// Finite subsequence of a single series, relative order preserved.
///
/// Parameters
/// ----------
/// - `a`: `&[f64]`
///   Input sequence. Must be non-empty.
///
/// Returns
/// -------
/// `CleanResult<Vec<f64>>`
///   The finite values of `a` in order; length 0 is a valid result.
///
/// Errors
/// ------
/// - `CleanError::EmptyInput` when `a` has zero length.
pub fn clean_single(a: &[f64]) -> CleanResult<Vec<f64>> {
    if a.is_empty() {
        return Err(CleanError::EmptyInput);
    }
    Ok(a.iter().copied().filter(|v| v.is_finite()).collect())
}

/// Row-wise listwise deletion across all columns of a matrix.
///
/// Parameters
/// ----------
/// - `m`: `ArrayView2<f64>`
///   Input matrix; rows are time periods, columns are vintages.
///
/// Returns
/// -------
/// `Array2<f64>`
///   A matrix with the same column count whose rows are exactly the
///   fully-finite rows of `m`, in original relative order. Zero kept rows
///   is a valid result.
///
/// Notes
/// -----
/// - The rebuild is row-major: for each kept row index, every column's
///   value at that row is copied in column order. This reproduces the
///   naive "filter rows, keep columns aligned" layout by construction.
pub fn clean_rowwise(m: ArrayView2<'_, f64>) -> Array2<f64> {
    let ncols = m.ncols();
    let mut kept: Vec<f64> = Vec::new();
    let mut nrows = 0usize;

    for row in m.rows() {
        if row.iter().all(|v| v.is_finite()) {
            kept.extend(row.iter().copied());
            nrows += 1;
        }
    }

    Array2::from_shape_vec((nrows, ncols), kept).expect("kept buffer has nrows * ncols elements")
}

/// Replace every non-finite cell by `value`, preserving shape.
///
/// Parameters
/// ----------
/// - `m`: `ArrayView2<f64>`
///   Input matrix.
/// - `value`: `f64`
///   Replacement for every non-finite cell.
///
/// Returns
/// -------
/// `Array2<f64>`
///   A matrix of identical shape in which every originally-finite cell is
///   unchanged and every originally-non-finite cell equals `value`. No
///   row is dropped.
pub fn fill_missing(m: ArrayView2<'_, f64>, value: f64) -> Array2<f64> {
    m.mapv(|v| if v.is_finite() { v } else { value })
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pairwise deletion: survivor count, order, NaN-freedom, zero-survivor
    //   outcome, and both fail-fast error branches.
    // - Single-series deletion, including the empty-input error.
    // - Row-wise deletion against the literal 7×3 scenario.
    // - Shape and cell-level behavior of fill_missing.
    //
    // They intentionally DO NOT cover:
    // - Any statistical computation on cleaned outputs; those live with the
    //   coefficient and orchestrator modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `clean_pair` keeps exactly the indices where both inputs
    // are finite, in original relative order, with no non-finite survivors.
    //
    // Given
    // -----
    // - a = [1.0, NaN, 3.0, 4.0, 5.0]
    // - b = [0.1, 0.2, NaN, 0.4, 0.5]
    //
    // Expect
    // ------
    // - A 3×2 matrix of rows (1.0, 0.1), (4.0, 0.4), (5.0, 0.5).
    fn clean_pair_keeps_jointly_finite_rows_in_order() {
        // Arrange
        let a = [1.0, f64::NAN, 3.0, 4.0, 5.0];
        let b = [0.1, 0.2, f64::NAN, 0.4, 0.5];

        // Act
        let cleaned = clean_pair(&a, &b).expect("equal-length non-empty inputs should clean");

        // Assert
        assert_eq!(cleaned, array![[1.0, 0.1], [4.0, 0.4], [5.0, 0.5]]);
        assert!(cleaned.iter().all(|v| v.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a pair with no jointly-finite index produces a 0×2
    // matrix rather than an error.
    //
    // Given
    // -----
    // - a = [NaN, 1.0], b = [2.0, NaN].
    //
    // Expect
    // ------
    // - `clean_pair` returns Ok with zero rows and two columns.
    fn clean_pair_disjoint_support_yields_zero_rows() {
        // Arrange
        let a = [f64::NAN, 1.0];
        let b = [2.0, f64::NAN];

        // Act
        let cleaned = clean_pair(&a, &b).expect("disjoint support is not an error");

        // Assert
        assert_eq!(cleaned.nrows(), 0);
        assert_eq!(cleaned.ncols(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify the fail-fast branches of `clean_pair`.
    //
    // Given
    // -----
    // - Mismatched lengths (3 vs 2) and an empty first sequence.
    //
    // Expect
    // ------
    // - `IncompatibleLength(3, 2)` and `EmptyInput` respectively.
    fn clean_pair_rejects_mismatched_and_empty_inputs() {
        // Arrange
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];

        // Act & Assert: mismatched lengths
        match clean_pair(&a, &b) {
            Err(CleanError::IncompatibleLength(expected, actual)) => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("expected IncompatibleLength, got {other:?}"),
        }

        // Act & Assert: empty input
        match clean_pair(&[], &b) {
            Err(CleanError::EmptyInput) => (),
            other => panic!("expected EmptyInput, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `clean_single` drops exactly the non-finite values and
    // rejects empty input.
    //
    // Given
    // -----
    // - a = [1.0, NaN, +inf, 4.0].
    //
    // Expect
    // ------
    // - [1.0, 4.0] for the populated series; `EmptyInput` for `&[]`.
    fn clean_single_keeps_finite_values_and_rejects_empty() {
        // Arrange
        let a = [1.0, f64::NAN, f64::INFINITY, 4.0];

        // Act
        let cleaned = clean_single(&a).expect("non-empty input should clean");

        // Assert
        assert_eq!(cleaned, vec![1.0, 4.0]);
        match clean_single(&[]) {
            Err(CleanError::EmptyInput) => (),
            other => panic!("expected EmptyInput, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the row-wise rebuild to the literal 7×3 scenario: kept rows are
    // {0, 1, 3, 4} and the column layout survives unchanged.
    //
    // Given
    // -----
    // - Columns [1.1,…,1.6,NaN], [2.1,…,2.7], [3.1,3.2,NaN,3.4,3.5,NaN,NaN]
    //   assembled as a 7×3 matrix.
    //
    // Expect
    // ------
    // - Exactly [[1.1,2.1,3.1],[1.2,2.2,3.2],[1.4,2.4,3.4],[1.5,2.5,3.5]].
    fn clean_rowwise_matches_reference_seven_by_three_scenario() {
        // Arrange
        let nan = f64::NAN;
        let m = array![
            [1.1, 2.1, 3.1],
            [1.2, 2.2, 3.2],
            [1.3, 2.3, nan],
            [1.4, 2.4, 3.4],
            [1.5, 2.5, 3.5],
            [1.6, 2.6, nan],
            [nan, 2.7, nan],
        ];

        // Act
        let cleaned = clean_rowwise(m.view());

        // Assert
        assert_eq!(
            cleaned,
            array![[1.1, 2.1, 3.1], [1.2, 2.2, 3.2], [1.4, 2.4, 3.4], [1.5, 2.5, 3.5]]
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure `clean_rowwise` keeps relative row order and returns zero
    // rows when every row has a hole.
    //
    // Given
    // -----
    // - A 2×2 matrix with one NaN in each row.
    //
    // Expect
    // ------
    // - A 0×2 output.
    fn clean_rowwise_all_rows_holed_yields_zero_rows() {
        // Arrange
        let m = array![[f64::NAN, 1.0], [2.0, f64::NAN]];

        // Act
        let cleaned = clean_rowwise(m.view());

        // Assert
        assert_eq!(cleaned.nrows(), 0);
        assert_eq!(cleaned.ncols(), 2);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `fill_missing` preserves shape, leaves finite cells
    // untouched, and replaces every non-finite cell by the fill value.
    //
    // Given
    // -----
    // - A 2×3 matrix with NaN and -inf holes; fill value -99.0.
    //
    // Expect
    // ------
    // - Same shape; holes equal -99.0; finite cells unchanged.
    fn fill_missing_replaces_only_non_finite_cells() {
        // Arrange
        let m = array![[1.0, f64::NAN, 3.0], [f64::NEG_INFINITY, 5.0, 6.0]];

        // Act
        let filled = fill_missing(m.view(), -99.0);

        // Assert
        assert_eq!(filled, array![[1.0, -99.0, 3.0], [-99.0, 5.0, 6.0]]);
    }
}
