//! coefficients::theil — Theil inequality coefficients for vintage pairs.
//!
//! Purpose
//! -------
//! Implement the two specifications of Theil's inequality coefficient used
//! to quantify how comparable two aligned sequences are — typically an
//! earlier and a later vintage of the same series. Values near 0 indicate
//! strong comparability; no asymptotic upper bound is imposed.
//!
//! Key behaviors
//! -------------
//! - [`theil_u1`]: the first specification,
//!   `sqrt(mean((b−a)²)) / (sqrt(mean(a²)) + sqrt(mean(b²)))`.
//! - [`theil_u2`]: the second specification, built from relative one-step
//!   changes, which avoids the near-zero-denominator instability of a
//!   naive forecast-error ratio.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are expected to be pre-cleaned (finite); callers in the
//!   orchestration layer apply listwise deletion first. Non-finite inputs
//!   propagate into the returned value rather than being detected here.
//! - A coefficient that is mathematically undefined for the given data
//!   (a zero base observation in U2) is reported as a NaN *result*; only
//!   structural violations (length mismatch, empty input) are errors.
//!
//! Conventions
//! -----------
//! - For U2, `a` is the base (earlier) sequence appearing in every
//!   denominator; `b` is the compared (later) sequence.
//!
//! Testing notes
//! -------------
//! - Unit tests pin the zero-base NaN result, the perfect-predictability
//!   zero result, identical-sequence behavior of U1, and both fail-fast
//!   error branches.
use crate::coefficients::errors::{CoefficientError, CoefficientResult};

/// First specification of Theil's inequality coefficient.
///
/// Parameters
/// ----------
/// - `a`: `&[f64]`
///   First sequence (reference vintage).
/// - `b`: `&[f64]`
///   Second sequence (compared vintage). Must match `a` in length.
///
/// Returns
/// -------
/// `CoefficientResult<f64>`
///   `sqrt(mean((b−a)²)) / (sqrt(mean(a²)) + sqrt(mean(b²)))`. When both
///   root-mean-square terms in the denominator are zero (both sequences
///   identically zero), the coefficient is defined as `0.0`.
///
/// Errors
/// ------
/// - `CoefficientError::EmptyInput` when either sequence is empty.
/// - `CoefficientError::IncompatibleLength` when the lengths differ.
pub fn theil_u1(a: &[f64], b: &[f64]) -> CoefficientResult<f64> {
    validate(a, b)?;
    let n = a.len() as f64;

    let mut dssq = 0.0;
    let mut assq = 0.0;
    let mut bssq = 0.0;
    for (&av, &bv) in a.iter().zip(b) {
        let d = bv - av;
        dssq += d * d;
        assq += av * av;
        bssq += bv * bv;
    }

    let denom = (assq / n).sqrt() + (bssq / n).sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok((dssq / n).sqrt() / denom)
}

/// Second specification of Theil's inequality coefficient.
///
/// Parameters
/// ----------
/// - `a`: `&[f64]`
///   Base sequence; each consecutive-pair term is scaled by `a[i]`.
/// - `b`: `&[f64]`
///   Compared sequence. Must match `a` in length.
///
/// Returns
/// -------
/// `CoefficientResult<f64>`
///   For each consecutive pair of periods `i, i+1` the numerator term is
///   `((b[i+1]−a[i+1]) / a[i])²` and the denominator term is
///   `((a[i+1]−a[i]) / a[i])²`; the coefficient is
///   `sqrt(Σ numerator) / sqrt(Σ denominator)`. Two special outcomes:
///   - any `a[i] == 0.0` makes the coefficient undefined and the result is
///     NaN (a result, not an error);
///   - a denominator sum of exactly zero (the base sequence never moves)
///     yields `0.0`.
///
/// Errors
/// ------
/// - `CoefficientError::EmptyInput` when either sequence is empty.
/// - `CoefficientError::IncompatibleLength` when the lengths differ.
///
/// Notes
/// -----
/// - A single-element pair has no consecutive terms; both sums are then
///   zero and the perfect-predictability convention applies, giving `0.0`.
pub fn theil_u2(a: &[f64], b: &[f64]) -> CoefficientResult<f64> {
    validate(a, b)?;
    if a.iter().any(|&v| v == 0.0) {
        return Ok(f64::NAN);
    }

    let mut nssq = 0.0;
    let mut dssq = 0.0;
    for i in 0..a.len() - 1 {
        let rn = (b[i + 1] - a[i + 1]) / a[i];
        nssq += rn * rn;
        let rd = (a[i + 1] - a[i]) / a[i];
        dssq += rd * rd;
    }

    if dssq == 0.0 {
        return Ok(0.0);
    }
    Ok(nssq.sqrt() / dssq.sqrt())
}

/// Shared length/emptiness guard for both specifications.
#[inline]
fn validate(a: &[f64], b: &[f64]) -> CoefficientResult<()> {
    if a.is_empty() || b.is_empty() {
        return Err(CoefficientError::EmptyInput);
    }
    if a.len() != b.len() {
        return Err(CoefficientError::IncompatibleLength(a.len(), b.len()));
    }
    Ok(())
}
