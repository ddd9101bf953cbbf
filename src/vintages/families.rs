//! vintages::families — per-family diagnostics orchestration.
//!
//! Purpose
//! -------
//! Implement the thirteen diagnostics families computed over a vintage
//! matrix. Every family follows the same pattern: validate its gap/lag
//! parameters (fail fast), derive the evaluable count from the column
//! count (zero is a legitimate empty outcome, not an error), pre-size an
//! all-NaN result table, then per evaluable index clean the relevant
//! column(s), invoke the matching test suite, and serialize its outcome
//! into that row. A failure while computing one row is recorded in that
//! row's status and never disturbs the remaining rows.
//!
//! Conventions
//! -----------
//! - The vintage matrix is column-major in meaning: rows are aligned time
//!   periods, columns are successive vintages (or revisions), ordered by
//!   increasing vintage index. Missing cells are non-finite.
//! - Lag families iterate `i` against `i + gap`; pairwise families
//!   iterate the upper triangle `(i, j)`, `i < j`, in row-major pair
//!   order, producing `C(C−1)/2` rows for `C` columns.
//! - OLS-family schema width is `16 + 3·k` for `k` estimated
//!   coefficients.
//!
//! Concurrency
//! -----------
//! - Each row reads only the immutable input matrix and writes only its
//!   own pre-allocated row; the computation is synchronous and runs to
//!   completion once parameter validation has passed.
use ndarray::{Array2, ArrayView2, ArrayViewMut1};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::alignment::clean::{clean_pair, clean_rowwise, clean_single};
use crate::coefficients::theil::{theil_u1, theil_u2};
use crate::regression::ols::OlsTests;
use crate::statistical_tests::autocorrelation::AutoCorrelationTests;
use crate::statistical_tests::bias::Bias;
use crate::statistical_tests::cointegration::EngleGranger;
use crate::statistical_tests::errors::StatTestResult;
use crate::statistical_tests::johansen::{ErrorCorrectionModel, JohansenCointegration};
use crate::statistical_tests::signal_noise::SignalNoise;
use crate::statistical_tests::unit_root::UnitRoot;
use crate::vintages::rows::{
    write_ac_row, write_bias_row, write_ols_row, write_signal_noise_row, write_unit_root_row,
    RowCursor,
};
use crate::vintages::errors::VintagesResult;
use crate::vintages::table::{DiagnosticsTable, RowStatus};
use crate::vintages::validation::validate_positive;

// Schema widths. OLS rows carry a 16-field frame (n, r2, F + thirteen
// residual-diagnostic fields) plus 3 fields per coefficient.
const OLS_FRAME: usize = 16;
const COEF: usize = 3;
const AC: usize = 5;
const EG: usize = 4;
const JOHANSEN: usize = 2;
const UR: usize = 4 * 4;
const BIAS: usize = 9;
const SN: usize = 6;

/// Theil U1 coefficients on the columns of the vintage matrix.
///
/// Parameters
/// ----------
/// - `vintages`: `ArrayView2<f64>`
///   Vintage matrix, one column per vintage.
/// - `gap`: `usize`
///   Delay between the compared vintages; must be ≥ 1.
///
/// Returns
/// -------
/// `Ok(None)` when fewer than `gap + 1` columns leave nothing to
/// compute; otherwise a `(C − gap) × 1` table where row `i` compares
/// column `i + gap` against column `i`.
///
/// Errors
/// ------
/// - `VintagesError::InvalidParameter` when `gap == 0`.
pub fn theil(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, 1, |i, row| {
        let a = column(&vintages, i + gap);
        let b = column(&vintages, i);
        let cleaned = clean_pair(&a, &b)?;
        let u = theil_u1(&column(&cleaned.view(), 0), &column(&cleaned.view(), 1))?;
        row[0] = u;
        Ok(())
    })))
}

/// Theil U2 coefficients on the columns of the vintage matrix.
///
/// Same shape and iteration as [`theil`]; uses the second specification,
/// whose undefined cases surface as NaN values in computed rows (a zero
/// base observation) rather than as failures.
pub fn theil2(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, 1, |i, row| {
        let a = column(&vintages, i + gap);
        let b = column(&vintages, i);
        let cleaned = clean_pair(&a, &b)?;
        let u = theil_u2(&column(&cleaned.view(), 0), &column(&cleaned.view(), 1))?;
        row[0] = u;
        Ok(())
    })))
}

/// Level regression `v(t) = a + b·v(t−gap)` with a slope = 1 re-test.
///
/// Row `i` regresses column `i + gap` on column `i`. The slope's p-value
/// slot (offset 8) is re-tested against 1 instead of 0: the t statistic
/// is recomputed from the estimated slope, its standard error, and
/// `N − 2` degrees of freedom.
///
/// Returns
/// -------
/// `Ok(None)` when `C ≤ gap`; otherwise a `(C − gap) × 22` table.
///
/// Errors
/// ------
/// - `VintagesError::InvalidParameter` when `gap == 0`.
pub fn slope_and_drift(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, OLS_FRAME + 2 * COEF, |i, row| {
        let y = column(&vintages, i + gap);
        let x = column(&vintages, i);
        let yx = clean_pair(&y, &x)?;
        let test = OlsTests::of(&column(&yx.view(), 0), &[&column(&yx.view(), 1)])?;
        write_ols_row(&mut RowCursor::new(row.view_mut()), &test);

        // Test beta1 = 1 instead of beta1 = 0.
        let slope = test.coefficients()[1];
        let t1 = (slope.estimate - 1.0) / slope.stdev;
        let df = (test.n() - 2) as f64;
        let dist = StudentsT::new(0.0, 1.0, df).expect("n > 2 enforced by the fit");
        row[8] = 2.0 * (1.0 - dist.cdf(t1.abs()));
        Ok(())
    })))
}

/// Residual autocorrelation tests on every vintage pair.
///
/// Parameters
/// ----------
/// - `nbg`: `usize`
///   Number of lags in the Breusch–Godfrey test; ≥ 1.
/// - `nlb`: `usize`
///   Number of lags in the Ljung–Box test; ≥ 1.
///
/// Returns
/// -------
/// `Ok(None)` for fewer than two columns; otherwise a
/// `C(C−1)/2 × 5` table in row-major `(i, j)`, `i < j` pair order.
pub fn auto_correlation(
    vintages: ArrayView2<'_, f64>, nbg: usize, nlb: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("nbg", nbg)?;
    validate_positive("nlb", nlb)?;
    let pairs = upper_triangle_pairs(vintages.ncols());
    if pairs.is_empty() {
        return Ok(None);
    }

    Ok(Some(compute_table(pairs.len(), AC, |r, row| {
        let (i, j) = pairs[r];
        let y = column(&vintages, i);
        let x = column(&vintages, j);
        let yx = clean_pair(&y, &x)?;
        let test = AutoCorrelationTests::of(
            &column(&yx.view(), 0),
            &column(&yx.view(), 1),
            nbg,
            nlb,
        )?;
        write_ac_row(&mut RowCursor::new(row.view_mut()), &test);
        Ok(())
    })))
}

/// Engle–Granger cointegration tests on every vintage pair.
///
/// Parameters
/// ----------
/// - `adfk`: `usize`
///   Number of lags in the residual augmented Dickey–Fuller test; ≥ 1.
///
/// Returns
/// -------
/// `Ok(None)` for fewer than two columns; otherwise a
/// `C(C−1)/2 × 4` table of (rho, ser, statistic, p-value) rows.
pub fn cointegration(
    vintages: ArrayView2<'_, f64>, adfk: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("adfk", adfk)?;
    let pairs = upper_triangle_pairs(vintages.ncols());
    if pairs.is_empty() {
        return Ok(None);
    }

    Ok(Some(compute_table(pairs.len(), EG, |r, row| {
        let (i, j) = pairs[r];
        let x = column(&vintages, i);
        let y = column(&vintages, j);
        let xy = clean_pair(&x, &y)?;
        let eg = EngleGranger::of(&column(&xy.view(), 1), &column(&xy.view(), 0), adfk)?;
        let mut cursor = RowCursor::new(row.view_mut());
        cursor.set_and_next(eg.rho());
        cursor.set_and_next(eg.ser());
        cursor.set_and_next(eg.test());
        cursor.set_and_next(eg.pvalue());
        Ok(())
    })))
}

/// Johansen trace/max statistics on every vintage pair.
///
/// Parameters
/// ----------
/// - `lag`: `usize`
///   VAR lag order in levels; ≥ 1. Each row carries `lag` trace values
///   then `lag` max values, each block in descending rank-index order
///   `lag−1 … 0`; a rank index beyond the available eigenvalues fails
///   that row.
/// - `model`: [`ErrorCorrectionModel`]
///   Deterministic specification of the error-correction model.
///
/// Returns
/// -------
/// `Ok(None)` for fewer than two columns; otherwise a
/// `C(C−1)/2 × 2·lag` table.
pub fn vecm(
    vintages: ArrayView2<'_, f64>, lag: usize, model: ErrorCorrectionModel,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("lag", lag)?;
    let pairs = upper_triangle_pairs(vintages.ncols());
    if pairs.is_empty() {
        return Ok(None);
    }

    Ok(Some(compute_table(pairs.len(), JOHANSEN * lag, |r, row| {
        let (i, j) = pairs[r];
        let vi = column(&vintages, i);
        let vj = column(&vintages, j);
        let cleaned = clean_pair(&vi, &vj)?;
        let outcome = JohansenCointegration::process(cleaned.view(), lag, model)?;

        let mut values = Vec::with_capacity(JOHANSEN * lag);
        for l in (0..lag).rev() {
            values.push(outcome.trace_test(l)?);
        }
        for l in (0..lag).rev() {
            values.push(outcome.max_test(l)?);
        }

        let mut cursor = RowCursor::new(row.view_mut());
        for value in values {
            cursor.set_and_next(value);
        }
        Ok(())
    })))
}

/// Unit-root batteries, one row per vintage column.
///
/// Each row carries four tests × four fields in the fixed order:
/// Dickey–Fuller, augmented Dickey–Fuller, Dickey–Fuller with constant
/// and trend, Phillips–Perron.
///
/// Parameters
/// ----------
/// - `adfk`: `usize`
///   Number of lags in the augmented Dickey–Fuller test; ≥ 1.
///
/// Returns
/// -------
/// `Ok(None)` for an empty matrix; otherwise a `C × 16` table.
pub fn unit_root(
    vintages: ArrayView2<'_, f64>, adfk: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("adfk", adfk)?;
    let n = vintages.ncols();
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, UR, |i, row| {
        let cleaned = clean_single(&column(&vintages, i))?;
        let ur = UnitRoot::of(&cleaned, adfk)?;
        write_unit_root_row(&mut RowCursor::new(row.view_mut()), &ur);
        Ok(())
    })))
}

/// Efficiency model 1: `rev(t) = a + b·v(t−gap)`.
///
/// Row `i` regresses the revision `col(i+gap) − col(i)` on `col(i)`.
///
/// Returns
/// -------
/// `Ok(None)` when `C ≤ gap`; otherwise a `(C − gap) × 22` table.
pub fn efficiency_model1(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, OLS_FRAME + 2 * COEF, |i, row| {
        let x = column(&vintages, i);
        let y = column_diff(&vintages, i + gap, i);
        let yx = clean_pair(&y, &x)?;
        let test = OlsTests::of(&column(&yx.view(), 0), &[&column(&yx.view(), 1)])?;
        write_ols_row(&mut RowCursor::new(row.view_mut()), &test);
        Ok(())
    })))
}

/// Efficiency model 2: `rev(t) = a + b·rev(t−1)` on successive revisions.
///
/// Row `i` regresses `col(i+gap+1) − col(i+1)` on `col(i+gap) − col(i)`;
/// one extra column beyond the gap is consumed to difference against, so
/// the table has `C − gap − 1` rows.
///
/// Returns
/// -------
/// `Ok(None)` when `C ≤ gap + 1`; otherwise a `(C − gap − 1) × 22`
/// table.
pub fn efficiency_model2(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap + 1);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, OLS_FRAME + 2 * COEF, |i, row| {
        let y = column_diff(&vintages, i + gap + 1, i + 1);
        let x = column_diff(&vintages, i + gap, i);
        let yx = clean_pair(&y, &x)?;
        let test = OlsTests::of(&column(&yx.view(), 0), &[&column(&yx.view(), 1)])?;
        write_ols_row(&mut RowCursor::new(row.view_mut()), &test);
        Ok(())
    })))
}

/// Orthogonality model 1:
/// `rev(t) = a + b₁·rev(t−1) + … + b_nrevs·rev(t−nrevs)`.
///
/// Operates on a matrix of revisions (one column per revision). Output
/// row `i − nrevs` regresses column `i` on its `nrevs` predecessors,
/// jointly row-cleaned so every regression row is fully observed.
///
/// Returns
/// -------
/// `Ok(None)` when `nrevs ≥ C`; otherwise a
/// `(C − nrevs) × (16 + 3·(1 + nrevs))` table.
pub fn orthogonality_model1(
    revisions: ArrayView2<'_, f64>, nrevs: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("nrevs", nrevs)?;
    let ncols = revisions.ncols();
    if nrevs >= ncols {
        return Ok(None);
    }
    let n = ncols - nrevs;

    Ok(Some(compute_table(n, OLS_FRAME + COEF * (1 + nrevs), |r, row| {
        let i = r + nrevs;
        let nr = revisions.nrows();
        let mut joint = Array2::<f64>::zeros((nr, nrevs + 1));
        joint.column_mut(0).assign(&revisions.column(i));
        for j in 0..nrevs {
            joint.column_mut(j + 1).assign(&revisions.column(i - j - 1));
        }
        let cleaned = clean_rowwise(joint.view());

        let y = column(&cleaned.view(), 0);
        let xs: Vec<Vec<f64>> = (1..=nrevs).map(|k| column(&cleaned.view(), k)).collect();
        let x_refs: Vec<&[f64]> = xs.iter().map(Vec::as_slice).collect();
        let test = OlsTests::of(&y, &x_refs)?;
        write_ols_row(&mut RowCursor::new(row.view_mut()), &test);
        Ok(())
    })))
}

/// Orthogonality model 2: `rev(t) = a + b·rev(t−k)` at a single lag.
///
/// Returns
/// -------
/// `Ok(None)` when `k ≥ C`; otherwise a `(C − k) × 22` table whose row
/// `i − k` regresses revision column `i` on column `i − k`.
///
/// Errors
/// ------
/// - `VintagesError::InvalidParameter` when `k == 0`.
pub fn orthogonality_model2(
    revisions: ArrayView2<'_, f64>, k: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("k", k)?;
    let ncols = revisions.ncols();
    if k >= ncols {
        return Ok(None);
    }

    Ok(Some(compute_table(ncols - k, OLS_FRAME + 2 * COEF, |r, row| {
        let i = r + k;
        let y = column(&revisions, i);
        let x = column(&revisions, i - k);
        let yx = clean_pair(&y, &x)?;
        let test = OlsTests::of(&column(&yx.view(), 0), &[&column(&yx.view(), 1)])?;
        write_ols_row(&mut RowCursor::new(row.view_mut()), &test);
        Ok(())
    })))
}

/// Bias tests, one row per revision column.
///
/// Returns
/// -------
/// `Ok(None)` for an empty matrix; otherwise a `C × 9` table of
/// (n, mu, sigma, t, p, ar, adjusted sigma, adjusted t, adjusted p)
/// rows, each computed on the finite subsequence of its column.
pub fn bias(revisions: ArrayView2<'_, f64>) -> VintagesResult<Option<DiagnosticsTable>> {
    let n = revisions.ncols();
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, BIAS, |i, row| {
        let cleaned = clean_single(&column(&revisions, i))?;
        let outcome = Bias::of(&cleaned)?;
        write_bias_row(&mut RowCursor::new(row.view_mut()), &outcome);
        Ok(())
    })))
}

/// Signal/noise decomposition for each preliminary/later vintage pair.
///
/// Row `i` decomposes the revision between the preliminary vintage
/// `col(i)` and the later vintage `col(i+gap)`.
///
/// Returns
/// -------
/// `Ok(None)` when `C ≤ gap`; otherwise a `(C − gap) × 6` table.
pub fn signal_noise(
    vintages: ArrayView2<'_, f64>, gap: usize,
) -> VintagesResult<Option<DiagnosticsTable>> {
    validate_positive("gap", gap)?;
    let n = vintages.ncols().saturating_sub(gap);
    if n == 0 {
        return Ok(None);
    }

    Ok(Some(compute_table(n, SN, |i, row| {
        let later = column(&vintages, i + gap);
        let preliminary = column(&vintages, i);
        let lp = clean_pair(&later, &preliminary)?;
        let sn = SignalNoise::of(&column(&lp.view(), 1), &column(&lp.view(), 0))?;
        write_signal_noise_row(&mut RowCursor::new(row.view_mut()), &sn);
        Ok(())
    })))
}

// ---- Shared iteration helpers ----------------------------------------------

/// Run `compute` once per row over a pre-sized all-NaN table, recording a
/// per-row status. A failed row is reset to the NaN default even if the
/// closure wrote part of it before failing.
fn compute_table<F>(rows: usize, width: usize, mut compute: F) -> DiagnosticsTable
where
    F: FnMut(usize, &mut ArrayViewMut1<'_, f64>) -> StatTestResult<()>,
{
    let mut values = Array2::from_elem((rows, width), f64::NAN);
    let mut statuses = Vec::with_capacity(rows);
    for r in 0..rows {
        let mut row = values.row_mut(r);
        match compute(r, &mut row) {
            Ok(()) => statuses.push(RowStatus::Computed),
            Err(err) => {
                row.fill(f64::NAN);
                statuses.push(RowStatus::Failed(err));
            }
        }
    }
    DiagnosticsTable::new(values, statuses)
}

/// Upper-triangle pair indices `(i, j)`, `i < j`, in row-major order.
fn upper_triangle_pairs(ncols: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(ncols.saturating_sub(1) * ncols / 2);
    for i in 0..ncols {
        for j in i + 1..ncols {
            pairs.push((i, j));
        }
    }
    pairs
}

/// Owned copy of one matrix column (columns of a row-major matrix are
/// not contiguous, so the estimator slices need a copy).
fn column(m: &ArrayView2<'_, f64>, j: usize) -> Vec<f64> {
    m.column(j).to_vec()
}

/// Element-wise difference `col(a) − col(b)`; non-finite cells propagate
/// into the result and are removed by the subsequent cleaning step.
fn column_diff(m: &ArrayView2<'_, f64>, a: usize, b: usize) -> Vec<f64> {
    m.column(a).iter().zip(m.column(b).iter()).map(|(&x, &y)| x - y).collect()
}
