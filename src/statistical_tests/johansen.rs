//! statistical_tests::johansen — Johansen cointegration-rank tests.
//!
//! Purpose
//! -------
//! Compute the Johansen trace and maximum-eigenvalue statistics for a
//! small system of vintages estimated as a vector error-correction model.
//! The long-run specification is used: `Δy_t` is regressed on `lag − 1`
//! lagged differences (plus unrestricted deterministics), the level term
//! `y_{t−lag}` (plus restricted deterministics) is partialled out the
//! same way, and the statistics derive from the eigenvalues of the
//! reduced-rank eigenproblem built from the residual moment matrices.
//!
//! Key behaviors
//! -------------
//! - Deterministic terms follow the error-correction model variant:
//!   `None` puts an unrestricted constant in the short-run block,
//!   `Constant` restricts the constant into the cointegration relation,
//!   `Trend` restricts a linear trend and keeps an unrestricted constant.
//! - The generalized eigenproblem `|λS₁₁ − S₁₀S₀₀⁻¹S₀₁| = 0` is solved
//!   through a Cholesky symmetrization so only a symmetric eigensolver is
//!   needed; eigenvalues are sorted descending and clamped into `[0, 1)`.
//! - [`trace_test`](JohansenCointegration::trace_test) and
//!   [`max_test`](JohansenCointegration::max_test) accept rank hypotheses
//!   `0 ≤ r < p` for `p` observed series; anything larger is a typed
//!   error surfaced per output row by the orchestrator.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input data is a T×p matrix of aligned, finite observations with
//!   `p ≥ 1`; the orchestrator calls this on pairwise-cleaned vintage
//!   pairs (`p = 2`).
//! - Statistics are scaled by the effective sample size `T − lag`.
use std::str::FromStr;

use nalgebra::{Cholesky, DMatrix, SymmetricEigen};
use ndarray::ArrayView2;

use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// Deterministic specification of the error-correction model.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorCorrectionModel {
    None,
    Constant,
    Trend,
}

impl FromStr for ErrorCorrectionModel {
    type Err = StatTestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(ErrorCorrectionModel::None),
            "const" => Ok(ErrorCorrectionModel::Constant),
            "trend" => Ok(ErrorCorrectionModel::Trend),
            other => Err(StatTestError::InvalidModel(other.to_string())),
        }
    }
}

/// JohansenCointegration — eigenvalues and rank statistics of one system.
///
/// Purpose
/// -------
/// Hold the descending eigenvalue sequence of the reduced-rank problem
/// together with the effective sample size, from which the trace and
/// maximum-eigenvalue statistics for each admissible rank hypothesis are
/// derived on demand.
///
/// Invariants
/// ----------
/// - `eigenvalues` is sorted descending and clamped into `[0, 1)`, so
///   `ln(1 − λ)` is always finite.
/// - Rank hypotheses are valid for `0 ≤ r < nseries`.
#[derive(Debug, Clone)]
pub struct JohansenCointegration {
    eigenvalues: Vec<f64>,
    nseries: usize,
    sample_size: usize,
}

impl JohansenCointegration {
    /// Estimate the eigenstructure of a T×p system.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `ArrayView2<f64>`
    ///   Aligned observations, rows = time, columns = series.
    /// - `lag`: `usize`
    ///   VAR lag order in levels; must be ≥ 1. `lag − 1` lagged
    ///   differences enter the short-run block.
    /// - `model`: [`ErrorCorrectionModel`]
    ///   Deterministic specification (see module docs).
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidLagCount` when `lag == 0`.
    /// - `StatTestError::InsufficientData` when fewer effective rows than
    ///   regressors plus margin remain.
    /// - `StatTestError::SingularMoments` when a moment matrix cannot be
    ///   factorized.
    pub fn process(
        data: ArrayView2<'_, f64>, lag: usize, model: ErrorCorrectionModel,
    ) -> StatTestResult<Self> {
        if lag == 0 {
            return Err(StatTestError::InvalidLagCount(lag));
        }
        let t = data.nrows();
        let p = data.ncols();
        if p == 0 {
            return Err(StatTestError::InsufficientData { needed: 1, actual: 0 });
        }

        let m = t.saturating_sub(lag);
        let short_cols = p * (lag - 1)
            + usize::from(matches!(model, ErrorCorrectionModel::None | ErrorCorrectionModel::Trend));
        let level_cols = p + usize::from(!matches!(model, ErrorCorrectionModel::None));
        let needed = lag + short_cols + level_cols + 2;
        if t < needed {
            return Err(StatTestError::InsufficientData { needed, actual: t });
        }

        // Assemble the three blocks row by row; regression rows are level
        // times s = lag..T-1.
        let mut z0 = DMatrix::<f64>::zeros(m, p);
        let mut z1 = DMatrix::<f64>::zeros(m, level_cols);
        let mut zk = DMatrix::<f64>::zeros(m, short_cols);
        for (row, s) in (lag..t).enumerate() {
            for j in 0..p {
                z0[(row, j)] = data[(s, j)] - data[(s - 1, j)];
                z1[(row, j)] = data[(s - lag, j)];
            }
            match model {
                ErrorCorrectionModel::Constant => z1[(row, p)] = 1.0,
                ErrorCorrectionModel::Trend => z1[(row, p)] = s as f64,
                ErrorCorrectionModel::None => (),
            }
            let mut col = 0;
            for j in 1..lag {
                for i in 0..p {
                    zk[(row, col)] = data[(s - j, i)] - data[(s - j - 1, i)];
                    col += 1;
                }
            }
            if matches!(model, ErrorCorrectionModel::None | ErrorCorrectionModel::Trend) {
                zk[(row, col)] = 1.0;
            }
        }

        let r0 = partial_out(&z0, &zk)?;
        let r1 = partial_out(&z1, &zk)?;

        let mf = m as f64;
        let s00 = r0.transpose() * &r0 / mf;
        let s11 = r1.transpose() * &r1 / mf;
        let s01 = r0.transpose() * &r1 / mf;

        let chol00 = Cholesky::new(s00).ok_or(StatTestError::SingularMoments)?;
        let chol11 = Cholesky::new(s11).ok_or(StatTestError::SingularMoments)?;

        // W = L⁻¹ S10 S00⁻¹ S01 L⁻ᵀ with S11 = L Lᵀ; symmetric by
        // construction up to rounding, so a symmetric eigensolver applies.
        let b = chol00.solve(&s01);
        let c = s01.transpose() * b;
        let l = chol11.l();
        let step1 = l.solve_lower_triangular(&c).ok_or(StatTestError::SingularMoments)?;
        let step2 =
            l.solve_lower_triangular(&step1.transpose()).ok_or(StatTestError::SingularMoments)?;
        let mut w = step2.transpose();
        let wt = w.transpose();
        w = (w + wt) / 2.0;

        let mut eigenvalues: Vec<f64> =
            SymmetricEigen::new(w).eigenvalues.iter().map(|&v| v.clamp(0.0, 1.0 - 1e-12)).collect();
        eigenvalues.sort_by(|a, b| b.total_cmp(a));

        Ok(JohansenCointegration { eigenvalues, nseries: p, sample_size: m })
    }

    /// Trace statistic `−T·Σ_{i>r} ln(1−λᵢ)` for rank hypothesis `r`.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidRank` when `r` is not below the number of
    ///   observed series.
    pub fn trace_test(&self, rank: usize) -> StatTestResult<f64> {
        if rank >= self.nseries {
            return Err(StatTestError::InvalidRank { rank, available: self.nseries });
        }
        let sum: f64 =
            self.eigenvalues[rank..self.nseries].iter().map(|&l| (1.0 - l).ln()).sum();
        Ok(-(self.sample_size as f64) * sum)
    }

    /// Maximum-eigenvalue statistic `−T·ln(1−λ_r)` for rank hypothesis `r`.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidRank` when `r` is not below the number of
    ///   observed series.
    pub fn max_test(&self, rank: usize) -> StatTestResult<f64> {
        if rank >= self.nseries {
            return Err(StatTestError::InvalidRank { rank, available: self.nseries });
        }
        Ok(-(self.sample_size as f64) * (1.0 - self.eigenvalues[rank]).ln())
    }

    /// Descending eigenvalue sequence of the reduced-rank problem.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Effective sample size `T − lag`.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Residuals of each column of `a` regressed on the columns of `s`
/// (identity when `s` has no columns).
fn partial_out(a: &DMatrix<f64>, s: &DMatrix<f64>) -> StatTestResult<DMatrix<f64>> {
    if s.ncols() == 0 {
        return Ok(a.clone());
    }
    let sts = s.transpose() * s;
    let chol = Cholesky::new(sts).ok_or(StatTestError::SingularMoments)?;
    let coef = chol.solve(&(s.transpose() * a));
    Ok(a - s * coef)
}

#[cfg(test)]
mod tests {
    use ndarray::Array2;

    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Model-name parsing, including the rejection branch.
    // - Eigenvalue bounds, statistic non-negativity, and the
    //   trace-dominates-max ordering on a cointegrated pair.
    // - The invalid-rank and invalid-lag error branches.
    //
    // They intentionally DO NOT cover:
    // - Critical values of the trace/max distributions; only statistics
    //   are reported by this crate.
    // -------------------------------------------------------------------------

    /// A cointegrated pair: a persistent patterned walk and the same walk
    /// plus a small alternating spread.
    fn cointegrated_pair(n: usize) -> Array2<f64> {
        let steps = [0.9, -0.3, 0.5, 1.1, -0.7, 0.2];
        let mut level = 10.0;
        let mut data = Array2::<f64>::zeros((n, 2));
        for t in 0..n {
            level += steps[t % steps.len()];
            data[(t, 0)] = level;
            data[(t, 1)] = level + if t % 2 == 0 { 0.4 } else { -0.4 };
        }
        data
    }

    #[test]
    // Purpose
    // -------
    // Verify `FromStr` parsing for every model name and the rejection of
    // unknown names.
    //
    // Given
    // -----
    // - "none", "const", "TREND", and "quadratic".
    //
    // Expect
    // ------
    // - The three valid names parse (case-insensitively); the unknown
    //   name yields `InvalidModel`.
    fn error_correction_model_from_str_parses_known_names() {
        // Act & Assert
        assert_eq!("none".parse::<ErrorCorrectionModel>().unwrap(), ErrorCorrectionModel::None);
        assert_eq!("const".parse::<ErrorCorrectionModel>().unwrap(), ErrorCorrectionModel::Constant);
        assert_eq!("TREND".parse::<ErrorCorrectionModel>().unwrap(), ErrorCorrectionModel::Trend);
        match "quadratic".parse::<ErrorCorrectionModel>() {
            Err(StatTestError::InvalidModel(name)) => assert_eq!(name, "quadratic"),
            other => panic!("expected InvalidModel, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Run the estimator on a cointegrated pair and check structural
    // properties of the outcome.
    //
    // Given
    // -----
    // - 80 observations of a patterned walk and its spread companion;
    //   lag = 2, restricted constant.
    //
    // Expect
    // ------
    // - Eigenvalues in [0, 1), sorted descending.
    // - trace(0) ≥ max(0) ≥ 0 and trace(0) ≥ trace(1) ≥ 0.
    fn johansen_process_cointegrated_pair_has_ordered_statistics() {
        // Arrange
        let data = cointegrated_pair(80);

        // Act
        let outcome =
            JohansenCointegration::process(data.view(), 2, ErrorCorrectionModel::Constant)
                .expect("estimation should succeed on a long clean pair");

        // Assert
        let evs = outcome.eigenvalues();
        assert!(evs.windows(2).all(|w| w[0] >= w[1]), "eigenvalues not descending: {evs:?}");
        assert!(evs.iter().all(|&l| (0.0..1.0).contains(&l)), "eigenvalues out of range: {evs:?}");

        let trace0 = outcome.trace_test(0).unwrap();
        let trace1 = outcome.trace_test(1).unwrap();
        let max0 = outcome.max_test(0).unwrap();
        assert!(trace0 >= max0, "trace(0) = {trace0} should dominate max(0) = {max0}");
        assert!(trace0 >= trace1 && trace1 >= 0.0, "trace ordering violated: {trace0}, {trace1}");
    }

    #[test]
    // Purpose
    // -------
    // Verify the typed error branches: rank hypotheses beyond the series
    // count and a zero lag order.
    //
    // Given
    // -----
    // - A valid two-series estimation, then rank = 2; and lag = 0.
    //
    // Expect
    // ------
    // - `InvalidRank { rank: 2, available: 2 }` and `InvalidLagCount(0)`.
    fn johansen_rejects_excess_rank_and_zero_lag() {
        // Arrange
        let data = cointegrated_pair(60);
        let outcome =
            JohansenCointegration::process(data.view(), 1, ErrorCorrectionModel::None)
                .expect("estimation should succeed");

        // Act & Assert: rank beyond the series count
        match outcome.trace_test(2) {
            Err(StatTestError::InvalidRank { rank: 2, available: 2 }) => (),
            other => panic!("expected InvalidRank, got {other:?}"),
        }
        match outcome.max_test(5) {
            Err(StatTestError::InvalidRank { rank: 5, available: 2 }) => (),
            other => panic!("expected InvalidRank, got {other:?}"),
        }

        // Act & Assert: zero lag order
        match JohansenCointegration::process(data.view(), 0, ErrorCorrectionModel::None) {
            Err(StatTestError::InvalidLagCount(0)) => (),
            other => panic!("expected InvalidLagCount(0), got {other:?}"),
        }
    }
}
