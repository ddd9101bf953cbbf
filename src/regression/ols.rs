//! regression::ols — ordinary least squares with inference summaries.
//!
//! Purpose
//! -------
//! Fit linear models by ordinary least squares and expose the quantities
//! the revision-diagnostics batteries serialize: coefficient estimates
//! with standard errors and two-sided t p-values, R², the overall F
//! statistic, and the residual vector consumed by the diagnostics and
//! autocorrelation suites.
//!
//! Key behaviors
//! -------------
//! - [`OlsFit::fit`] solves the normal equations via a Cholesky
//!   factorization of `XᵀX` and reports `(XᵀX)⁻¹`-based standard errors.
//! - R² is centered when the model carries an intercept and uncentered
//!   otherwise, matching the F-statistic convention used alongside it.
//! - [`OlsTests::of`] is the battery entry point: an intercept regression
//!   of `y` on the supplied regressors, packaged with the residual
//!   diagnostics block from [`crate::regression::diagnostics`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; the alignment engine runs upstream, so no
//!   finiteness scan is repeated here.
//! - `n > k` is enforced at fit time, so every downstream degrees-of-
//!   freedom value (`n − k`) is strictly positive and distribution
//!   constructions on it cannot fail.
//! - A design matrix whose `XᵀX` is not positive definite is rejected as
//!   [`OlsError::SingularDesign`]; there is no pseudo-inverse fallback.
//!
//! Conventions
//! -----------
//! - Coefficient order is intercept first (when present), then regressors
//!   in input order. Serializers rely on this order.
//! - Two-sided p-values use Student t with `n − k` degrees of freedom.
//!
//! Downstream usage
//! ----------------
//! - The orchestrator families (`slope_and_drift`, `efficiency_model1`,
//!   `efficiency_model2`, `orthogonality_model1`, `orthogonality_model2`)
//!   call [`OlsTests::of`]; the unit-root, cointegration, and signal/noise
//!   suites reuse the low-level [`OlsFit::fit`] with explicit designs.
//!
//! Testing notes
//! -------------
//! - Unit tests cover exact-line recovery, centered R² on a noisy slope,
//!   the singular-design and insufficient-data rejections, and the
//!   coefficient ordering contract.
use nalgebra::{Cholesky, DMatrix, DVector};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::regression::diagnostics::RegressionTests;
use crate::regression::errors::{OlsError, OlsResult};

/// A generic statistic / p-value pair shared by every test suite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StatisticalTest {
    pub value: f64,
    pub pvalue: f64,
}

/// One regression coefficient: estimate, standard error, two-sided p-value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Coefficient {
    pub estimate: f64,
    pub stdev: f64,
    pub pvalue: f64,
}

/// OlsFit — low-level least-squares fit.
///
/// Purpose
/// -------
/// Hold the estimated coefficients, standard errors, residuals, and fit
/// summaries of one least-squares regression, with or without an
/// intercept. This is the reusable core under [`OlsTests`] and the
/// difference regressions of the unit-root and cointegration suites.
///
/// Fields
/// ------
/// - `coefficients`, `stdevs`: aligned by design-column index (intercept
///   first when present).
/// - `residuals`: `y − Xβ̂`, length `n`.
/// - `r2`: centered when `intercept` is set, uncentered otherwise; `0.0`
///   when the (centered) total sum of squares is zero.
/// - `sigma2`: residual variance `RSS / (n − k)`.
///
/// Invariants
/// ----------
/// - `n > k ≥ 1`, so `n − k ≥ 1` and Student-t degrees of freedom are
///   always valid.
#[derive(Debug, Clone)]
pub struct OlsFit {
    coefficients: Vec<f64>,
    stdevs: Vec<f64>,
    residuals: Vec<f64>,
    n: usize,
    k: usize,
    intercept: bool,
    r2: f64,
    sigma2: f64,
}

impl OlsFit {
    /// Fit `y` on the given regressor columns by ordinary least squares.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `&[f64]`
    ///   Response vector, length `n`.
    /// - `xs`: `&[&[f64]]`
    ///   Regressor columns, each of length `n`. Must be non-empty unless
    ///   `intercept` is set.
    /// - `intercept`: `bool`
    ///   Whether to prepend a constant column to the design.
    ///
    /// Returns
    /// -------
    /// `OlsResult<OlsFit>` with coefficients ordered intercept-first.
    ///
    /// Errors
    /// ------
    /// - `OlsError::NoRegressors` when `xs` is empty and no intercept is
    ///   requested.
    /// - `OlsError::IncompatibleLength` when any regressor's length
    ///   differs from `y`'s.
    /// - `OlsError::InsufficientData` when `n ≤ k`.
    /// - `OlsError::SingularDesign` when `XᵀX` has no Cholesky
    ///   factorization.
    pub fn fit(y: &[f64], xs: &[&[f64]], intercept: bool) -> OlsResult<Self> {
        let n = y.len();
        if xs.is_empty() && !intercept {
            return Err(OlsError::NoRegressors);
        }
        for x in xs {
            if x.len() != n {
                return Err(OlsError::IncompatibleLength(n, x.len()));
            }
        }
        let k = xs.len() + usize::from(intercept);
        if n <= k {
            return Err(OlsError::InsufficientData { needed: k + 1, actual: n });
        }

        let mut design = DMatrix::<f64>::zeros(n, k);
        let offset = usize::from(intercept);
        if intercept {
            design.column_mut(0).fill(1.0);
        }
        for (j, x) in xs.iter().enumerate() {
            for (i, &v) in x.iter().enumerate() {
                design[(i, j + offset)] = v;
            }
        }

        let xtx = design.transpose() * &design;
        let xty = design.transpose() * DVector::from_column_slice(y);
        let chol = Cholesky::new(xtx).ok_or(OlsError::SingularDesign)?;
        let beta = chol.solve(&xty);

        let fitted = &design * &beta;
        let residuals: Vec<f64> = y.iter().zip(fitted.iter()).map(|(&yi, &fi)| yi - fi).collect();
        let rss: f64 = residuals.iter().map(|e| e * e).sum();
        let sigma2 = rss / (n - k) as f64;

        let xtx_inv = chol.inverse();
        let stdevs: Vec<f64> = (0..k).map(|j| (sigma2 * xtx_inv[(j, j)]).sqrt()).collect();

        let tss = if intercept {
            let mean = y.iter().sum::<f64>() / n as f64;
            y.iter().map(|&v| (v - mean) * (v - mean)).sum::<f64>()
        } else {
            y.iter().map(|&v| v * v).sum::<f64>()
        };
        let r2 = if tss > 0.0 { 1.0 - rss / tss } else { 0.0 };

        Ok(OlsFit {
            coefficients: beta.iter().copied().collect(),
            stdevs,
            residuals,
            n,
            k,
            intercept,
            r2,
            sigma2,
        })
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of estimated coefficients (intercept included).
    pub fn k(&self) -> usize {
        self.k
    }

    /// Coefficient estimates, intercept first when present.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient standard errors, aligned with [`coefficients`](Self::coefficients).
    pub fn stdevs(&self) -> &[f64] {
        &self.stdevs
    }

    /// Residual vector `y − Xβ̂`.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Coefficient of determination (centered iff an intercept is present).
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Residual variance `RSS / (n − k)`.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Studentized ratio `β̂ⱼ / se(β̂ⱼ)`.
    pub fn t_statistic(&self, j: usize) -> f64 {
        self.coefficients[j] / self.stdevs[j]
    }

    /// Two-sided p-value of `β̂ⱼ = 0` under Student t with `n − k` degrees
    /// of freedom.
    pub fn coefficient_pvalue(&self, j: usize) -> f64 {
        let df = (self.n - self.k) as f64;
        let t = StudentsT::new(0.0, 1.0, df).expect("n > k enforced at fit time");
        2.0 * (1.0 - t.cdf(self.t_statistic(j).abs()))
    }

    /// Overall F statistic of the slope coefficients.
    ///
    /// Notes
    /// -----
    /// - With an intercept: `F = (R²/q) / ((1−R²)/(n−k))` with
    ///   `q = k − 1`; without: `q = k` and the uncentered R² applies.
    /// - An intercept-only model has no slopes to test; the statistic is
    ///   NaN in that case.
    pub fn f_statistic(&self) -> f64 {
        let q = self.k - usize::from(self.intercept);
        if q == 0 {
            return f64::NAN;
        }
        let dfe = (self.n - self.k) as f64;
        (self.r2 / q as f64) / ((1.0 - self.r2) / dfe)
    }

    /// Upper-tail p-value of [`f_statistic`](Self::f_statistic) under
    /// Fisher–Snedecor(q, n − k). NaN when there is no slope to test.
    pub fn f_pvalue(&self) -> f64 {
        let q = self.k - usize::from(self.intercept);
        if q == 0 {
            return f64::NAN;
        }
        let f = self.f_statistic();
        if !f.is_finite() {
            return if f == f64::INFINITY { 0.0 } else { f64::NAN };
        }
        let dist = FisherSnedecor::new(q as f64, (self.n - self.k) as f64)
            .expect("q >= 1 and n > k enforced at fit time");
        1.0 - dist.cdf(f)
    }
}

/// OlsTests — one fitted diagnostics battery row, pre-serialization.
///
/// Purpose
/// -------
/// Package the quantities written into one OLS-family output row: sample
/// size, R², F, per-coefficient triples, and the residual diagnostics
/// block. Constructed via [`OlsTests::of`]; a value object thereafter.
///
/// Invariants
/// ----------
/// - `coefficients` holds intercept first, then regressors in input
///   order; serializers depend on this.
#[derive(Debug, Clone)]
pub struct OlsTests {
    n: usize,
    r2: f64,
    f: f64,
    coefficients: Vec<Coefficient>,
    diagnostics: RegressionTests,
}

impl OlsTests {
    /// Run the full battery: intercept regression of `y` on `xs`, with
    /// residual diagnostics.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `&[f64]`
    ///   Response vector.
    /// - `xs`: `&[&[f64]]`
    ///   Regressor columns; must be non-empty.
    ///
    /// Errors
    /// ------
    /// - Any [`OlsError`] from the main fit or from the auxiliary
    ///   diagnostic regressions (Breusch–Pagan, White, ARCH), which
    ///   require a few extra observations beyond the main fit.
    pub fn of(y: &[f64], xs: &[&[f64]]) -> OlsResult<Self> {
        if xs.is_empty() {
            return Err(OlsError::NoRegressors);
        }
        let fit = OlsFit::fit(y, xs, true)?;
        let coefficients = (0..fit.k())
            .map(|j| Coefficient {
                estimate: fit.coefficients()[j],
                stdev: fit.stdevs()[j],
                pvalue: fit.coefficient_pvalue(j),
            })
            .collect();
        let diagnostics = RegressionTests::of(&fit, xs)?;

        Ok(OlsTests { n: fit.n(), r2: fit.r2(), f: fit.f_statistic(), coefficients, diagnostics })
    }

    /// Number of observations in the fitted model.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Centered coefficient of determination.
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Overall F statistic.
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Coefficient triples, intercept first.
    pub fn coefficients(&self) -> &[Coefficient] {
        &self.coefficients
    }

    /// Residual diagnostics block.
    pub fn diagnostics(&self) -> &RegressionTests {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact-line recovery (intercept and slope, r2 = 1) by OlsFit.
    // - Rejection of collinear designs and too-short samples.
    // - Coefficient ordering and p-value sanity in OlsTests::of.
    //
    // They intentionally DO NOT cover:
    // - Distributional accuracy of p-values (pinned indirectly by the
    //   statistical-test suites and integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that an exact linear relationship is recovered with r2 = 1
    // and near-zero residuals.
    //
    // Given
    // -----
    // - y = 2 + 3x on x = 0..8.
    //
    // Expect
    // ------
    // - Intercept ≈ 2, slope ≈ 3, r2 ≈ 1.
    fn ols_fit_recovers_exact_line() {
        // Arrange
        let x: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 2.0 + 3.0 * v).collect();

        // Act
        let fit = OlsFit::fit(&y, &[&x], true).expect("well-posed design should fit");

        // Assert
        assert!((fit.coefficients()[0] - 2.0).abs() < 1e-9, "intercept: {:?}", fit.coefficients());
        assert!((fit.coefficients()[1] - 3.0).abs() < 1e-9, "slope: {:?}", fit.coefficients());
        assert!((fit.r2() - 1.0).abs() < 1e-9, "r2 = {}", fit.r2());
        assert!(fit.residuals().iter().all(|e| e.abs() < 1e-8));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a collinear design is rejected as SingularDesign rather than
    // silently producing arbitrary coefficients.
    //
    // Given
    // -----
    // - Two identical regressor columns.
    //
    // Expect
    // ------
    // - `OlsError::SingularDesign`.
    fn ols_fit_rejects_collinear_design() {
        // Arrange
        let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 1.0 + v).collect();

        // Act
        let result = OlsFit::fit(&y, &[&x, &x], true);

        // Assert
        match result {
            Err(OlsError::SingularDesign) => (),
            other => panic!("expected SingularDesign, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a sample no larger than the coefficient count is rejected
    // with the offending sizes in the payload.
    //
    // Given
    // -----
    // - Two observations for an intercept + slope model (k = 2).
    //
    // Expect
    // ------
    // - `InsufficientData { needed: 3, actual: 2 }`.
    fn ols_fit_rejects_sample_smaller_than_design() {
        // Arrange
        let x = [1.0, 2.0];
        let y = [1.0, 2.0];

        // Act
        let result = OlsFit::fit(&y, &[&x], true);

        // Assert
        match result {
            Err(OlsError::InsufficientData { needed, actual }) => {
                assert_eq!((needed, actual), (3, 2));
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the battery entry point: intercept-first coefficient order,
    // p-values in [0, 1], and a strong fit on a noisy but steep line.
    //
    // Given
    // -----
    // - y = 1 + 2x with small deterministic perturbations, n = 24.
    //
    // Expect
    // ------
    // - Two coefficients; slope p-value < 0.01; all p-values in [0, 1];
    //   r2 > 0.9.
    fn ols_tests_of_orders_coefficients_and_bounds_pvalues() {
        // Arrange
        let x: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let y: Vec<f64> =
            x.iter().enumerate().map(|(i, &v)| 1.0 + 2.0 * v + if i % 2 == 0 { 0.3 } else { -0.3 }).collect();

        // Act
        let tests = OlsTests::of(&y, &[&x]).expect("battery should run on a well-posed design");

        // Assert
        assert_eq!(tests.coefficients().len(), 2);
        let slope = tests.coefficients()[1];
        assert!((slope.estimate - 2.0).abs() < 0.05, "slope estimate {}", slope.estimate);
        assert!(slope.pvalue < 0.01, "slope p-value {}", slope.pvalue);
        for c in tests.coefficients() {
            assert!((0.0..=1.0).contains(&c.pvalue));
        }
        assert!(tests.r2() > 0.9, "r2 = {}", tests.r2());
    }
}
