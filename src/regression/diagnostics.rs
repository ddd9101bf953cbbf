//! regression::diagnostics — residual diagnostics for fitted OLS models.
//!
//! Purpose
//! -------
//! Compute the residual-diagnostic block serialized at the tail of every
//! OLS-family output row: residual skewness and kurtosis, the Jarque–Bera
//! normality test, and three heteroskedasticity tests (Breusch–Pagan,
//! White, ARCH), each reported with the pseudo-R² of its auxiliary
//! regression.
//!
//! Key behaviors
//! -------------
//! - Breusch–Pagan regresses squared residuals on the model's regressors;
//!   White adds their squares and pairwise cross-products; ARCH regresses
//!   squared residuals on their own first lag.
//! - Each LM statistic is `m · R²` of its auxiliary regression over the
//!   `m` auxiliary observations, with a χ² reference distribution whose
//!   degrees of freedom equal the auxiliary slope count.
//!
//! Invariants & assumptions
//! ------------------------
//! - The main fit carries an intercept, so residuals are mean-zero up to
//!   rounding; moments are nevertheless computed around the sample mean.
//! - Auxiliary regressions can fail on small or degenerate samples; such
//!   failures propagate as [`OlsError`] and are handled per output row by
//!   the orchestrator.
//!
//! Conventions
//! -----------
//! - Kurtosis is reported raw (normal reference value 3), matching the
//!   `(K − 3)²` term of the Jarque–Bera statistic.
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::regression::errors::{OlsError, OlsResult};
use crate::regression::ols::{OlsFit, StatisticalTest};

/// RegressionTests — residual diagnostics block of one fitted model.
///
/// Fields
/// ------
/// - `skewness`, `kurtosis`: population moments of the residuals.
/// - `jarque_bera`: normality test, χ²(2).
/// - `bpr2` / `breusch_pagan`: auxiliary R² and LM test, χ²(slopes).
/// - `wr2` / `white`: auxiliary R² and LM test, χ²(aux slopes).
/// - `archr2` / `arch`: auxiliary R² and LM test at one lag, χ²(1).
///
/// Notes
/// -----
/// - Field order here mirrors the serialization order of the OLS row
///   tail; see `vintages::rows`.
#[derive(Debug, Clone)]
pub struct RegressionTests {
    pub skewness: f64,
    pub kurtosis: f64,
    pub jarque_bera: StatisticalTest,
    pub bpr2: f64,
    pub breusch_pagan: StatisticalTest,
    pub wr2: f64,
    pub white: StatisticalTest,
    pub archr2: f64,
    pub arch: StatisticalTest,
}

impl RegressionTests {
    /// Compute the diagnostics block for a fitted model.
    ///
    /// Parameters
    /// ----------
    /// - `fit`: the main regression, used for its residuals.
    /// - `xs`: the main model's regressor columns (without intercept),
    ///   reused as the Breusch–Pagan and White auxiliary designs.
    ///
    /// Errors
    /// ------
    /// - `OlsError::ZeroResidualVariance` when the residuals are exactly
    ///   constant.
    /// - Any `OlsError` from an auxiliary regression (insufficient
    ///   observations, singular auxiliary design).
    pub(crate) fn of(fit: &OlsFit, xs: &[&[f64]]) -> OlsResult<Self> {
        let e = fit.residuals();
        let m = e.len();

        let (skewness, kurtosis) = residual_moments(e)?;
        let jb = jarque_bera(m, skewness, kurtosis);

        let e2: Vec<f64> = e.iter().map(|v| v * v).collect();

        // Breusch-Pagan: e^2 on the original regressors.
        let bp_fit = OlsFit::fit(&e2, xs, true)?;
        let bp = lm_test(bp_fit.n(), bp_fit.r2(), xs.len());

        // White: regressors, their squares, and pairwise cross-products.
        let white_cols = white_design(xs);
        let white_refs: Vec<&[f64]> = white_cols.iter().map(Vec::as_slice).collect();
        let w_fit = OlsFit::fit(&e2, &white_refs, true)?;
        let white = lm_test(w_fit.n(), w_fit.r2(), white_refs.len());

        // ARCH(1): e^2 on its own first lag.
        let arch_y = &e2[1..];
        let arch_x = &e2[..m - 1];
        let arch_fit = OlsFit::fit(arch_y, &[arch_x], true)?;
        let arch = lm_test(arch_fit.n(), arch_fit.r2(), 1);

        Ok(RegressionTests {
            skewness,
            kurtosis,
            jarque_bera: jb,
            bpr2: bp_fit.r2(),
            breusch_pagan: bp,
            wr2: w_fit.r2(),
            white,
            archr2: arch_fit.r2(),
            arch,
        })
    }
}

/// Population skewness and raw kurtosis of a residual vector.
fn residual_moments(e: &[f64]) -> OlsResult<(f64, f64)> {
    let m = e.len() as f64;
    let mean = e.iter().sum::<f64>() / m;
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    let mut m4 = 0.0;
    for &v in e {
        let d = v - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= m;
    m3 /= m;
    m4 /= m;
    if m2 == 0.0 {
        return Err(OlsError::ZeroResidualVariance);
    }
    Ok((m3 / m2.powf(1.5), m4 / (m2 * m2)))
}

/// Jarque-Bera statistic `m/6 · (S² + (K−3)²/4)` with its χ²(2) p-value.
fn jarque_bera(m: usize, skewness: f64, kurtosis: f64) -> StatisticalTest {
    let excess = kurtosis - 3.0;
    let value = m as f64 / 6.0 * (skewness * skewness + excess * excess / 4.0);
    let chi2 = ChiSquared::new(2.0).expect("freedom = 2");
    StatisticalTest { value, pvalue: 1.0 - chi2.cdf(value) }
}

/// LM statistic `m · R²` with its χ²(df) upper-tail p-value.
fn lm_test(m: usize, r2: f64, df: usize) -> StatisticalTest {
    let value = m as f64 * r2;
    let chi2 = ChiSquared::new(df as f64).expect("df >= 1 by construction");
    StatisticalTest { value, pvalue: 1.0 - chi2.cdf(value) }
}

/// White auxiliary design: each regressor, its square, and all pairwise
/// cross-products in `(i, j)`, `i < j` order.
fn white_design(xs: &[&[f64]]) -> Vec<Vec<f64>> {
    let mut cols: Vec<Vec<f64>> = Vec::with_capacity(xs.len() * (xs.len() + 3) / 2);
    for x in xs {
        cols.push(x.to_vec());
    }
    for x in xs {
        cols.push(x.iter().map(|v| v * v).collect());
    }
    for i in 0..xs.len() {
        for j in i + 1..xs.len() {
            cols.push(xs[i].iter().zip(xs[j]).map(|(a, b)| a * b).collect());
        }
    }
    cols
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Moment computation on a symmetric residual pattern.
    // - The zero-variance rejection for perfectly fitted models.
    // - p-value bounds for the full diagnostics block on a plausible fit.
    // - The White design column count for one and two regressors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a symmetric residual pattern has near-zero skewness.
    //
    // Given
    // -----
    // - Residuals alternating ±0.5 around a noisy quadratic response.
    //
    // Expect
    // ------
    // - |skewness| < 1e-9 for the alternating pattern fed directly into
    //   the moment helper.
    fn residual_moments_symmetric_pattern_has_zero_skewness() {
        // Arrange
        let e: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();

        // Act
        let (skewness, kurtosis) =
            residual_moments(&e).expect("non-constant residuals have defined moments");

        // Assert
        assert!(skewness.abs() < 1e-9, "skewness = {skewness}");
        assert!((kurtosis - 1.0).abs() < 1e-9, "two-point pattern has kurtosis 1, got {kurtosis}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure constant residuals are rejected rather than dividing by a
    // zero second moment.
    //
    // Given
    // -----
    // - An all-zero residual vector.
    //
    // Expect
    // ------
    // - `OlsError::ZeroResidualVariance`.
    fn residual_moments_constant_residuals_are_rejected() {
        // Arrange
        let e = vec![0.0; 12];

        // Act
        let result = residual_moments(&e);

        // Assert
        match result {
            Err(OlsError::ZeroResidualVariance) => (),
            other => panic!("expected ZeroResidualVariance, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Run the full diagnostics block on a mildly noisy regression and
    // check that every p-value is a probability.
    //
    // Given
    // -----
    // - y = x with a deterministic alternating perturbation, n = 30.
    //
    // Expect
    // ------
    // - All four test p-values lie in [0, 1]; pseudo-R² values lie in
    //   [0, 1].
    fn regression_tests_of_bounds_all_pvalues() {
        // Arrange
        let x: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let y: Vec<f64> = x
            .iter()
            .enumerate()
            .map(|(i, &v)| v + if i % 3 == 0 { 0.4 } else { -0.2 })
            .collect();
        let fit = OlsFit::fit(&y, &[&x], true).expect("well-posed design should fit");

        // Act
        let diag = RegressionTests::of(&fit, &[&x]).expect("diagnostics should run");

        // Assert
        for test in
            [diag.jarque_bera, diag.breusch_pagan, diag.white, diag.arch].iter()
        {
            assert!((0.0..=1.0).contains(&test.pvalue), "p-value out of range: {test:?}");
        }
        for r2 in [diag.bpr2, diag.wr2, diag.archr2] {
            assert!((0.0..=1.0).contains(&r2), "pseudo-R² out of range: {r2}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Pin the White auxiliary design width: k regressors expand to
    // k levels + k squares + k(k−1)/2 cross-products.
    //
    // Given
    // -----
    // - One regressor, then two regressors.
    //
    // Expect
    // ------
    // - 2 columns and 5 columns respectively.
    fn white_design_has_expected_column_count() {
        // Arrange
        let x1: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let x2: Vec<f64> = (0..6).map(|i| (i * i) as f64).collect();

        // Act & Assert
        assert_eq!(white_design(&[&x1]).len(), 2);
        assert_eq!(white_design(&[&x1, &x2]).len(), 5);
    }
}
