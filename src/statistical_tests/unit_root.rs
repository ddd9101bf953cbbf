//! statistical_tests::unit_root — Dickey–Fuller-type unit-root tests.
//!
//! Purpose
//! -------
//! Implement the four unit-root variants reported per vintage column:
//! plain Dickey–Fuller, augmented Dickey–Fuller, Dickey–Fuller with
//! constant and trend, and Phillips–Perron. All four share the difference
//! regression `Δy_t = φ·y_{t−1} (+ lagged Δy terms) (+ deterministics)`,
//! and report the coefficient `φ̂`, its standard error, the studentized
//! statistic, and a MacKinnon response-surface p-value.
//!
//! Key behaviors
//! -------------
//! - [`difference_regression`] builds and fits the shared design; it is
//!   reused by the Engle–Granger residual test in
//!   [`crate::statistical_tests::cointegration`].
//! - Phillips–Perron corrects the constant-case τ statistic
//!   nonparametrically with a Bartlett-weighted long-run variance at the
//!   Newey–West automatic bandwidth `⌊4(T/100)^{2/9}⌋`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input series is finite (cleaned upstream) and long enough for
//!   the requested lag order; shortfalls surface as
//!   [`StatTestError::Ols`] insufficient-data failures.
//! - `value` is the coefficient on the lagged level in the difference
//!   regression (negative under stationarity), `statistic` its
//!   studentized ratio.
//!
//! Conventions
//! -----------
//! - Design column order: lagged level first, then lagged differences,
//!   then constant, then trend. The level coefficient is always column 0.
//!
//! Testing notes
//! -------------
//! - Unit tests check that a strongly mean-reverting series rejects the
//!   unit root while a near-random-walk does not, and that all four
//!   variants produce probabilities.
use crate::regression::ols::OlsFit;
use crate::statistical_tests::errors::{StatTestError, StatTestResult};
use crate::statistical_tests::mackinnon::{mackinnon_pvalue, Deterministic};

/// One unit-root test block: coefficient, standard error, statistic,
/// p-value. Serialized in this order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UrTest {
    pub value: f64,
    pub stdev: f64,
    pub statistic: f64,
    pub pvalue: f64,
}

/// Raw output of the shared difference regression, before a p-value
/// surface is chosen.
#[derive(Debug, Copy, Clone)]
pub(crate) struct DiffRegression {
    pub value: f64,
    pub stdev: f64,
    pub statistic: f64,
}

/// Fit `Δy_t = φ·y_{t−1} + Σᵢ γᵢ·Δy_{t−i} (+ deterministics) + ε_t`.
///
/// Parameters
/// ----------
/// - `y`: `&[f64]`
///   Input series in levels.
/// - `lags`: `usize`
///   Number of lagged-difference terms (0 for the plain test).
/// - `det`: [`Deterministic`]
///   Deterministic terms to include in the regression.
///
/// Returns
/// -------
/// The level coefficient `φ̂`, its standard error, and the studentized
/// statistic `φ̂ / se(φ̂)`.
///
/// Errors
/// ------
/// - `StatTestError::InsufficientData` when fewer than three usable
///   difference observations remain.
/// - `StatTestError::Ols` when the regression itself cannot be fitted.
pub(crate) fn difference_regression(
    y: &[f64], lags: usize, det: Deterministic,
) -> StatTestResult<DiffRegression> {
    let t = y.len();
    if t < lags + 3 {
        return Err(StatTestError::InsufficientData { needed: lags + 3, actual: t });
    }

    let dy: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
    let rows = dy.len() - lags;

    let mut response = Vec::with_capacity(rows);
    let mut level = Vec::with_capacity(rows);
    let mut diff_lags: Vec<Vec<f64>> = vec![Vec::with_capacity(rows); lags];
    let mut trend = Vec::with_capacity(rows);
    for t in lags..dy.len() {
        response.push(dy[t]);
        level.push(y[t]);
        for (j, col) in diff_lags.iter_mut().enumerate() {
            col.push(dy[t - j - 1]);
        }
        trend.push((t + 1) as f64);
    }

    let mut xs: Vec<&[f64]> = Vec::with_capacity(1 + lags + 1);
    xs.push(&level);
    for col in &diff_lags {
        xs.push(col);
    }
    let intercept = matches!(det, Deterministic::Constant | Deterministic::ConstantTrend);
    if matches!(det, Deterministic::ConstantTrend) {
        xs.push(&trend);
    }

    // The level column is first among the regressors; with an intercept the
    // constant occupies coefficient 0 and the level shifts to 1.
    let fit = OlsFit::fit(&response, &xs, intercept)?;
    let j = usize::from(intercept);
    let value = fit.coefficients()[j];
    let stdev = fit.stdevs()[j];
    Ok(DiffRegression { value, stdev, statistic: value / stdev })
}

/// UnitRoot — the four-test battery for one series.
///
/// Purpose
/// -------
/// Hold the four [`UrTest`] blocks serialized into one unit-root output
/// row, in the fixed order: Dickey–Fuller, augmented Dickey–Fuller,
/// Dickey–Fuller with constant and trend, Phillips–Perron.
#[derive(Debug, Copy, Clone)]
pub struct UnitRoot {
    dickey_fuller: UrTest,
    augmented_dickey_fuller: UrTest,
    dickey_fuller_trend: UrTest,
    philips_perron: UrTest,
}

impl UnitRoot {
    /// Run the four-test battery on a cleaned series.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `&[f64]`
    ///   Input series in levels, already free of non-finite values.
    /// - `adfk`: `usize`
    ///   Lag order of the augmented test; must be ≥ 1.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidLagCount` when `adfk == 0`.
    /// - `StatTestError::InsufficientData` / `StatTestError::Ols` when the
    ///   series is too short or degenerate for any variant.
    pub fn of(y: &[f64], adfk: usize) -> StatTestResult<Self> {
        if adfk == 0 {
            return Err(StatTestError::InvalidLagCount(adfk));
        }

        let df = difference_regression(y, 0, Deterministic::None)?;
        let adf = difference_regression(y, adfk, Deterministic::None)?;
        let df_ct = difference_regression(y, 0, Deterministic::ConstantTrend)?;
        let pp = phillips_perron(y)?;

        Ok(UnitRoot {
            dickey_fuller: attach_pvalue(df, Deterministic::None),
            augmented_dickey_fuller: attach_pvalue(adf, Deterministic::None),
            dickey_fuller_trend: attach_pvalue(df_ct, Deterministic::ConstantTrend),
            philips_perron: pp,
        })
    }

    /// Plain Dickey–Fuller test (no deterministic terms).
    pub fn dickey_fuller(&self) -> UrTest {
        self.dickey_fuller
    }

    /// Augmented Dickey–Fuller test at the requested lag order.
    pub fn augmented_dickey_fuller(&self) -> UrTest {
        self.augmented_dickey_fuller
    }

    /// Dickey–Fuller test with constant and trend.
    pub fn dickey_fuller_trend(&self) -> UrTest {
        self.dickey_fuller_trend
    }

    /// Phillips–Perron test (constant case).
    pub fn philips_perron(&self) -> UrTest {
        self.philips_perron
    }
}

fn attach_pvalue(reg: DiffRegression, det: Deterministic) -> UrTest {
    UrTest {
        value: reg.value,
        stdev: reg.stdev,
        statistic: reg.statistic,
        pvalue: mackinnon_pvalue(reg.statistic, det, 1),
    }
}

/// Phillips–Perron Z_τ test on the constant-case difference regression.
///
/// Notes
/// -----
/// - Long-run variance uses Bartlett weights `w_j = 1 − j/(q+1)` at the
///   automatic bandwidth `q = ⌊4(T/100)^{2/9}⌋`, truncated to the sample.
/// - The corrected statistic is
///   `Z_τ = sqrt(γ₀/λ²)·τ − (λ² − γ₀)·T·se(φ̂) / (2·λ·s)` with `s` the
///   regression standard error (Hamilton 1994, eq. 17.6.8).
fn phillips_perron(y: &[f64]) -> StatTestResult<UrTest> {
    let t = y.len();
    if t < 4 {
        return Err(StatTestError::InsufficientData { needed: 4, actual: t });
    }

    let dy: Vec<f64> = y.windows(2).map(|w| w[1] - w[0]).collect();
    let level = &y[..dy.len()];
    let fit = OlsFit::fit(&dy, &[level], true)?;
    let value = fit.coefficients()[1];
    let stdev = fit.stdevs()[1];
    let tstat = value / stdev;

    let u = fit.residuals();
    let m = u.len() as f64;
    let gamma0: f64 = u.iter().map(|v| v * v).sum::<f64>() / m;
    if gamma0 == 0.0 {
        return Err(StatTestError::ZeroVariance);
    }

    let q = (4.0 * (m / 100.0).powf(2.0 / 9.0)).floor() as usize;
    let q = q.min(u.len() - 1);
    let mut lam2 = gamma0;
    for j in 1..=q {
        let w = 1.0 - j as f64 / (q + 1) as f64;
        let gamma_j: f64 =
            u[j..].iter().zip(u).map(|(a, b)| a * b).sum::<f64>() / m;
        lam2 += 2.0 * w * gamma_j;
    }
    if lam2 <= 0.0 {
        return Err(StatTestError::ZeroVariance);
    }

    let s = fit.sigma2().sqrt();
    let z_tau =
        (gamma0 / lam2).sqrt() * tstat - (lam2 - gamma0) * m * stdev / (2.0 * lam2.sqrt() * s);

    Ok(UrTest {
        value,
        stdev,
        statistic: z_tau,
        pvalue: mackinnon_pvalue(z_tau, Deterministic::Constant, 1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Strong rejection of the unit root on a rapidly mean-reverting
    //   series across all four variants.
    // - Non-rejection on a near-random-walk (cumulative) series.
    // - The invalid-lag and short-series error branches.
    //
    // They intentionally DO NOT cover:
    // - Exact finite-sample critical values (the MacKinnon surface is
    //   asymptotic and pinned separately).
    // -------------------------------------------------------------------------

    /// A strongly mean-reverting alternating series: y_t = (−0.8)^t·5 + a
    /// deterministic ripple, which an AR(1) with φ ≈ −0.8 in levels turns
    /// into a difference regression with a very negative level coefficient.
    fn mean_reverting_series(n: usize) -> Vec<f64> {
        (0..n).map(|t| 5.0 * (-0.8_f64).powi(t as i32) + 0.01 * (t % 3) as f64).collect()
    }

    /// A smooth trending series behaving like a random walk with drift.
    fn trending_series(n: usize) -> Vec<f64> {
        (0..n).map(|t| 10.0 + 0.5 * t as f64 + 0.2 * ((t % 7) as f64 - 3.0)).collect()
    }

    #[test]
    // Purpose
    // -------
    // Verify that a strongly mean-reverting series rejects the unit-root
    // null in every variant.
    //
    // Given
    // -----
    // - 60 observations of a decaying alternating series; adfk = 2.
    //
    // Expect
    // ------
    // - All four p-values below 0.05; all statistics negative.
    fn unit_root_of_mean_reverting_series_rejects_null() {
        // Arrange
        let y = mean_reverting_series(60);

        // Act
        let ur = UnitRoot::of(&y, 2).expect("battery should run on a long clean series");

        // Assert
        for test in [
            ur.dickey_fuller(),
            ur.augmented_dickey_fuller(),
            ur.dickey_fuller_trend(),
            ur.philips_perron(),
        ] {
            assert!(test.statistic < 0.0, "statistic should be negative: {test:?}");
            assert!(test.pvalue < 0.05, "expected rejection, got {test:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a trending near-random-walk does not reject the plain
    // Dickey–Fuller null and yields probabilities everywhere.
    //
    // Given
    // -----
    // - 60 observations of a drifting series; adfk = 1.
    //
    // Expect
    // ------
    // - Plain DF p-value above 0.10; all p-values in [0, 1].
    fn unit_root_of_trending_series_does_not_reject_plain_df() {
        // Arrange
        let y = trending_series(60);

        // Act
        let ur = UnitRoot::of(&y, 1).expect("battery should run on a long clean series");

        // Assert
        assert!(
            ur.dickey_fuller().pvalue > 0.10,
            "drifting series should not reject: {:?}",
            ur.dickey_fuller()
        );
        for test in [
            ur.dickey_fuller(),
            ur.augmented_dickey_fuller(),
            ur.dickey_fuller_trend(),
            ur.philips_perron(),
        ] {
            assert!((0.0..=1.0).contains(&test.pvalue), "p-value out of range: {test:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the fail-fast branches: a zero ADF lag order and a series
    // too short for the requested lags.
    //
    // Given
    // -----
    // - adfk = 0 on a valid series; adfk = 5 on a 6-point series.
    //
    // Expect
    // ------
    // - `InvalidLagCount(0)` and `InsufficientData` respectively.
    fn unit_root_of_rejects_invalid_lag_and_short_series() {
        // Arrange
        let y = mean_reverting_series(20);
        let short = mean_reverting_series(6);

        // Act & Assert: zero lag order
        match UnitRoot::of(&y, 0) {
            Err(StatTestError::InvalidLagCount(0)) => (),
            other => panic!("expected InvalidLagCount(0), got {other:?}"),
        }

        // Act & Assert: short series
        match UnitRoot::of(&short, 5) {
            Err(StatTestError::InsufficientData { .. }) | Err(StatTestError::Ols(_)) => (),
            other => panic!("expected a data-shortage error, got {other:?}"),
        }
    }
}
