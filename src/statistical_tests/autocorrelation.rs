//! statistical_tests::autocorrelation — residual serial-correlation tests.
//!
//! Purpose
//! -------
//! Test the residuals of a vintage-pair regression for serial
//! correlation: the Breusch–Godfrey LM test (auxiliary regression of the
//! residual on the original regressor and its own lags) and the
//! Ljung–Box portmanteau test. Both operate on the residuals of the OLS
//! fit `y = α + β·x` computed here.
//!
//! Key behaviors
//! -------------
//! - Breusch–Godfrey at `nbg` lags: auxiliary rows drop the first `nbg`
//!   observations; the LM statistic is `m·R²` over the `m` auxiliary
//!   rows, referred to χ²(nbg). The auxiliary R² is reported alongside.
//! - Ljung–Box at `nlb` lags: `Q = m(m+2)·Σ_k r_k²/(m−k)` over the `m`
//!   residuals, referred to χ²(nlb).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are aligned and finite (cleaned upstream).
//! - Lag counts must be ≥ 1 and leave enough observations for their
//!   auxiliary computation; violations surface as typed errors handled
//!   per output row by the orchestrator.
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::regression::ols::{OlsFit, StatisticalTest};
use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// AutoCorrelationTests — outcome of the serial-correlation battery for
/// one vintage pair.
///
/// Fields (serialized in this order)
/// ---------------------------------
/// - `bgr2`: R² of the Breusch–Godfrey auxiliary regression.
/// - `breusch_godfrey`: LM statistic and χ²(nbg) p-value.
/// - `ljung_box`: portmanteau statistic and χ²(nlb) p-value.
#[derive(Debug, Copy, Clone)]
pub struct AutoCorrelationTests {
    bgr2: f64,
    breusch_godfrey: StatisticalTest,
    ljung_box: StatisticalTest,
}

impl AutoCorrelationTests {
    /// Run both tests on the residuals of `y = α + β·x`.
    ///
    /// Parameters
    /// ----------
    /// - `y`, `x`: `&[f64]`
    ///   Aligned pair; `x` must match `y` in length.
    /// - `nbg`: `usize`
    ///   Breusch–Godfrey lag count, ≥ 1.
    /// - `nlb`: `usize`
    ///   Ljung–Box lag count, ≥ 1 and smaller than the sample.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidLagCount` for a zero lag count or an
    ///   `nlb` that does not fit the sample.
    /// - `StatTestError::Ols` when the main or auxiliary regression
    ///   cannot be fitted.
    /// - `StatTestError::ZeroVariance` when the residuals are constant,
    ///   making autocorrelations undefined.
    pub fn of(y: &[f64], x: &[f64], nbg: usize, nlb: usize) -> StatTestResult<Self> {
        if nbg == 0 {
            return Err(StatTestError::InvalidLagCount(nbg));
        }
        if nlb == 0 {
            return Err(StatTestError::InvalidLagCount(nlb));
        }

        let fit = OlsFit::fit(y, &[x], true)?;
        let e = fit.residuals();

        let (bgr2, breusch_godfrey) = breusch_godfrey(e, x, nbg)?;
        let ljung_box = ljung_box(e, nlb)?;

        Ok(AutoCorrelationTests { bgr2, breusch_godfrey, ljung_box })
    }

    /// R² of the Breusch–Godfrey auxiliary regression.
    pub fn bgr2(&self) -> f64 {
        self.bgr2
    }

    /// Breusch–Godfrey LM test.
    pub fn breusch_godfrey(&self) -> StatisticalTest {
        self.breusch_godfrey
    }

    /// Ljung–Box portmanteau test.
    pub fn ljung_box(&self) -> StatisticalTest {
        self.ljung_box
    }
}

/// Breusch–Godfrey auxiliary regression of `e_t` on `x_t` and
/// `e_{t−1}…e_{t−nbg}`, dropping the first `nbg` rows.
fn breusch_godfrey(e: &[f64], x: &[f64], nbg: usize) -> StatTestResult<(f64, StatisticalTest)> {
    let m = e.len();
    if m <= nbg {
        return Err(StatTestError::InvalidLagCount(nbg));
    }

    let response = &e[nbg..];
    let x_tail = &x[nbg..];
    let lag_cols: Vec<&[f64]> = (1..=nbg).map(|j| &e[nbg - j..m - j]).collect();

    let mut xs: Vec<&[f64]> = Vec::with_capacity(1 + nbg);
    xs.push(x_tail);
    xs.extend(lag_cols);

    let aux = OlsFit::fit(response, &xs, true)?;
    let value = aux.n() as f64 * aux.r2();
    let chi2 = ChiSquared::new(nbg as f64).expect("nbg >= 1 checked above");
    Ok((aux.r2(), StatisticalTest { value, pvalue: 1.0 - chi2.cdf(value) }))
}

/// Ljung–Box portmanteau statistic over the residual autocorrelations.
fn ljung_box(e: &[f64], nlb: usize) -> StatTestResult<StatisticalTest> {
    let m = e.len();
    if m <= nlb + 1 {
        return Err(StatTestError::InvalidLagCount(nlb));
    }

    let mean = e.iter().sum::<f64>() / m as f64;
    let denom: f64 = e.iter().map(|v| (v - mean) * (v - mean)).sum();
    if denom == 0.0 {
        return Err(StatTestError::ZeroVariance);
    }

    let mf = m as f64;
    let mut q = 0.0;
    for k in 1..=nlb {
        let num: f64 =
            e[k..].iter().zip(e).map(|(a, b)| (a - mean) * (b - mean)).sum();
        let r = num / denom;
        q += r * r / (mf - k as f64);
    }
    q *= mf * (mf + 2.0);

    let chi2 = ChiSquared::new(nlb as f64).expect("nlb >= 1 checked above");
    Ok(StatisticalTest { value: q, pvalue: 1.0 - chi2.cdf(q) })
}
