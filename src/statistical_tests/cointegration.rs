//! statistical_tests::cointegration — Engle–Granger two-step test.
//!
//! Purpose
//! -------
//! Test a vintage pair for cointegration by the Engle–Granger two-step
//! procedure: fit the cointegrating regression `y = α + β·x` by OLS, then
//! run an augmented Dickey–Fuller regression on its residuals. The
//! residual test reuses [`difference_regression`] from the unit-root
//! suite; the p-value comes from the two-series MacKinnon surface for the
//! constant case, matching the deterministic terms of the first stage.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are aligned and finite (cleaned upstream).
//! - The residual regression carries no deterministic terms of its own —
//!   first-stage residuals are mean-zero by construction.
use crate::regression::ols::OlsFit;
use crate::statistical_tests::errors::{StatTestError, StatTestResult};
use crate::statistical_tests::mackinnon::{mackinnon_pvalue, Deterministic};
use crate::statistical_tests::unit_root::difference_regression;

/// EngleGranger — outcome of the two-step cointegration test.
///
/// Fields (serialized in this order)
/// ---------------------------------
/// - `rho`: level coefficient of the residual ADF regression.
/// - `ser`: its standard error.
/// - `test`: the studentized statistic.
/// - `pvalue`: two-series MacKinnon surface probability.
#[derive(Debug, Copy, Clone)]
pub struct EngleGranger {
    rho: f64,
    ser: f64,
    test: f64,
    pvalue: f64,
}

impl EngleGranger {
    /// Run the two-step test on an aligned pair.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `&[f64]`
    ///   Dependent series of the cointegrating regression.
    /// - `x`: `&[f64]`
    ///   Regressor series; must match `y` in length.
    /// - `adfk`: `usize`
    ///   Lag order of the residual ADF regression; must be ≥ 1.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InvalidLagCount` when `adfk == 0`.
    /// - `StatTestError::Ols` / `InsufficientData` when either stage
    ///   cannot be fitted.
    pub fn of(y: &[f64], x: &[f64], adfk: usize) -> StatTestResult<Self> {
        if adfk == 0 {
            return Err(StatTestError::InvalidLagCount(adfk));
        }

        let first_stage = OlsFit::fit(y, &[x], true)?;
        let reg = difference_regression(first_stage.residuals(), adfk, Deterministic::None)?;

        Ok(EngleGranger {
            rho: reg.value,
            ser: reg.stdev,
            test: reg.statistic,
            pvalue: mackinnon_pvalue(reg.statistic, Deterministic::Constant, 2),
        })
    }

    /// Level coefficient of the residual ADF regression.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Standard error of [`rho`](Self::rho).
    pub fn ser(&self) -> f64 {
        self.ser
    }

    /// Studentized test statistic.
    pub fn test(&self) -> f64 {
        self.test
    }

    /// Two-series MacKinnon surface p-value.
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }
}
