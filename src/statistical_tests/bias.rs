//! statistical_tests::bias — mean-revision bias tests.
//!
//! Purpose
//! -------
//! Test whether a revision series has zero mean: the classical t test on
//! the sample mean, plus an AR(1)-adjusted variant that inflates the
//! standard deviation by `sqrt((1+ρ̂)/(1−ρ̂))` to account for serial
//! correlation in the revisions before studentizing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input is a cleaned (finite) revision series with at least two
//!   observations and positive variance.
//! - Both p-values are two-sided Student t with `n − 1` degrees of
//!   freedom; the adjusted variant reuses the same reference
//!   distribution on the inflated standard error.
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// Bias — outcome of the mean-revision tests for one revision column.
///
/// Fields (serialized in this order)
/// ---------------------------------
/// `n`, `mu`, `sigma`, `t`, `t_pvalue`, `ar`, `adjusted_sigma`,
/// `adjusted_t`, `adjusted_t_pvalue`.
#[derive(Debug, Copy, Clone)]
pub struct Bias {
    n: usize,
    mu: f64,
    sigma: f64,
    t: f64,
    t_pvalue: f64,
    ar: f64,
    adjusted_sigma: f64,
    adjusted_t: f64,
    adjusted_t_pvalue: f64,
}

impl Bias {
    /// Run the bias tests on a cleaned revision series.
    ///
    /// Parameters
    /// ----------
    /// - `revisions`: `&[f64]`
    ///   Revision observations, free of non-finite values.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::InsufficientData` when fewer than two
    ///   observations are supplied.
    /// - `StatTestError::ZeroVariance` when the series is constant or the
    ///   AR(1) adjustment degenerates (`ρ̂` at ±1).
    pub fn of(revisions: &[f64]) -> StatTestResult<Self> {
        let n = revisions.len();
        if n < 2 {
            return Err(StatTestError::InsufficientData { needed: 2, actual: n });
        }
        let nf = n as f64;

        let mu = revisions.iter().sum::<f64>() / nf;
        let css: f64 = revisions.iter().map(|&v| (v - mu) * (v - mu)).sum();
        if css == 0.0 {
            return Err(StatTestError::ZeroVariance);
        }
        let sigma = (css / (nf - 1.0)).sqrt();

        let t = mu / (sigma / nf.sqrt());
        let dist = StudentsT::new(0.0, 1.0, nf - 1.0).expect("n >= 2 checked above");
        let t_pvalue = 2.0 * (1.0 - dist.cdf(t.abs()));

        let lag_cross: f64 =
            revisions[1..].iter().zip(revisions).map(|(a, b)| (a - mu) * (b - mu)).sum();
        let ar = lag_cross / css;

        let inflation = (1.0 + ar) / (1.0 - ar);
        if !inflation.is_finite() || inflation <= 0.0 {
            return Err(StatTestError::ZeroVariance);
        }
        let adjusted_sigma = sigma * inflation.sqrt();
        let adjusted_t = mu / (adjusted_sigma / nf.sqrt());
        let adjusted_t_pvalue = 2.0 * (1.0 - dist.cdf(adjusted_t.abs()));

        Ok(Bias { n, mu, sigma, t, t_pvalue, ar, adjusted_sigma, adjusted_t, adjusted_t_pvalue })
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Mean revision.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Sample standard deviation (n − 1 denominator).
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Classical t statistic of the zero-mean hypothesis.
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Two-sided p-value of [`t`](Self::t).
    pub fn t_pvalue(&self) -> f64 {
        self.t_pvalue
    }

    /// Lag-1 autocorrelation of the revisions.
    pub fn ar(&self) -> f64 {
        self.ar
    }

    /// AR(1)-inflated standard deviation.
    pub fn adjusted_sigma(&self) -> f64 {
        self.adjusted_sigma
    }

    /// t statistic recomputed on the inflated standard error.
    pub fn adjusted_t(&self) -> f64 {
        self.adjusted_t
    }

    /// Two-sided p-value of [`adjusted_t`](Self::adjusted_t).
    pub fn adjusted_t_pvalue(&self) -> f64 {
        self.adjusted_t_pvalue
    }
}
