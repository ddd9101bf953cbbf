//! statistical_tests::signal_noise — news/noise revision decomposition.
//!
//! Purpose
//! -------
//! Decompose the information content of a revision `r = l − p` between a
//! preliminary vintage `p` and a later vintage `l` by two regressions:
//! the *news* regression of `r` on the later vintage (revisions that add
//! information correlate with the final value) and the *noise* regression
//! of `r` on the preliminary vintage (revisions that remove measurement
//! error correlate with the preliminary value).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are aligned and finite (cleaned upstream).
//! - Each regression reports its R², overall F statistic, and the F
//!   upper-tail p-value under Fisher–Snedecor(1, n − 2).
use crate::regression::ols::OlsFit;
use crate::statistical_tests::errors::{StatTestError, StatTestResult};

/// SignalNoise — outcome of the news/noise decomposition for one pair.
///
/// Fields (serialized in this order)
/// ---------------------------------
/// `news_r2`, `news_f`, `news_pvalue`, `noise_r2`, `noise_f`,
/// `noise_pvalue`.
#[derive(Debug, Copy, Clone)]
pub struct SignalNoise {
    news_r2: f64,
    news_f: f64,
    news_pvalue: f64,
    noise_r2: f64,
    noise_f: f64,
    noise_pvalue: f64,
}

impl SignalNoise {
    /// Run the decomposition on an aligned preliminary/later pair.
    ///
    /// Parameters
    /// ----------
    /// - `preliminary`: `&[f64]`
    ///   Earlier vintage `p`.
    /// - `later`: `&[f64]`
    ///   Later vintage `l`; must match `preliminary` in length.
    ///
    /// Errors
    /// ------
    /// - `StatTestError::Ols` when either regression cannot be fitted
    ///   (length mismatch, too few observations, constant regressor).
    pub fn of(preliminary: &[f64], later: &[f64]) -> StatTestResult<Self> {
        if preliminary.len() != later.len() {
            return Err(StatTestError::Clean(
                crate::alignment::errors::CleanError::IncompatibleLength(
                    preliminary.len(),
                    later.len(),
                ),
            ));
        }
        let revision: Vec<f64> =
            later.iter().zip(preliminary).map(|(&l, &p)| l - p).collect();

        let news = OlsFit::fit(&revision, &[later], true)?;
        let noise = OlsFit::fit(&revision, &[preliminary], true)?;

        Ok(SignalNoise {
            news_r2: news.r2(),
            news_f: news.f_statistic(),
            news_pvalue: news.f_pvalue(),
            noise_r2: noise.r2(),
            noise_f: noise.f_statistic(),
            noise_pvalue: noise.f_pvalue(),
        })
    }

    /// R² of the news regression (revision on later vintage).
    pub fn news_r2(&self) -> f64 {
        self.news_r2
    }

    /// F statistic of the news regression.
    pub fn news_f(&self) -> f64 {
        self.news_f
    }

    /// Upper-tail p-value of [`news_f`](Self::news_f).
    pub fn news_pvalue(&self) -> f64 {
        self.news_pvalue
    }

    /// R² of the noise regression (revision on preliminary vintage).
    pub fn noise_r2(&self) -> f64 {
        self.noise_r2
    }

    /// F statistic of the noise regression.
    pub fn noise_f(&self) -> f64 {
        self.noise_f
    }

    /// Upper-tail p-value of [`noise_f`](Self::noise_f).
    pub fn noise_pvalue(&self) -> f64 {
        self.noise_pvalue
    }
}
