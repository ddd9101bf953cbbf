//! statistical_tests — named test suites behind the revision diagnostics.
//!
//! Purpose
//! -------
//! Collect the statistical test suites invoked per vintage pair, lag, or
//! column by the diagnostics orchestrator: serial-correlation tests
//! (Breusch–Godfrey, Ljung–Box), unit-root tests (Dickey–Fuller family
//! and Phillips–Perron with MacKinnon response-surface p-values),
//! Engle–Granger and Johansen cointegration, mean-revision bias tests,
//! and the news/noise signal decomposition.
//!
//! Key behaviors
//! -------------
//! - Each suite exposes a value-object outcome (`AutoCorrelationTests`,
//!   `UnitRoot`, `EngleGranger`, `JohansenCointegration`, `Bias`,
//!   `SignalNoise`) constructed by a single entry point and read through
//!   accessors; outcomes carry every field their output row serializes,
//!   in the serialized order.
//! - All suites share the error type [`StatTestError`] and the result
//!   alias [`StatTestResult`], which also wrap the estimator-layer and
//!   alignment errors so `?` composes across subtrees.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are aligned and free of non-finite values; the orchestrator
//!   cleans them first and these suites do not re-scan.
//! - Suites report failures via [`StatTestResult`] and never panic on
//!   user-facing invalid inputs; panics indicate programming errors.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use revision_diagnostics::statistical_tests::{Bias, StatTestResult};
//!
//!   fn mean_check(revisions: &[f64]) -> StatTestResult<f64> {
//!       Ok(Bias::of(revisions)?.t_pvalue())
//!   }
//!   ```
//!
//! - The orchestrator families in [`crate::vintages`] call one suite per
//!   output row and record any [`StatTestError`] in that row's status.

pub mod autocorrelation;
pub mod bias;
pub mod cointegration;
pub mod errors;
pub mod johansen;
pub(crate) mod mackinnon;
pub mod signal_noise;
pub mod unit_root;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::autocorrelation::AutoCorrelationTests;
pub use self::bias::Bias;
pub use self::cointegration::EngleGranger;
pub use self::errors::{StatTestError, StatTestResult};
pub use self::johansen::{ErrorCorrectionModel, JohansenCointegration};
pub use self::signal_noise::SignalNoise;
pub use self::unit_root::{UnitRoot, UrTest};
