//! regression — OLS estimation and residual diagnostics.
//!
//! Purpose
//! -------
//! Provide the least-squares estimator layer behind the revision
//! diagnostics batteries: a reusable fitting core ([`OlsFit`]), the
//! battery entry point ([`OlsTests`]), and the residual diagnostics
//! block ([`RegressionTests`]) serialized at the tail of every
//! OLS-family output row.
//!
//! Key behaviors
//! -------------
//! - Normal-equations fitting with Cholesky factorization, coefficient
//!   standard errors, centered/uncentered R², overall F.
//! - Residual skewness/kurtosis, Jarque–Bera, Breusch–Pagan, White, and
//!   ARCH(1), each heteroskedasticity test with its auxiliary pseudo-R².
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are aligned and finite; the alignment engine runs upstream.
//! - All failures are reported via [`OlsError`]/[`OlsResult`]; this
//!   subtree never panics on user-facing invalid inputs.
//!
//! Downstream usage
//! ----------------
//! - The orchestrator families in [`crate::vintages`] call
//!   [`OlsTests::of`]; the unit-root, cointegration, autocorrelation, and
//!   signal/noise suites in [`crate::statistical_tests`] reuse
//!   [`OlsFit::fit`] with explicit designs.

pub mod diagnostics;
pub mod errors;
pub mod ols;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::diagnostics::RegressionTests;
pub use self::errors::{OlsError, OlsResult};
pub use self::ols::{Coefficient, OlsFit, OlsTests, StatisticalTest};
