//! revision_diagnostics — revision-analysis diagnostics for vintage matrices.
//!
//! Purpose
//! -------
//! Quantify how estimates of a time-indexed quantity change as later
//! vintages (revised estimates) become available. The input is a vintage
//! matrix — rows are aligned time periods, columns are successive
//! vintages, missing cells are non-finite — and the output, per
//! diagnostic family, is a fixed-width numeric table with one row per
//! evaluated column pair, lag, or column.
//!
//! Key behaviors
//! -------------
//! - Align first, estimate second: every family routes the relevant
//!   column(s) through the missing-value treatment in [`alignment`]
//!   before any statistic is computed, so estimators never see
//!   non-finite inputs.
//! - Batteries of diagnostics: Theil inequality coefficients
//!   ([`coefficients`]), OLS-based efficiency/orthogonality/level
//!   regressions with residual diagnostics ([`regression`]),
//!   autocorrelation, unit-root, Engle–Granger and Johansen
//!   cointegration, bias, and signal/noise suites
//!   ([`statistical_tests`]), orchestrated per family in [`vintages`].
//! - Partial-failure isolation: one degenerate pair defaults its own
//!   output row (all-NaN, with a typed per-row status) and never blocks
//!   the rest of the batch.
//!
//! Invariants & assumptions
//! ------------------------
//! - Column order of the vintage matrix is semantically meaningful
//!   (vintage/lag indices) and preserved by every operation.
//! - Family calls are pure: all behavior is parameterized explicitly per
//!   call; there is no configuration, I/O, or shared state.
//! - Fail-fast validation errors abort a family call before any row is
//!   computed; per-row estimation failures are confined to their row.
//!
//! Downstream usage
//! ----------------
//! - Most callers need only the orchestration surface:
//!
//!   ```rust
//!   use ndarray::array;
//!   use revision_diagnostics::vintages;
//!
//!   let m = array![[1.0, 1.1, 1.2], [2.0, 2.1, 2.2], [3.0, 3.1, 3.3], [4.0, 4.2, 4.3]];
//!   let table = vintages::theil2(m.view(), 1)?.expect("two evaluable pairs");
//!   assert_eq!(table.num_rows(), 2);
//!   # Ok::<(), revision_diagnostics::vintages::VintagesError>(())
//!   ```
//!
//! - The estimator suites are public for callers that need a single test
//!   outside the batch context (e.g. one [`statistical_tests::Bias`] run
//!   on a revision series).

pub mod alignment;
pub mod coefficients;
pub mod regression;
pub mod statistical_tests;
pub mod vintages;
