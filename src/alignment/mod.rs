//! alignment — missing-value treatment for vintage data.
//!
//! Purpose
//! -------
//! Produce consistently shaped, NaN-free inputs for downstream statistics.
//! Missing observations in a vintage matrix are encoded as non-finite
//! values; this subtree deletes or replaces them while preserving the
//! element-by-element alignment between series.
//!
//! Key behaviors
//! -------------
//! - Pairwise listwise deletion ([`clean_pair`]): keep a row only where
//!   both sequences are finite.
//! - Single-series deletion ([`clean_single`]): keep the finite
//!   subsequence of one series.
//! - Row-wise deletion ([`clean_rowwise`]): keep a matrix row only if
//!   every column is finite at that row.
//! - Shape-preserving fill ([`fill_missing`]): replace non-finite cells by
//!   a supplied value without dropping rows.
//!
//! Invariants & assumptions
//! ------------------------
//! - Relative row order is always preserved; zero surviving rows is a
//!   valid outcome, never an error.
//! - Structural violations (mismatched lengths, empty inputs) fail fast
//!   with [`CleanError`] before any row is inspected; there is no silent
//!   recovery inside this subtree.
//! - All outputs are freshly allocated; inputs are never mutated.
//!
//! Downstream usage
//! ----------------
//! - The diagnostics orchestrator in [`crate::vintages`] applies these
//!   routines to the relevant column(s) immediately before invoking an
//!   estimator, so estimators never receive non-finite inputs.

pub mod clean;
pub mod errors;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::clean::{clean_pair, clean_rowwise, clean_single, fill_missing};
pub use self::errors::{CleanError, CleanResult};
