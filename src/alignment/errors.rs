//! alignment::errors — shared error types for missing-value treatment.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the alignment engine
//! (pairwise, single-series, and row-wise listwise deletion). Structural
//! precondition violations are reported here; a cleaning operation that
//! simply keeps zero rows is a valid outcome and never an error.
//!
//! Key behaviors
//! -------------
//! - Define [`CleanResult`] and [`CleanError`] as the canonical result and
//!   error types for the `alignment` subtree.
//! - Attach human-readable `Display` messages to each variant so that
//!   diagnostics are meaningful without additional context.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "sequences must have equal length") rather than low-level details.
//! - Downstream subtrees (`coefficients`, `regression`, `vintages`) wrap
//!   [`CleanError`] in their own error enums via `From` implementations
//!   rather than re-validating inputs.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (the offending lengths).

pub type CleanResult<T> = Result<T, CleanError>;

/// CleanError — precondition failures of the alignment engine.
///
/// Variants
/// --------
/// - `IncompatibleLength(expected, actual)`
///   Two sequences that must be aligned element-by-element have different
///   lengths.
/// - `EmptyInput`
///   A sequence with zero elements was supplied where at least one element
///   is required before cleaning can be attempted.
///
/// Invariants
/// ----------
/// - Variants carry just enough information (the offending lengths) for
///   logging and debugging without holding on to the data itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanError {
    IncompatibleLength(usize, usize),
    EmptyInput,
}

impl std::error::Error for CleanError {}

impl std::fmt::Display for CleanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CleanError::IncompatibleLength(expected, actual) => {
                write!(f, "Incompatible sequence lengths: expected {expected}, got {actual}.")
            }
            CleanError::EmptyInput => {
                write!(f, "Input sequence is empty. At least one observation is required.")
            }
        }
    }
}
