//! statistical_tests::errors — shared error types for the test suites.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the autocorrelation,
//! unit-root, cointegration, Johansen, bias, and signal/noise suites.
//! This is the single per-unit failure type the diagnostics orchestrator
//! records in a row's status when one pair/lag/column cannot be computed.
//!
//! Key behaviors
//! -------------
//! - Wrap the estimator-layer errors ([`OlsError`]) and the alignment /
//!   coefficient errors ([`CleanError`], [`CoefficientError`]) via `From`
//!   implementations so `?` composes across subtrees.
//! - Add the suite-specific conditions: invalid lag counts, rank
//!   hypotheses beyond the available eigenvalues, zero-variance series,
//!   and non-positive-definite moment matrices.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints; wrapped errors
//!   reuse their own `Display` output verbatim.

use crate::alignment::errors::CleanError;
use crate::coefficients::errors::CoefficientError;
use crate::regression::errors::OlsError;

pub type StatTestResult<T> = Result<T, StatTestError>;

/// StatTestError — failure conditions across the statistical test suites.
///
/// Variants
/// --------
/// - `Ols(OlsError)`
///   A main or auxiliary regression failed.
/// - `Clean(CleanError)`
///   An alignment precondition was violated.
/// - `Coefficient(CoefficientError)`
///   A coefficient-primitive precondition was violated.
/// - `InsufficientData { needed, actual }`
///   The series is too short for the requested statistic.
/// - `InvalidLagCount(usize)`
///   A lag count parameter violates `lag ≥ 1` or exceeds the sample.
/// - `InvalidRank { rank, available }`
///   A Johansen rank hypothesis beyond the available eigenvalue count.
/// - `ZeroVariance`
///   A variance or long-run variance needed in a denominator is zero.
/// - `SingularMoments`
///   A Johansen moment matrix has no Cholesky factorization.
/// - `InvalidModel(String)`
///   An error-correction model name that is not one of `none`, `const`,
///   `trend`.
#[derive(Debug, Clone, PartialEq)]
pub enum StatTestError {
    Ols(OlsError),
    Clean(CleanError),
    Coefficient(CoefficientError),
    InsufficientData { needed: usize, actual: usize },
    InvalidLagCount(usize),
    InvalidRank { rank: usize, available: usize },
    ZeroVariance,
    SingularMoments,
    InvalidModel(String),
}

impl std::error::Error for StatTestError {}

impl std::fmt::Display for StatTestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatTestError::Ols(err) => write!(f, "{err}"),
            StatTestError::Clean(err) => write!(f, "{err}"),
            StatTestError::Coefficient(err) => write!(f, "{err}"),
            StatTestError::InsufficientData { needed, actual } => {
                write!(f, "Insufficient observations: need at least {needed}, got {actual}.")
            }
            StatTestError::InvalidLagCount(lag) => {
                write!(f, "Invalid lag count: {lag}. Must be >= 1 and fit within the sample.")
            }
            StatTestError::InvalidRank { rank, available } => {
                write!(f, "Invalid rank hypothesis {rank}: only {available} eigenvalues available.")
            }
            StatTestError::ZeroVariance => {
                write!(f, "Zero variance encountered; statistic is undefined.")
            }
            StatTestError::SingularMoments => {
                write!(f, "Moment matrix is not positive definite.")
            }
            StatTestError::InvalidModel(name) => {
                write!(
                    f,
                    "Invalid error-correction model {name:?} (expected 'none', 'const', or 'trend')."
                )
            }
        }
    }
}

impl From<OlsError> for StatTestError {
    fn from(err: OlsError) -> Self {
        StatTestError::Ols(err)
    }
}

impl From<CleanError> for StatTestError {
    fn from(err: CleanError) -> Self {
        StatTestError::Clean(err)
    }
}

impl From<CoefficientError> for StatTestError {
    fn from(err: CoefficientError) -> Self {
        StatTestError::Coefficient(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` output for suite-specific variants.
    // - Transparent message forwarding for wrapped subtree errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `InvalidRank` embeds both the hypothesis and the
    // available eigenvalue count.
    //
    // Given
    // -----
    // - An `InvalidRank { rank: 3, available: 2 }` value.
    //
    // Expect
    // ------
    // - `format!("{err}")` contains "3" and "2".
    fn stat_test_error_invalid_rank_includes_payload_in_display() {
        // Arrange
        let err = StatTestError::InvalidRank { rank: 3, available: 2 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('3') && msg.contains('2'), "Display should embed payload: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that a wrapped `OlsError` forwards its own message.
    //
    // Given
    // -----
    // - `StatTestError::from(OlsError::SingularDesign)`.
    //
    // Expect
    // ------
    // - The message mentions the singular design.
    fn stat_test_error_wrapped_ols_error_forwards_message() {
        // Arrange
        let err = StatTestError::from(OlsError::SingularDesign);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.to_lowercase().contains("singular"), "got: {msg}");
    }
}
