//! regression::errors — error types for OLS estimation and diagnostics.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the OLS fitting core
//! and the residual-diagnostics battery. These errors are the per-unit
//! failure currency of the diagnostics orchestrator: a degenerate pair
//! (too few aligned observations, collinear design, perfectly fitted
//! residuals) surfaces here and is caught at the scope of the single
//! output row it belongs to.

pub type OlsResult<T> = Result<T, OlsError>;

/// OlsError — failure conditions of OLS estimation and its diagnostics.
///
/// Variants
/// --------
/// - `IncompatibleLength(expected, actual)`
///   A regressor's length differs from the response's length.
/// - `NoRegressors`
///   The model was requested with an empty regressor set.
/// - `InsufficientData { needed, actual }`
///   Fewer observations than coefficients plus one residual degree of
///   freedom.
/// - `SingularDesign`
///   The normal-equations matrix is not positive definite (collinear or
///   constant regressors).
/// - `ZeroResidualVariance`
///   Residuals have zero variance, so moment-based diagnostics (skewness,
///   kurtosis, Jarque–Bera) are undefined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OlsError {
    IncompatibleLength(usize, usize),
    NoRegressors,
    InsufficientData { needed: usize, actual: usize },
    SingularDesign,
    ZeroResidualVariance,
}

impl std::error::Error for OlsError {}

impl std::fmt::Display for OlsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OlsError::IncompatibleLength(expected, actual) => {
                write!(f, "Incompatible regression lengths: expected {expected}, got {actual}.")
            }
            OlsError::NoRegressors => {
                write!(f, "Regression requires at least one regressor.")
            }
            OlsError::InsufficientData { needed, actual } => {
                write!(f, "Insufficient observations: need at least {needed}, got {actual}.")
            }
            OlsError::SingularDesign => {
                write!(f, "Singular design matrix: regressors are collinear or constant.")
            }
            OlsError::ZeroResidualVariance => {
                write!(f, "Residuals have zero variance; moment diagnostics are undefined.")
            }
        }
    }
}
