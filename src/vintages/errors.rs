//! vintages::errors — fail-fast parameter errors of the orchestrator.
//!
//! Purpose
//! -------
//! Provide the validation-tier error for the diagnostics families. A
//! [`VintagesError`] aborts the whole family call before any row is
//! computed; per-row estimation failures never appear here — they are
//! recorded in the row's [`RowStatus`](crate::vintages::table::RowStatus)
//! instead.

pub type VintagesResult<T> = Result<T, VintagesError>;

/// VintagesError — structural parameter violations of a family call.
///
/// Variants
/// --------
/// - `InvalidParameter { name, value }`
///   A gap/lag-type parameter violates its `≥ 1` constraint. `name` is
///   the parameter's documented name (`"gap"`, `"nbg"`, `"adfk"`, …).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VintagesError {
    InvalidParameter { name: &'static str, value: usize },
}

impl std::error::Error for VintagesError {}

impl std::fmt::Display for VintagesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VintagesError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter {name} = {value}: must be >= 1.")
            }
        }
    }
}
