//! vintages::validation — shared parameter guards for the families.
//!
//! Purpose
//! -------
//! Centralize the `≥ 1` check every gap/lag-type parameter must pass
//! before a family computes anything. Keeping the check in one place
//! keeps error payloads consistent across the thirteen family entry
//! points.

use crate::vintages::errors::{VintagesError, VintagesResult};

/// Require a gap/lag-type parameter to be at least 1.
///
/// Parameters
/// ----------
/// - `name`: `&'static str`
///   Documented parameter name, embedded in the error payload.
/// - `value`: `usize`
///   Supplied value.
///
/// Errors
/// ------
/// - `VintagesError::InvalidParameter` when `value == 0`.
pub(crate) fn validate_positive(name: &'static str, value: usize) -> VintagesResult<()> {
    if value == 0 {
        return Err(VintagesError::InvalidParameter { name, value });
    }
    Ok(())
}
