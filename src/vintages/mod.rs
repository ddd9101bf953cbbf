//! vintages — diagnostics orchestration over vintage matrices.
//!
//! Purpose
//! -------
//! Expose the per-family diagnostics entry points computed over a
//! vintage matrix (rows = aligned time periods, columns = successive
//! vintages or revisions, missing cells non-finite), together with the
//! fixed-shape result table and its per-row status channel.
//!
//! Key behaviors
//! -------------
//! - Thirteen family functions (`theil`, `theil2`, `slope_and_drift`,
//!   `auto_correlation`, `cointegration`, `vecm`, `unit_root`,
//!   `efficiency_model1`, `efficiency_model2`, `orthogonality_model1`,
//!   `orthogonality_model2`, `bias`, `signal_noise`) sharing one
//!   contract: parameters are validated fail-fast, a zero evaluable
//!   count is an explicit `None` outcome, and per-row estimation
//!   failures are recorded in [`RowStatus`] while the row keeps its
//!   all-NaN default.
//! - Fixed-offset row schemas per family (see the `rows` serializers);
//!   row count and position are stable and index-addressable even under
//!   partial failure.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input matrix is immutable during a family call; every evaluated
//!   pair/lag/column reads only from it and writes only its own
//!   pre-allocated row.
//! - A family call either returns a fully-shaped table (possibly with
//!   failed rows) or a [`VintagesError`] with no output; there is no
//!   third state.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use ndarray::array;
//!   use revision_diagnostics::vintages;
//!
//!   let matrix = array![[1.0, 1.1], [2.0, 2.1], [3.0, 3.2], [4.0, 4.1]];
//!   let theil = vintages::theil(matrix.view(), 1)?;
//!   assert!(theil.is_some());
//!   # Ok::<(), revision_diagnostics::vintages::VintagesError>(())
//!   ```
//!
//! - Host surfaces (CLI, language bindings) are expected to marshal a
//!   vintage matrix in and render the numeric table out; the status
//!   channel distinguishes defaulted rows from computed zeros.

pub mod errors;
pub mod families;
pub(crate) mod rows;
pub mod table;
pub(crate) mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{VintagesError, VintagesResult};
pub use self::families::{
    auto_correlation, bias, cointegration, efficiency_model1, efficiency_model2,
    orthogonality_model1, orthogonality_model2, signal_noise, slope_and_drift, theil, theil2,
    unit_root, vecm,
};
pub use self::table::{DiagnosticsTable, RowStatus};
