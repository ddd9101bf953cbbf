//! vintages::rows — fixed-offset row serializers.
//!
//! Purpose
//! -------
//! Map each test suite's structured outcome onto the flat ordered field
//! sequence of its output row. One writer per family shape; every writer
//! starts at offset 0 and emits fields in the documented, invariant
//! order, so positional consumers can index rows by offset.
//!
//! Conventions
//! -----------
//! - Writers are side-effect-free beyond the row write and write each
//!   slot exactly once, in order.
//! - The OLS writer emits `16 + 3·k` fields for `k` coefficients:
//!   n, R², F; per-coefficient (estimate, stdev, p-value); then skewness,
//!   kurtosis, Jarque–Bera (statistic, p), Breusch–Pagan (pseudo-R²,
//!   statistic, p), White (pseudo-R², statistic, p), ARCH (pseudo-R²,
//!   statistic, p).
use ndarray::ArrayViewMut1;

use crate::regression::ols::OlsTests;
use crate::statistical_tests::autocorrelation::AutoCorrelationTests;
use crate::statistical_tests::bias::Bias;
use crate::statistical_tests::signal_noise::SignalNoise;
use crate::statistical_tests::unit_root::{UnitRoot, UrTest};

/// Sequential writer over one mutable result row.
pub(crate) struct RowCursor<'a> {
    row: ArrayViewMut1<'a, f64>,
    pos: usize,
}

impl<'a> RowCursor<'a> {
    pub(crate) fn new(row: ArrayViewMut1<'a, f64>) -> Self {
        RowCursor { row, pos: 0 }
    }

    /// Write `value` at the current offset and advance.
    pub(crate) fn set_and_next(&mut self, value: f64) {
        self.row[self.pos] = value;
        self.pos += 1;
    }
}

/// Serialize one OLS battery outcome: header, coefficient triples,
/// residual diagnostics.
pub(crate) fn write_ols_row(cursor: &mut RowCursor<'_>, test: &OlsTests) {
    cursor.set_and_next(test.n() as f64);
    cursor.set_and_next(test.r2());
    cursor.set_and_next(test.f());
    for c in test.coefficients() {
        cursor.set_and_next(c.estimate);
        cursor.set_and_next(c.stdev);
        cursor.set_and_next(c.pvalue);
    }
    let d = test.diagnostics();
    cursor.set_and_next(d.skewness);
    cursor.set_and_next(d.kurtosis);
    cursor.set_and_next(d.jarque_bera.value);
    cursor.set_and_next(d.jarque_bera.pvalue);
    cursor.set_and_next(d.bpr2);
    cursor.set_and_next(d.breusch_pagan.value);
    cursor.set_and_next(d.breusch_pagan.pvalue);
    cursor.set_and_next(d.wr2);
    cursor.set_and_next(d.white.value);
    cursor.set_and_next(d.white.pvalue);
    cursor.set_and_next(d.archr2);
    cursor.set_and_next(d.arch.value);
    cursor.set_and_next(d.arch.pvalue);
}

/// Serialize one autocorrelation outcome: bgr2, BG, LB.
pub(crate) fn write_ac_row(cursor: &mut RowCursor<'_>, test: &AutoCorrelationTests) {
    cursor.set_and_next(test.bgr2());
    cursor.set_and_next(test.breusch_godfrey().value);
    cursor.set_and_next(test.breusch_godfrey().pvalue);
    cursor.set_and_next(test.ljung_box().value);
    cursor.set_and_next(test.ljung_box().pvalue);
}

/// Serialize one unit-root battery outcome: four blocks of four fields.
pub(crate) fn write_unit_root_row(cursor: &mut RowCursor<'_>, ur: &UnitRoot) {
    for test in
        [ur.dickey_fuller(), ur.augmented_dickey_fuller(), ur.dickey_fuller_trend(), ur.philips_perron()]
    {
        write_ur_test(cursor, test);
    }
}

fn write_ur_test(cursor: &mut RowCursor<'_>, test: UrTest) {
    cursor.set_and_next(test.value);
    cursor.set_and_next(test.stdev);
    cursor.set_and_next(test.statistic);
    cursor.set_and_next(test.pvalue);
}

/// Serialize one bias outcome: nine fields.
pub(crate) fn write_bias_row(cursor: &mut RowCursor<'_>, bias: &Bias) {
    cursor.set_and_next(bias.n() as f64);
    cursor.set_and_next(bias.mu());
    cursor.set_and_next(bias.sigma());
    cursor.set_and_next(bias.t());
    cursor.set_and_next(bias.t_pvalue());
    cursor.set_and_next(bias.ar());
    cursor.set_and_next(bias.adjusted_sigma());
    cursor.set_and_next(bias.adjusted_t());
    cursor.set_and_next(bias.adjusted_t_pvalue());
}

/// Serialize one signal/noise outcome: six fields.
pub(crate) fn write_signal_noise_row(cursor: &mut RowCursor<'_>, sn: &SignalNoise) {
    cursor.set_and_next(sn.news_r2());
    cursor.set_and_next(sn.news_f());
    cursor.set_and_next(sn.news_pvalue());
    cursor.set_and_next(sn.noise_r2());
    cursor.set_and_next(sn.noise_f());
    cursor.set_and_next(sn.noise_pvalue());
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;

    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify that the cursor writes sequentially from offset 0 and
    // leaves untouched slots at their prior value.
    //
    // Given
    // -----
    // - A NaN-filled row of width 4; two writes.
    //
    // Expect
    // ------
    // - Slots 0 and 1 hold the written values; slots 2 and 3 stay NaN.
    fn row_cursor_writes_sequentially_from_offset_zero() {
        // Arrange
        let mut row = Array1::from_elem(4, f64::NAN);

        // Act
        let mut cursor = RowCursor::new(row.view_mut());
        cursor.set_and_next(1.5);
        cursor.set_and_next(-2.5);

        // Assert
        assert_eq!(row[0], 1.5);
        assert_eq!(row[1], -2.5);
        assert!(row[2].is_nan() && row[3].is_nan());
    }
}
