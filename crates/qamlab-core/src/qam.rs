//! Square M-QAM mapping and nearest-neighbor detection
//!
//! QAM (Quadrature Amplitude Modulation) encodes data as points in the 2D
//! amplitude plane. This module implements the square-grid variant used by
//! the simulator: constellation coordinates are the `levels` equally spaced
//! odd integers per axis, where `levels = sqrt(M)`.
//!
//! ## Mapping
//!
//! A symbol index `val` in `[0, M)` maps to:
//!
//! ```text
//! I = 2 * (val % levels) - (levels - 1)
//! Q = 2 * (val / levels) - (levels - 1)
//! ```
//!
//! The mapping is deliberately not Gray-coded: it reproduces the plain
//! index-to-grid layout of the simulated system, so adjacent points can
//! differ in more than one bit. Error rates derived from index comparisons
//! are therefore symbol-error rates, not true bit-error rates.
//!
//! ## Detection
//!
//! Detection inverts the mapping by rounding each noisy coordinate to the
//! nearest level. Coordinates pushed past the outermost level by noise clamp
//! to the constellation edge — the true nearest neighbor there — so edge
//! noise degrades into symbol errors instead of panics.
//!
//! ## Example
//!
//! ```rust
//! use qamlab_core::qam::QamModulation;
//!
//! let qam = QamModulation::new(16).unwrap();
//! assert_eq!(qam.levels(), 4);
//! assert_eq!(qam.bits_per_symbol(), 4);
//! for val in 0..16u16 {
//!     assert_eq!(qam.detect(qam.map(val)), val);
//! }
//! ```

use crate::types::{Complex, IQSample, QamError, QamResult, SymbolIndex};

/// Square M-QAM modulation scheme.
///
/// Holds the validated order and derived grid geometry. Construction fails
/// for any order that is not a power of 4, so every instance satisfies
/// `levels = sqrt(order)` with `levels >= 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QamModulation {
    /// Modulation order M (4, 16, 64, 256, ...)
    order: usize,
    /// Amplitude levels per axis, `sqrt(order)`
    levels: usize,
}

impl QamModulation {
    /// Create a modulation scheme of the given order.
    ///
    /// The order must be a power of 4 no larger than 65536 so that the grid
    /// is square and symbol indices fit [`SymbolIndex`].
    pub fn new(order: usize) -> QamResult<Self> {
        let is_power_of_four =
            order >= 4 && order.is_power_of_two() && order.trailing_zeros() % 2 == 0;
        if !is_power_of_four || order > (1 << 16) {
            return Err(QamError::InvalidModulationOrder(order));
        }
        let levels = 1usize << (order.trailing_zeros() / 2);
        Ok(Self { order, levels })
    }

    /// Create 4-QAM (QPSK-equivalent grid)
    pub fn qam4() -> Self {
        Self { order: 4, levels: 2 }
    }

    /// Create 16-QAM
    pub fn qam16() -> Self {
        Self { order: 16, levels: 4 }
    }

    /// Create 64-QAM
    pub fn qam64() -> Self {
        Self { order: 64, levels: 8 }
    }

    /// Create 256-QAM
    pub fn qam256() -> Self {
        Self { order: 256, levels: 16 }
    }

    /// Modulation order M
    pub fn order(&self) -> usize {
        self.order
    }

    /// Amplitude levels per axis (`sqrt(M)`)
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Bits carried per symbol (`log2(M)`)
    pub fn bits_per_symbol(&self) -> u32 {
        self.order.trailing_zeros()
    }

    /// Display name, e.g. "16-QAM"
    pub fn name(&self) -> String {
        format!("{}-QAM", self.order)
    }

    /// Map a symbol index to its constellation point.
    ///
    /// Indices at or above the order wrap, matching the defensive modulo the
    /// rest of the pipeline relies on for untrusted input.
    pub fn map(&self, index: SymbolIndex) -> IQSample {
        let val = index as usize % self.order;
        let i = 2.0 * (val % self.levels) as f64 - (self.levels - 1) as f64;
        let q = 2.0 * (val / self.levels) as f64 - (self.levels - 1) as f64;
        Complex::new(i, q)
    }

    /// Map a stream of symbol indices to constellation points.
    pub fn map_stream(&self, indices: &[SymbolIndex]) -> Vec<IQSample> {
        indices.iter().map(|&v| self.map(v)).collect()
    }

    /// Detect the nearest constellation point for a (possibly noisy) sample.
    pub fn detect(&self, sample: IQSample) -> SymbolIndex {
        let col = self.axis_index(sample.re);
        let row = self.axis_index(sample.im);
        (row * self.levels + col) as SymbolIndex
    }

    /// Detect a stream of noisy samples.
    pub fn detect_stream(&self, samples: &[IQSample]) -> Vec<SymbolIndex> {
        samples.iter().map(|&s| self.detect(s)).collect()
    }

    /// Nearest level index along one axis, clamped to the grid.
    fn axis_index(&self, coord: f64) -> usize {
        let max = (self.levels - 1) as f64;
        let raw = ((coord + max) / 2.0).round();
        raw.clamp(0.0, max) as usize
    }

    /// All constellation points in index order, for plotting collaborators.
    pub fn points(&self) -> Vec<IQSample> {
        (0..self.order as u32)
            .map(|v| self.map(v as SymbolIndex))
            .collect()
    }

    /// Average symbol energy of the unnormalized grid: `2 (M - 1) / 3`.
    pub fn average_energy(&self) -> f64 {
        2.0 * (self.order as f64 - 1.0) / 3.0
    }

    /// Get required SNR for this QAM order (approximate)
    pub fn required_snr_db(&self) -> f64 {
        match self.order {
            4 => 10.0,
            16 => 17.0,
            64 => 23.0,
            256 => 30.0,
            _ => 10.0 * (self.order as f64).log2(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_orders() {
        for order in [4usize, 16, 64, 256, 1024, 4096] {
            let qam = QamModulation::new(order).unwrap();
            assert_eq!(qam.levels() * qam.levels(), order);
            assert!(qam.levels() >= 2);
        }
    }

    #[test]
    fn test_invalid_orders() {
        for order in [0usize, 1, 2, 8, 32, 36, 100, 128, 1 << 18] {
            assert_eq!(
                QamModulation::new(order),
                Err(QamError::InvalidModulationOrder(order)),
                "order {order} should be rejected"
            );
        }
    }

    #[test]
    fn test_bits_per_symbol() {
        assert_eq!(QamModulation::qam4().bits_per_symbol(), 2);
        assert_eq!(QamModulation::qam16().bits_per_symbol(), 4);
        assert_eq!(QamModulation::qam64().bits_per_symbol(), 6);
        assert_eq!(QamModulation::qam256().bits_per_symbol(), 8);
    }

    #[test]
    fn test_coordinates_are_odd_grid() {
        let qam = QamModulation::qam16();
        for point in qam.points() {
            for coord in [point.re, point.im] {
                assert!(
                    [-3.0, -1.0, 1.0, 3.0].contains(&coord),
                    "16-QAM coordinate {coord} outside the odd-integer grid"
                );
            }
        }
    }

    #[test]
    fn test_roundtrip_all_orders() {
        for order in [4usize, 16, 64, 256] {
            let qam = QamModulation::new(order).unwrap();
            for val in 0..order as u16 {
                assert_eq!(qam.detect(qam.map(val)), val, "{order}-QAM index {val}");
            }
        }
    }

    #[test]
    fn test_detect_clamps_outside_grid() {
        let qam = QamModulation::qam16();
        // Far beyond the +3/+3 corner: nearest neighbor is the corner itself
        let corner = qam.detect(Complex::new(100.0, 100.0));
        assert_eq!(qam.map(corner), Complex::new(3.0, 3.0));
        // And the opposite corner
        let corner = qam.detect(Complex::new(-100.0, -100.0));
        assert_eq!(qam.map(corner), Complex::new(-3.0, -3.0));
    }

    #[test]
    fn test_detect_small_perturbation() {
        let qam = QamModulation::qam64();
        for val in 0..64u16 {
            let noisy = qam.map(val) + Complex::new(0.3, -0.4);
            assert_eq!(qam.detect(noisy), val);
        }
    }

    #[test]
    fn test_map_wraps_out_of_range_index() {
        let qam = QamModulation::qam4();
        assert_eq!(qam.map(5), qam.map(1));
    }

    #[test]
    fn test_average_energy() {
        // 4-QAM: all points at (±1, ±1), energy 2
        assert!((QamModulation::qam4().average_energy() - 2.0).abs() < 1e-12);
        // 16-QAM: classic Es = 10
        assert!((QamModulation::qam16().average_energy() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_name() {
        assert_eq!(QamModulation::qam16().name(), "16-QAM");
    }
}
