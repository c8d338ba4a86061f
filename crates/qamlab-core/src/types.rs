//! Core types for QAM signal processing
//!
//! This module defines the fundamental types used throughout the QAMLab
//! library, particularly for representing complex I/Q (In-phase/Quadrature)
//! samples.
//!
//! ## Understanding I/Q Samples
//!
//! A QAM constellation point is a complex number where:
//! - **I (In-phase)**: The real component, aligned with the reference carrier
//! - **Q (Quadrature)**: The imaginary component, 90° out of phase
//!
//! Square M-QAM places its points on a regular grid of odd integers:
//!
//! ```text
//!            Q
//!            ^
//!    ●   ●   │   ●   ●      16-QAM: I, Q ∈ {-3, -1, +1, +3}
//!    ●   ●   │   ●   ●
//!   ─────────┼─────────> I
//!    ●   ●   │   ●   ●
//!    ●   ●   │   ●   ●
//! ```

use num_complex::Complex64;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A single I/Q sample point
pub type IQSample = Complex64;

/// A buffer of I/Q samples
pub type IQBuffer = Vec<IQSample>;

/// A transmitted or detected constellation point index in `[0, M)`.
///
/// Square QAM up to 4096-QAM fits comfortably; the simulator only exposes
/// orders whose index range fits `u16`.
pub type SymbolIndex = u16;

/// Result type for QAM operations
pub type QamResult<T> = Result<T, QamError>;

/// Errors that can occur while configuring or running QAM processing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QamError {
    #[error(
        "invalid modulation order {0}: square QAM requires a power of 4 (4, 16, 64, 256, ...)"
    )]
    InvalidModulationOrder(usize),
}

/// Helper functions for working with complex samples
pub mod complex_ops {
    use super::*;

    /// Compute the power (magnitude squared) of a complex number
    #[inline]
    pub fn power(c: Complex) -> f64 {
        c.norm_sqr()
    }

    /// Compute the average power of a signal
    pub fn average_power(samples: &[IQSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().map(|s| power(*s)).sum::<f64>() / samples.len() as f64
    }
}
