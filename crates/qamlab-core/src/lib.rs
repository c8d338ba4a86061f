//! # QAMLab Core DSP Library
//!
//! This crate provides the core signal-processing pieces for simulating
//! square M-QAM (Quadrature Amplitude Modulation) transmission:
//!
//! - **Constellation mapping**: symbol indices to/from points on the
//!   odd-integer I/Q grid
//! - **Nearest-neighbor detection**: recover indices from noisy samples,
//!   clamping at constellation edges
//! - **Gaussian noise source**: seedable Box–Muller sampler for AWGN
//! - **Error accounting**: empirical symbol-error rates plus theoretical
//!   and closed-form reference curves
//!
//! ## Signal Flow
//!
//! ```text
//! TX: random indices → QamModulation::map → I/Q samples
//! RX: noisy I/Q → QamModulation::detect → indices → SymbolErrorTester
//! ```
//!
//! The crate is deliberately front-end free: everything here is plain data
//! and pure computation, driven by the `qamlab-sim` crate (or any other
//! caller) and handed onward to plotting collaborators.
//!
//! ## Example
//!
//! ```rust
//! use qamlab_core::{ber::SymbolErrorTester, noise_source::NoiseSource, qam::QamModulation};
//!
//! let qam = QamModulation::new(16).unwrap();
//! let mut noise = NoiseSource::new(42);
//! let mut tester = SymbolErrorTester::new();
//!
//! for val in 0..16u16 {
//!     let clean = qam.map(val);
//!     let noisy = clean + 0.05 * qamlab_core::types::Complex::new(
//!         noise.next_gaussian(),
//!         noise.next_gaussian(),
//!     );
//!     tester.record(qam.detect(noisy) != val);
//! }
//! assert_eq!(tester.error_symbols(), 0);
//! ```

pub mod ber;
pub mod noise_source;
pub mod qam;
pub mod types;

pub use ber::{awgn_noise_std, BerCurve, BerPoint, SymbolErrorTester};
pub use noise_source::NoiseSource;
pub use qam::QamModulation;
pub use types::{Complex, IQBuffer, IQSample, QamError, QamResult, SymbolIndex};
