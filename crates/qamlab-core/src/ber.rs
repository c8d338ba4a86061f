//! Error-rate accounting and reference curves
//!
//! Measures empirical symbol-error rates from transmitted/detected index
//! streams, and provides the closed-form references a BER-vs-SNR plot is
//! usually drawn against.
//!
//! The simulated mapping is not Gray-coded, so the measured rate is a
//! symbol-error rate standing in for a true bit-error rate. Every API here
//! says "symbol" where it counts symbols; callers that label the figure
//! "BER" inherit that approximation knowingly.
//!
//! ## Example
//!
//! ```rust
//! use qamlab_core::ber::SymbolErrorTester;
//!
//! let mut tester = SymbolErrorTester::new();
//! tester.update(&[0, 1, 2, 3, 0], &[0, 1, 3, 3, 0]);
//! //                      ^ one mismatch
//! assert_eq!(tester.error_symbols(), 1);
//! assert!((tester.rate() - 0.2).abs() < 1e-12);
//! ```

use crate::types::SymbolIndex;
use serde::{Deserialize, Serialize};

/// Per-axis AWGN standard deviation for a target SNR in dB.
///
/// Uses the equal-energy two-dimensional model: `snr_linear = 10^(dB/10)`
/// and `sigma = 1 / sqrt(2 * snr_linear)`, splitting the noise power evenly
/// between the I and Q axes. This is the single noise-scaling authority for
/// the whole workspace — the channel and the theoretical curves both use it.
pub fn awgn_noise_std(snr_db: f64) -> f64 {
    let snr_linear = 10f64.powf(snr_db / 10.0);
    1.0 / (2.0 * snr_linear).sqrt()
}

/// Incremental symbol-error tester.
#[derive(Debug, Clone, Default)]
pub struct SymbolErrorTester {
    total_symbols: u64,
    error_symbols: u64,
}

impl SymbolErrorTester {
    /// Create a new tester with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update with transmitted and detected index streams.
    ///
    /// Streams of unequal length are compared over their common prefix.
    pub fn update(&mut self, tx: &[SymbolIndex], rx: &[SymbolIndex]) {
        let len = tx.len().min(rx.len());
        for i in 0..len {
            if tx[i] != rx[i] {
                self.error_symbols += 1;
            }
        }
        self.total_symbols += len as u64;
    }

    /// Record a single symbol decision directly.
    pub fn record(&mut self, is_error: bool) {
        self.total_symbols += 1;
        if is_error {
            self.error_symbols += 1;
        }
    }

    /// Get the overall error rate (0.0 when nothing was recorded).
    pub fn rate(&self) -> f64 {
        if self.total_symbols == 0 {
            return 0.0;
        }
        self.error_symbols as f64 / self.total_symbols as f64
    }

    /// Get total symbols compared.
    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    /// Get total symbol errors.
    pub fn error_symbols(&self) -> u64 {
        self.error_symbols
    }

    /// Compute confidence interval using normal approximation.
    ///
    /// Returns (lower, upper) rate bounds for the given confidence level.
    pub fn confidence_interval(&self, confidence: f64) -> (f64, f64) {
        if self.total_symbols == 0 {
            return (0.0, 1.0);
        }
        let p = self.rate();
        let n = self.total_symbols as f64;
        let z = Self::z_score(confidence);
        let margin = z * (p * (1.0 - p) / n).sqrt();
        ((p - margin).max(0.0), (p + margin).min(1.0))
    }

    /// Normal distribution z-score approximation.
    fn z_score(confidence: f64) -> f64 {
        match () {
            _ if (confidence - 0.90).abs() < 0.001 => 1.645,
            _ if (confidence - 0.95).abs() < 0.001 => 1.960,
            _ if (confidence - 0.99).abs() < 0.001 => 2.576,
            _ => {
                // Rational approximation for probit function
                let p = (1.0 - confidence) / 2.0;
                let t = (-2.0 * p.ln()).sqrt();
                t - (2.515517 + 0.802853 * t + 0.010328 * t * t)
                    / (1.0 + 1.432788 * t + 0.189269 * t * t + 0.001308 * t * t * t)
            }
        }
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        self.total_symbols = 0;
        self.error_symbols = 0;
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        let (lo, hi) = self.confidence_interval(0.95);
        format!(
            "SER: {:.5} ({} errors / {} symbols) [{:.5}, {:.5}] 95% CI",
            self.rate(),
            self.error_symbols,
            self.total_symbols,
            lo,
            hi,
        )
    }
}

/// Theoretical symbol-error probability of square M-QAM on this channel.
///
/// Exact for the unnormalized odd-integer grid with per-axis noise from
/// [`awgn_noise_std`]: each axis errs with probability
/// `(1 - 1/levels) * erfc(1 / (sigma * sqrt(2)))` (decision thresholds sit
/// one unit from each point), and a symbol survives only if both axes do.
pub fn theoretical_ser(snr_db: f64, levels: usize) -> f64 {
    let sigma = awgn_noise_std(snr_db);
    let p_axis = (1.0 - 1.0 / levels as f64) * erfc(1.0 / (sigma * std::f64::consts::SQRT_2));
    1.0 - (1.0 - p_axis) * (1.0 - p_axis)
}

/// Legacy closed-form estimate: `noise_std / sqrt(M)`.
///
/// An amplitude heuristic, not a detection-based measurement — kept for
/// comparison plots and never used as the reported error rate.
pub fn closed_form_ber_estimate(noise_std: f64, order: usize) -> f64 {
    noise_std / (order as f64).sqrt()
}

/// One measured point of a BER-vs-SNR sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BerPoint {
    /// SNR in dB.
    pub snr_db: f64,
    /// Measured symbol-error rate.
    pub rate: f64,
    /// Number of symbols tested.
    pub symbols: u64,
    /// Number of symbol errors.
    pub errors: u64,
}

/// BER-vs-SNR curve accumulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BerCurve {
    points: Vec<BerPoint>,
}

impl BerCurve {
    /// Create an empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a measurement point.
    pub fn add_point(&mut self, snr_db: f64, rate: f64, symbols: u64, errors: u64) {
        self.points.push(BerPoint {
            snr_db,
            rate,
            symbols,
            errors,
        });
    }

    /// Get all points.
    pub fn points(&self) -> &[BerPoint] {
        &self.points
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("snr_db,rate,symbols,errors\n");
        for p in &self.points {
            csv.push_str(&format!(
                "{:.2},{:.10},{},{}\n",
                p.snr_db, p.rate, p.symbols, p.errors
            ));
        }
        csv
    }
}

/// Complementary error function approximation.
fn erfc(x: f64) -> f64 {
    // Abramowitz & Stegun approximation 7.1.26
    let t = 1.0 / (1.0 + 0.3275911 * x.abs());
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    let result = poly * (-x * x).exp();
    if x >= 0.0 {
        result
    } else {
        2.0 - result
    }
}
