//! One-shot QAM-over-AWGN simulation
//!
//! Wires the pipeline together for a single run: draw random symbols, map
//! them onto the constellation grid, push them through the AWGN channel,
//! detect, and count errors. The result is a [`SimulationReport`] — plain
//! serializable data for whatever plotting or reporting collaborator sits
//! on top.
//!
//! Every run is independent: no state survives between invocations, and a
//! configured seed reproduces a run exactly (symbols and noise).
//!
//! ## Example
//!
//! ```rust
//! use qamlab_sim::simulator::{run_simulation, SimulationConfig};
//!
//! let config = SimulationConfig {
//!     modulation_order: 16,
//!     num_bits: 2000,
//!     snr_db: 20.0,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let report = run_simulation(&config).unwrap();
//! assert_eq!(report.num_symbols, 500);
//! assert!(report.ber < 0.01);
//! ```

use qamlab_core::{BerCurve, QamError, QamModulation, SymbolErrorTester, SymbolIndex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::channel::{Channel, ChannelConfig, ChannelStats};
use crate::source::SymbolSource;

/// Result type for simulation runs
pub type SimResult<T> = Result<T, SimError>;

/// Errors that can occur while configuring a simulation run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    InvalidConfig(#[from] QamError),

    #[error("bit budget {num_bits} yields zero symbols at {bits_per_symbol} bits/symbol")]
    NoSymbols { num_bits: usize, bits_per_symbol: u32 },
}

/// Simulation configuration
///
/// The three user-facing knobs (modulation order, bit budget, SNR) plus an
/// optional seed for reproducible runs and the waveform truncation length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Modulation order M (power of 4)
    pub modulation_order: usize,
    /// Bit budget; symbol count is `num_bits / log2(M)`, floored
    pub num_bits: usize,
    /// Channel SNR in dB (may be negative)
    pub snr_db: f64,
    /// Master seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Number of noisy I-values kept for the waveform trace
    pub trace_len: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            modulation_order: 16,
            num_bits: 2000,
            snr_db: 20.0,
            seed: None,
            trace_len: 50,
        }
    }
}

/// Result of one simulation run, handed to plotting/report collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Modulation order simulated
    pub modulation_order: usize,
    /// Channel SNR in dB
    pub snr_db: f64,
    /// Number of symbols transmitted
    pub num_symbols: usize,
    /// Noisy in-phase values (parallel to `noisy_q`), for scatter rendering
    pub noisy_i: Vec<f64>,
    /// Noisy quadrature values (parallel to `noisy_i`)
    pub noisy_q: Vec<f64>,
    /// First `trace_len` noisy I-values, for line-plot rendering
    pub waveform: Vec<f64>,
    /// Transmitted symbol indices
    pub tx_indices: Vec<SymbolIndex>,
    /// Detected symbol indices
    pub rx_indices: Vec<SymbolIndex>,
    /// Symbol decisions that differed from the transmitted index
    pub symbol_errors: u64,
    /// Empirical error rate: `symbol_errors / num_symbols`.
    ///
    /// The mapping is not Gray-coded, so this is a symbol-error rate used
    /// as a proxy for bit-error rate — adjacent-point errors can flip more
    /// than one bit.
    pub ber: f64,
    /// Human-readable one-line summary naming M and SNR
    pub summary: String,
    /// Measured channel statistics
    pub stats: ChannelStats,
}

/// Run one simulation: generate → channel → detect → report.
pub fn run_simulation(config: &SimulationConfig) -> SimResult<SimulationReport> {
    let modulation = QamModulation::new(config.modulation_order)?;
    let bits_per_symbol = modulation.bits_per_symbol();
    let num_symbols = config.num_bits / bits_per_symbol as usize;
    if num_symbols == 0 {
        return Err(SimError::NoSymbols {
            num_bits: config.num_bits,
            bits_per_symbol,
        });
    }

    let mut source = match config.seed {
        Some(seed) => SymbolSource::with_seed(&modulation, seed),
        None => SymbolSource::from_entropy(&modulation),
    };
    let noise_seed = source.derive_seed();

    let tx_indices = source.generate(num_symbols);
    let clean = modulation.map_stream(&tx_indices);
    debug!(
        order = config.modulation_order,
        symbols = num_symbols,
        "generated symbol stream"
    );

    let mut channel = Channel::new(ChannelConfig {
        snr_db: config.snr_db,
        noise_seed,
        ..Default::default()
    });
    let noisy = channel.apply(&clean);
    debug!(
        snr_db = config.snr_db,
        noise_std = channel.noise_std(),
        "applied AWGN channel"
    );

    let rx_indices = modulation.detect_stream(&noisy);
    let mut tester = SymbolErrorTester::new();
    tester.update(&tx_indices, &rx_indices);

    let stats = ChannelStats::compute(&clean, &noisy);
    let waveform: Vec<f64> = noisy.iter().take(config.trace_len).map(|s| s.re).collect();
    let summary = format!(
        "{} @ {:.1} dB SNR: BER {:.5} ({} / {} symbols)",
        modulation.name(),
        config.snr_db,
        tester.rate(),
        tester.error_symbols(),
        num_symbols,
    );
    info!("{summary}");

    Ok(SimulationReport {
        modulation_order: config.modulation_order,
        snr_db: config.snr_db,
        num_symbols,
        noisy_i: noisy.iter().map(|s| s.re).collect(),
        noisy_q: noisy.iter().map(|s| s.im).collect(),
        waveform,
        tx_indices,
        rx_indices,
        symbol_errors: tester.error_symbols(),
        ber: tester.rate(),
        summary,
        stats,
    })
}

/// Re-run the simulation across SNR points, collecting a BER curve.
pub fn sweep_snr(config: &SimulationConfig, snrs_db: &[f64]) -> SimResult<BerCurve> {
    let mut curve = BerCurve::new();
    for &snr_db in snrs_db {
        let point_config = SimulationConfig {
            snr_db,
            ..config.clone()
        };
        let report = run_simulation(&point_config)?;
        curve.add_point(
            snr_db,
            report.ber,
            report.num_symbols as u64,
            report.symbol_errors,
        );
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(order: usize, num_bits: usize, snr_db: f64, seed: u64) -> SimulationConfig {
        SimulationConfig {
            modulation_order: order,
            num_bits,
            snr_db,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_16qam_20db() {
        // 2000 bits at 4 bits/symbol → 500 symbols on the {-3,-1,1,3} grid
        let report = run_simulation(&seeded(16, 2000, 20.0, 1)).unwrap();
        assert_eq!(report.num_symbols, 500);
        assert!(report.ber < 0.01, "16-QAM at 20 dB should be near error-free");

        let qam = QamModulation::qam16();
        for &index in &report.tx_indices {
            let point = qam.map(index);
            assert!([-3.0, -1.0, 1.0, 3.0].contains(&point.re));
            assert!([-3.0, -1.0, 1.0, 3.0].contains(&point.im));
        }
    }

    #[test]
    fn test_scenario_4qam_minus5db() {
        let report = run_simulation(&seeded(4, 2000, -5.0, 1)).unwrap();
        assert_eq!(report.num_symbols, 1000);
        assert!(
            report.ber > 0.1,
            "4-QAM at -5 dB should err heavily: got {:.4}",
            report.ber
        );
    }

    #[test]
    fn test_high_snr_is_error_free() {
        let report = run_simulation(&seeded(64, 6000, 60.0, 3)).unwrap();
        assert_eq!(report.symbol_errors, 0);
        assert_eq!(report.ber, 0.0);
        assert_eq!(report.tx_indices, report.rx_indices);
    }

    #[test]
    fn test_ber_monotonic_in_noise() {
        // Statistical property: averaged over seeds, the error rate must not
        // decrease as SNR drops.
        let snrs = [20.0, 10.0, 5.0, 0.0, -5.0];
        let seeds = [1u64, 2, 3];
        let mut rates = Vec::new();
        for &snr_db in &snrs {
            let mut sum = 0.0;
            for &seed in &seeds {
                sum += run_simulation(&seeded(4, 8000, snr_db, seed)).unwrap().ber;
            }
            rates.push(sum / seeds.len() as f64);
        }
        for w in rates.windows(2) {
            assert!(
                w[1] >= w[0] - 0.003,
                "error rate should not decrease with noise: {rates:?}"
            );
        }
    }

    #[test]
    fn test_zero_symbols_rejected() {
        let err = run_simulation(&seeded(16, 3, 20.0, 1)).unwrap_err();
        assert_eq!(
            err,
            SimError::NoSymbols {
                num_bits: 3,
                bits_per_symbol: 4
            }
        );
    }

    #[test]
    fn test_invalid_order_rejected() {
        let err = run_simulation(&seeded(8, 1000, 20.0, 1)).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_deterministic_replay() {
        let config = seeded(16, 4000, 8.0, 99);
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a.tx_indices, b.tx_indices);
        assert_eq!(a.rx_indices, b.rx_indices);
        assert_eq!(a.noisy_i, b.noisy_i);
        assert_eq!(a.noisy_q, b.noisy_q);
        assert_eq!(a.ber, b.ber);
    }

    #[test]
    fn test_report_shape() {
        let report = run_simulation(&seeded(16, 2000, 12.0, 5)).unwrap();
        assert_eq!(report.noisy_i.len(), report.num_symbols);
        assert_eq!(report.noisy_q.len(), report.num_symbols);
        assert_eq!(report.tx_indices.len(), report.num_symbols);
        assert_eq!(report.rx_indices.len(), report.num_symbols);
        // Waveform is the truncated I trace
        assert_eq!(report.waveform.len(), 50);
        assert_eq!(report.waveform[..], report.noisy_i[..50]);
        assert!(report.summary.contains("16-QAM"));
        assert!(report.summary.contains("12.0 dB"));
    }

    #[test]
    fn test_short_run_waveform_not_padded() {
        // 80 bits at 2 bits/symbol → 40 symbols, fewer than trace_len
        let report = run_simulation(&seeded(4, 80, 10.0, 1)).unwrap();
        assert_eq!(report.num_symbols, 40);
        assert_eq!(report.waveform.len(), 40);
    }

    #[test]
    fn test_sweep_snr() {
        let snrs = [0.0, 5.0, 10.0, 15.0];
        let curve = sweep_snr(&seeded(4, 4000, 0.0, 7), &snrs).unwrap();
        assert_eq!(curve.points().len(), 4);
        // Low-SNR end errs more than the high-SNR end
        let first = curve.points().first().unwrap();
        let last = curve.points().last().unwrap();
        assert!(first.rate >= last.rate);
        assert!(curve.to_csv().contains("snr_db"));
    }

    #[test]
    fn test_unseeded_runs_complete() {
        let config = SimulationConfig {
            modulation_order: 4,
            num_bits: 200,
            snr_db: 10.0,
            seed: None,
            ..Default::default()
        };
        let report = run_simulation(&config).unwrap();
        assert_eq!(report.num_symbols, 100);
    }
}
