//! AWGN channel model
//!
//! Applies additive white Gaussian noise to I/Q samples at a configured
//! SNR. Real channels add more impairments (fading, frequency offset,
//! multipath); this simulator models thermal noise only, the dominant
//! effect for a one-shot constellation demo.
//!
//! The per-axis noise standard deviation comes from
//! [`qamlab_core::awgn_noise_std`]: `sigma = 1 / sqrt(2 * 10^(snr_db/10))`,
//! splitting the noise power evenly between I and Q. Noise samples are
//! drawn from the core Box–Muller [`NoiseSource`], seeded via the config,
//! so a channel is deterministic for a fixed `noise_seed`.
//!
//! ## Usage
//!
//! ```rust
//! use qamlab_sim::channel::{Channel, ChannelConfig};
//! use qamlab_core::types::Complex;
//!
//! let clean = vec![Complex::new(1.0, 0.0); 100];
//! let mut channel = Channel::new(ChannelConfig::with_snr(10.0));
//! let noisy = channel.apply(&clean);
//! assert_eq!(noisy.len(), 100);
//! ```

use qamlab_core::{awgn_noise_std, IQSample, NoiseSource};
use serde::{Deserialize, Serialize};

/// Channel model type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelModel {
    /// Perfect channel (no impairments)
    Ideal,
    /// Additive White Gaussian Noise only
    Awgn,
}

impl Default for ChannelModel {
    fn default() -> Self {
        Self::Awgn
    }
}

/// Channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel model to use
    pub model: ChannelModel,
    /// Target SNR in dB (may be negative)
    pub snr_db: f64,
    /// Seed for the noise generator
    pub noise_seed: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            model: ChannelModel::Awgn,
            snr_db: 20.0,
            noise_seed: 42,
        }
    }
}

impl ChannelConfig {
    /// Create an AWGN channel config at the given SNR
    pub fn with_snr(snr_db: f64) -> Self {
        Self {
            snr_db,
            ..Default::default()
        }
    }

    /// Create an ideal (noiseless) channel config
    pub fn ideal() -> Self {
        Self {
            model: ChannelModel::Ideal,
            ..Default::default()
        }
    }
}

/// Channel simulator
#[derive(Debug, Clone)]
pub struct Channel {
    config: ChannelConfig,
    noise: NoiseSource,
    /// Per-axis noise standard deviation derived from the configured SNR
    noise_std: f64,
}

impl Channel {
    /// Create a new channel with the given configuration
    pub fn new(config: ChannelConfig) -> Self {
        let noise_std = match config.model {
            ChannelModel::Ideal => 0.0,
            ChannelModel::Awgn => awgn_noise_std(config.snr_db),
        };
        Self {
            noise: NoiseSource::new(config.noise_seed),
            noise_std,
            config,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Per-axis noise standard deviation
    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Rewind the noise generator to its seeded state
    pub fn reset(&mut self) {
        self.noise = NoiseSource::new(self.config.noise_seed);
    }

    /// Apply channel effects to samples
    pub fn apply(&mut self, samples: &[IQSample]) -> Vec<IQSample> {
        match self.config.model {
            ChannelModel::Ideal => samples.to_vec(),
            ChannelModel::Awgn => self.apply_awgn(samples),
        }
    }

    /// Add independent Gaussian noise to each axis of each sample
    fn apply_awgn(&mut self, samples: &[IQSample]) -> Vec<IQSample> {
        samples
            .iter()
            .map(|&s| {
                s + IQSample::new(
                    self.noise_std * self.noise.next_gaussian(),
                    self.noise_std * self.noise.next_gaussian(),
                )
            })
            .collect()
    }
}

/// Channel statistics for report enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelStats {
    /// Mean signal power
    pub signal_power: f64,
    /// Mean noise power
    pub noise_power: f64,
    /// Measured SNR in dB
    pub measured_snr_db: f64,
    /// Peak to average power ratio
    pub papr_db: f64,
}

impl ChannelStats {
    /// Compute statistics from clean/noisy sample pairs
    pub fn compute(clean: &[IQSample], noisy: &[IQSample]) -> Self {
        if clean.is_empty() || noisy.is_empty() {
            return Self {
                signal_power: 0.0,
                noise_power: 0.0,
                measured_snr_db: 0.0,
                papr_db: 0.0,
            };
        }

        let signal_power: f64 =
            clean.iter().map(|s| s.norm_sqr()).sum::<f64>() / clean.len() as f64;

        // Estimate noise by differencing
        let noise_power: f64 = clean
            .iter()
            .zip(noisy.iter())
            .map(|(c, n)| (n - c).norm_sqr())
            .sum::<f64>()
            / clean.len() as f64;

        let measured_snr_db = 10.0 * (signal_power / noise_power).log10();

        let peak_power = noisy.iter().map(|s| s.norm_sqr()).fold(0.0_f64, f64::max);
        let avg_power: f64 = noisy.iter().map(|s| s.norm_sqr()).sum::<f64>() / noisy.len() as f64;
        let papr_db = 10.0 * (peak_power / avg_power).log10();

        Self {
            signal_power,
            noise_power,
            measured_snr_db,
            papr_db,
        }
    }
}
