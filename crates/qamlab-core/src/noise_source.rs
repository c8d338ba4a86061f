//! Seedable Gaussian noise source
//!
//! Produces independent standard-normal samples for AWGN simulation using
//! the Box–Muller transform over a fast xoshiro256** PRNG. Seeding makes
//! every noise realization reproducible, which the simulator relies on for
//! deterministic replays and the test suite relies on for statistical
//! assertions.
//!
//! Each Gaussian draw consumes two fresh uniforms and keeps only the cosine
//! branch of the transform — the simple non-paired variant. The sine branch
//! is discarded, a minor inefficiency that keeps the sampler stateless
//! between calls.
//!
//! ## Example
//!
//! ```rust
//! use qamlab_core::noise_source::NoiseSource;
//!
//! let mut src = NoiseSource::new(42);
//! let samples = src.generate_gaussian(1000);
//! assert_eq!(samples.len(), 1000);
//! assert!(samples.iter().all(|x| x.is_finite()));
//! ```

use crate::types::IQSample;

/// Pseudo-random number generator (xoshiro256**).
#[derive(Debug, Clone)]
struct Rng {
    s: [u64; 4],
}

impl Rng {
    fn new(seed: u64) -> Self {
        // SplitMix64 to expand seed into state
        let mut state = seed;
        let mut s = [0u64; 4];
        for slot in &mut s {
            state = state.wrapping_add(0x9e3779b97f4a7c15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
            *slot = z ^ (z >> 31);
        }
        Self { s }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        let result = (self.s[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.s[1] << 17;
        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];
        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(45);
        result
    }

    /// Uniform f64 in [0, 1).
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Seedable source of uniform and standard-normal samples.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: Rng,
}

impl NoiseSource {
    /// Create a source with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { rng: Rng::new(seed) }
    }

    /// One uniform sample in [0, 1).
    #[inline]
    pub fn next_uniform(&mut self) -> f64 {
        self.rng.next_f64()
    }

    /// One standard-normal sample (mean 0, variance 1) via Box–Muller.
    ///
    /// A uniform draw of zero would put `ln(0)` into the transform, so such
    /// draws are resampled.
    pub fn next_gaussian(&mut self) -> f64 {
        loop {
            let u = self.rng.next_f64();
            let v = self.rng.next_f64();
            if u > 1e-30 {
                return (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos();
            }
        }
    }

    /// Generate a block of standard-normal samples.
    pub fn generate_gaussian(&mut self, num_samples: usize) -> Vec<f64> {
        (0..num_samples).map(|_| self.next_gaussian()).collect()
    }

    /// Generate complex noise samples with independent I/Q components.
    pub fn generate_complex(&mut self, num_samples: usize) -> Vec<IQSample> {
        (0..num_samples)
            .map(|_| {
                let re = self.next_gaussian();
                let im = self.next_gaussian();
                IQSample::new(re, im)
            })
            .collect()
    }
}
