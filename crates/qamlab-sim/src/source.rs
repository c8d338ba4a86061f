//! Random symbol source
//!
//! Draws uniformly distributed symbol indices for a QAM modulation scheme.
//! Backed by a seedable [`StdRng`] so simulation runs can be replayed
//! exactly; unseeded sources pull from OS entropy.

use qamlab_core::{QamModulation, SymbolIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random symbol-index generator for one modulation scheme.
#[derive(Debug)]
pub struct SymbolSource {
    rng: StdRng,
    order: usize,
}

impl SymbolSource {
    /// Create a seeded source (reproducible streams).
    pub fn with_seed(modulation: &QamModulation, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            order: modulation.order(),
        }
    }

    /// Create a source seeded from OS entropy.
    pub fn from_entropy(modulation: &QamModulation) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            order: modulation.order(),
        }
    }

    /// Draw one symbol index, uniform over `[0, M)`.
    #[inline]
    pub fn next_index(&mut self) -> SymbolIndex {
        self.rng.gen_range(0..self.order) as SymbolIndex
    }

    /// Draw a stream of symbol indices.
    pub fn generate(&mut self, num_symbols: usize) -> Vec<SymbolIndex> {
        (0..num_symbols).map(|_| self.next_index()).collect()
    }

    /// Derive a fresh seed from this source's stream.
    ///
    /// Lets the channel's noise seed chain off the master seed: one
    /// configured seed reproduces the whole run, symbols and noise alike.
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_in_range() {
        let qam = QamModulation::qam16();
        let mut source = SymbolSource::with_seed(&qam, 42);
        for index in source.generate(10_000) {
            assert!((index as usize) < 16);
        }
    }

    #[test]
    fn test_seeded_reproducibility() {
        let qam = QamModulation::qam64();
        let mut a = SymbolSource::with_seed(&qam, 7);
        let mut b = SymbolSource::with_seed(&qam, 7);
        assert_eq!(a.generate(1000), b.generate(1000));
        assert_eq!(a.derive_seed(), b.derive_seed());
    }

    #[test]
    fn test_all_symbols_appear() {
        let qam = QamModulation::qam4();
        let mut source = SymbolSource::with_seed(&qam, 42);
        let stream = source.generate(1000);
        for val in 0..4u16 {
            assert!(
                stream.contains(&val),
                "symbol {val} never drawn in 1000 uniform samples"
            );
        }
    }

    #[test]
    fn test_roughly_uniform() {
        let qam = QamModulation::qam4();
        let mut source = SymbolSource::with_seed(&qam, 42);
        let stream = source.generate(40_000);
        for val in 0..4u16 {
            let count = stream.iter().filter(|&&s| s == val).count();
            // Expect ~10000 each; allow generous statistical slack
            assert!(
                (8_500..11_500).contains(&count),
                "symbol {val} drawn {count} times out of 40000"
            );
        }
    }
}
