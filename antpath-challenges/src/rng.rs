use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Source of uniform integers used by graph generation and path construction.
///
/// Every [`rand::Rng`] is a `RandomSource`, so seeded `SmallRng`/`StdRng`
/// generators plug in directly. Tests can implement it over a fixed sequence.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]`, both bounds inclusive. Requires `lo <= hi`.
    fn uniform(&mut self, lo: usize, hi: usize) -> usize;

    /// Child generator seeded from two draws of this source.
    fn fork(&mut self) -> SmallRng {
        let high = self.uniform(0, u32::MAX as usize) as u64;
        let low = self.uniform(0, u32::MAX as usize) as u64;
        SmallRng::seed_from_u64((high << 32) | low)
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self, lo: usize, hi: usize) -> usize {
        self.gen_range(lo..=hi)
    }
}
