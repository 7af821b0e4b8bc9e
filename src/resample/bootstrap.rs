use rand::Rng;

use crate::BaggingError;

/// Row indices of one bootstrap resample, drawn with replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSample {
    indices: Vec<usize>,
}

impl BootstrapSample {
    /// Wrap pre-drawn row indices.
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    /// Selected rows, in draw order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// `true` when nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Nonparametric bootstrap over `n` observations.
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap {
    n: usize,
}

impl Bootstrap {
    /// Bootstrap for a dataset of `n` rows; `n` must be positive.
    pub fn new(n: usize) -> Result<Self, BaggingError> {
        if n == 0 {
            return Err(BaggingError::EmptyDataset);
        }
        Ok(Self { n })
    }

    /// Draw `n` indices uniformly from `0..n`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> BootstrapSample {
        let indices = (0..self.n).map(|_| rng.gen_range(0..self.n)).collect();
        BootstrapSample { indices }
    }

    /// Endless stream of samples sharing one random source.
    pub fn samples<'r, R: Rng + ?Sized>(&self, rng: &'r mut R) -> BootstrapIter<'r, R> {
        BootstrapIter { bootstrap: *self, rng }
    }
}

/// Endless stream of bootstrap samples sharing one random source.
pub struct BootstrapIter<'r, R: ?Sized> {
    bootstrap: Bootstrap,
    rng: &'r mut R,
}

impl<R: Rng + ?Sized> Iterator for BootstrapIter<'_, R> {
    type Item = BootstrapSample;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.bootstrap.draw(&mut *self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn zero_observations_rejected() {
        assert_eq!(Bootstrap::new(0).unwrap_err(), BaggingError::EmptyDataset);
    }

    #[test]
    fn indices_in_range_with_exact_length() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let bootstrap = Bootstrap::new(13).unwrap();

        for sample in bootstrap.samples(&mut rng).take(200) {
            assert_eq!(sample.len(), 13);
            assert!(sample.indices().iter().all(|&i| i < 13));
        }
    }

    #[test]
    fn single_observation_always_index_zero() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let sample = Bootstrap::new(1).unwrap().draw(&mut rng);
        assert_eq!(sample.indices(), [0]);
    }

    #[test]
    fn draws_with_replacement() {
        // With n = 50 a sample without any repeat has probability ~1e-21.
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let sample = Bootstrap::new(50).unwrap().draw(&mut rng);

        let mut sorted = sample.indices().to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert!(sorted.len() < 50);
    }

    #[test]
    fn seeded_streams_are_reproducible() {
        let bootstrap = Bootstrap::new(20).unwrap();
        let a: Vec<_> = bootstrap
            .samples(&mut Xoshiro256PlusPlus::seed_from_u64(11))
            .take(5)
            .collect();
        let b: Vec<_> = bootstrap
            .samples(&mut Xoshiro256PlusPlus::seed_from_u64(11))
            .take(5)
            .collect();
        assert_eq!(a, b);
        assert_ne!(a[0], a[1]);
    }

    #[test]
    fn roughly_uniform() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
        let bootstrap = Bootstrap::new(4).unwrap();
        let mut counts = [0usize; 4];
        for sample in bootstrap.samples(&mut rng).take(10_000) {
            for &i in sample.indices() {
                counts[i] += 1;
            }
        }
        // 40_000 draws, expected 10_000 each; sd = ~87
        assert!(counts.iter().all(|&c| (9_500..=10_500).contains(&c)), "{counts:?}");
    }
}
