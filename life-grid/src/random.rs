use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible stream, for `--seed` and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_stream() {
        let mut a = Random::from_seed(7);
        let mut b = Random::from_seed(7);
        let a_bits: Vec<bool> = (0..64).map(|_| a.next_bool(0.5)).collect();
        let b_bits: Vec<bool> = (0..64).map(|_| b.next_bool(0.5)).collect();
        assert_eq!(a_bits, b_bits);
    }

    #[test]
    fn certain_probabilities() {
        let mut rand = Random::from_seed(1);
        assert!((0..32).all(|_| rand.next_bool(1.0)));
        assert!((0..32).all(|_| !rand.next_bool(0.0)));
    }
}
