// Winner selection randomness. None of these sources are verifiable;
// provable fairness needs an external VRF and is out of scope.
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// Source of uniform index draws used by the draw service
pub trait RandomSource: Send + Sync {
    /// Uniform index in `[0, len)`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Thread-local OS-seeded generator, the default for live draws
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible generator for tests and replays
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable generator state
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(0..len)
    }
}
