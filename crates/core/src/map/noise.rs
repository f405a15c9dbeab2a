use noise::{NoiseFn, OpenSimplex};
use std::fmt::{self, Debug};

/// A 2D coherent noise function. Outputs should be in the range `[-1, 1]`,
/// and nearby inputs should give nearby outputs.
///
/// Any `Fn(f64, f64) -> f64` is a noise source, which is handy for feeding
/// hand-picked values through the generator.
pub trait NoiseSource {
    fn eval(&self, x: f64, y: f64) -> f64;
}

impl<F: Fn(f64, f64) -> f64> NoiseSource for F {
    fn eval(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// OpenSimplex noise, backed by https://crates.io/crates/noise. A new one of
/// these is created for every map.
///
/// The raw 2D OpenSimplex output only reaches about ±0.544, so it gets
/// stretched out to fill `[-1, 1]`. Without that, depths would bunch up
/// around 0.5 and the outer bands would barely show up.
#[derive(Clone)]
pub struct SimplexNoise {
    seed: u32,
    noise_fn: OpenSimplex,
}

impl SimplexNoise {
    /// Largest magnitude that [OpenSimplex] gives in 2D
    const RAW_BOUND: f64 = 0.544;

    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            noise_fn: OpenSimplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexNoise {
    fn eval(&self, x: f64, y: f64) -> f64 {
        (self.noise_fn.get([x, y]) / Self::RAW_BOUND).clamp(-1.0, 1.0)
    }
}

// The permutation table is big and useless in debug output
impl Debug for SimplexNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplexNoise")
            .field("seed", &self.seed)
            .finish()
    }
}
