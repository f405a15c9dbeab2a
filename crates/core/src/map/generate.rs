use crate::{
    map::{Band, NoiseSource, SimplexNoise, TerrainMap},
    timed, Seed, SeedSource, TerrainConfig, TimeSeedSource,
};
use log::{debug, info, log_enabled, Level};
use strum::{EnumCount, IntoEnumIterator};

/// Generates terrain maps. A generator owns a [SeedSource] and pulls one seed
/// from it for every map, so whether consecutive maps differ is entirely up
/// to the seed source.
///
/// ```
/// use terramap::{FixedSeed, TerrainConfig, TerrainGenerator};
///
/// let mut generator = TerrainGenerator::new(FixedSeed::from(1234));
/// let config = TerrainConfig::default();
/// assert_eq!(generator.generate(&config), generator.generate(&config));
/// ```
#[derive(Clone, Debug)]
pub struct TerrainGenerator<S: SeedSource = TimeSeedSource> {
    seed_source: S,
}

impl TerrainGenerator<TimeSeedSource> {
    /// Create a generator that gives a different map every time, seeded from
    /// the system clock.
    pub fn from_time() -> Self {
        Self::new(TimeSeedSource::new())
    }
}

impl<S: SeedSource> TerrainGenerator<S> {
    pub fn new(seed_source: S) -> Self {
        Self { seed_source }
    }

    /// Generate a new map. A fresh noise function is created for each call,
    /// seeded from this generator's seed source.
    ///
    /// This never fails. An invalid config (see [TerrainConfig]) just gives
    /// a degenerate map, typically a solid sheet of snow.
    pub fn generate(&mut self, config: &TerrainConfig) -> TerrainMap {
        let seed = self.seed_source.next_seed();
        info!("Generating map with seed {} and config {:#?}", seed, config);
        let noise = SimplexNoise::new(seed.to_noise_seed());
        timed!("Map generation", render_map(config, &noise, seed))
    }
}

/// Build a map by sampling the given noise source for every pixel. This is
/// the guts of [TerrainGenerator::generate], exposed so that any noise source
/// can be plugged in. The seed is only recorded on the map, it has no effect
/// on the output.
pub fn render_map<N: NoiseSource + ?Sized>(
    config: &TerrainConfig,
    noise: &N,
    seed: Seed,
) -> TerrainMap {
    let mut pixels = Vec::with_capacity(TerrainMap::LEN);
    let mut band_counts = [0usize; Band::COUNT];

    for y in 0..TerrainMap::HEIGHT {
        for x in 0..TerrainMap::WIDTH {
            let band = Band::classify(fractal_depth(noise, config, x, y));
            band_counts[band as usize] += 1;
            pixels.push(config.palette.color(band));
        }
    }

    if log_enabled!(Level::Debug) {
        for band in Band::iter() {
            debug!("{}: {} pixels", band, band_counts[band as usize]);
        }
    }

    TerrainMap::new(seed, pixels)
}

/// Calculate the depth of a single pixel, in `[0, 1]`. This sums
/// `config.octaves` layers of noise, each sampled at a higher frequency
/// (times lacunarity) and lower amplitude (times persistence) than the last.
/// The sum is divided by the total amplitude to get back to `[-1, 1]`, then
/// shifted up to `[0, 1]`.
///
/// With zero octaves, the total amplitude is zero so the result is NaN.
pub fn fractal_depth<N: NoiseSource + ?Sized>(
    noise: &N,
    config: &TerrainConfig,
    x: u32,
    y: u32,
) -> f64 {
    let sample_x = x as f64 / config.scale;
    let sample_y = y as f64 / config.scale;

    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    let mut total = 0.0;
    let mut total_amplitude = 0.0;
    for _ in 0..config.octaves {
        total +=
            noise.eval(sample_x * frequency, sample_y * frequency) * amplitude;
        total_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    (total / total_amplitude + 1.0) / 2.0
}
