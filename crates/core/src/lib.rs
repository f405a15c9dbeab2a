//! Terramap generates 2D terrain maps from fractal noise. Each pixel of a
//! fixed-size grid gets a depth value from a multi-octave noise sum, and that
//! depth picks one of eight terrain bands (water, sand, grass, rock, snow),
//! each painted a flat color.
//!
//! ```no_run
//! use terramap::{TerrainConfig, TerrainGenerator};
//!
//! let mut config = TerrainConfig::default();
//! config.set_sand_color(240, 220, 130);
//!
//! let mut generator = TerrainGenerator::from_time();
//! let map = generator.generate(&config);
//! map.save_png("map.png").unwrap();
//! ```
//!
//! See [TerrainConfig] for details on how generation can be customized, and
//! [SeedSource] for controlling the randomness.

mod config;
mod map;
mod util;

pub use crate::{
    config::{
        Color, FixedSeed, Palette, Seed, SeedSource, TerrainConfig,
        TimeSeedSource,
    },
    map::{
        fractal_depth, render_map, Band, NoiseSource, SimplexNoise,
        TerrainGenerator, TerrainMap,
    },
};
