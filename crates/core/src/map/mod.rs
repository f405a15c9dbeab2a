mod generate;
mod noise;

pub use self::{
    generate::{fractal_depth, render_map, TerrainGenerator},
    noise::{NoiseSource, SimplexNoise},
};

use crate::{Color, Seed};
use anyhow::Context;
use image::{ImageFormat, Rgb, RgbImage};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;
use strum::{Display, EnumCount, EnumIter};

/// A terrain band is a range of depth values that all get painted the same
/// color. Every pixel falls into exactly one band.
#[derive(
    Copy,
    Clone,
    Debug,
    Display,
    PartialEq,
    Eq,
    Hash,
    EnumCount,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Band {
    DeepWater,
    MediumWater,
    ShallowWater,
    Sand,
    LowGrass,
    HighGrass,
    Rock,
    Snow,
}

impl Band {
    /// Lower bound (exclusive) of each band's depth range, highest first.
    /// Anything that doesn't clear any of these is [Band::Snow].
    const LADDER: &'static [(f64, Band)] = &[
        (0.70, Band::DeepWater),
        (0.56, Band::MediumWater),
        (0.52, Band::ShallowWater),
        (0.50, Band::Sand),
        (0.41, Band::LowGrass),
        (0.31, Band::HighGrass),
        (0.23, Band::Rock),
    ];

    /// Figure out which band a depth value falls in. The first band (from the
    /// top of the ladder) whose threshold the depth is strictly greater than
    /// wins. NaN compares false against everything, so it lands in
    /// [Band::Snow].
    pub fn classify(depth: f64) -> Self {
        Self::LADDER
            .iter()
            .find(|(threshold, _)| depth > *threshold)
            .map(|(_, band)| *band)
            .unwrap_or(Band::Snow)
    }
}

/// A fully generated map: a fixed-size grid of colors, stored row-major, plus
/// the seed that produced it. Maps are only ever built whole, by
/// [TerrainGenerator] or [render_map].
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    seed: Seed,
    pixels: Vec<Color>,
}

impl TerrainMap {
    /// Width of every map, in pixels
    pub const WIDTH: u32 = 750;
    /// Height of every map, in pixels
    pub const HEIGHT: u32 = 500;
    /// Total number of pixels in every map
    pub const LEN: usize = (Self::WIDTH * Self::HEIGHT) as usize;
    /// File name used when no other name is given
    pub const DEFAULT_FILE_NAME: &'static str = "map.png";

    pub(crate) fn new(seed: Seed, pixels: Vec<Color>) -> Self {
        debug_assert_eq!(pixels.len(), Self::LEN, "incomplete pixel buffer");
        Self { seed, pixels }
    }

    pub fn width(&self) -> u32 {
        Self::WIDTH
    }

    pub fn height(&self) -> u32 {
        Self::HEIGHT
    }

    /// The seed that was used for this map's noise function
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// All pixels, row-major: `(x, y)` is at index `y * WIDTH + x`
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Get the color of a single pixel. Returns `None` if the position is out
    /// of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        if x < Self::WIDTH && y < Self::HEIGHT {
            self.pixels.get((y * Self::WIDTH + x) as usize).copied()
        } else {
            None
        }
    }

    /// Copy this map into an 8-bit RGB image
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(Self::WIDTH, Self::HEIGHT, |x, y| {
            // Every in-bounds pixel is populated, see Self::new
            let color = self.get(x, y).unwrap_or_default();
            Rgb(color.to_array())
        })
    }

    /// Encode this map as a PNG and write it to the given path. Any existing
    /// file will be overwritten.
    pub fn save_png(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.to_rgb_image()
            .save_with_format(path, ImageFormat::Png)
            .with_context(|| format!("error writing map to {:?}", path))?;
        info!("Saved map to {:?}", path);
        Ok(())
    }
}
