mod seed;

pub use seed::{FixedSeed, Seed, SeedSource, TimeSeedSource};

use crate::Band;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An RGB color, one byte per channel. Colors are plain values: to change a
/// band's color, replace the whole thing.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[display(fmt = "rgb({}, {}, {})", red, green, blue)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Get the channels as an array: `[red, green, blue]`
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// The color assigned to each terrain band. Fields are listed in the same
/// order as the depth ladder, from the highest threshold down.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub deep_water: Color,
    pub medium_water: Color,
    pub shallow_water: Color,
    pub sand: Color,
    pub low_grass: Color,
    pub high_grass: Color,
    pub rock: Color,
    pub snow: Color,
}

impl Palette {
    /// Get the color that pixels of the given band will be painted with
    pub fn color(&self, band: Band) -> Color {
        match band {
            Band::DeepWater => self.deep_water,
            Band::MediumWater => self.medium_water,
            Band::ShallowWater => self.shallow_water,
            Band::Sand => self.sand,
            Band::LowGrass => self.low_grass,
            Band::HighGrass => self.high_grass,
            Band::Rock => self.rock,
            Band::Snow => self.snow,
        }
    }

    fn color_mut(&mut self, band: Band) -> &mut Color {
        match band {
            Band::DeepWater => &mut self.deep_water,
            Band::MediumWater => &mut self.medium_water,
            Band::ShallowWater => &mut self.shallow_water,
            Band::Sand => &mut self.sand,
            Band::LowGrass => &mut self.low_grass,
            Band::HighGrass => &mut self.high_grass,
            Band::Rock => &mut self.rock,
            Band::Snow => &mut self.snow,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            deep_water: Color::new(8, 50, 201),
            medium_water: Color::new(8, 66, 201),
            shallow_water: Color::new(8, 114, 201),
            sand: Color::new(255, 228, 110),
            low_grass: Color::new(23, 140, 22),
            high_grass: Color::new(23, 120, 22),
            rock: Color::new(55, 63, 66),
            snow: Color::new(230, 232, 237),
        }
    }
}

/// Configuration that defines how a terrain map is generated. This controls
/// the shape of the fractal noise and the color of each terrain band. It
/// does **not** include the seed; that comes from the generator's
/// [SeedSource], so the same config can be used to produce many different
/// maps.
///
/// None of the setters do any validation. Degenerate values (zero scale, zero
/// octaves, etc.) are accepted and will produce degenerate maps rather than
/// errors. If you want to catch those up front, call
/// [validate](Validate::validate) yourself; generation never does.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TerrainConfig {
    /// Spatial divisor applied to pixel coordinates before sampling. Larger
    /// values stretch noise features over more pixels, i.e. zoom in.
    #[validate(range(min = 0.0001))]
    pub scale: f64,

    /// Frequency multiplier between successive octaves. With a lacunarity of
    /// 2.0, each octave is sampled at twice the frequency of the last.
    #[validate(range(min = 0.0))]
    pub lacunarity: f64,

    /// Amplitude multiplier between successive octaves. The first octave
    /// always has an amplitude of 1.0. E.g. with 3 octaves and a persistence
    /// of 0.5, the amplitudes are `[1.0, 0.5, 0.25]`.
    #[validate(range(min = 0.0))]
    pub persistence: f64,

    /// Number of noise layers to sum together.
    #[validate(range(min = 1))]
    pub octaves: u32,

    /// Colors for each terrain band
    pub palette: Palette,
}

impl TerrainConfig {
    /// Create a config with the stock parameters. Same as
    /// [Default::default].
    pub fn new_default() -> Self {
        Self::default()
    }

    /// Overwrite all four noise shape parameters at once.
    pub fn set_generation_modifiers(
        &mut self,
        scale: f64,
        lacunarity: f64,
        persistence: f64,
        octaves: u32,
    ) {
        self.scale = scale;
        self.lacunarity = lacunarity;
        self.persistence = persistence;
        self.octaves = octaves;
    }

    /// Replace the color for a single band
    pub fn set_band_color(&mut self, band: Band, color: Color) {
        *self.palette.color_mut(band) = color;
    }

    pub fn set_deep_water_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::DeepWater, Color::new(red, green, blue));
    }

    pub fn set_medium_water_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::MediumWater, Color::new(red, green, blue));
    }

    pub fn set_shallow_water_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::ShallowWater, Color::new(red, green, blue));
    }

    pub fn set_sand_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::Sand, Color::new(red, green, blue));
    }

    pub fn set_low_grass_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::LowGrass, Color::new(red, green, blue));
    }

    pub fn set_high_grass_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::HighGrass, Color::new(red, green, blue));
    }

    pub fn set_rock_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::Rock, Color::new(red, green, blue));
    }

    pub fn set_snow_color(&mut self, red: u8, green: u8, blue: u8) {
        self.set_band_color(Band::Snow, Color::new(red, green, blue));
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        // Five octaves at this scale give a few continent-sized features per
        // map. Most pixels land in the middle bands; the outermost water and
        // the rock/snow bands only show up around the strongest features.
        Self {
            scale: 125.0,
            lacunarity: 2.0,
            persistence: 0.5,
            octaves: 5,
            palette: Palette::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default() {
        let config = TerrainConfig::new_default();
        assert_eq!(config.scale, 125.0);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
        assert_eq!(config.octaves, 5);
        assert_eq!(config.palette.deep_water, Color::new(8, 50, 201));
        assert_eq!(config.palette.medium_water, Color::new(8, 66, 201));
        assert_eq!(config.palette.shallow_water, Color::new(8, 114, 201));
        assert_eq!(config.palette.sand, Color::new(255, 228, 110));
        assert_eq!(config.palette.low_grass, Color::new(23, 140, 22));
        assert_eq!(config.palette.high_grass, Color::new(23, 120, 22));
        assert_eq!(config.palette.rock, Color::new(55, 63, 66));
        assert_eq!(config.palette.snow, Color::new(230, 232, 237));
    }

    /// Each named setter should touch exactly one band
    #[test]
    fn test_color_setters() {
        type Setter = fn(&mut TerrainConfig, u8, u8, u8);
        let setters: [(Band, Setter); 8] = [
            (Band::DeepWater, TerrainConfig::set_deep_water_color),
            (Band::MediumWater, TerrainConfig::set_medium_water_color),
            (Band::ShallowWater, TerrainConfig::set_shallow_water_color),
            (Band::Sand, TerrainConfig::set_sand_color),
            (Band::LowGrass, TerrainConfig::set_low_grass_color),
            (Band::HighGrass, TerrainConfig::set_high_grass_color),
            (Band::Rock, TerrainConfig::set_rock_color),
            (Band::Snow, TerrainConfig::set_snow_color),
        ];

        let default = TerrainConfig::default();
        for (target, setter) in setters.iter() {
            let mut config = TerrainConfig::default();
            setter(&mut config, 1, 2, 3);

            for band in Band::iter() {
                let expected = if band == *target {
                    Color::new(1, 2, 3)
                } else {
                    default.palette.color(band)
                };
                assert_eq!(
                    config.palette.color(band),
                    expected,
                    "setting {} changed {}",
                    target,
                    band
                );
            }
            assert_eq!(config.scale, default.scale);
            assert_eq!(config.lacunarity, default.lacunarity);
            assert_eq!(config.persistence, default.persistence);
            assert_eq!(config.octaves, default.octaves);
        }
    }

    #[test]
    fn test_set_generation_modifiers() {
        let mut config = TerrainConfig::default();
        // Degenerate values are accepted as-is
        config.set_generation_modifiers(0.0, -1.0, -0.5, 0);
        assert_eq!(config.scale, 0.0);
        assert_eq!(config.lacunarity, -1.0);
        assert_eq!(config.persistence, -0.5);
        assert_eq!(config.octaves, 0);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::new(23, 140, 22).to_string(), "rgb(23, 140, 22)");
        assert_eq!(Color::new(8, 50, 201).to_array(), [8, 50, 201]);
    }
}
