use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use terramap::{
    timed, FixedSeed, Seed, TerrainConfig, TerrainGenerator, TerrainMap,
};
use validator::Validate;

/// CLI for generating terrain maps from fractal noise.
#[derive(Debug, StructOpt)]
#[structopt(name = "terramap")]
struct Opt {
    /// Path to a config file that defines the map to be generated. Any
    /// field left out uses its default value. Supported formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Seed for the noise function. Can be an integer or any text. Overrides
    /// the seed in the config file, if any. If no seed is given anywhere, a
    /// random one is picked based on the current time.
    #[structopt(short, long, parse(from_str))]
    seed: Option<Seed>,

    /// The generated map will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long, default_value = ".")]
    output: PathBuf,

    /// The format(s) to output the map in. Supported formats:
    ///
    /// png - The rendered map, as an RGB image
    ///
    /// cfg - The full config used for the map (including the seed), in TOML
    ///   format. Pass this back in with `--config` to recreate the map
    #[structopt(short = "f", long, default_value = "png")]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use during generation. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString, PartialEq)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Render the map as a PNG image
    Png,
    /// Export the map's full config (and seed) in a human-readable file
    Cfg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Cfg => "toml",
        }
    }
}

/// The contents of a config file. This is the terrain config plus an
/// optional seed, all at the top level.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct MapFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<Seed>,
    #[serde(flatten)]
    terrain: TerrainConfig,
}

fn load_config(config_path: &Path) -> anyhow::Result<MapFile> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Write one output form of the map in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    map: &TerrainMap,
    map_file: &MapFile,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join("map")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        match output_format {
            OutputFormat::Png => map.save_png(&output_file_path)?,
            OutputFormat::Cfg => {
                let contents = toml::to_string_pretty(map_file)
                    .context("error serializing config")?;
                let mut file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(&output_file_path)
                    .with_context(|| {
                        format!(
                            "error opening output file {:?}",
                            &output_file_path
                        )
                    })?;
                file.write_all(contents.as_bytes()).with_context(|| {
                    format!("error writing to file {:?}", &output_file_path)
                })?;
            }
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    if opt.output_formats.is_empty() {
        bail!("no output formats were given")
    }

    let mut map_file = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => MapFile::default(),
    };
    if let Some(seed) = opt.seed {
        map_file.seed = Some(seed);
    }

    // Generation is happy to run with a bad config, but let the user know
    // they're probably not getting what they wanted
    if let Err(errors) = map_file.terrain.validate() {
        warn!("Config will produce a degenerate map: {}", errors);
    }

    let map = match &map_file.seed {
        Some(seed) => TerrainGenerator::new(FixedSeed::from(seed.clone()))
            .generate(&map_file.terrain),
        None => TerrainGenerator::from_time().generate(&map_file.terrain),
    };
    // Record the seed that was actually used, so cfg output can reproduce it
    map_file.seed = Some(map.seed().clone());
    info!("Generated map with seed {}", map.seed());

    fs::create_dir_all(&opt.output).with_context(|| {
        format!("error creating output directory {:?}", &opt.output)
    })?;
    for output_format in opt.output_formats {
        gen_output(&opt.output, output_format, &map, &map_file)?;
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
