use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use letterfit::{letterbox, Engine, Letterbox, LetterboxError, PlanError};
use log::{debug, info, warn};

mod config;
mod structs;

use crate::config::Config;

/// Output files carry this prefix; files that already have it are skipped
/// when scanning.
const OUTPUT_PREFIX: &str = "Resize-";

#[derive(Parser)]
#[clap(version, about, long_about = None)]
#[clap(disable_help_flag = true)]
struct Cli {
    #[clap(long, action = clap::ArgAction::HelpLong)]
    help: Option<bool>,

    /// Directory with the source images
    #[clap(value_parser)]
    images_dir: PathBuf,

    /// Directory for the letterboxed output (defaults to the images directory)
    #[clap(short, long, value_parser)]
    output_dir: Option<PathBuf>,

    /// Width of the target box, in pixels
    #[clap(short, long, default_value_t = 400)]
    width: u32,

    /// Height of the target box, in pixels
    #[clap(short, long, default_value_t = 400)]
    height: u32,

    /// Extra scale factor applied after fitting the image into the box
    #[clap(short, long, default_value_t = 1.0)]
    ratio: f64,

    /// Smallest source width accepted
    #[clap(long, default_value_t = 400)]
    min_width: u32,

    /// Smallest source height accepted
    #[clap(long, default_value_t = 400)]
    min_height: u32,

    /// Engine used to decode, resample, composite and encode
    #[clap(short, long, value_enum, default_value_t = structs::Engine::Image)]
    engine: structs::Engine,

    /// Fill for the letterbox bars
    #[clap(short, long, value_enum, default_value_t = structs::BackgroundKind::Transparent)]
    background: structs::BackgroundKind,

    /// Block size of the box blur used by the blur background
    #[clap(long, default_value_t = 10)]
    blur_block: u32,

    /// Overwrite existing output files
    #[clap(long, action)]
    overwrite: bool,

    #[clap(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Config {
            images_dir: cli.images_dir.clone(),
            output_dir: cli
                .output_dir
                .clone()
                .unwrap_or_else(|| cli.images_dir.clone()),
            target_width: cli.width,
            target_height: cli.height,
            resize_ratio: cli.ratio,
            min_width: cli.min_width,
            min_height: cli.min_height,
            engine: cli.engine,
            background: cli.background,
            blur_block: cli.blur_block,
            overwrite: cli.overwrite,
        }
    }
}

fn main() -> Result<()> {
    let cli: Cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    run(&Config::from(&cli))
}

fn run(config: &Config) -> Result<()> {
    config.validate()?;

    let engine = config.engine_kind().create();
    let options = config.letterbox();
    debug!(
        "Letterboxing {:?} into {}x{} with the {} engine",
        config.images_dir,
        config.target_width,
        config.target_height,
        engine.name()
    );

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", config.output_dir))?;
    let entries = fs::read_dir(&config.images_dir)
        .with_context(|| format!("Failed to read images directory {:?}", config.images_dir))?;

    let mut written = 0usize;
    let mut skipped = 0usize;
    for entry in entries {
        let path = entry
            .with_context(|| "Failed to list images directory")?
            .path();
        if !path.is_file() {
            continue;
        }
        if has_output_prefix(&path) {
            debug!("Skipping {:?}: already letterboxed", path);
            continue;
        }
        match process_file(engine.as_ref(), &options, config, &path) {
            Ok(true) => written += 1,
            Ok(false) => skipped += 1,
            Err(err) => {
                warn!("Skipping {:?}: {:#}", path, err);
                skipped += 1;
            }
        }
    }

    info!("Finished: {written} written, {skipped} skipped");
    Ok(())
}

/// Letterbox one file. `Ok(false)` means the file was skipped for an
/// expected reason; `Err` means it could not be processed at all.
fn process_file(
    engine: &dyn Engine,
    options: &Letterbox,
    config: &Config,
    path: &Path,
) -> Result<bool> {
    let destination = output_path(config, path);
    if destination.exists() && !config.overwrite {
        debug!("Skipping {:?}: {:?} already exists", path, destination);
        return Ok(false);
    }

    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let png = match letterbox(engine, &bytes, options) {
        Ok(png) => png,
        Err(err @ LetterboxError::Plan(PlanError::SourceTooSmall { .. })) => {
            warn!("Skipping {:?}: {}", path, err);
            return Ok(false);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to letterbox {:?}", path));
        }
    };

    fs::write(&destination, png)
        .with_context(|| format!("Failed to write {:?}", destination))?;
    debug!("Wrote {:?}", destination);
    Ok(true)
}

fn has_output_prefix(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.starts_with(OUTPUT_PREFIX))
}

fn output_path(config: &Config, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    config.output_dir.join(format!("{OUTPUT_PREFIX}{stem}.png"))
}
