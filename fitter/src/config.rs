use std::path::PathBuf;

use anyhow::bail;
use letterfit::{EngineKind, Letterbox};

use crate::structs;

/// Everything the driver needs to process one directory of images.
#[derive(Debug, Clone)]
pub struct Config {
    pub images_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target_width: u32,
    pub target_height: u32,
    pub resize_ratio: f64,
    pub min_width: u32,
    pub min_height: u32,
    pub engine: structs::Engine,
    pub background: structs::BackgroundKind,
    pub blur_block: u32,
    pub overwrite: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("Images"),
            output_dir: PathBuf::from("Images"),
            target_width: 400,
            target_height: 400,
            resize_ratio: 1.0,
            min_width: 400,
            min_height: 400,
            engine: structs::Engine::Image,
            background: structs::BackgroundKind::Transparent,
            blur_block: 10,
            overwrite: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target_width == 0 || self.target_height == 0 {
            bail!("Target width and height must be greater than zero");
        }
        if !self.resize_ratio.is_finite() || self.resize_ratio <= 0.0 {
            bail!("Resize ratio must be a positive, finite number");
        }
        if matches!(self.background, structs::BackgroundKind::Blur) && self.blur_block == 0 {
            bail!("Blur block size must be greater than zero");
        }
        Ok(())
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine.into()
    }

    /// The sizing constraint handed to the library for every file.
    pub fn letterbox(&self) -> Letterbox {
        Letterbox::new(self.target_width, self.target_height)
            .ratio(self.resize_ratio)
            .min_source(self.min_width, self.min_height)
            .background(self.background.to_background(self.blur_block))
    }
}
