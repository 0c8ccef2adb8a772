//! Interchangeable codec engines.
//!
//! Each engine drives one image library through the four stages of the
//! letterbox pipeline. Keeping every stage behind [`Engine`] lets the same
//! pipeline, tests and benchmarks run against all of them.

mod fir;
mod image_ops;
mod resample;
mod skia;

use std::fmt;

use image::RgbaImage;

pub use self::fir::FirEngine;
pub use self::image_ops::ImageOpsEngine;
pub use self::resample::ResampleEngine;
pub use self::skia::SkiaEngine;

use crate::errors::EngineError;

/// One image library driven through the decode, resize, composite and
/// encode stages of the letterbox pipeline.
///
/// Stages exchange straight-alpha RGBA buffers. Every stage runs on the
/// engine's own library, so resampling filters and alpha blending differ
/// slightly between engines; with opaque sources the placement geometry is
/// identical for all of them.
pub trait Engine {
    /// Short name used in logs and benchmark labels.
    fn name(&self) -> &'static str;

    /// Decode an encoded image into RGBA pixels.
    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, EngineError>;

    /// Resample the source to exactly `width` by `height` pixels.
    fn resize(
        &self,
        source: &RgbaImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, EngineError>;

    /// Draw `image` over `canvas` with its top-left corner at `(x, y)`.
    /// Parts that fall outside the canvas are clipped.
    fn composite(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        x: i64,
        y: i64,
    ) -> Result<(), EngineError>;

    /// Encode RGBA pixels as a PNG.
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, EngineError>;
}

/// Selects one of the built-in [`Engine`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// `image` crate codecs with `imageops` resampling.
    ImageOps,
    /// `image` crate codecs with `fast_image_resize` resampling.
    Fir,
    /// `png` codec with the pure-Rust `resize` resampler.
    Resample,
    /// `tiny-skia` pixmaps for every stage.
    Skia,
}

impl EngineKind {
    /// Every engine, in a stable order.
    pub const ALL: [EngineKind; 4] = [
        EngineKind::ImageOps,
        EngineKind::Fir,
        EngineKind::Resample,
        EngineKind::Skia,
    ];

    /// Short name used in logs and benchmark labels.
    pub fn name(self) -> &'static str {
        match self {
            EngineKind::ImageOps => "image",
            EngineKind::Fir => "fir",
            EngineKind::Resample => "resample",
            EngineKind::Skia => "skia",
        }
    }

    /// Instantiate the selected engine.
    pub fn create(self) -> Box<dyn Engine> {
        match self {
            EngineKind::ImageOps => Box::new(ImageOpsEngine),
            EngineKind::Fir => Box::new(FirEngine),
            EngineKind::Resample => Box::new(ResampleEngine),
            EngineKind::Skia => Box::new(SkiaEngine),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
