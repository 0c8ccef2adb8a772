use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use super::Engine;
use crate::errors::EngineError;

/// Baseline engine: `image` crate codecs, `imageops` Lanczos3 resampling
/// and `imageops::overlay` compositing.
pub struct ImageOpsEngine;

impl Engine for ImageOpsEngine {
    fn name(&self) -> &'static str {
        "image"
    }

    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, EngineError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| EngineError::Decode(e.to_string()))?;
        Ok(image.to_rgba8())
    }

    fn resize(
        &self,
        source: &RgbaImage,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::Resize(
                "target dimensions must be greater than zero".to_string(),
            ));
        }
        Ok(imageops::resize(source, width, height, FilterType::Lanczos3))
    }

    fn composite(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        x: i64,
        y: i64,
    ) -> Result<(), EngineError> {
        imageops::overlay(canvas, image, x, y);
        Ok(())
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, EngineError> {
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| EngineError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
