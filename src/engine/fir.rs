use std::io::Cursor;

use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{imageops, ImageFormat, RgbaImage};

use super::Engine;
use crate::errors::EngineError;

/// `fast_image_resize` engine. Codecs and compositing come from the
/// `image` crate; resampling runs through the SIMD convolution paths of
/// `fast_image_resize`.
pub struct FirEngine;

impl Engine for FirEngine {
    fn name(&self) -> &'static str {
        "fir"
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
        let src = ImageRef::new(
            source.width(),
            source.height(),
            source.as_raw(),
            PixelType::U8x4,
        )
        .map_err(|e| EngineError::Resize(e.to_string()))?;
        let mut dst = Image::new(width, height, PixelType::U8x4);
        let mut resizer = Resizer::new();
        resizer
            .resize(
                &src,
                &mut dst,
                &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
            )
            .map_err(|e| EngineError::Resize(e.to_string()))?;
        RgbaImage::from_raw(width, height, dst.into_vec())
            .ok_or_else(|| EngineError::Resize("resized buffer has the wrong size".to_string()))
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
