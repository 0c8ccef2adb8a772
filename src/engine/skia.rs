use image::RgbaImage;
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use super::Engine;
use crate::errors::EngineError;

/// `tiny-skia` engine: PNG codec, transform-based scaling and source-over
/// compositing, all on premultiplied pixmaps. Decodes PNG input only.
pub struct SkiaEngine;

/// Pixmaps store premultiplied alpha, RGBA buffers straight alpha.
fn pixmap_from_image(
    image: &RgbaImage,
    stage: fn(String) -> EngineError,
) -> Result<Pixmap, EngineError> {
    let mut pixmap = Pixmap::new(image.width(), image.height())
        .ok_or_else(|| stage("cannot allocate pixmap".to_string()))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

fn image_from_pixmap(
    pixmap: &Pixmap,
    stage: fn(String) -> EngineError,
) -> Result<RgbaImage, EngineError> {
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), rgba)
        .ok_or_else(|| stage("pixmap buffer has the wrong size".to_string()))
}

impl Engine for SkiaEngine {
    fn name(&self) -> &'static str {
        "skia"
    }

    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, EngineError> {
        let pixmap = Pixmap::decode_png(bytes).map_err(|e| EngineError::Decode(e.to_string()))?;
        image_from_pixmap(&pixmap, EngineError::Decode)
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
        let src = pixmap_from_image(source, EngineError::Resize)?;
        let mut dst = Pixmap::new(width, height)
            .ok_or_else(|| EngineError::Resize("cannot allocate pixmap".to_string()))?;
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        let sx = width as f32 / source.width() as f32;
        let sy = height as f32 / source.height() as f32;
        dst.draw_pixmap(
            0,
            0,
            src.as_ref(),
            &paint,
            Transform::from_scale(sx, sy),
            None,
        );
        image_from_pixmap(&dst, EngineError::Resize)
    }

    fn composite(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        x: i64,
        y: i64,
    ) -> Result<(), EngineError> {
        let fg = pixmap_from_image(image, EngineError::Composite)?;
        let mut bg = pixmap_from_image(canvas, EngineError::Composite)?;
        let x = x.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let y = y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        bg.draw_pixmap(
            x,
            y,
            fg.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        *canvas = image_from_pixmap(&bg, EngineError::Composite)?;
        Ok(())
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, EngineError> {
        let pixmap = pixmap_from_image(image, EngineError::Encode)?;
        pixmap
            .encode_png()
            .map_err(|e| EngineError::Encode(e.to_string()))
    }
}
