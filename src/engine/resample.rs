use image::{Rgba, RgbaImage};
use resize::Pixel::RGBA8;
use rgb::{ComponentBytes, FromSlice, RGBA};

use super::Engine;
use crate::errors::EngineError;

/// Minimal-stack engine: the `png` codec, the pure-Rust `resize`
/// resampler and a hand-rolled source-over compositor. Decodes PNG input
/// only.
pub struct ResampleEngine;

/// Source-over in straight alpha, channels scaled so the only division is
/// the final one per channel.
fn blend_over(bg: Rgba<u8>, fg: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(fg.0[3]);
    if sa == 255 {
        return fg;
    }
    let da = u32::from(bg.0[3]);
    let inv = 255 - sa;
    let out_a = sa * 255 + da * inv;
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = u32::from(fg.0[i]);
        let dc = u32::from(bg.0[i]);
        let num = sc * sa * 255 + dc * da * inv;
        out[i] = ((num + out_a / 2) / out_a) as u8;
    }
    out[3] = ((out_a + 127) / 255) as u8;
    Rgba(out)
}

impl Engine for ResampleEngine {
    fn name(&self) -> &'static str {
        "resample"
    }

    fn decode(&self, bytes: &[u8]) -> Result<RgbaImage, EngineError> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .map_err(|e| EngineError::Decode(e.to_string()))?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| EngineError::Decode(e.to_string()))?;
        buf.truncate(info.buffer_size());

        // normalize_to_color8 leaves one of four 8-bit layouts.
        let rgba: Vec<u8> = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            other => {
                return Err(EngineError::Decode(format!(
                    "unsupported color type {other:?}"
                )))
            }
        };
        RgbaImage::from_raw(info.width, info.height, rgba)
            .ok_or_else(|| EngineError::Decode("decoded buffer has the wrong size".to_string()))
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
        let mut resizer = resize::new(
            source.width() as usize,
            source.height() as usize,
            width as usize,
            height as usize,
            RGBA8,
            resize::Type::Lanczos3,
        )
        .map_err(|e| EngineError::Resize(e.to_string()))?;
        let mut dst = vec![RGBA::new(0u8, 0u8, 0u8, 0u8); width as usize * height as usize];
        resizer
            .resize(source.as_raw().as_rgba(), &mut dst)
            .map_err(|e| EngineError::Resize(e.to_string()))?;
        RgbaImage::from_raw(width, height, dst.as_bytes().to_vec())
            .ok_or_else(|| EngineError::Resize("resized buffer has the wrong size".to_string()))
    }

    fn composite(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        x: i64,
        y: i64,
    ) -> Result<(), EngineError> {
        // Pixels falling outside the canvas are clipped.
        let canvas_width = i64::from(canvas.width());
        let canvas_height = i64::from(canvas.height());
        for src_y in 0..i64::from(image.height()) {
            let dst_y = y + src_y;
            if dst_y < 0 || dst_y >= canvas_height {
                continue;
            }
            for src_x in 0..i64::from(image.width()) {
                let dst_x = x + src_x;
                if dst_x < 0 || dst_x >= canvas_width {
                    continue;
                }
                let fg = *image.get_pixel(src_x as u32, src_y as u32);
                let bg = *canvas.get_pixel(dst_x as u32, dst_y as u32);
                canvas.put_pixel(dst_x as u32, dst_y as u32, blend_over(bg, fg));
            }
        }
        Ok(())
    }

    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>, EngineError> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| EngineError::Encode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| EngineError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| EngineError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}
