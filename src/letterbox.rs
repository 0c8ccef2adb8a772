//! The letterbox pipeline: decode, plan, resize, composite, encode.

use image::{Rgba, RgbaImage};

use crate::blur::box_blur;
use crate::engine::Engine;
use crate::errors::LetterboxError;
use crate::plan::{Background, Letterbox};

/// Letterbox `bytes` into the box described by `options`, using `engine`
/// for every pixel operation, and return PNG bytes.
///
/// The scaled image is centered on a canvas of the target size; the canvas
/// shows through as bars wherever the aspect ratios differ. When the scaled
/// image fills the box exactly, the canvas and compositing are skipped and
/// the resized image is encoded directly.
pub fn letterbox(
    engine: &dyn Engine,
    bytes: &[u8],
    options: &Letterbox,
) -> Result<Vec<u8>, LetterboxError> {
    let source = engine.decode(bytes)?;
    let plan = options.plan(source.width(), source.height())?;
    let resized = engine.resize(&source, plan.final_width, plan.final_height)?;

    if plan.fills(options.target_width, options.target_height) {
        return Ok(engine.encode_png(&resized)?);
    }

    let mut canvas = match options.background {
        Background::Transparent => RgbaImage::new(options.target_width, options.target_height),
        Background::Solid(color) => {
            RgbaImage::from_pixel(options.target_width, options.target_height, Rgba(color))
        }
        Background::Blur { block } => {
            // Stretched over the whole box regardless of aspect ratio, so
            // the bars are never empty.
            let mut fill = engine.resize(&source, options.target_width, options.target_height)?;
            box_blur(&mut fill, block)?;
            fill
        }
    };

    engine.composite(&mut canvas, &resized, plan.offset_x, plan.offset_y)?;
    Ok(engine.encode_png(&canvas)?)
}
