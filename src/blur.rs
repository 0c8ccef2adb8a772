//! Naive block-averaging box blur.
//!
//! Every pixel anchors a square of `block_size` by `block_size` pixels
//! extending right and down, clipped at the image edges. The RGB channels
//! of that square are averaged (dividing by the number of pixels actually
//! inside the image) and the average is written back to the whole square
//! before the scan moves on.
//!
//! Averaging reads the buffer in place, so squares written by earlier
//! anchors feed into later ones and color bleeds down and to the right.
//! That scan-order dependence is the defining behavior of this filter and
//! is kept deliberately; it is not a separable or windowed box filter.
//! Cost is O(width * height * block_size^2), which is fine for the small
//! block sizes used for background fills.

use image::RgbaImage;

use crate::errors::BlurError;

/// Blur an RGBA image in place.
///
/// The alpha channel is left untouched. A `block_size` of 1 is the
/// identity; a block covering the whole image flattens it to its average
/// color. Zero-sized images are a no-op.
pub fn box_blur(image: &mut RgbaImage, block_size: u32) -> Result<(), BlurError> {
    if block_size == 0 {
        return Err(BlurError::ZeroBlockSize);
    }

    let width = image.width() as usize;
    let height = image.height() as usize;
    let block = block_size as usize;
    let pixels: &mut [u8] = image;

    for y in 0..height {
        let block_bottom = usize::min(y + block, height);
        for x in 0..width {
            let block_right = usize::min(x + block, width);
            let count = ((block_right - x) * (block_bottom - y)) as u64;

            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;
            for by in y..block_bottom {
                let row = by * width * 4;
                for bx in x..block_right {
                    let p = row + bx * 4;
                    sum_r += u64::from(pixels[p]);
                    sum_g += u64::from(pixels[p + 1]);
                    sum_b += u64::from(pixels[p + 2]);
                }
            }

            let avg_r = (sum_r / count) as u8;
            let avg_g = (sum_g / count) as u8;
            let avg_b = (sum_b / count) as u8;

            for by in y..block_bottom {
                let row = by * width * 4;
                for bx in x..block_right {
                    let p = row + bx * 4;
                    pixels[p] = avg_r;
                    pixels[p + 1] = avg_g;
                    pixels[p + 2] = avg_b;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn image_of(width: u32, height: u32, pixels: &[[u8; 4]]) -> RgbaImage {
        let raw = pixels.iter().flatten().copied().collect();
        RgbaImage::from_raw(width, height, raw).unwrap()
    }

    #[test]
    fn flat_input_stays_flat() {
        // Edge blocks are clipped; dividing by the real pixel count keeps a
        // uniform image uniform all the way into the bottom-right corner.
        let mut image = RgbaImage::from_pixel(15, 15, Rgba([90, 120, 200, 255]));
        box_blur(&mut image, 10).unwrap();
        assert!(image.pixels().all(|&p| p == Rgba([90, 120, 200, 255])));
    }

    #[test]
    fn block_of_one_is_the_identity() {
        let source = image_of(
            2,
            2,
            &[
                [10, 20, 30, 40],
                [50, 60, 70, 80],
                [90, 100, 110, 120],
                [130, 140, 150, 160],
            ],
        );
        let mut image = source.clone();
        box_blur(&mut image, 1).unwrap();
        assert_eq!(image, source);
    }

    #[test]
    fn averaging_reads_already_blurred_pixels() {
        // 3x1 row with red 100, 0, 0 and block 2:
        //   anchor 0 averages pixels 0..2 into 50 and writes both;
        //   anchor 1 averages the fresh 50 with pixel 2 into 25, writes both;
        //   anchor 2 sees only itself.
        // The rightward smear is what distinguishes the in-place scan from
        // a filter reading the original buffer.
        let mut image = image_of(3, 1, &[[100, 100, 100, 255], [0, 0, 0, 255], [0, 0, 0, 255]]);
        box_blur(&mut image, 2).unwrap();
        assert_eq!(
            image,
            image_of(3, 1, &[[50, 50, 50, 255], [25, 25, 25, 255], [25, 25, 25, 255]])
        );
    }

    #[test]
    fn block_covering_the_image_flattens_it() {
        let mut image = image_of(
            2,
            2,
            &[
                [10, 0, 0, 255],
                [20, 0, 0, 255],
                [30, 0, 0, 255],
                [40, 0, 0, 255],
            ],
        );
        box_blur(&mut image, 5).unwrap();
        assert!(image.pixels().all(|&p| p == Rgba([25, 0, 0, 255])));
    }

    #[test]
    fn alpha_channel_is_untouched() {
        let mut image = image_of(
            2,
            2,
            &[
                [255, 0, 0, 10],
                [0, 255, 0, 20],
                [0, 0, 255, 30],
                [255, 255, 255, 40],
            ],
        );
        box_blur(&mut image, 2).unwrap();
        let alphas: Vec<u8> = image.pixels().map(|p| p.0[3]).collect();
        assert_eq!(alphas, [10, 20, 30, 40]);
    }

    #[test]
    fn zero_sized_image_is_a_no_op() {
        let mut image = RgbaImage::new(0, 0);
        box_blur(&mut image, 3).unwrap();
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let mut image = RgbaImage::new(1, 1);
        let err = box_blur(&mut image, 0).unwrap_err();
        assert_eq!(err, BlurError::ZeroBlockSize);
    }
}
