//! Bilinear resampling of decoded images.
//!
//! Used when an auxiliary layer's resolution differs from the primary
//! image's. Source coordinates follow the pixel-center convention
//! `(dst + 0.5) * (src/dst) - 0.5` with clamp-to-edge at the borders.

use linheif_core::parallel::{self, Priority};
use linheif_core::{Channel, ImageData};

/// Resamples every channel of `image` to the target size.
///
/// Returns the input untouched (no copy) when the size already matches.
pub fn resize_to(
    image: ImageData,
    target_width: usize,
    target_height: usize,
    priority: Priority,
) -> ImageData {
    if image.width() == target_width && image.height() == target_height {
        return image;
    }

    let src_w = image.width();
    let src_h = image.height();
    let scale_x = src_w as f32 / target_width as f32;
    let scale_y = src_h as f32 / target_height as f32;

    let channels = image
        .channels
        .iter()
        .map(|src| {
            let mut dst = Channel::new(src.name(), target_width, target_height);
            parallel::for_each_row(dst.data_mut(), target_width, priority, |y, row| {
                let src_y = (y as f32 + 0.5) * scale_y - 0.5;
                let fy = src_y - src_y.floor();
                let y0 = clamp_index(src_y.floor() as i64, src_h);
                let y1 = clamp_index(src_y.floor() as i64 + 1, src_h);
                for (x, v) in row.iter_mut().enumerate() {
                    let src_x = (x as f32 + 0.5) * scale_x - 0.5;
                    let fx = src_x - src_x.floor();
                    let x0 = clamp_index(src_x.floor() as i64, src_w);
                    let x1 = clamp_index(src_x.floor() as i64 + 1, src_w);

                    let top = lerp(src.at(y0 * src_w + x0), src.at(y0 * src_w + x1), fx);
                    let bottom = lerp(src.at(y1 * src_w + x0), src.at(y1 * src_w + x1), fx);
                    *v = lerp(top, bottom, fy);
                }
            });
            dst
        })
        .collect();

    ImageData {
        channels,
        has_premultiplied_alpha: image.has_premultiplied_alpha,
        to_rec709: image.to_rec709,
    }
}

#[inline]
fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
