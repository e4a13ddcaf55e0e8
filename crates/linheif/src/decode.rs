//! Row-parallel conversion of raw samples into linear channel buffers.
//!
//! Two paths exist. The fallback path normalizes each raw sample and applies
//! the inverse sRGB transfer function to the color channels, copying alpha
//! through unchanged. The ICC path stages each row as straight-alpha RGB
//! floats, runs the profile transform, and scatters the results back into
//! planar channels. Both paths dispatch at row granularity and join before
//! the buffers are considered valid.

use crate::bridge::RawSamples;
use linheif_color::srgb;
use linheif_core::parallel::{self, Priority};
use linheif_core::ImageData;
use linheif_icc::RowTransform;

/// Linearizes raw samples into `image` assuming sRGB/Rec.709 encoding.
///
/// Color channels get the inverse transfer function; alpha is normalized but
/// never gamma-corrected. The codec's premultiplication flag is carried
/// through unchanged.
pub fn linearize_into(raw: &RawSamples, image: &mut ImageData, priority: Priority) {
    let width = raw.width();
    let scale = raw.scale();
    for (c, channel) in image.channels.iter_mut().enumerate() {
        let is_color = c < 3;
        parallel::for_each_row(channel.data_mut(), width, priority, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                let normalized = raw.sample(x, y, c) as f32 * scale;
                *v = if is_color { srgb::eotf(normalized) } else { normalized };
            }
        });
    }
    image.has_premultiplied_alpha = raw.channels() == 4 && raw.premultiplied();
}

/// Transforms raw samples into `image` through an embedded-profile transform.
///
/// Premultiplied sources are un-premultiplied in the staging row first; the
/// transform only sees straight-alpha RGB. Profile transforms do not preserve
/// premultiplication semantics, so the output flag is always false.
pub fn icc_transform_into(
    raw: &RawSamples,
    transform: &RowTransform,
    image: &mut ImageData,
    priority: Priority,
) {
    let width = raw.width();
    let channels = raw.channels();
    let scale = raw.scale();
    let unpremultiply = channels == 4 && raw.premultiplied();

    let mut staging = vec![0.0f32; width * raw.height() * channels];
    parallel::for_each_row(&mut staging, width * channels, priority, |y, row| {
        let mut src = vec![[0.0f32; 3]; width];
        let mut dst = vec![[0.0f32; 3]; width];
        for (x, px) in src.iter_mut().enumerate() {
            let alpha = if channels == 4 {
                raw.sample(x, y, 3) as f32 * scale
            } else {
                1.0
            };
            for (c, v) in px.iter_mut().enumerate() {
                *v = raw.sample(x, y, c) as f32 * scale;
                if unpremultiply && alpha > 0.0 {
                    *v /= alpha;
                }
            }
            if channels == 4 {
                row[x * channels + 3] = alpha;
            }
        }
        transform.transform_row(&src, &mut dst);
        for (x, px) in dst.iter().enumerate() {
            row[x * channels..x * channels + 3].copy_from_slice(px);
        }
    });

    for (c, channel) in image.channels.iter_mut().enumerate() {
        let plane = parallel::gather_component(&staging, channels, c);
        channel.data_mut().copy_from_slice(&plane);
    }
    image.has_premultiplied_alpha = false;
}
