//! Planar channel buffers and the decoded-image container.
//!
//! A [`Channel`] is a 2D grid of single-precision samples with exclusive
//! storage. An [`ImageData`] is an ordered sequence of channels plus the
//! color-management state produced by the decode pipeline: whether alpha is
//! premultiplied and an optional primaries-conversion matrix toward
//! Rec.709/sRGB.

use crate::{CoreError, CoreResult};
use glam::Mat4;

/// Channel names for interleaved RGB(A) decodes, in channel order.
const RGBA_NAMES: [&str; 4] = ["R", "G", "B", "A"];

/// A 2D grid of `f32` samples with explicit dimensions and exclusive storage.
///
/// Samples are stored row-major and addressed by flattened offset
/// (`y * width + x`).
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    name: String,
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl Channel {
    /// Creates a zero-filled channel.
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Creates a channel from an existing sample buffer.
    ///
    /// Fails when the buffer length does not equal `width * height`.
    pub fn from_data(
        name: impl Into<String>,
        width: usize,
        height: usize,
        data: Vec<f32>,
    ) -> CoreResult<Self> {
        if data.len() != width * height {
            return Err(CoreError::SizeMismatch(format!(
                "expected {} samples for {}x{}, got {}",
                width * height,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self { name: name.into(), width, height, data })
    }

    /// Channel name, including any layer prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channel width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Channel height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at flattened offset `idx`.
    #[inline]
    pub fn at(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// All samples, row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to all samples, row-major.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// A decoded image: ordered channels plus color-management state.
///
/// Channel order is insertion order; the decode pipeline appends auxiliary
/// layer channels after the primary RGB(A) set and never reorders. The
/// primaries matrix is meaningful only when no ICC transform was applied
/// (the ICC path already lands in Rec.709 primaries).
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Named channels in insertion order.
    pub channels: Vec<Channel>,
    /// True when color samples are premultiplied by alpha.
    pub has_premultiplied_alpha: bool,
    /// Linear source-primaries -> linear Rec.709 conversion; identity when no
    /// conversion applies.
    pub to_rec709: Mat4,
}

impl ImageData {
    /// Creates an image with `num_channels` zero-filled RGB(A) channels.
    ///
    /// Channel names are `R`, `G`, `B`, `A` prefixed by `name_prefix`.
    /// `num_channels` must be 3 or 4; alpha is channel index 3.
    pub fn new_rgba(num_channels: usize, width: usize, height: usize, name_prefix: &str) -> Self {
        debug_assert!(num_channels == 3 || num_channels == 4);
        let channels = RGBA_NAMES
            .iter()
            .take(num_channels)
            .map(|n| Channel::new(format!("{name_prefix}{n}"), width, height))
            .collect();
        Self {
            channels,
            has_premultiplied_alpha: false,
            to_rec709: Mat4::IDENTITY,
        }
    }

    /// Image width, taken from the first channel.
    pub fn width(&self) -> usize {
        self.channels.first().map_or(0, Channel::width)
    }

    /// Image height, taken from the first channel.
    pub fn height(&self) -> usize {
        self.channels.first().map_or(0, Channel::height)
    }

    /// Number of channels currently held.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Appends channels from another image, preserving their order.
    ///
    /// Fails when the incoming channels do not match this image's
    /// dimensions; existing channels are never reordered or removed.
    pub fn append_channels(&mut self, channels: Vec<Channel>) -> CoreResult<()> {
        for channel in &channels {
            if channel.width() != self.width() || channel.height() != self.height() {
                return Err(CoreError::SizeMismatch(format!(
                    "channel '{}' is {}x{}, image is {}x{}",
                    channel.name(),
                    channel.width(),
                    channel.height(),
                    self.width(),
                    self.height()
                )));
            }
        }
        self.channels.extend(channels);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        let image = ImageData::new_rgba(4, 8, 4, "");
        let names: Vec<&str> = image.channels.iter().map(Channel::name).collect();
        assert_eq!(names, ["R", "G", "B", "A"]);

        let aux = ImageData::new_rgba(3, 8, 4, "depth.");
        assert_eq!(aux.channels[0].name(), "depth.R");
    }

    #[test]
    fn test_identity_matrix_by_default() {
        let image = ImageData::new_rgba(3, 2, 2, "");
        assert_eq!(image.to_rec709, Mat4::IDENTITY);
        assert!(!image.has_premultiplied_alpha);
    }

    #[test]
    fn test_from_data_length_check() {
        assert!(Channel::from_data("R", 4, 4, vec![0.0; 16]).is_ok());
        assert!(Channel::from_data("R", 4, 4, vec![0.0; 15]).is_err());
    }

    #[test]
    fn test_append_channels() {
        let mut image = ImageData::new_rgba(3, 4, 4, "");
        let aux = ImageData::new_rgba(3, 4, 4, "aux.");
        image.append_channels(aux.channels).unwrap();
        assert_eq!(image.num_channels(), 6);
        assert_eq!(image.channels[3].name(), "aux.R");
    }

    #[test]
    fn test_append_rejects_mismatched_size() {
        let mut image = ImageData::new_rgba(3, 4, 4, "");
        let aux = ImageData::new_rgba(3, 2, 2, "aux.");
        assert!(image.append_channels(aux.channels).is_err());
        assert_eq!(image.num_channels(), 3);
    }
}
