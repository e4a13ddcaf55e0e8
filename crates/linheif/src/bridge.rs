//! Container decode bridge over libheif.
//!
//! Everything that touches codec types lives here: format probing, primary
//! and auxiliary handle access, raw interleaved sample decodes, and embedded
//! color-profile / EXIF block reads. Decoded samples are copied into an owned
//! [`RawSamples`] buffer so the transform engines stay independent of codec
//! lifetimes.

use crate::makernote;
use crate::{LoadError, LoadResult};
use libheif_rs::{AuxiliaryImagesFilter, ColorSpace, ImageHandle, ItemId, LibHeif, RgbChroma};
use linheif_color::primaries::Chromaticities;
use tracing::{debug, warn};

/// Leading byte window inspected by the format probe.
pub const PROBE_LEN: usize = 12;

/// ISO-BMFF major brands accepted as decodable HEIF variants.
const HEIF_BRANDS: [&[u8; 4]; 12] = [
    b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"hevm", b"hevs",
    b"mif1", b"msf1", b"avif", b"avis",
];

/// Non-destructive format probe over the leading bytes of a stream.
///
/// Returns false when fewer than [`PROBE_LEN`] bytes are available.
pub fn can_decode(header: &[u8]) -> bool {
    if header.len() < PROBE_LEN {
        return false;
    }
    &header[4..8] == b"ftyp" && HEIF_BRANDS.iter().any(|b| &header[8..12] == *b)
}

/// An owned copy of one decoded image's interleaved samples.
///
/// Samples are 16-bit host-endian regardless of the source bit depth; the
/// effective depth is `bits_per_sample` and normalization divides by
/// `2^bits_per_sample - 1`.
pub struct RawSamples {
    data: Vec<u8>,
    stride: usize,
    width: usize,
    height: usize,
    channels: usize,
    bits_per_sample: u8,
    premultiplied: bool,
}

impl RawSamples {
    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved channel count: 4 iff the handle reported alpha, else 3.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Whether the codec reported premultiplied alpha.
    pub fn premultiplied(&self) -> bool {
        self.premultiplied
    }

    /// Normalization factor mapping raw samples to [0, 1].
    pub fn scale(&self) -> f32 {
        1.0 / ((1u32 << self.bits_per_sample) - 1) as f32
    }

    /// Raw sample for pixel (x, y), channel c.
    #[inline]
    pub fn sample(&self, x: usize, y: usize, c: usize) -> u16 {
        let offset = y * self.stride + (x * self.channels + c) * 2;
        u16::from_ne_bytes([self.data[offset], self.data[offset + 1]])
    }
}

#[cfg(test)]
impl RawSamples {
    /// Builds an in-memory sample buffer for transform-engine tests.
    pub(crate) fn for_tests(
        samples: &[u16],
        width: usize,
        height: usize,
        channels: usize,
        bits_per_sample: u8,
        premultiplied: bool,
    ) -> Self {
        assert_eq!(samples.len(), width * height * channels);
        let mut data = Vec::with_capacity(samples.len() * 2);
        for s in samples {
            data.extend_from_slice(&s.to_ne_bytes());
        }
        Self {
            data,
            stride: width * channels * 2,
            width,
            height,
            channels,
            bits_per_sample,
            premultiplied,
        }
    }
}

/// An enumerated auxiliary image plus its normalized type label.
pub struct AuxiliaryLayer {
    /// Codec handle for the auxiliary image.
    pub handle: ImageHandle,
    /// Type label with colons normalized to periods; ordinal when the codec
    /// supplies no label.
    pub label: String,
}

/// Decodes a handle into owned interleaved 16-bit host-endian samples.
///
/// Fails with [`LoadError::Decode`] on zero-area dimensions or codec failure.
pub fn decode_samples(lib: &LibHeif, handle: &ImageHandle) -> LoadResult<RawSamples> {
    let width = handle.width() as usize;
    let height = handle.height() as usize;
    if width == 0 || height == 0 {
        return Err(LoadError::Decode(format!(
            "zero-area image: {width}x{height}"
        )));
    }

    let has_alpha = handle.has_alpha_channel();
    let channels = if has_alpha { 4 } else { 3 };
    let chroma = match (has_alpha, cfg!(target_endian = "big")) {
        (false, false) => RgbChroma::HdrRgbLe,
        (false, true) => RgbChroma::HdrRgbBe,
        (true, false) => RgbChroma::HdrRgbaLe,
        (true, true) => RgbChroma::HdrRgbaBe,
    };

    let image = lib
        .decode(handle, ColorSpace::Rgb(chroma), None)
        .map_err(|e| LoadError::Decode(format!("sample decode failed: {e}")))?;

    let plane = image
        .planes()
        .interleaved
        .ok_or_else(|| LoadError::Decode("no interleaved plane".into()))?;

    Ok(RawSamples {
        data: plane.data.to_vec(),
        stride: plane.stride,
        width,
        height,
        channels,
        bits_per_sample: handle.luma_bits_per_pixel(),
        premultiplied: handle.is_premultiplied_alpha(),
    })
}

/// Enumerates auxiliary images attached to `handle`.
///
/// A layer whose type label cannot be read falls back to its ordinal;
/// enumeration continues with the remaining layers.
pub fn list_auxiliaries(handle: &ImageHandle) -> Vec<AuxiliaryLayer> {
    handle
        .auxiliary_images(AuxiliaryImagesFilter::new())
        .into_iter()
        .enumerate()
        .map(|(ordinal, aux_handle)| {
            let label = match aux_handle.auxiliary_type() {
                Ok(t) if !t.is_empty() => t.replace(':', "."),
                Ok(_) => ordinal.to_string(),
                Err(e) => {
                    warn!("No type label for auxiliary image {ordinal}: {e}");
                    ordinal.to_string()
                }
            };
            AuxiliaryLayer { handle: aux_handle, label }
        })
        .collect()
}

/// Returns raw embedded ICC profile bytes, if any.
///
/// A read failure is a warning, not an error; the caller falls back to the
/// default linearization path.
pub fn read_icc_profile(handle: &ImageHandle) -> Option<Vec<u8>> {
    let raw = handle.color_profile_raw()?;
    if raw.data.is_empty() {
        return None;
    }
    debug!("Found embedded ICC profile ({} bytes)", raw.data.len());
    Some(raw.data)
}

/// NCLX primaries classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NclxPrimaries {
    /// Profile exists and names BT.709 primaries; no conversion needed.
    Canonical,
    /// Profile exists with other primaries; conversion matrix required.
    Other(Chromaticities),
}

/// Reads the NCLX color profile, distinguishing absent from canonical from
/// non-canonical primaries.
///
/// Chromaticity coordinates come from the profile itself, so wide-gamut and
/// custom primaries alike get a conversion matrix; only the BT.709 code
/// short-circuits as canonical.
pub fn read_nclx_profile(handle: &ImageHandle) -> Option<NclxPrimaries> {
    let nclx = handle.color_profile_nclx()?;
    if matches!(
        nclx.color_primaries(),
        libheif_rs::ColorPrimaries::ITU_R_BT_709_5
    ) {
        return Some(NclxPrimaries::Canonical);
    }
    let primaries = Chromaticities {
        name: "NCLX",
        r: (nclx.color_primary_red_x(), nclx.color_primary_red_y()),
        g: (nclx.color_primary_green_x(), nclx.color_primary_green_y()),
        b: (nclx.color_primary_blue_x(), nclx.color_primary_blue_y()),
        w: (nclx.color_primary_white_x(), nclx.color_primary_white_y()),
    };
    debug!(
        "NCLX primaries {:?}: r {:?} g {:?} b {:?} w {:?}",
        nclx.color_primaries(),
        primaries.r,
        primaries.g,
        primaries.b,
        primaries.w
    );
    Some(NclxPrimaries::Other(primaries))
}

/// Extracts an Apple maker note from the handle's EXIF metadata blocks.
pub fn read_maker_note(handle: &ImageHandle) -> Option<Vec<u8>> {
    let count = handle.number_of_metadata_blocks(b"Exif").max(0) as usize;
    let mut ids: Vec<ItemId> = vec![0; count];
    let filled = handle.metadata_block_ids(&mut ids, b"Exif");
    let mut blocks = Vec::with_capacity(filled);
    for &id in &ids[..filled] {
        match handle.metadata(id) {
            Ok(block) => blocks.push(block),
            Err(e) => warn!("Failed to read EXIF block {id}: {e}"),
        }
    }
    makernote::find_apple_maker_note(&blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(brand: &[u8; 4]) -> [u8; 12] {
        let mut h = [0u8; 12];
        h[3] = 24; // box size, irrelevant to the probe
        h[4..8].copy_from_slice(b"ftyp");
        h[8..12].copy_from_slice(brand);
        h
    }

    #[test]
    fn test_can_decode_known_brands() {
        for brand in [b"heic", b"heix", b"mif1", b"avif"] {
            assert!(can_decode(&header(brand)), "{brand:?}");
        }
    }

    #[test]
    fn test_can_decode_rejects_other_containers() {
        assert!(!can_decode(&header(b"qt  ")));
        assert!(!can_decode(b"\x89PNG\r\n\x1a\n\0\0\0\r"));
    }

    #[test]
    fn test_can_decode_short_input() {
        assert!(!can_decode(b""));
        assert!(!can_decode(&header(b"heic")[..11]));
    }

    #[test]
    fn test_raw_samples_scale_and_indexing() {
        // 2x1, 3 channels, 8-bit depth stored in 16-bit samples
        let mut data = Vec::new();
        for v in [255u16, 0, 0, 0, 255, 0] {
            data.extend_from_slice(&v.to_ne_bytes());
        }
        let raw = RawSamples {
            data,
            stride: 12,
            width: 2,
            height: 1,
            channels: 3,
            bits_per_sample: 8,
            premultiplied: false,
        };
        assert_eq!(raw.sample(0, 0, 0), 255);
        assert_eq!(raw.sample(1, 0, 1), 255);
        assert_eq!(raw.sample(1, 0, 2), 0);
        assert!((raw.sample(0, 0, 0) as f32 * raw.scale() - 1.0).abs() < 1e-6);
    }
}
