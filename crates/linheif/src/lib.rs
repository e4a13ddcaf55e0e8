//! # linheif
//!
//! HEIF/HEIC decoding into linear-light `f32` channel buffers.
//!
//! The pipeline drives libheif for container parsing and entropy decoding,
//! then normalizes the raw samples through one of three color paths:
//!
//! 1. an embedded ICC profile, executed row-parallel through Little CMS,
//! 2. an NCLX primaries matrix attached to the result for wide-gamut
//!    sources, or
//! 3. implicit sRGB/Rec.709 linearization when no profile is present.
//!
//! Auxiliary images (depth, alpha masks, Apple HDR gain maps) are decoded
//! through the same path, bilinearly resampled to the primary resolution,
//! and appended as extra named channels. A recognized Apple gain-map layer
//! triggers an injected [`GainMapApplier`] when the image carries a usable
//! maker note.
//!
//! # Example
//!
//! ```rust,no_run
//! use linheif::HeifReader;
//! use std::fs::File;
//!
//! let reader = HeifReader::new().with_selector("hdrgainmap");
//! let file = File::open("photo.heic")?;
//! let images = reader.load(file)?;
//! let primary = &images[0];
//! println!("{} channels, premultiplied: {}", primary.num_channels(), primary.has_premultiplied_alpha);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bridge;
pub mod color;
pub mod decode;
mod error;
pub mod layers;
pub mod makernote;
pub mod resample;
pub mod selector;

pub use error::{LoadError, LoadResult};
pub use layers::GainMapApplier;
pub use linheif_core::{Channel, ImageData, Priority, SampleSource};

use libheif_rs::{HeifContext, LibHeif, StreamReader};
use std::io::{Read, Seek};
use tracing::debug;

/// Configurable HEIF reader.
///
/// Construction is cheap; the libheif decoder instance is created per load.
pub struct HeifReader {
    selector: String,
    priority: Priority,
    applier: Option<Box<dyn GainMapApplier>>,
}

impl HeifReader {
    /// Creates a reader that includes every auxiliary layer and uses default
    /// scheduling priority.
    pub fn new() -> Self {
        Self {
            selector: String::new(),
            priority: Priority::default(),
            applier: None,
        }
    }

    /// Sets the auxiliary-layer selector pattern.
    ///
    /// Comma-separated alternatives, case-insensitive substring match with
    /// `*` wildcards; the empty selector matches every layer.
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Sets the scheduling-priority hint threaded through to parallel
    /// dispatch and the gain-map collaborator.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Installs the vendor HDR gain-map collaborator.
    pub fn with_gain_map_applier(mut self, applier: Box<dyn GainMapApplier>) -> Self {
        self.applier = Some(applier);
        self
    }

    /// Non-destructive format probe.
    ///
    /// Inspects the leading signature bytes and restores the stream position
    /// on every outcome. Returns false for short inputs instead of failing.
    pub fn can_load<R: Read + Seek>(&self, source: &mut SampleSource<R>) -> bool {
        let mut header = [0u8; bridge::PROBE_LEN];
        match source.peek_prefix(&mut header) {
            Ok(n) => bridge::can_decode(&header[..n]),
            Err(_) => false,
        }
    }

    /// Decodes the primary image and merges matching auxiliary layers.
    ///
    /// Returns a sequence of one [`ImageData`]; the `Vec` is the extension
    /// point for containers carrying multiple top-level images.
    ///
    /// # Errors
    ///
    /// [`LoadError::UnsupportedFormat`] when the signature probe fails,
    /// [`LoadError::Decode`] when the primary image cannot be decoded.
    /// Auxiliary-layer and color-profile problems degrade to warnings.
    pub fn load<R: Read + Seek + 'static>(&self, stream: R) -> LoadResult<Vec<ImageData>> {
        let mut source = SampleSource::new(stream)?;
        if !self.can_load(&mut source) {
            return Err(LoadError::UnsupportedFormat(
                "missing HEIF container signature".into(),
            ));
        }
        let len = source.len();

        let lib = LibHeif::new();
        let ctx = HeifContext::read_from_reader(Box::new(StreamReader::new(source, len)))
            .map_err(|e| LoadError::Decode(format!("context allocation failed: {e}")))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| LoadError::Decode(format!("no primary image handle: {e}")))?;

        debug!(
            "Decoding primary image {}x{}, {} bits",
            handle.width(),
            handle.height(),
            handle.luma_bits_per_pixel()
        );
        let mut primary = layers::decode_image(&lib, &handle, "", self.priority)?;

        layers::compose_auxiliaries(
            &lib,
            &handle,
            &mut primary,
            &self.selector,
            self.priority,
            self.applier.as_deref(),
        );

        Ok(vec![primary])
    }
}

impl Default for HeifReader {
    fn default() -> Self {
        Self::new()
    }
}
