//! # linheif-core
//!
//! Core types for the linheif decode pipeline.
//!
//! This crate provides the foundational pieces shared by the decode stages:
//!
//! - [`Channel`] / [`ImageData`] - planar linear-light pixel buffers
//! - [`SampleSource`] - a seekable byte-stream cursor satisfying the codec's
//!   reader contract (position, bounded read, seek, size probe)
//! - [`parallel`] - row-granularity work dispatch with a join point
//! - [`CoreError`] - error type for buffer-size failures
//!
//! # Design
//!
//! Decoded images are stored as named planar `f32` channels in insertion
//! order. Every channel of one image shares the same dimensions; alpha, when
//! present, is channel index 3. Color management state rides along as a
//! premultiplication flag and an optional primaries-conversion matrix.
//!
//! ```rust
//! use linheif_core::ImageData;
//!
//! let image = ImageData::new_rgba(4, 640, 480, "");
//! assert_eq!(image.num_channels(), 4);
//! assert_eq!(image.channels[3].name(), "A");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod error;
pub mod parallel;
pub mod source;

pub use channel::{Channel, ImageData};
pub use error::{CoreError, CoreResult};
pub use parallel::Priority;
pub use source::SampleSource;
