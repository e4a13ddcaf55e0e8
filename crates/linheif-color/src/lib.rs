//! # linheif-color
//!
//! Transfer functions and primaries math for the linheif decode pipeline.
//!
//! Two concerns live here:
//!
//! - [`srgb`] - the piecewise sRGB transfer function, applied when decoded
//!   samples carry no embedded profile
//! - [`primaries`] - chromaticity definitions and RGB-XYZ matrix generation,
//!   used to rotate wide-gamut sources into Rec.709 primaries
//!
//! # Example
//!
//! ```rust
//! use linheif_color::primaries::{REC2020, to_rec709_matrix};
//! use linheif_color::srgb;
//!
//! let linear = srgb::eotf(0.5);
//! let m = to_rec709_matrix(&REC2020);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod primaries;
pub mod srgb;

pub use primaries::{Chromaticities, DISPLAY_P3, REC709, REC2020, to_rec709_matrix};
