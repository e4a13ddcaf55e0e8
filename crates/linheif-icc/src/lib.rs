//! # linheif-icc
//!
//! ICC color profile support for the linheif decode pipeline, built on the
//! industry-standard Little CMS 2 library.
//!
//! # Features
//!
//! - Load ICC profiles from embedded container data
//! - Generate the pipeline's linear Rec.709 destination profile
//! - Transform pixel rows between profiles with a chosen rendering intent
//! - High-precision 32-bit float processing
//!
//! # Example
//!
//! ```rust
//! use linheif_icc::{Profile, RowTransform, Intent};
//!
//! let dest = Profile::linear_rec709().unwrap();
//! let source = Profile::linear_rec709().unwrap();
//! let transform = RowTransform::new(&source, &dest, Intent::Perceptual).unwrap();
//!
//! let src = vec![[0.5f32, 0.3, 0.2]; 16];
//! let mut dst = vec![[0.0f32; 3]; 16];
//! transform.transform_row(&src, &mut dst);
//! ```
//!
//! # Thread Safety
//!
//! [`RowTransform`] is created with caching disabled and can be shared
//! between worker threads.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod profile;
mod transform;

pub use error::{IccError, IccResult};
pub use profile::Profile;
pub use transform::RowTransform;

/// Rendering intent for color transformations.
///
/// Determines how out-of-gamut colors are handled during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    /// Maintains color accuracy within the destination gamut.
    ///
    /// Compresses the entire source gamut to fit within the destination.
    /// Best for photographic images.
    #[default]
    Perceptual,

    /// Preserves the relationship between colors.
    ///
    /// Out-of-gamut colors are clipped to the nearest in-gamut color.
    RelativeColorimetric,

    /// Maintains saturation at the expense of accuracy.
    Saturation,

    /// Like relative colorimetric but without white point adaptation.
    AbsoluteColorimetric,
}

impl From<Intent> for lcms2::Intent {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Perceptual => lcms2::Intent::Perceptual,
            Intent::RelativeColorimetric => lcms2::Intent::RelativeColorimetric,
            Intent::Saturation => lcms2::Intent::Saturation,
            Intent::AbsoluteColorimetric => lcms2::Intent::AbsoluteColorimetric,
        }
    }
}
