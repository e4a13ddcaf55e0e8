//! Color resolution: ICC transform, NCLX primaries matrix, or neither.
//!
//! Decision order per image handle:
//! 1. An embedded ICC profile, when parsable, wins outright: it subsumes
//!    primaries conversion and produces samples already in linear Rec.709.
//! 2. Otherwise samples are treated as sRGB/Rec.709-encoded and linearized
//!    with the fixed transfer function.
//! 3. On the non-ICC path, an NCLX profile with non-canonical primaries
//!    attaches a conversion matrix; canonical or absent NCLX attaches none.
//!
//! Every ICC failure is soft: a warning plus fallthrough to step 2.

use crate::bridge::NclxPrimaries;
use glam::Mat4;
use linheif_color::primaries::to_rec709_matrix;
use linheif_icc::{Intent, Profile, RowTransform};
use tracing::{debug, warn};

/// The resolved color path for one image handle.
///
/// The variants are mutually exclusive: a matrix is only meaningful when no
/// ICC transform was applied.
pub enum ColorMapping {
    /// Samples are already canonical; linearize only.
    None,
    /// Linearize, then attach this primaries-conversion matrix to the result.
    Matrix(Mat4),
    /// Transform each row through the embedded profile into linear Rec.709.
    Icc(RowTransform),
}

/// Resolves the color path from the embedded ICC and NCLX profiles.
pub fn resolve(icc: Option<Vec<u8>>, nclx: Option<NclxPrimaries>) -> ColorMapping {
    if let Some(data) = icc {
        match icc_transform(&data) {
            Ok(transform) => return ColorMapping::Icc(transform),
            Err(e) => warn!("Unusable embedded ICC profile, falling back to sRGB: {e}"),
        }
    }

    match nclx {
        Some(NclxPrimaries::Other(chroma)) => {
            debug!("Attaching {} -> Rec.709 primaries matrix", chroma.name);
            ColorMapping::Matrix(to_rec709_matrix(&chroma))
        }
        Some(NclxPrimaries::Canonical) | None => ColorMapping::None,
    }
}

fn icc_transform(data: &[u8]) -> linheif_icc::IccResult<RowTransform> {
    let source = Profile::from_icc(data)?;
    let dest = Profile::linear_rec709()?;
    RowTransform::new(&source, &dest, Intent::Perceptual)
}
