//! ICC profile wrapper.

use crate::{IccError, IccResult};
use lcms2::{CIExyY, CIExyYTRIPLE, ColorSpaceSignature, Profile as LcmsProfile, ToneCurve};
use linheif_color::primaries::{D65_XY, REC709};

/// An ICC color profile.
///
/// Represents a color space and its associated color management data.
/// Profiles are created from raw ICC bytes embedded in container files, or
/// generated from chromaticity specifications.
///
/// # Example
///
/// ```rust
/// use linheif_icc::Profile;
///
/// let dest = Profile::linear_rec709().unwrap();
/// assert!(dest.is_rgb());
/// ```
pub struct Profile {
    /// Internal lcms2 profile handle.
    pub(crate) inner: LcmsProfile,
}

impl Profile {
    /// Creates a profile from raw ICC data.
    ///
    /// # Errors
    ///
    /// Returns [`IccError::InvalidProfile`] if the bytes are not a parsable
    /// ICC profile.
    pub fn from_icc(data: &[u8]) -> IccResult<Self> {
        let inner = LcmsProfile::new_icc(data)
            .map_err(|e| IccError::InvalidProfile(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates a linear-light Rec.709 profile.
    ///
    /// Rec.709 primaries, D65 white point, gamma 1.0 on all three channels.
    /// This is the destination space of the decode pipeline.
    pub fn linear_rec709() -> IccResult<Self> {
        let white = CIExyY { x: D65_XY.0 as f64, y: D65_XY.1 as f64, Y: 1.0 };
        let primaries = CIExyYTRIPLE {
            Red: CIExyY { x: REC709.r.0 as f64, y: REC709.r.1 as f64, Y: 1.0 },
            Green: CIExyY { x: REC709.g.0 as f64, y: REC709.g.1 as f64, Y: 1.0 },
            Blue: CIExyY { x: REC709.b.0 as f64, y: REC709.b.1 as f64, Y: 1.0 },
        };
        let curve = ToneCurve::new(1.0);
        let curves = [&curve, &curve, &curve];
        let inner = LcmsProfile::new_rgb(&white, &primaries, &curves)
            .map_err(|e| IccError::CreateFailed(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Returns the profile description.
    pub fn description(&self) -> String {
        self.inner
            .info(lcms2::InfoType::Description, lcms2::Locale::none())
            .unwrap_or_default()
    }

    /// Returns true if this is an RGB profile.
    pub fn is_rgb(&self) -> bool {
        matches!(self.inner.color_space(), ColorSpaceSignature::RgbData)
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("description", &self.description())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_rec709() {
        let profile = Profile::linear_rec709().unwrap();
        assert!(profile.is_rgb());
    }

    #[test]
    fn test_from_icc_rejects_garbage() {
        assert!(Profile::from_icc(b"not an icc profile").is_err());
        assert!(Profile::from_icc(&[]).is_err());
    }

    #[test]
    fn test_from_icc_roundtrip() {
        let data = LcmsProfile::new_srgb().icc().unwrap();
        let profile = Profile::from_icc(&data).unwrap();
        assert!(profile.is_rgb());
    }
}
