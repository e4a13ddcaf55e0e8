//! Color transforms between ICC profiles.

use crate::{IccError, IccResult, Intent, Profile};
use lcms2::{DisallowCache, Flags, GlobalContext, PixelFormat, Transform as LcmsTransform};

/// A thread-safe color transform between two ICC profiles.
///
/// Converts RGB pixel rows from the source color space to the destination
/// color space using the specified rendering intent. Caching is disabled so
/// the transform can be applied from multiple worker threads concurrently.
///
/// # Example
///
/// ```rust
/// use linheif_icc::{Profile, RowTransform, Intent};
///
/// let dest = Profile::linear_rec709().unwrap();
/// let source = Profile::linear_rec709().unwrap();
/// let transform = RowTransform::new(&source, &dest, Intent::Perceptual).unwrap();
///
/// let src = [[0.5f32, 0.3, 0.2]];
/// let mut dst = [[0.0f32; 3]];
/// transform.transform_row(&src, &mut dst);
/// ```
pub struct RowTransform {
    inner: LcmsTransform<[f32; 3], [f32; 3], GlobalContext, DisallowCache>,
}

impl RowTransform {
    /// Creates a new transform between two profiles.
    ///
    /// Uses 32-bit float RGB format for both input and output.
    pub fn new(source: &Profile, dest: &Profile, intent: Intent) -> IccResult<Self> {
        let inner = LcmsTransform::new_flags_context(
            GlobalContext::new(),
            &source.inner,
            PixelFormat::RGB_FLT,
            &dest.inner,
            PixelFormat::RGB_FLT,
            intent.into(),
            Flags::NO_CACHE,
        )
        .map_err(|e| IccError::TransformFailed(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Transforms one row of RGB pixels from source to destination buffer.
    ///
    /// # Panics
    ///
    /// Panics when `source` and `dest` lengths differ.
    pub fn transform_row(&self, source: &[[f32; 3]], dest: &mut [[f32; 3]]) {
        assert_eq!(source.len(), dest.len(), "source and dest must have same length");
        self.inner.transform_pixels(source, dest);
    }
}

impl std::fmt::Debug for RowTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowTransform").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn srgb_profile() -> Profile {
        Profile { inner: lcms2::Profile::new_srgb() }
    }

    #[test]
    fn test_identity() {
        let source = Profile::linear_rec709().unwrap();
        let dest = Profile::linear_rec709().unwrap();
        let transform = RowTransform::new(&source, &dest, Intent::Perceptual).unwrap();

        let src = [[0.5f32, 0.3, 0.2]];
        let mut dst = [[0.0f32; 3]];
        transform.transform_row(&src, &mut dst);

        assert!((dst[0][0] - 0.5).abs() < 0.01);
        assert!((dst[0][1] - 0.3).abs() < 0.01);
        assert!((dst[0][2] - 0.2).abs() < 0.01);
    }

    #[test]
    fn test_srgb_to_linear_removes_gamma() {
        let transform = RowTransform::new(
            &srgb_profile(),
            &Profile::linear_rec709().unwrap(),
            Intent::Perceptual,
        )
        .unwrap();

        let src = [[0.5f32, 0.5, 0.5]];
        let mut dst = [[0.0f32; 3]];
        transform.transform_row(&src, &mut dst);

        // Mid-gray under sRGB gamma is roughly 0.214 linear
        assert!(dst[0][0] < 0.3, "got {}", dst[0][0]);
        assert!(dst[0][0] > 0.1, "got {}", dst[0][0]);
    }

    #[test]
    fn test_shared_across_threads() {
        let transform = RowTransform::new(
            &srgb_profile(),
            &Profile::linear_rec709().unwrap(),
            Intent::Perceptual,
        )
        .unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let src = [[0.25f32, 0.5, 0.75]];
                    let mut dst = [[0.0f32; 3]];
                    transform.transform_row(&src, &mut dst);
                    assert!(dst[0][2] > dst[0][0]);
                });
            }
        });
    }
}
