//! Color primaries, white points, and RGB-XYZ matrix generation.
//!
//! A set of [`Chromaticities`] defines an RGB color space by the CIE xy
//! coordinates of its three primaries and white point. From those the
//! standard derivation produces the 3x3 matrix converting RGB to CIE XYZ,
//! and by composition the matrix converting between any two RGB spaces
//! sharing a white point.

use glam::{Mat3, Mat4, Vec3};

/// RGB color space definition as CIE xy chromaticity coordinates.
///
/// # Example
///
/// ```rust
/// use linheif_color::primaries::Chromaticities;
///
/// let my_space = Chromaticities {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chromaticities {
    /// Red primary (x, y) chromaticity
    pub r: (f32, f32),
    /// Green primary (x, y) chromaticity
    pub g: (f32, f32),
    /// Blue primary (x, y) chromaticity
    pub b: (f32, f32),
    /// White point (x, y) chromaticity
    pub w: (f32, f32),
    /// Color space name
    pub name: &'static str,
}

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// Rec.709 / sRGB primaries (D65 white point).
///
/// The most common color space for web and consumer displays, and the
/// destination space of the decode pipeline.
pub const REC709: Chromaticities = Chromaticities {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Rec.709",
};

/// Rec.2020 primaries (D65 white point).
///
/// Ultra HD TV color space with a much wider gamut than Rec.709.
pub const REC2020: Chromaticities = Chromaticities {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// Display P3 primaries (D65 white point).
///
/// Apple's wide gamut display standard, based on DCI-P3 primaries
/// but with a D65 white point.
pub const DISPLAY_P3: Chromaticities = Chromaticities {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Display P3",
};

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of chromaticities.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Solve for the scaling factors mapping (1,1,1) to the white point
/// 3. Scale each primary column by its factor
///
/// # Example
///
/// ```rust
/// use linheif_color::primaries::{REC709, rgb_to_xyz_matrix};
/// use glam::Vec3;
///
/// let m = rgb_to_xyz_matrix(&REC709);
///
/// // White (1,1,1) maps to the white point XYZ, so Y is 1.0
/// let white = m * Vec3::ONE;
/// assert!((white.y - 1.0).abs() < 0.001);
/// ```
pub fn rgb_to_xyz_matrix(chroma: &Chromaticities) -> Mat3 {
    let r_xyz = xy_to_xyz(chroma.r.0, chroma.r.1);
    let g_xyz = xy_to_xyz(chroma.g.0, chroma.g.1);
    let b_xyz = xy_to_xyz(chroma.b.0, chroma.b.1);
    let w_xyz = xy_to_xyz(chroma.w.0, chroma.w.1);

    let m = Mat3::from_cols(r_xyz, g_xyz, b_xyz);

    // Solve M * S = W for the per-column scaling factors.
    let s = if m.determinant().abs() > 1e-10 {
        m.inverse() * w_xyz
    } else {
        Vec3::ONE
    };

    Mat3::from_cols(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of chromaticities.
///
/// This is the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(chroma: &Chromaticities) -> Mat3 {
    let m = rgb_to_xyz_matrix(chroma);
    if m.determinant().abs() > 1e-10 {
        m.inverse()
    } else {
        Mat3::IDENTITY
    }
}

/// Computes a matrix to convert from one RGB color space to another.
///
/// The conversion goes through XYZ: `RGB_src -> XYZ -> RGB_dst`. No
/// chromatic adaptation is applied; both spaces used by the decode
/// pipeline share the D65 white point.
pub fn rgb_to_rgb_matrix(src: &Chromaticities, dst: &Chromaticities) -> Mat3 {
    xyz_to_rgb_matrix(dst) * rgb_to_xyz_matrix(src)
}

/// Conversion matrix from a source space to linear Rec.709, as a `Mat4`.
///
/// The 3x3 primaries conversion lands in the upper-left block; the fourth
/// row and column are identity so alpha passes through unchanged.
///
/// # Example
///
/// ```rust
/// use linheif_color::primaries::{REC2020, to_rec709_matrix};
/// use glam::Mat4;
///
/// let m = to_rec709_matrix(&REC2020);
/// assert_ne!(m, Mat4::IDENTITY);
/// ```
pub fn to_rec709_matrix(src: &Chromaticities) -> Mat4 {
    Mat4::from_mat3(rgb_to_rgb_matrix(src, &REC709))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rec709_matrix() {
        let m = rgb_to_xyz_matrix(&REC709);

        // Known sRGB/Rec.709 coefficients
        assert_relative_eq!(m.col(0).x, 0.4124564, epsilon = 0.001);
        assert_relative_eq!(m.col(0).y, 0.2126729, epsilon = 0.001);
    }

    #[test]
    fn test_white_point() {
        for chroma in [REC709, REC2020, DISPLAY_P3] {
            let m = rgb_to_xyz_matrix(&chroma);
            let white = m * Vec3::ONE;
            assert_relative_eq!(white.y, 1.0, epsilon = 0.001);
        }
    }

    #[test]
    fn test_roundtrip() {
        let to_xyz = rgb_to_xyz_matrix(&REC2020);
        let to_rgb = xyz_to_rgb_matrix(&REC2020);

        let rgb = Vec3::new(0.5, 0.3, 0.8);
        let back = to_rgb * (to_xyz * rgb);

        assert_relative_eq!(rgb.x, back.x, epsilon = 0.001);
        assert_relative_eq!(rgb.y, back.y, epsilon = 0.001);
        assert_relative_eq!(rgb.z, back.z, epsilon = 0.001);
    }

    #[test]
    fn test_rec709_to_rec709_is_identity() {
        let m = rgb_to_rgb_matrix(&REC709, &REC709);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(m.col(j)[i], expected, epsilon = 0.001);
            }
        }
    }

    #[test]
    fn test_to_rec709_preserves_alpha_row() {
        let m = to_rec709_matrix(&REC2020);
        assert_eq!(m.col(3).w, 1.0);
        assert_eq!(m.col(3).x, 0.0);
        assert_eq!(m.row(3).x, 0.0);
    }

    #[test]
    fn test_rec2020_red_stays_in_gamut_direction() {
        // A pure Rec.2020 red expressed in Rec.709 exceeds 1.0 in red and
        // goes negative in green/blue.
        let m = rgb_to_rgb_matrix(&REC2020, &REC709);
        let red = m * Vec3::new(1.0, 0.0, 0.0);
        assert!(red.x > 1.0);
        assert!(red.y < 0.0);
    }
}
