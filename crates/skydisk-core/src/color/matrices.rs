//! Fixed 3×3 color matrices.
//!
//! All matrices are row-major and act on column vectors: `out = M · in`.

use serde::{Deserialize, Serialize};

pub type Mat3 = [[f32; 3]; 3];

pub const IDENTITY: Mat3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Linear sRGB (D65) to CIE XYZ.
pub const SRGB_TO_XYZ: Mat3 = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

/// CIE XYZ to linear sRGB (D65).
pub const XYZ_TO_SRGB: Mat3 = [
    [3.240_479, -1.537_150, -0.498_535],
    [-0.969_256, 1.875_991, 0.041_556],
    [0.055_648, -0.204_043, 1.057_311],
];

/// RGB to LMS cone space (Ruderman et al.).
pub const RGB_TO_LMS: Mat3 = [
    [17.8824, 43.5161, 4.1194],
    [3.4557, 27.1554, 3.8671],
    [0.0300, 0.1843, 1.4671],
];

/// LMS cone space back to RGB.
pub const LMS_TO_RGB: Mat3 = [
    [0.0809, -0.1305, 0.1167],
    [-0.0102, 0.0540, -0.1136],
    [-0.0004, -0.0041, 0.6935],
];

/// Hunt-Pointer-Estevez, normalized to D65. Assumes XYZ input.
pub const VON_KRIES: Mat3 = [
    [0.40024, 0.7076, -0.08081],
    [-0.2263, 1.16532, 0.0457],
    [0.0, 0.0, 0.91822],
];

pub const BRADFORD: Mat3 = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];

pub const BRADFORD_INV: Mat3 = [
    [0.986_993, -0.147_054, 0.159_963],
    [0.432_305, 0.518_36, 0.049_291_2],
    [-0.008_528_66, 0.040_042_8, 0.968_487],
];

pub const SHARP: Mat3 = [
    [1.2694, -0.0988, -0.1706],
    [-0.8364, 1.8006, 0.0357],
    [0.0297, -0.0315, 1.0018],
];

pub const CMCCAT2000: Mat3 = [
    [0.7982, 0.3389, -0.1371],
    [-0.5918, 1.5512, 0.0406],
    [0.0008, 0.239, 0.9753],
];

pub const CAT02: Mat3 = [
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
];

/// CIE D65 reference white in XYZ, Y normalized to 1.
pub const D65_WHITE: [f32; 3] = [0.95047, 1.0, 1.08883];

/// Chromatic adaptation transform applied after the XYZ percentile stretch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdaptationMethod {
    #[default]
    Bradford,
    VonKries,
    Sharp,
    CmcCat2000,
    Cat02,
    /// Skip adaptation; stretch only.
    None,
}

impl AdaptationMethod {
    pub fn matrix(self) -> Mat3 {
        match self {
            Self::Bradford => BRADFORD,
            Self::VonKries => VON_KRIES,
            Self::Sharp => SHARP,
            Self::CmcCat2000 => CMCCAT2000,
            Self::Cat02 => CAT02,
            Self::None => IDENTITY,
        }
    }
}

impl std::fmt::Display for AdaptationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bradford => write!(f, "Bradford"),
            Self::VonKries => write!(f, "von Kries"),
            Self::Sharp => write!(f, "Sharp"),
            Self::CmcCat2000 => write!(f, "CMCCAT2000"),
            Self::Cat02 => write!(f, "CAT02"),
            Self::None => write!(f, "None"),
        }
    }
}

/// Apply `m` to a single tri-stimulus vector.
#[inline]
pub fn apply(m: &Mat3, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// Matrix product `a · b`.
pub fn multiply(a: &Mat3, b: &Mat3) -> Mat3 {
    let mut out = [[0.0f32; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}
