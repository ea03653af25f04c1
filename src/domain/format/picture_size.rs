//! H.263 picture size catalog

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard picture formats, smallest first
pub const CATALOG: [PictureSize; 5] = [
    PictureSize::Sqcif,
    PictureSize::Qcif,
    PictureSize::Cif,
    PictureSize::Cif4,
    PictureSize::Cif16,
];

/// Picture size
///
/// Any size outside the catalog is kept as `Custom`, so classification is
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PictureSize {
    /// 128x96
    Sqcif,
    /// 176x144
    Qcif,
    /// 352x288
    Cif,
    /// 704x576
    Cif4,
    /// 1408x1152
    Cif16,
    Custom { width: u32, height: u32 },
}

impl PictureSize {
    /// Classify an arbitrary size: first exact catalog match, else `Custom`
    pub fn from_size(width: u32, height: u32) -> Self {
        CATALOG
            .iter()
            .copied()
            .find(|size| size.width() == width && size.height() == height)
            .unwrap_or(PictureSize::Custom { width, height })
    }

    /// Largest catalog entry that fits within the given bound
    pub fn largest_within(width: u32, height: u32) -> Option<Self> {
        CATALOG
            .iter()
            .rev()
            .copied()
            .find(|size| size.width() <= width && size.height() <= height)
    }

    pub fn width(&self) -> u32 {
        match self {
            PictureSize::Sqcif => 128,
            PictureSize::Qcif => 176,
            PictureSize::Cif => 352,
            PictureSize::Cif4 => 704,
            PictureSize::Cif16 => 1408,
            PictureSize::Custom { width, .. } => *width,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            PictureSize::Sqcif => 96,
            PictureSize::Qcif => 144,
            PictureSize::Cif => 288,
            PictureSize::Cif4 => 576,
            PictureSize::Cif16 => 1152,
            PictureSize::Custom { height, .. } => *height,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PictureSize::Custom { .. })
    }

    /// Position in the catalog, `None` for custom sizes
    pub fn rank(&self) -> Option<usize> {
        CATALOG.iter().position(|size| size == self)
    }
}

impl fmt::Display for PictureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PictureSize::Sqcif => write!(f, "SQCIF"),
            PictureSize::Qcif => write!(f, "QCIF"),
            PictureSize::Cif => write!(f, "CIF"),
            PictureSize::Cif4 => write!(f, "CIF4"),
            PictureSize::Cif16 => write!(f, "CIF16"),
            PictureSize::Custom { width, height } => write!(f, "CUSTOM={},{}", width, height),
        }
    }
}
