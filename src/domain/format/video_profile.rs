//! Video profiles
//!
//! `VideoProfile` is the size/frame-rate constraint shared by every video
//! format. `H263VideoProfile` adds the H.263 picture-size classification and
//! its negotiation rule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::picture_size::PictureSize;
use crate::domain::shared::{Fraction, MediaSpecError, Result};

/// Largest H.263 minimum picture interval
pub const MAX_MPI: u32 = 32;

/// Generic video profile: maximum picture size and frame rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VideoProfileRecord", into = "VideoProfileRecord")]
pub struct VideoProfile {
    width: u32,
    height: u32,
    frame_rate: Fraction,
}

#[derive(Serialize, Deserialize)]
struct VideoProfileRecord {
    width: u32,
    height: u32,
    frame_rate: Fraction,
}

impl VideoProfile {
    pub fn new(width: u32, height: u32, frame_rate: Fraction) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(MediaSpecError::InvalidArgument(format!(
                "picture size {}x{} must not be empty",
                width, height
            )));
        }
        if !frame_rate.is_positive() {
            return Err(MediaSpecError::InvalidArgument(format!(
                "frame rate {} must be positive",
                frame_rate
            )));
        }

        Ok(Self {
            width,
            height,
            frame_rate,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame_rate(&self) -> Fraction {
        self.frame_rate
    }

    /// Smallest width, height and frame rate of both profiles
    pub fn intersect(&self, other: &VideoProfile) -> VideoProfile {
        VideoProfile {
            width: self.width.min(other.width),
            height: self.height.min(other.height),
            frame_rate: self.frame_rate.min(other.frame_rate),
        }
    }
}

impl fmt::Display for VideoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VideoProfile [width={}, height={}, frameRate={}]",
            self.width, self.height, self.frame_rate
        )
    }
}

impl TryFrom<VideoProfileRecord> for VideoProfile {
    type Error = MediaSpecError;

    fn try_from(record: VideoProfileRecord) -> Result<Self> {
        VideoProfile::new(record.width, record.height, record.frame_rate)
    }
}

impl From<VideoProfile> for VideoProfileRecord {
    fn from(profile: VideoProfile) -> Self {
        Self {
            width: profile.width,
            height: profile.height,
            frame_rate: profile.frame_rate,
        }
    }
}

/// H.263 video profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "H263Record", into = "H263Record")]
pub struct H263VideoProfile {
    profile: VideoProfile,
    picture_size: PictureSize,
}

#[derive(Serialize, Deserialize)]
struct H263Record {
    picture_size: PictureSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mpi: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    frame_rate: Option<Fraction>,
}

impl H263VideoProfile {
    pub fn new(width: u32, height: u32, frame_rate: Fraction) -> Result<Self> {
        Ok(Self {
            profile: VideoProfile::new(width, height, frame_rate)?,
            picture_size: PictureSize::from_size(width, height),
        })
    }

    /// Profile for a picture size sent at most every `mpi` picture intervals
    pub fn from_mpi(picture_size: PictureSize, mpi: u32) -> Result<Self> {
        if !(1..=MAX_MPI).contains(&mpi) {
            return Err(MediaSpecError::InvalidArgument(format!(
                "MPI {} out of range 1..={}",
                mpi, MAX_MPI
            )));
        }

        let frame_rate = Fraction::new(30 * 1000, mpi as i64 * 1001)?;
        H263VideoProfile::new(picture_size.width(), picture_size.height(), frame_rate)
    }

    pub fn picture_size(&self) -> PictureSize {
        self.picture_size
    }

    pub fn width(&self) -> u32 {
        self.profile.width()
    }

    pub fn height(&self) -> u32 {
        self.profile.height()
    }

    pub fn frame_rate(&self) -> Fraction {
        self.profile.frame_rate()
    }

    pub fn profile(&self) -> &VideoProfile {
        &self.profile
    }

    /// MPI matching the frame rate exactly, if there is one
    pub fn mpi(&self) -> Option<u32> {
        (1..=MAX_MPI).find(|mpi| {
            Fraction::new(30 * 1000, *mpi as i64 * 1001)
                .map(|rate| rate == self.frame_rate())
                .unwrap_or(false)
        })
    }

    /// Both standard sizes negotiate down to the smaller one. A custom size
    /// only matches the same custom size.
    pub fn intersect(&self, other: &H263VideoProfile) -> Result<H263VideoProfile> {
        let picture_size = match (self.picture_size.rank(), other.picture_size.rank()) {
            (Some(mine), Some(theirs)) => {
                if theirs < mine {
                    other.picture_size
                } else {
                    self.picture_size
                }
            }
            _ if self.picture_size == other.picture_size => self.picture_size,
            _ => {
                return Err(MediaSpecError::Incompatible(format!(
                    "H.263 picture sizes {} and {} have no common format",
                    self.picture_size, other.picture_size
                )))
            }
        };

        let frame_rate = self.frame_rate().min(other.frame_rate());
        Ok(H263VideoProfile {
            profile: VideoProfile::new(picture_size.width(), picture_size.height(), frame_rate)?,
            picture_size,
        })
    }
}

impl fmt::Display for H263VideoProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "H263VideoProfile [pictureSize={}, frameRate={}]",
            self.picture_size,
            self.frame_rate()
        )
    }
}

impl TryFrom<H263Record> for H263VideoProfile {
    type Error = MediaSpecError;

    fn try_from(record: H263Record) -> Result<Self> {
        match (record.mpi, record.frame_rate) {
            (Some(mpi), None) => H263VideoProfile::from_mpi(record.picture_size, mpi),
            (None, Some(frame_rate)) => H263VideoProfile::new(
                record.picture_size.width(),
                record.picture_size.height(),
                frame_rate,
            ),
            _ => Err(MediaSpecError::InvalidArgument(
                "H.263 profile needs exactly one of mpi or frame_rate".to_string(),
            )),
        }
    }
}

impl From<H263VideoProfile> for H263Record {
    fn from(profile: H263VideoProfile) -> Self {
        Self {
            picture_size: profile.picture_size,
            mpi: None,
            frame_rate: Some(profile.frame_rate()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_video_profile_validation() {
        assert!(VideoProfile::new(0, 480, Fraction::from_integer(30)).is_err());
        assert!(VideoProfile::new(640, 480, Fraction::from_integer(0)).is_err());
        let profile = VideoProfile::new(640, 480, Fraction::from_integer(30)).unwrap();
        assert_eq!(profile.width(), 640);
        assert_eq!(profile.height(), 480);
    }

    #[test]
    fn test_video_profile_intersect() {
        let a = VideoProfile::new(1280, 480, Fraction::from_integer(30)).unwrap();
        let b = VideoProfile::new(640, 720, fps(25, 1)).unwrap();

        let result = a.intersect(&b);
        assert_eq!(result.width(), 640);
        assert_eq!(result.height(), 480);
        assert_eq!(result.frame_rate(), Fraction::from_integer(25));
        assert_eq!(b.intersect(&a), result);
    }

    #[test]
    fn test_h263_from_mpi() {
        let profile = H263VideoProfile::from_mpi(PictureSize::Cif, 2).unwrap();
        assert_eq!(profile.width(), 352);
        assert_eq!(profile.height(), 288);
        assert_eq!(profile.frame_rate(), fps(15000, 1001));
        assert_eq!(profile.mpi(), Some(2));
    }

    #[test]
    fn test_h263_from_mpi_reclassifies_size() {
        let custom_qcif = PictureSize::Custom {
            width: 176,
            height: 144,
        };
        let profile = H263VideoProfile::from_mpi(custom_qcif, 1).unwrap();
        assert_eq!(profile.picture_size(), PictureSize::Qcif);

        let qcif = H263VideoProfile::from_mpi(PictureSize::Qcif, 1).unwrap();
        assert_eq!(profile.intersect(&qcif).unwrap(), qcif);

        let profile: H263VideoProfile = serde_json::from_str(
            r#"{"picture_size":{"CUSTOM":{"width":352,"height":288}},"mpi":1}"#,
        )
        .unwrap();
        assert_eq!(profile.picture_size(), PictureSize::Cif);
    }

    #[test]
    fn test_h263_mpi_range() {
        assert!(H263VideoProfile::from_mpi(PictureSize::Qcif, 0).is_err());
        assert!(H263VideoProfile::from_mpi(PictureSize::Qcif, MAX_MPI + 1).is_err());
        assert!(H263VideoProfile::from_mpi(PictureSize::Qcif, MAX_MPI).is_ok());
    }

    #[test]
    fn test_h263_new_classifies_size() {
        let profile = H263VideoProfile::new(176, 144, Fraction::from_integer(15)).unwrap();
        assert_eq!(profile.picture_size(), PictureSize::Qcif);
        assert_eq!(profile.mpi(), None);

        let custom = H263VideoProfile::new(640, 480, Fraction::from_integer(15)).unwrap();
        assert!(custom.picture_size().is_custom());
    }

    #[test]
    fn test_h263_intersect_standard_sizes() {
        let cif = H263VideoProfile::from_mpi(PictureSize::Cif, 1).unwrap();
        let qcif = H263VideoProfile::from_mpi(PictureSize::Qcif, 2).unwrap();

        let result = cif.intersect(&qcif).unwrap();
        assert_eq!(result.picture_size(), PictureSize::Qcif);
        assert_eq!(result.mpi(), Some(2));
        assert_eq!(qcif.intersect(&cif).unwrap(), result);
    }

    #[test]
    fn test_h263_intersect_custom_sizes() {
        let vga = H263VideoProfile::new(640, 480, Fraction::from_integer(30)).unwrap();
        let vga_slow = H263VideoProfile::new(640, 480, Fraction::from_integer(10)).unwrap();
        let cif = H263VideoProfile::from_mpi(PictureSize::Cif, 1).unwrap();

        let result = vga.intersect(&vga_slow).unwrap();
        assert_eq!(result.frame_rate(), Fraction::from_integer(10));

        assert!(vga.intersect(&cif).unwrap_err().is_incompatible());
        assert!(cif.intersect(&vga).unwrap_err().is_incompatible());
    }

    #[test]
    fn test_h263_serde() {
        let profile: H263VideoProfile =
            serde_json::from_str(r#"{"picture_size":"QCIF","mpi":2}"#).unwrap();
        assert_eq!(profile.mpi(), Some(2));

        let json = serde_json::to_string(&profile).unwrap();
        let back: H263VideoProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);

        assert!(serde_json::from_str::<H263VideoProfile>(r#"{"picture_size":"QCIF"}"#).is_err());
    }
}
