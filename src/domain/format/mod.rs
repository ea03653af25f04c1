//! Format parameters (the `a=fmtp` side of a payload)
//!
//! Every known format kind is a variant of [`FormatParameters`]. Adding a
//! kind means adding a variant and its arm in [`FormatParameters::intersect`].

pub mod picture_size;
pub mod video_profile;

pub use picture_size::PictureSize;
pub use video_profile::{H263VideoProfile, VideoProfile};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{MediaSpecError, Result};

/// Negotiable codec/profile parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatParameters {
    Video(VideoProfile),
    H263(H263VideoProfile),
}

impl FormatParameters {
    pub fn kind(&self) -> &'static str {
        match self {
            FormatParameters::Video(_) => "video",
            FormatParameters::H263(_) => "h263",
        }
    }

    /// Common parameter set of two values of the same kind
    ///
    /// Neither value is modified. Values of different kinds are
    /// `Incompatible`.
    pub fn intersect(&self, other: &FormatParameters) -> Result<FormatParameters> {
        match (self, other) {
            (FormatParameters::Video(mine), FormatParameters::Video(theirs)) => {
                Ok(FormatParameters::Video(mine.intersect(theirs)))
            }
            (FormatParameters::H263(mine), FormatParameters::H263(theirs)) => {
                mine.intersect(theirs).map(FormatParameters::H263)
            }
            _ => Err(MediaSpecError::Incompatible(format!(
                "can not intersect {} format parameters with {}",
                self.kind(),
                other.kind()
            ))),
        }
    }
}

impl From<VideoProfile> for FormatParameters {
    fn from(profile: VideoProfile) -> Self {
        FormatParameters::Video(profile)
    }
}

impl From<H263VideoProfile> for FormatParameters {
    fn from(profile: H263VideoProfile) -> Self {
        FormatParameters::H263(profile)
    }
}

impl fmt::Display for FormatParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatParameters::Video(profile) => write!(f, "{}", profile),
            FormatParameters::H263(profile) => write!(f, "{}", profile),
        }
    }
}
