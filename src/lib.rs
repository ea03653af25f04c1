//! mediaspec - Media capability negotiation
//!
//! Each endpoint of a media session advertises its transports and format
//! parameters; this crate intersects an answerer's and an offerer's
//! capabilities into the pair both sides can actually use, or reports that
//! no common ground exists.

pub mod config;
pub mod domain;

// Re-export commonly used types
pub use domain::format::{FormatParameters, H263VideoProfile, PictureSize, VideoProfile};
pub use domain::media::{MediaSpec, MediaType, Mode, Payload, PayloadNegotiator};
pub use domain::shared::error::MediaSpecError;
pub use domain::shared::result::Result;
pub use domain::shared::value_objects::Fraction;
pub use domain::transport::{Transport, TransportRtmp, TransportRtp};
