//! Shared kernel - Common types used by every capability module

pub mod error;
pub mod result;
pub mod value_objects;

pub use error::MediaSpecError;
pub use result::Result;
pub use value_objects::*;
