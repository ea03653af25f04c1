//! Domain result type

use super::error::MediaSpecError;

/// Standard result type for domain operations
pub type Result<T> = std::result::Result<T, MediaSpecError>;
