//! Domain layer - Capability values and their negotiation rules
//!
//! This layer contains:
//! - Shared kernel: errors and exact value objects
//! - Format parameters: codec/profile specific constraints
//! - Transports: RTP endpoints, RTMP streams and their container
//! - Media: the media line composing transport, direction and payloads

pub mod format;
pub mod media;
pub mod shared;
pub mod transport;

// Re-export commonly used types
pub use shared::{MediaSpecError, Result};
