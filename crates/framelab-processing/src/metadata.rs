//! Image metadata types

use serde::{Deserialize, Serialize};

/// Metadata extracted from a source image before composition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size_bytes: Option<u64>,
    /// EXIF orientation tag (2-8); None when absent or normal
    pub exif_orientation: Option<u8>,
}
