//! Framelab Image Processing Library
//!
//! This crate implements the image annotator: decoding and validation,
//! EXIF reorientation, overlay resolution (border frames, full-bleed
//! frames, bottom-band logos), annotation text rendering, and lossless
//! PNG encoding.

pub mod annotator;
pub mod image;
pub mod metadata;
pub mod overlay;
pub mod text;
pub mod validator;

// Re-export commonly used types
pub use annotator::Annotator;
pub use image::{ImageOrientation, ImageProbe};
pub use metadata::ImageMetadata;
pub use overlay::OverlaySpec;
pub use text::TextRenderer;
pub use validator::ImageValidator;
