//! Source image handling
//!
//! - Decoding, format validation, and EXIF inspection (probe)
//! - Orientation correction (orientation)

pub mod orientation;
pub mod probe;

pub use orientation::ImageOrientation;
pub use probe::ImageProbe;
