//! Framelab Core Library
//!
//! This crate provides the error taxonomy, configuration, and annotation
//! data model shared by the Framelab crates. Image decoding and
//! compositing live in `framelab-processing`.

pub mod annotation;
pub mod config;
pub mod error;

// Re-export commonly used types
pub use annotation::{AnnotationFields, ComposedImage, FrameStyle};
pub use config::AnnotatorConfig;
pub use error::{AnnotateError, LogLevel};
