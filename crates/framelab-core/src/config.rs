//! Configuration module
//!
//! Configuration for the annotator: overlay asset locations, font
//! selection, and sizing constants. Assets named here are resolved once
//! at `Annotator` construction and held as immutable instance state, not
//! ambient globals.

use std::env;
use std::path::PathBuf;

// Common constants
const DEFAULT_FONT_SCALE: f32 = 40.0;
const DEFAULT_TEXT_BAND_MARGIN: u32 = 100;
const DEFAULT_MAX_IMAGE_BYTES: usize = 25 * 1024 * 1024;

/// Annotator configuration
#[derive(Clone, Debug)]
pub struct AnnotatorConfig {
    /// Full-bleed frame asset (PNG with alpha), stretched over the source
    pub frame_asset_path: Option<PathBuf>,
    /// Bottom-band logo asset (PNG with alpha), pasted beneath the source
    pub logo_asset_path: Option<PathBuf>,
    /// TTF font for annotation text; when unset, common system locations
    /// are probed at initialization
    pub font_path: Option<PathBuf>,
    /// Pixel scale for annotation text
    pub font_scale: f32,
    /// Pixels of text space appended beneath a bottom-band logo
    pub text_band_margin: u32,
    /// Upload size ceiling, checked before any decoding
    pub max_image_bytes: usize,
}

impl AnnotatorConfig {
    pub fn new() -> Self {
        Self {
            frame_asset_path: None,
            logo_asset_path: None,
            font_path: None,
            font_scale: DEFAULT_FONT_SCALE,
            text_band_margin: DEFAULT_TEXT_BAND_MARGIN,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            frame_asset_path: env::var("FRAMELAB_FRAME_ASSET").ok().map(PathBuf::from),
            logo_asset_path: env::var("FRAMELAB_LOGO_ASSET").ok().map(PathBuf::from),
            font_path: env::var("FRAMELAB_FONT").ok().map(PathBuf::from),
            font_scale: env::var("FRAMELAB_FONT_SCALE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FONT_SCALE),
            text_band_margin: env::var("FRAMELAB_TEXT_MARGIN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TEXT_BAND_MARGIN),
            max_image_bytes: env::var("FRAMELAB_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_IMAGE_BYTES),
        }
    }

    pub fn with_frame_asset(mut self, path: impl Into<PathBuf>) -> Self {
        self.frame_asset_path = Some(path.into());
        self
    }

    pub fn with_logo_asset(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_asset_path = Some(path.into());
        self
    }

    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self
    }
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
