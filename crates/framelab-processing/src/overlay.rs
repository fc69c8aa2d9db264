//! Overlay resolution
//!
//! Three ways of framing a source image:
//! - a solid border in a named style color
//! - a pre-authored full-bleed frame alpha-composited over the source
//! - a logo band appended beneath the source, with room for text
//!
//! Overlay assets are decoded once at `Annotator` construction and shared
//! immutably across invocations.

use framelab_core::{AnnotateError, FrameStyle};
use image::{imageops, DynamicImage, GenericImageView, Rgba, RgbaImage};
use std::path::Path;

const BAND_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Overlay selection for a single composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySpec {
    /// No overlay; the canvas is the (reoriented) source
    None,
    /// Solid border in the style color, thickness `min(w, h) / 10`
    Style(FrameStyle),
    /// Configured frame asset stretched over the source
    FullBleed,
    /// Configured logo asset appended beneath the source
    BottomBand,
}

pub struct Overlay;

impl Overlay {
    /// Load and decode an overlay asset, keeping its alpha channel.
    ///
    /// A missing file is a fatal `AssetNotFound`; an unreadable one is a
    /// `Decode` error. Called once per configured asset at construction.
    pub fn load_asset(path: &Path) -> Result<RgbaImage, AnnotateError> {
        if !path.exists() {
            return Err(AnnotateError::AssetNotFound(path.to_path_buf()));
        }
        let data = std::fs::read(path)?;
        let img = image::load_from_memory(&data)
            .map_err(|e| AnnotateError::Decode(format!("{}: {}", path.display(), e)))?;
        Ok(img.to_rgba8())
    }

    /// Border thickness for a style frame
    pub fn border_thickness(width: u32, height: u32) -> u32 {
        width.min(height) / 10
    }

    /// Surround the source with a solid border in the style color.
    ///
    /// Output canvas is `(w + 2t, h + 2t)` with the source centered at
    /// `(t, t)`.
    pub fn apply_border(img: &DynamicImage, style: FrameStyle) -> RgbaImage {
        let (width, height) = img.dimensions();
        let thickness = Self::border_thickness(width, height);

        let mut canvas = RgbaImage::from_pixel(
            width + 2 * thickness,
            height + 2 * thickness,
            style.border_color(),
        );
        imageops::overlay(&mut canvas, &img.to_rgba8(), thickness as i64, thickness as i64);
        canvas
    }

    /// Stretch the frame asset to the source dimensions and alpha-composite
    /// it over the source at the origin.
    pub fn apply_full_bleed(img: &DynamicImage, frame: &RgbaImage) -> RgbaImage {
        let (width, height) = img.dimensions();
        let (frame_w, frame_h) = frame.dimensions();

        let mut canvas = img.to_rgba8();
        if (frame_w, frame_h) != (width, height) {
            let filter = Self::select_filter(frame_w, frame_h, width, height);
            let resized = imageops::resize(frame, width, height, filter);
            imageops::overlay(&mut canvas, &resized, 0, 0);
        } else {
            imageops::overlay(&mut canvas, frame, 0, 0);
        }
        canvas
    }

    /// Append the logo beneath the source on a white canvas, leaving
    /// `text_margin` pixels of band below the logo for annotation text.
    ///
    /// The logo is resized to the source width preserving its aspect
    /// ratio. Returns the canvas and the resized logo height, so callers
    /// can place band text at `source_h + logo_h`.
    pub fn apply_bottom_band(
        img: &DynamicImage,
        logo: &RgbaImage,
        text_margin: u32,
    ) -> (RgbaImage, u32) {
        let (width, height) = img.dimensions();
        let (logo_w, logo_h) = logo.dimensions();

        let aspect = logo_w as f32 / logo_h as f32;
        let band_h = ((width as f32 / aspect) as u32).max(1);

        let mut canvas =
            RgbaImage::from_pixel(width, height + band_h + text_margin, BAND_BACKGROUND);
        imageops::overlay(&mut canvas, &img.to_rgba8(), 0, 0);

        if (logo_w, logo_h) != (width, band_h) {
            let filter = Self::select_filter(logo_w, logo_h, width, band_h);
            let resized = imageops::resize(logo, width, band_h, filter);
            imageops::overlay(&mut canvas, &resized, 0, height as i64);
        } else {
            imageops::overlay(&mut canvas, logo, 0, height as i64);
        }

        (canvas, band_h)
    }

    /// Pick a resize filter based on how aggressive the scale change is
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> imageops::FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            imageops::FilterType::Triangle
        } else if max_ratio > 1.5 {
            imageops::FilterType::CatmullRom
        } else {
            imageops::FilterType::Lanczos3
        }
    }
}
