//! Annotation text rendering
//!
//! Renders "Label: value" lines onto a composed canvas with an ab_glyph
//! font. The font is resolved once at construction: an explicit path, or
//! a probe of common system locations. Without a usable font, rendering
//! is a logged no-op so composition itself never fails on text.
//!
//! Placement is computed from measured text dimensions; text larger than
//! its region clips rather than erroring.

use ab_glyph::{Font, FontVec, ScaleFont};
use framelab_core::AnnotateError;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

const OVERLAY_TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BAND_TEXT_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
const BAND_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Overlay text sits near the bottom-left at an eighth of the free width;
// band text is padded 10px inside a white backing strip 20px taller than
// the text block.
const OVERLAY_BOTTOM_OFFSET: u32 = 40;
const BAND_TEXT_PADDING: i64 = 10;
const BAND_RECT_EXTRA: u32 = 20;

#[derive(Debug)]
pub struct TextRenderer {
    font: Option<FontVec>,
    scale: f32,
}

impl TextRenderer {
    /// Resolve the annotation font.
    ///
    /// An explicitly configured path must exist and parse; otherwise a
    /// fixed list of common system locations is probed.
    pub fn from_config(font_path: Option<&Path>, scale: f32) -> Result<Self, AnnotateError> {
        match font_path {
            Some(path) => {
                if !path.exists() {
                    return Err(AnnotateError::AssetNotFound(path.to_path_buf()));
                }
                let font_data = std::fs::read(path)?;
                let font = FontVec::try_from_vec(font_data).map_err(|_| {
                    AnnotateError::Decode(format!("failed to parse font file: {}", path.display()))
                })?;
                Ok(Self {
                    font: Some(font),
                    scale,
                })
            }
            None => Ok(Self::with_system_font(scale)),
        }
    }

    /// Probe common system font locations, falling back to no font
    pub fn with_system_font(scale: f32) -> Self {
        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];

        for path in &font_paths {
            if let Ok(font_data) = std::fs::read(path) {
                if let Ok(font) = FontVec::try_from_vec(font_data) {
                    tracing::info!(path = path, "Loaded system font");
                    return Self {
                        font: Some(font),
                        scale,
                    };
                }
            }
        }

        tracing::warn!("No usable font found, annotation text will be skipped");
        Self { font: None, scale }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    fn line_height(&self) -> u32 {
        self.scale.ceil() as u32
    }

    /// Measure a text block: (max line width, total height)
    pub fn measure_block(&self, lines: &[String]) -> (u32, u32) {
        let font = match &self.font {
            Some(font) => font,
            None => return (0, 0),
        };

        let scaled_font = font.as_scaled(self.scale);
        let mut max_width = 0.0f32;
        for line in lines {
            let mut width = 0.0f32;
            for ch in line.chars() {
                let glyph = scaled_font.scaled_glyph(ch);
                width += scaled_font.h_advance(glyph.id);
            }
            max_width = max_width.max(width);
        }

        (
            max_width.ceil() as u32,
            lines.len() as u32 * self.line_height(),
        )
    }

    /// Draw a text block line by line, top-left anchored at (x, y).
    /// Out-of-canvas text clips silently.
    pub fn draw_block(&self, canvas: &mut RgbaImage, lines: &[String], x: i32, y: i32, color: Rgba<u8>) {
        let font = match &self.font {
            Some(font) => font,
            None => {
                tracing::warn!("Skipping annotation text: no font available");
                return;
            }
        };

        let line_height = self.line_height() as i32;
        for (i, line) in lines.iter().enumerate() {
            draw_text_mut(canvas, color, x, y + i as i32 * line_height, self.scale, font, line);
        }
    }

    /// Draw white text directly over an existing canvas, bottom-left.
    ///
    /// Anchor: `((w - text_w) / 8, h - text_h - 40)`.
    pub fn draw_over_canvas(&self, canvas: &mut RgbaImage, lines: &[String]) {
        if lines.is_empty() || !self.has_font() {
            if !lines.is_empty() {
                tracing::warn!("Skipping annotation text: no font available");
            }
            return;
        }

        let (width, height) = canvas.dimensions();
        let (text_w, text_h) = self.measure_block(lines);
        let x = ((width as i64 - text_w as i64) / 8) as i32;
        let y = (height as i64 - text_h as i64 - OVERLAY_BOTTOM_OFFSET as i64) as i32;

        self.draw_block(canvas, lines, x, y, OVERLAY_TEXT_COLOR);
    }

    /// Draw black text on a white backing strip inside the bottom band.
    ///
    /// `band_top` is the y coordinate where the text band begins
    /// (source height plus logo height).
    pub fn draw_in_band(&self, canvas: &mut RgbaImage, lines: &[String], band_top: u32) {
        if lines.is_empty() || !self.has_font() {
            if !lines.is_empty() {
                tracing::warn!("Skipping annotation text: no font available");
            }
            return;
        }

        let (width, height) = canvas.dimensions();
        let (_, text_h) = self.measure_block(lines);

        let rect_h = (text_h + BAND_RECT_EXTRA).min(height.saturating_sub(band_top));
        if rect_h > 0 && band_top < height {
            draw_filled_rect_mut(
                canvas,
                Rect::at(0, band_top as i32).of_size(width, rect_h),
                BAND_BACKGROUND,
            );
        }

        self.draw_block(
            canvas,
            lines,
            BAND_TEXT_PADDING as i32,
            (band_top as i64 + BAND_TEXT_PADDING) as i32,
            BAND_TEXT_COLOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> TextRenderer {
        TextRenderer::with_system_font(40.0)
    }

    #[test]
    fn test_missing_font_path_is_fatal() {
        let err =
            TextRenderer::from_config(Some(Path::new("/nonexistent/font.ttf")), 40.0).unwrap_err();
        assert_eq!(err.error_code(), "ASSET_NOT_FOUND");
    }

    #[test]
    fn test_measure_block_without_font_is_zero() {
        let r = TextRenderer { font: None, scale: 40.0 };
        assert_eq!(r.measure_block(&["Price: 100".to_string()]), (0, 0));
    }

    #[test]
    fn test_measure_block_grows_with_lines() {
        let r = renderer();
        if !r.has_font() {
            // Host without fonts: measurement degradation already covered above
            return;
        }
        let one = r.measure_block(&["Price: 100".to_string()]);
        let two = r.measure_block(&["Price: 100".to_string(), "Weight: 20 kg".to_string()]);
        assert!(one.0 > 0);
        assert_eq!(two.1, one.1 * 2);
        assert!(two.0 >= one.0);
    }

    #[test]
    fn test_draw_over_canvas_without_font_is_noop() {
        let r = TextRenderer { font: None, scale: 40.0 };
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([7, 7, 7, 255]));
        let reference = canvas.clone();
        r.draw_over_canvas(&mut canvas, &["Tag: x".to_string()]);
        assert_eq!(canvas.as_raw(), reference.as_raw());
    }

    #[test]
    fn test_draw_over_canvas_changes_pixels() {
        let r = renderer();
        if !r.has_font() {
            return;
        }
        let mut canvas = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        let reference = canvas.clone();
        r.draw_over_canvas(&mut canvas, &["Price: 100".to_string()]);
        assert_ne!(canvas.as_raw(), reference.as_raw());
    }

    #[test]
    fn test_draw_in_band_paints_backing_strip() {
        let r = renderer();
        if !r.has_font() {
            return;
        }
        let mut canvas = RgbaImage::from_pixel(200, 300, Rgba([0, 0, 0, 255]));
        r.draw_in_band(&mut canvas, &["Tag: cow-42".to_string()], 200);
        // Strip painted white below band_top; pixels above untouched
        assert_eq!(canvas.get_pixel(199, 201), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(100, 100), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_oversized_text_clips_without_error() {
        let r = renderer();
        if !r.has_font() {
            return;
        }
        let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let long_line = "Product ID: a-very-long-identifier-that-cannot-fit".to_string();
        r.draw_over_canvas(&mut canvas, &[long_line.clone()]);
        r.draw_in_band(&mut canvas, &[long_line], 10);
    }
}
