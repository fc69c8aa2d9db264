//! The image annotator - orchestrates the composition pipeline
//!
//! One `compose` call runs the full pipeline:
//! 1. size gate
//! 2. decode + supported-format check
//! 3. EXIF reorientation
//! 4. overlay resolution (border / full-bleed / bottom band)
//! 5. annotation text
//! 6. lossless PNG encoding
//!
//! Composition either fully succeeds or fails before any output exists;
//! there is no partial result. The annotator holds its overlay assets and
//! font as immutable state resolved at construction, so a single instance
//! can be shared across invocations.

use crate::image::{ImageOrientation, ImageProbe};
use crate::overlay::{Overlay, OverlaySpec};
use crate::text::TextRenderer;
use crate::validator::ImageValidator;
use bytes::Bytes;
use framelab_core::{AnnotateError, AnnotationFields, AnnotatorConfig, ComposedImage};
use image::{GenericImageView, ImageFormat, RgbaImage};
use std::io::Cursor;

#[derive(Debug)]
pub struct Annotator {
    config: AnnotatorConfig,
    validator: ImageValidator,
    frame_asset: Option<RgbaImage>,
    logo_asset: Option<RgbaImage>,
    text: TextRenderer,
}

impl Annotator {
    /// Build an annotator, resolving configured assets and the font up
    /// front. A configured asset path that does not exist fails here with
    /// `AssetNotFound`, not at compose time.
    pub fn new(config: AnnotatorConfig) -> Result<Self, AnnotateError> {
        let frame_asset = config
            .frame_asset_path
            .as_deref()
            .map(Overlay::load_asset)
            .transpose()?;
        let logo_asset = config
            .logo_asset_path
            .as_deref()
            .map(Overlay::load_asset)
            .transpose()?;
        let text = TextRenderer::from_config(config.font_path.as_deref(), config.font_scale)?;

        Ok(Self {
            validator: ImageValidator::new(config.max_image_bytes),
            frame_asset,
            logo_asset,
            text,
            config,
        })
    }

    /// Compose a source image with an overlay and annotation fields into
    /// a final PNG-encoded canvas.
    pub fn compose(
        &self,
        data: &[u8],
        overlay: OverlaySpec,
        fields: &AnnotationFields,
    ) -> Result<ComposedImage, AnnotateError> {
        self.validator.validate_size(data.len())?;

        let (img, format) = ImageProbe::decode(data)?;
        tracing::debug!(
            format = ?format,
            width = img.width(),
            height = img.height(),
            overlay = ?overlay,
            field_count = fields.len(),
            "Composing image"
        );

        let img = ImageOrientation::apply_exif_orientation(img, data);
        let (source_w, source_h) = img.dimensions();

        let lines = fields.lines();
        let canvas = match overlay {
            OverlaySpec::None => {
                let mut canvas = img.to_rgba8();
                self.text.draw_over_canvas(&mut canvas, &lines);
                canvas
            }
            OverlaySpec::Style(style) => {
                tracing::debug!(style = %style, "Applying border frame");
                let mut canvas = Overlay::apply_border(&img, style);
                self.text.draw_over_canvas(&mut canvas, &lines);
                canvas
            }
            OverlaySpec::FullBleed => {
                let frame = self.frame_asset.as_ref().ok_or_else(|| {
                    AnnotateError::InvalidInput(
                        "no full-bleed frame asset configured".to_string(),
                    )
                })?;
                tracing::debug!("Applying full-bleed frame");
                let mut canvas = Overlay::apply_full_bleed(&img, frame);
                self.text.draw_over_canvas(&mut canvas, &lines);
                canvas
            }
            OverlaySpec::BottomBand => {
                let logo = self.logo_asset.as_ref().ok_or_else(|| {
                    AnnotateError::InvalidInput(
                        "no bottom-band logo asset configured".to_string(),
                    )
                })?;
                tracing::debug!("Applying bottom-band logo");
                let (mut canvas, logo_h) =
                    Overlay::apply_bottom_band(&img, logo, self.config.text_band_margin);
                self.text.draw_in_band(&mut canvas, &lines, source_h + logo_h);
                canvas
            }
        };

        let (width, height) = canvas.dimensions();
        let png = Self::encode_png(&canvas)?;
        tracing::debug!(
            source_width = source_w,
            source_height = source_h,
            width = width,
            height = height,
            png_bytes = png.len(),
            "Composition complete"
        );

        Ok(ComposedImage {
            canvas,
            width,
            height,
            png,
            tag: fields.get("Tag").map(str::to_string),
        })
    }

    /// Inspect source bytes without composing
    pub fn inspect(&self, data: &[u8]) -> Result<crate::metadata::ImageMetadata, AnnotateError> {
        self.validator.validate_size(data.len())?;
        ImageProbe::metadata(data)
    }

    fn encode_png(canvas: &RgbaImage) -> Result<Bytes, AnnotateError> {
        let (width, height) = canvas.dimensions();
        let mut buffer = Vec::with_capacity(Self::png_capacity_hint(width, height));
        let mut cursor = Cursor::new(&mut buffer);
        canvas
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| AnnotateError::Encode(e.to_string()))?;
        Ok(Bytes::from(buffer))
    }

    // Uncompressed RGBA size as an allocation hint. Computed in u64 so
    // large canvases do not overflow the u32 pixel arithmetic.
    fn png_capacity_hint(width: u32, height: u32) -> usize {
        let bytes = (width as u64).saturating_mul(height as u64).saturating_mul(4);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }
}
