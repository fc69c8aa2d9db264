//! Image probe - decoding, format validation, and EXIF inspection

use crate::metadata::ImageMetadata;
use framelab_core::AnnotateError;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

pub struct ImageProbe;

impl ImageProbe {
    /// Decode source bytes, rejecting anything outside the supported set.
    ///
    /// Empty input is `InvalidInput`, undecodable input is `Decode`, and a
    /// decodable format other than JPEG/PNG is `UnsupportedFormat`.
    pub fn decode(data: &[u8]) -> Result<(DynamicImage, ImageFormat), AnnotateError> {
        if data.is_empty() {
            return Err(AnnotateError::InvalidInput("empty image data".to_string()));
        }

        let cursor = Cursor::new(data);
        let reader = ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| AnnotateError::Decode(e.to_string()))?;

        let format = reader
            .format()
            .ok_or_else(|| AnnotateError::Decode("unrecognized image format".to_string()))?;
        if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
            return Err(AnnotateError::UnsupportedFormat(format!("{:?}", format)));
        }

        let img = reader
            .decode()
            .map_err(|e| AnnotateError::Decode(e.to_string()))?;
        Ok((img, format))
    }

    /// Extract metadata from source bytes
    pub fn metadata(data: &[u8]) -> Result<ImageMetadata, AnnotateError> {
        let (img, format) = Self::decode(data)?;
        let (width, height) = img.dimensions();
        let exif_orientation = Self::read_exif_orientation(data);

        Ok(ImageMetadata {
            width,
            height,
            format: format!("{:?}", format),
            size_bytes: Some(data.len() as u64),
            exif_orientation: if exif_orientation != 1 {
                Some(exif_orientation)
            } else {
                None
            },
        })
    }

    /// Read the EXIF orientation tag (0x0112) from raw image bytes.
    ///
    /// Returns 1 (normal) when the image carries no EXIF data or no
    /// orientation field. Absence of EXIF is never an error.
    pub fn read_exif_orientation(data: &[u8]) -> u8 {
        let mut cursor = Cursor::new(data);
        let reader = match exif::Reader::new().read_from_container(&mut cursor) {
            Ok(r) => r,
            Err(_) => return 1,
        };

        reader
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|f| f.value.get_uint(0))
            .map(|v| v as u8)
            .unwrap_or(1)
    }

    /// Get rotation and flip operations needed for a given EXIF orientation
    /// Returns (rotate_angle, flip_horizontal, flip_vertical)
    pub fn get_orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
        match orientation {
            1 => (None, false, false),      // Normal
            2 => (None, true, false),       // Mirror horizontal
            3 => (Some(180), false, false), // Rotate 180
            4 => (None, false, true),       // Mirror vertical
            5 => (Some(90), true, false),   // Transposed: rotate 90 CW, then mirror
            6 => (Some(90), false, false),  // Rotate 90 CW
            7 => (Some(270), true, false),  // Transverse: rotate 270 CW, then mirror
            8 => (Some(270), false, false), // Rotate 270 CW
            _ => (None, false, false),      // Invalid, treat as normal
        }
    }
}
