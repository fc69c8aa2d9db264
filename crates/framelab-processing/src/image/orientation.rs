//! Image orientation correction (rotation and flipping)

use super::probe::ImageProbe;
use image::{imageops, DynamicImage};

pub struct ImageOrientation;

impl ImageOrientation {
    /// Apply EXIF orientation correction to a decoded image.
    ///
    /// Reads the orientation tag from the raw bytes and rotates/flips the
    /// decoded pixels to upright. Images without EXIF pass through as is.
    pub fn apply_exif_orientation(mut img: DynamicImage, data: &[u8]) -> DynamicImage {
        let orientation = ImageProbe::read_exif_orientation(data);
        let (rotate, flip_h, flip_v) = ImageProbe::get_orientation_transforms(orientation);

        tracing::debug!(
            orientation = orientation,
            rotate = ?rotate,
            flip_horizontal = flip_h,
            flip_vertical = flip_v,
            "Applying EXIF orientation"
        );

        // Apply rotation first
        if let Some(angle) = rotate {
            img = Self::rotate_by_angle(img, angle);
        }

        // Then apply flips
        if flip_h {
            img = Self::apply_flip_horizontal(img);
        }
        if flip_v {
            img = Self::apply_flip_vertical(img);
        }

        img
    }

    /// Rotate image by specified angle (90, 180, or 270 degrees clockwise)
    pub fn rotate_by_angle(img: DynamicImage, angle: u16) -> DynamicImage {
        match angle {
            90 => DynamicImage::ImageRgba8(imageops::rotate90(&img.to_rgba8())),
            180 => DynamicImage::ImageRgba8(imageops::rotate180(&img.to_rgba8())),
            270 => DynamicImage::ImageRgba8(imageops::rotate270(&img.to_rgba8())),
            _ => img,
        }
    }

    /// Apply horizontal flip (mirror)
    pub fn apply_flip_horizontal(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()))
    }

    /// Apply vertical flip
    pub fn apply_flip_vertical(img: DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()))
    }
}
