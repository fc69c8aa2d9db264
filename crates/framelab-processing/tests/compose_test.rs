//! End-to-end composition scenarios

use framelab_core::{AnnotationFields, AnnotatorConfig, FrameStyle};
use framelab_processing::annotator::Annotator;
use framelab_processing::image::ImageOrientation;
use framelab_processing::overlay::OverlaySpec;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

fn encode_jpeg(img: &RgbImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    buffer
}

/// Build a minimal EXIF APP1 segment carrying only the orientation tag,
/// little-endian TIFF, and splice it into a JPEG right after SOI.
fn jpeg_with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8][..]);

    let mut tiff: Vec<u8> = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_le_bytes()); // one entry
    tiff.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]); // value padding
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    let payload_len = 2 + 6 + tiff.len(); // length field + "Exif\0\0" + TIFF
    let mut out = Vec::with_capacity(jpeg.len() + payload_len + 2);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&(payload_len as u16).to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[test]
fn classic_border_on_800x600_jpeg() {
    let source = RgbImage::from_pixel(800, 600, Rgb([200, 100, 50]));
    let data = encode_jpeg(&source);

    let annotator = Annotator::new(AnnotatorConfig::new()).unwrap();
    let composed = annotator
        .compose(&data, OverlaySpec::Style(FrameStyle::Classic), &AnnotationFields::new())
        .unwrap();

    // Border thickness = min(800, 600) / 10 = 60
    assert_eq!((composed.width, composed.height), (920, 720));
    assert_eq!(composed.canvas.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    assert_eq!(composed.canvas.get_pixel(59, 59), &Rgba([0, 0, 0, 255]));
    // Source pasted centered at (60, 60); JPEG is lossy, so compare loosely
    let inner = composed.canvas.get_pixel(60, 60);
    assert!(inner[0] > 150 && inner[2] < 120);

    // Output buffer decodes back to the composed dimensions
    let decoded = image::load_from_memory(&composed.png).unwrap();
    assert_eq!(decoded.dimensions(), (920, 720));
}

#[test]
fn bottom_band_logo_on_500x500_png() {
    let dir = tempfile::tempdir().unwrap();
    let logo_path = dir.path().join("logo.png");
    let logo = RgbaImage::from_pixel(200, 100, Rgba([30, 160, 30, 255]));
    logo.save(&logo_path).unwrap();

    let source = RgbaImage::from_pixel(500, 500, Rgba([80, 80, 80, 255]));
    let data = encode_png(&source);

    let annotator =
        Annotator::new(AnnotatorConfig::new().with_logo_asset(&logo_path)).unwrap();
    let mut fields = AnnotationFields::new();
    fields.push("Price", "1200");
    fields.push("Weight", "250 kg");
    fields.push("Tag", "cow-42");

    let composed = annotator
        .compose(&data, OverlaySpec::BottomBand, &fields)
        .unwrap();

    // Logo resized to 500x250, plus 100px text margin
    assert_eq!((composed.width, composed.height), (500, 850));
    assert_eq!(composed.canvas.get_pixel(10, 10), &Rgba([80, 80, 80, 255]));
    assert_eq!(composed.canvas.get_pixel(250, 625), &Rgba([30, 160, 30, 255]));
    assert_eq!(composed.suggested_filename(), "cow-42_customized_image.png");

    let decoded = image::load_from_memory(&composed.png).unwrap();
    assert_eq!(decoded.dimensions(), (500, 850));
}

#[test]
fn full_bleed_frame_preserves_source_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let frame_path = dir.path().join("frame.png");
    // Opaque red edge, transparent interior
    let mut frame = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 0]));
    for x in 0..100 {
        frame.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
        frame.put_pixel(x, 99, Rgba([255, 0, 0, 255]));
    }
    frame.save(&frame_path).unwrap();

    let source = RgbaImage::from_pixel(300, 200, Rgba([0, 0, 200, 255]));
    let data = encode_png(&source);

    let annotator =
        Annotator::new(AnnotatorConfig::new().with_frame_asset(&frame_path)).unwrap();
    let composed = annotator
        .compose(&data, OverlaySpec::FullBleed, &AnnotationFields::new())
        .unwrap();

    assert_eq!((composed.width, composed.height), (300, 200));
    // Interior shows the source through the transparent frame
    assert_eq!(composed.canvas.get_pixel(150, 100), &Rgba([0, 0, 200, 255]));
}

#[test]
fn missing_overlay_asset_is_fatal_with_no_output() {
    let config = AnnotatorConfig::new().with_logo_asset("/nonexistent/logo.png");
    let err = Annotator::new(config).unwrap_err();
    assert_eq!(err.error_code(), "ASSET_NOT_FOUND");
}

#[test]
fn exif_rotations_match_pre_rotated_references() {
    let mut source = RgbImage::from_pixel(64, 32, Rgb([240, 240, 240]));
    // Dark top-left quadrant makes rotation observable
    for y in 0..16 {
        for x in 0..32 {
            source.put_pixel(x, y, Rgb([20, 20, 20]));
        }
    }
    let plain = encode_jpeg(&source);
    let upright = image::load_from_memory(&plain).unwrap();

    let annotator = Annotator::new(AnnotatorConfig::new()).unwrap();
    for (orientation, angle) in [(3u16, 180u16), (6, 90), (8, 270)] {
        let tagged = jpeg_with_exif_orientation(&plain, orientation);
        let composed = annotator
            .compose(&tagged, OverlaySpec::None, &AnnotationFields::new())
            .unwrap();

        let reference = ImageOrientation::rotate_by_angle(upright.clone(), angle).to_rgba8();
        assert_eq!(
            (composed.width, composed.height),
            reference.dimensions(),
            "orientation {orientation}"
        );
        assert_eq!(
            composed.canvas.as_raw(),
            reference.as_raw(),
            "orientation {orientation}"
        );
    }
}

#[test]
fn exif_mirrored_orientations_transpose_to_upright() {
    // 32x16 with a dark left half. Orientations 5 and 7 store the capture
    // transposed, so the upright 16x32 result must land the dark half on
    // the top (5) or bottom (7) edge.
    let mut source = RgbImage::from_pixel(32, 16, Rgb([240, 240, 240]));
    for y in 0..16 {
        for x in 0..16 {
            source.put_pixel(x, y, Rgb([10, 10, 10]));
        }
    }
    let plain = encode_jpeg(&source);
    let upright = image::load_from_memory(&plain).unwrap();
    let annotator = Annotator::new(AnnotatorConfig::new()).unwrap();

    for (orientation, angle) in [(5u16, 90u16), (7, 270)] {
        let tagged = jpeg_with_exif_orientation(&plain, orientation);
        let composed = annotator
            .compose(&tagged, OverlaySpec::None, &AnnotationFields::new())
            .unwrap();

        let reference = ImageOrientation::apply_flip_horizontal(
            ImageOrientation::rotate_by_angle(upright.clone(), angle),
        )
        .to_rgba8();
        assert_eq!(
            (composed.width, composed.height),
            (16, 32),
            "orientation {orientation}"
        );
        assert_eq!(
            composed.canvas.as_raw(),
            reference.as_raw(),
            "orientation {orientation}"
        );
    }

    // Orientation 5 sampled directly: rotate 90 CW moves the dark left
    // half to the top, and the mirror leaves top and bottom alone
    let tagged = jpeg_with_exif_orientation(&plain, 5);
    let composed = annotator
        .compose(&tagged, OverlaySpec::None, &AnnotationFields::new())
        .unwrap();
    let top = composed.canvas.get_pixel(8, 2);
    let bottom = composed.canvas.get_pixel(8, 29);
    assert!(top[0] < 100, "dark half must end up on top, got {top:?}");
    assert!(bottom[0] > 150, "light half must end up on the bottom, got {bottom:?}");
}

#[test]
fn absent_exif_leaves_image_unrotated() {
    let source = RgbImage::from_pixel(40, 20, Rgb([100, 100, 100]));
    let data = encode_jpeg(&source);

    let annotator = Annotator::new(AnnotatorConfig::new()).unwrap();
    let composed = annotator
        .compose(&data, OverlaySpec::None, &AnnotationFields::new())
        .unwrap();
    assert_eq!((composed.width, composed.height), (40, 20));
}

#[test]
fn empty_fields_identical_to_no_text_rendering() {
    let source = RgbaImage::from_pixel(150, 100, Rgba([12, 34, 56, 255]));
    let data = encode_png(&source);

    let annotator = Annotator::new(AnnotatorConfig::new()).unwrap();
    let composed = annotator
        .compose(&data, OverlaySpec::Style(FrameStyle::Vintage), &AnnotationFields::new())
        .unwrap();

    let reference = framelab_processing::overlay::Overlay::apply_border(
        &DynamicImage::ImageRgba8(source),
        FrameStyle::Vintage,
    );
    assert_eq!(composed.canvas.as_raw(), reference.as_raw());
}
