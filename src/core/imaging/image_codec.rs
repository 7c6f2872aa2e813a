use std::io::Cursor;

use anyhow::{bail, Context, Result};
use base64::Engine;
use image::{DynamicImage, ImageFormat};

use crate::core::models::NormalizedBox;
use crate::global_constants;

pub fn encode_jpeg_bytes(image: &DynamicImage) -> Result<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        bail!(
            "Cannot JPEG encode an empty image ({}x{})",
            image.width(),
            image.height()
        );
    }

    let rgb_image = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Vec::new();
    rgb_image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .context("Failed to encode image as JPEG")?;

    log::debug!(
        "[CODEC] Encoded {}x{} image into {} JPEG bytes",
        image.width(),
        image.height(),
        buffer.len()
    );
    Ok(buffer)
}

pub fn encode_data_url(image: &DynamicImage) -> Result<String> {
    let jpeg_bytes = encode_jpeg_bytes(image)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(&jpeg_bytes);

    Ok(format!("{}{}", global_constants::JPEG_DATA_URL_PREFIX, encoded))
}

pub fn crop_region(image: &DynamicImage, bounding_box: &NormalizedBox) -> Result<DynamicImage> {
    let rect = bounding_box.to_pixel_rect(image.width(), image.height());

    if rect.is_empty() {
        bail!(
            "Crop region {:?} of {}x{} image has no area",
            rect,
            image.width(),
            image.height()
        );
    }

    log::debug!(
        "[CODEC] Cropping {}x{} at ({}, {}) from {}x{}",
        rect.width(),
        rect.height(),
        rect.left,
        rect.top,
        image.width(),
        image.height()
    );

    let cropped = image.crop_imm(rect.left, rect.top, rect.width(), rect.height());
    Ok(DynamicImage::ImageRgb8(cropped.to_rgb8()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    fn decode_data_url(data_url: &str) -> DynamicImage {
        let payload = data_url
            .strip_prefix(global_constants::JPEG_DATA_URL_PREFIX)
            .expect("data url prefix");
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
    }

    fn transparent_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 128])))
    }

    #[test]
    fn test_encode_data_url_has_jpeg_scheme_prefix() {
        let data_url = encode_data_url(&DynamicImage::new_rgb8(8, 8)).unwrap();

        assert!(data_url.starts_with("data:image/jpeg;base64,"));
        assert!(data_url.len() > global_constants::JPEG_DATA_URL_PREFIX.len());
    }

    #[test]
    fn test_encode_data_url_preserves_dimensions() {
        for &(width, height) in &[(1, 1), (17, 5), (64, 48), (3, 200)] {
            let data_url = encode_data_url(&DynamicImage::new_rgb8(width, height)).unwrap();

            let decoded = decode_data_url(&data_url);

            assert_eq!(decoded.dimensions(), (width, height));
        }
    }

    #[test]
    fn test_encode_data_url_accepts_image_with_alpha() {
        let data_url = encode_data_url(&transparent_image(10, 6)).unwrap();

        assert_eq!(decode_data_url(&data_url).dimensions(), (10, 6));
    }

    #[test]
    fn test_encode_jpeg_bytes_rejects_empty_image() {
        assert!(encode_jpeg_bytes(&DynamicImage::new_rgb8(0, 0)).is_err());
    }

    #[test]
    fn test_encode_jpeg_bytes_starts_with_jpeg_marker() {
        let bytes = encode_jpeg_bytes(&DynamicImage::new_rgb8(4, 4)).unwrap();

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_crop_region_returns_requested_area() {
        let mut source = RgbaImage::from_pixel(100, 50, Rgba([0, 0, 0, 255]));
        source.put_pixel(50, 25, Rgba([255, 255, 255, 255]));
        let image = DynamicImage::ImageRgba8(source);

        let cropped = crop_region(&image, &NormalizedBox::new(0.5, 0.5, 0.25, 0.5)).unwrap();

        assert_eq!(cropped.dimensions(), (25, 25));
        assert_eq!(cropped.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_crop_region_drops_alpha_channel() {
        let cropped =
            crop_region(&transparent_image(20, 20), &NormalizedBox::new(0.0, 0.0, 0.5, 0.5))
                .unwrap();

        assert!(matches!(cropped, DynamicImage::ImageRgb8(_)));
        assert!(!cropped.color().has_alpha());
    }

    #[test]
    fn test_crop_region_clamps_overflowing_box() {
        let image = DynamicImage::new_rgb8(40, 30);

        let cropped = crop_region(&image, &NormalizedBox::new(0.75, 0.5, 0.5, 0.9)).unwrap();

        assert_eq!(cropped.dimensions(), (10, 15));
    }

    #[test]
    fn test_crop_region_rejects_zero_area_box() {
        let image = DynamicImage::new_rgb8(40, 30);

        assert!(crop_region(&image, &NormalizedBox::new(0.5, 0.5, 0.0, 0.5)).is_err());
        assert!(crop_region(&image, &NormalizedBox::new(1.0, 0.0, 0.3, 0.5)).is_err());
    }
}
