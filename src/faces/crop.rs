//! Face crop and re-encode helpers

use super::detector::BoundingBox;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use thiserror::Error;

/// JPEG quality used for re-encoded face crops
const CROP_JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum FaceCropError {
    #[error("face region is empty")]
    EmptyRegion,

    #[error("failed to encode face crop: {0}")]
    Encode(#[from] image::ImageError),
}

/// Crop the source image to a face bounding box.
pub fn crop_to_box(
    image: &DynamicImage,
    region: &BoundingBox,
) -> Result<DynamicImage, FaceCropError> {
    if region.width() == 0 || region.height() == 0 {
        return Err(FaceCropError::EmptyRegion);
    }
    Ok(image.crop_imm(region.left, region.top, region.width(), region.height()))
}

/// Encode an image as compressed JPEG bytes for a provider sub-search.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, FaceCropError> {
    let rgb = image.to_rgb8();
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, CROP_JPEG_QUALITY).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        image::ColorType::Rgb8,
    )?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_crop_matches_box_dimensions() {
        let image = gradient_image(100, 80);
        let region = BoundingBox {
            top: 10,
            right: 60,
            bottom: 50,
            left: 20,
        };

        let crop = crop_to_box(&image, &region).unwrap();
        assert_eq!(crop.width(), 40);
        assert_eq!(crop.height(), 40);
    }

    #[test]
    fn test_empty_region_is_rejected() {
        let image = gradient_image(10, 10);
        let region = BoundingBox {
            top: 5,
            right: 5,
            bottom: 5,
            left: 5,
        };

        assert!(matches!(
            crop_to_box(&image, &region),
            Err(FaceCropError::EmptyRegion)
        ));
    }

    #[test]
    fn test_encoded_crop_decodes_back_with_same_dimensions() {
        let image = gradient_image(32, 24);
        let bytes = encode_jpeg(&image).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 24);
    }
}
