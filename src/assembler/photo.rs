use crate::error::ItemError;
use estimate_render_core::EncodedImage;
use estimate_types::Size;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ExtendedColorType, Rgb, RgbImage};
use std::sync::Arc;

/// A photo scaled and re-encoded for placement.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub image: Arc<EncodedImage>,
    /// Size on the page in points.
    pub size: Size,
}

/// Decodes `bytes`, scales the picture down to fit a `max_dimension` square
/// and re-encodes it as a baseline JPEG.
///
/// Transparent pixels are composited onto white since JPEG has no alpha.
/// This is CPU-bound; run it on the blocking pool.
pub fn prepare_image(
    bytes: &[u8],
    max_dimension: f32,
    quality: u8,
) -> Result<PreparedImage, ItemError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| ItemError::Decode(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(ItemError::Decode("image has no pixels".to_string()));
    }

    let size = Size::new(width as f32, height as f32).fit_within(max_dimension);
    let target_width = (size.width.round() as u32).max(1);
    let target_height = (size.height.round() as u32).max(1);
    let scaled = if (target_width, target_height) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_width, target_height, FilterType::Triangle)
    };

    let rgb = flatten_onto_white(&scaled.to_rgba8());
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
        .map_err(|e| ItemError::Decode(format!("JPEG encoding failed: {}", e)))?;

    Ok(PreparedImage {
        image: Arc::new(EncodedImage {
            pixel_width: rgb.width(),
            pixel_height: rgb.height(),
            jpeg,
        }),
        size,
    })
}

fn flatten_onto_white(rgba: &image::RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as u16;
        let blend = |c: u8| ((c as u16 * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
