use crate::ReportError;
use base64::Engine;
use image::{imageops::FilterType, DynamicImage, RgbaImage};

/// A decoded raster image, ready to be composited onto a page
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub image: RgbaImage,
}

impl RasterImage {
    /// Decode an image from its encoded bytes (PNG, JPEG, ...), guessing the format
    pub fn from_bytes(data: &[u8]) -> Result<RasterImage, ReportError> {
        let image = image::load_from_memory(data)?;
        Ok(RasterImage::from_dynamic(image))
    }

    /// Decode an image from a base64 string, as lookup responses embed photos
    pub fn from_base64(data: &str) -> Result<RasterImage, ReportError> {
        let bytes = base64::engine::general_purpose::STANDARD.decode(data.trim())?;
        RasterImage::from_bytes(&bytes)
    }

    pub fn from_dynamic(image: DynamicImage) -> RasterImage {
        RasterImage {
            image: image.to_rgba8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Scale the image up or down to the largest size that fits in `width` x `height`,
    /// preserving its aspect ratio
    pub fn resized_to_fit(&self, width: u32, height: u32) -> RasterImage {
        if self.width() == 0 || self.height() == 0 || width == 0 || height == 0 {
            return self.clone();
        }
        let scale = (width as f64 / self.width() as f64).min(height as f64 / self.height() as f64);
        let scaled = |side: u32| (side as f64 * scale).round().max(1.0) as u32;
        let (width, height) = (scaled(self.width()), scaled(self.height()));
        RasterImage {
            image: image::imageops::resize(&self.image, width, height, FilterType::Triangle),
        }
    }
}
