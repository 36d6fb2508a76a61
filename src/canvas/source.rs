use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{StoreError, StoreResult};

/// A decoded source image, normalized to straight-alpha RGBA8.
#[derive(Clone, Debug)]
pub struct SourceImage {
    rgba: RgbaImage,
}

impl SourceImage {
    /// Normalizes any color mode to RGBA; sources without alpha become fully opaque.
    pub fn from_dynamic(img: DynamicImage) -> StoreResult<Self> {
        Self::from_rgba(img.into_rgba8())
    }

    pub fn from_rgba(rgba: RgbaImage) -> StoreResult<Self> {
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(StoreError::image_decode(format!(
                "source image has zero area ({width}x{height})"
            )));
        }
        Ok(Self { rgba })
    }

    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| StoreError::image_decode(format!("decode image from memory: {e}")))?;
        Self::from_dynamic(img)
    }

    pub fn open(path: &Path) -> StoreResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            StoreError::image_decode(format!("read image '{}': {e}", path.display()))
        })?;
        let img = image::load_from_memory(&bytes).map_err(|e| {
            StoreError::image_decode(format!("decode image '{}': {e}", path.display()))
        })?;
        Self::from_dynamic(img)
    }

    pub fn width(&self) -> u32 {
        self.rgba.width()
    }

    pub fn height(&self) -> u32 {
        self.rgba.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.rgba.dimensions()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.rgba
    }
}
