use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use egui::{Pos2, Rect, Vec2};
use image::RgbaImage;
use log::info;

use crate::error::UploadError;

/// Uploaded images are scaled down to fit in this square on placement
pub const MAX_PLACED_IMAGE_SIZE: f32 = 200.0;

/// A decoded RGBA bitmap shared read-only between the scene and the surfaces.
#[derive(Clone)]
pub struct Bitmap {
    key: usize,
    pixels: Arc<RgbaImage>,
}

static NEXT_BITMAP_KEY: AtomicUsize = AtomicUsize::new(1);

// Custom Debug implementation since the pixel buffer is too large to print
impl std::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl Bitmap {
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            key: NEXT_BITMAP_KEY.fetch_add(1, Ordering::Relaxed),
            pixels: Arc::new(pixels),
        }
    }

    /// Decode an uploaded file, refusing anything whose mime type is not `image/*`
    pub fn from_upload(bytes: &[u8], mime: &str) -> Result<Self, UploadError> {
        if !mime.starts_with("image/") {
            return Err(UploadError::NotAnImage(mime.to_owned()));
        }
        Self::decode(bytes)
    }

    /// Decode an encoded image (PNG, JPEG, ...) into RGBA pixels
    pub fn decode(bytes: &[u8]) -> Result<Self, UploadError> {
        let decoded = image::load_from_memory(bytes)?.to_rgba8();
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(UploadError::Empty);
        }
        info!("Decoded bitmap {}x{}", decoded.width(), decoded.height());
        Ok(Self::new(decoded))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Identity of the shared pixel buffer, stable across clones and never reused
    pub fn key(&self) -> usize {
        self.key
    }
}

/// Placed bitmap. The element anchor is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub width: f32,
    pub height: f32,
    pub bitmap: Bitmap,
}

impl ImageElement {
    /// Wrap a bitmap, sized to fit within [`MAX_PLACED_IMAGE_SIZE`] at its own aspect ratio
    pub fn from_bitmap(bitmap: Bitmap) -> Self {
        let size = fit_within(
            Vec2::new(bitmap.width() as f32, bitmap.height() as f32),
            MAX_PLACED_IMAGE_SIZE,
        );
        Self {
            width: size.x,
            height: size.y,
            bitmap,
        }
    }

    pub fn rect(&self, anchor: Pos2) -> Rect {
        Rect::from_min_size(anchor, Vec2::new(self.width, self.height))
    }
}

/// Cap both sides at `max`, then shrink the longer relative side so the
/// result keeps the aspect ratio of `size`.
pub fn fit_within(size: Vec2, max: f32) -> Vec2 {
    let mut fitted = Vec2::new(size.x.min(max), size.y.min(max));
    if size.x <= 0.0 || size.y <= 0.0 {
        return fitted;
    }
    let aspect = size.x / size.y;
    if fitted.x / fitted.y > aspect {
        fitted.x = fitted.y * aspect;
    } else {
        fitted.y = fitted.x / aspect;
    }
    fitted
}
