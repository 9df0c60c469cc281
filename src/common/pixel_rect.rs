use image::GenericImageView;
use serde::{Deserialize, Serialize};
use crate::common::NormalizedBox;

/// A rectangle in absolute pixel coordinates of a concrete image.
///
/// Values stay `f32` and are never rounded by the conversions; use the
/// `as_*` helpers when integer pixels are needed for drawing.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn as_xy_wh_i32(&self) -> (i32, i32, i32, i32) {
        (self.x.round() as i32,
         self.y.round() as i32,
         self.width.round() as i32,
         self.height.round() as i32)
    }

    pub fn as_x1y1_x2y2_i32(&self) -> (i32, i32, i32, i32) {
        (self.x.round() as i32,
         self.y.round() as i32,
         (self.x + self.width).round() as i32,
         (self.y + self.height).round() as i32)
    }
}

/// Scales a normalized box up to an image of `image_width` x `image_height` pixels.
pub fn to_pixels(bbox: &NormalizedBox, image_width: f32, image_height: f32) -> PixelRect {
    PixelRect {
        x: bbox.x() * image_width,
        y: bbox.y() * image_height,
        width: bbox.width() * image_width,
        height: bbox.height() * image_height,
    }
}

/// Same as [`to_pixels`], taking the size from an `image` crate image.
pub fn to_pixels_in<I: GenericImageView>(bbox: &NormalizedBox, image: &I) -> PixelRect {
    let (width, height) = image.dimensions();
    to_pixels(bbox, width as f32, height as f32)
}

/// Normalizes a pixel rectangle against the image size.
///
/// A zero or negative image dimension yields the empty box at the origin
/// instead of dividing by zero. The result is clamped to the unit frame.
pub fn from_pixels(rect: &PixelRect, image_width: f32, image_height: f32) -> NormalizedBox {
    if image_width <= 0. || image_height <= 0. {
        return NormalizedBox::default();
    }
    NormalizedBox::new(
        rect.x / image_width,
        rect.y / image_height,
        rect.width / image_width,
        rect.height / image_height,
    )
}

impl NormalizedBox {
    pub fn to_pixels(&self, image_width: f32, image_height: f32) -> PixelRect {
        to_pixels(self, image_width, image_height)
    }

    pub fn from_pixels(rect: &PixelRect, image_width: f32, image_height: f32) -> Self {
        from_pixels(rect, image_width, image_height)
    }
}
