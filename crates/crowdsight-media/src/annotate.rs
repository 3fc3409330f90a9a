//! Bounding-box overlay rendering.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::debug;

use crowdsight_models::{Detection, PixelRect};

use crate::error::{MediaError, MediaResult};

/// Overlay stroke color.
const BOX_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Overlay stroke width in pixels.
const BOX_STROKE: i64 = 2;

/// Decode raster image bytes into a drawable RGBA image.
pub fn decode_image(bytes: &[u8]) -> MediaResult<RgbaImage> {
    let img = image::load_from_memory(bytes).map_err(MediaError::Decode)?;
    Ok(img.to_rgba8())
}

/// Draw a hollow rectangle onto the image for every detection.
///
/// Normalized box coordinates are scaled to pixel space and clamped to the
/// image bounds. The stroke is drawn as nested one-pixel rectangles.
pub fn annotate_detections(image: &mut RgbaImage, detections: &[Detection]) {
    let (width, height) = image.dimensions();
    for detection in detections {
        let rect = detection.bounding_box.to_pixel_rect(width, height);
        draw_box(image, rect);
    }
    debug!(count = detections.len(), "annotated detections");
}

fn draw_box(image: &mut RgbaImage, rect: PixelRect) {
    let (img_w, img_h) = image.dimensions();

    let left = rect.left.round().max(0.0) as i64;
    let top = rect.top.round().max(0.0) as i64;
    let right = (rect.right.round() as i64).min(img_w as i64);
    let bottom = (rect.bottom.round() as i64).min(img_h as i64);

    for inset in 0..BOX_STROKE {
        let w = right - left - 2 * inset;
        let h = bottom - top - 2 * inset;
        if w <= 0 || h <= 0 {
            break;
        }
        let outline =
            Rect::at((left + inset) as i32, (top + inset) as i32).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(image, outline, BOX_COLOR);
    }
}
