use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use std::io::Cursor;

const CONTRAST: f32 = 1.5;
const MID_GRAY: f32 = 128.0;

/// Grayscale plus a fixed contrast boost around mid-gray, re-encoded as PNG.
pub fn prepare_for_ocr(image_data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let img = image::load_from_memory(image_data)?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut out = GrayImage::new(width, height);
    for (x, y, pixel) in rgb.enumerate_pixels() {
        out.put_pixel(x, y, Luma([boost(pixel[0], pixel[1], pixel[2])]));
    }

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(out).write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

fn boost(r: u8, g: u8, b: u8) -> u8 {
    let gray = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    ((gray - MID_GRAY) * CONTRAST + MID_GRAY)
        .clamp(0.0, 255.0)
        .round() as u8
}
