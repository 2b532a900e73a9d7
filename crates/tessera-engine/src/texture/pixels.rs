use std::borrow::Cow;

use image::RgbaImage;

use super::{padded_dimension, TextureError};

/// RGBA8 pixels on a power-of-two canvas, image in the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedImage {
    pub width: u32,
    pub height: u32,
    pub pow_width: u32,
    pub pow_height: u32,
    pub rgba: Vec<u8>,
}

/// Returns RGBA8 pixels for a `width`×`height` buffer.
///
/// Buffers with fewer than `width * height` RGBA pixels are read as tightly
/// packed RGB and expanded with opaque alpha.
pub fn expand_to_rgba(data: &[u8], width: u32, height: u32) -> Result<Cow<'_, [u8]>, TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyDimensions { width, height });
    }

    let pixels = width as usize * height as usize;
    if data.len() / 4 >= pixels {
        return Ok(Cow::Borrowed(&data[..pixels * 4]));
    }

    if data.len() < pixels * 3 {
        return Err(TextureError::DataTooShort {
            expected: pixels * 3,
            actual: data.len(),
        });
    }

    let mut rgba = Vec::with_capacity(pixels * 4);
    for px in data.chunks_exact(3).take(pixels) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    Ok(Cow::Owned(rgba))
}

/// Copies `image` onto a zero-filled canvas padded with [`padded_dimension`].
pub fn pad_to_power_of_two(image: &RgbaImage) -> Result<PaddedImage, TextureError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyDimensions { width, height });
    }

    let pow_width = padded_dimension(width);
    let pow_height = padded_dimension(height);

    let src_row = width as usize * 4;
    let dst_row = pow_width as usize * 4;
    let mut rgba = vec![0u8; dst_row * pow_height as usize];

    for (y, row) in image.as_raw().chunks_exact(src_row).enumerate() {
        let start = y * dst_row;
        rgba[start..start + src_row].copy_from_slice(row);
    }

    Ok(PaddedImage {
        width,
        height,
        pow_width,
        pow_height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── expand_to_rgba ────────────────────────────────────────────────────

    #[test]
    fn rgba_input_is_borrowed() {
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = expand_to_rgba(&data, 2, 1).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(&*out, &data);
    }

    #[test]
    fn rgb_input_gains_opaque_alpha() {
        let out = expand_to_rgba(&[255, 255, 255], 1, 1).unwrap();
        assert_eq!(&*out, &[255, 255, 255, 255]);

        let out = expand_to_rgba(&[1, 2, 3, 4, 5, 6], 2, 1).unwrap();
        assert_eq!(&*out, &[1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn short_data_is_rejected() {
        let err = expand_to_rgba(&[0; 5], 2, 1).unwrap_err();
        assert_eq!(err, TextureError::DataTooShort { expected: 6, actual: 5 });
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            expand_to_rgba(&[], 0, 4),
            Err(TextureError::EmptyDimensions { width: 0, height: 4 })
        ));
    }

    // ── pad_to_power_of_two ───────────────────────────────────────────────

    #[test]
    fn padding_places_image_top_left() {
        let image = RgbaImage::from_pixel(5, 3, image::Rgba([9, 8, 7, 6]));
        let padded = pad_to_power_of_two(&image).unwrap();

        assert_eq!((padded.width, padded.height), (5, 3));
        assert_eq!((padded.pow_width, padded.pow_height), (8, 4));
        assert_eq!(padded.rgba.len(), 8 * 4 * 4);

        let px = |x: usize, y: usize| &padded.rgba[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
        assert_eq!(px(0, 0), &[9, 8, 7, 6]);
        assert_eq!(px(4, 2), &[9, 8, 7, 6]);
        assert_eq!(px(5, 0), &[0, 0, 0, 0]);
        assert_eq!(px(0, 3), &[0, 0, 0, 0]);
    }
}
