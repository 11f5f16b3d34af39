use image::{DynamicImage, ImageOutputFormat, RgbImage, RgbaImage};
use pngdump::{decode, decode_header, decode_with, DecodeError, DecodeOptions, ZlibInflater};

fn encode(image: DynamicImage) -> Vec<u8> {
    let mut png_bytes = Vec::new();
    image.write_to(&mut png_bytes, ImageOutputFormat::Png).unwrap();
    png_bytes
}

fn rgba_png(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> (Vec<u8>, Vec<u8>) {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            rgba.extend_from_slice(&pixel(x, y));
        }
    }

    let image = RgbaImage::from_raw(width, height, rgba.clone()).unwrap();
    (encode(DynamicImage::ImageRgba8(image)), rgba)
}

fn drop_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4).flat_map(|pixel| pixel[..3].iter().copied()).collect()
}

fn assert_matches_reference(png_bytes: &[u8]) {
    let decoded = decode(png_bytes).unwrap();

    let comparison_image = image::load_from_memory(png_bytes).unwrap();
    let comparison_rgba8 = comparison_image.to_rgba8();
    assert_eq!(decoded.width(), comparison_rgba8.width());
    assert_eq!(decoded.height(), comparison_rgba8.height());

    let comparison_bytes = drop_alpha(comparison_rgba8.as_raw());
    assert_eq!(decoded.as_bytes().len(), comparison_bytes.len());

    for (idx, (test_byte, comparison_byte)) in
        decoded.as_bytes().iter().zip(comparison_bytes.iter()).enumerate()
    {
        assert_eq!(test_byte, comparison_byte, "incorrect byte at index {}", idx);
    }
}

#[test]
fn gradient_matches_reference_decoder() {
    let (png_bytes, rgba) =
        rgba_png(64, 48, |x, y| [(x * 4) as u8, (y * 5) as u8, ((x + y) * 2) as u8, 255]);

    assert_matches_reference(&png_bytes);
    assert_eq!(decode(&png_bytes).unwrap().as_bytes(), drop_alpha(&rgba).as_slice());
}

#[test]
fn noise_with_odd_dimensions_matches_reference_decoder() {
    let mut state = 0x1234_5678u32;
    let mut noise = Vec::new();
    for _ in 0..37 * 23 * 4 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
        noise.push((state >> 16) as u8);
    }

    let (png_bytes, rgba) = rgba_png(37, 23, |x, y| {
        let offset = ((y * 37 + x) * 4) as usize;
        [noise[offset], noise[offset + 1], noise[offset + 2], noise[offset + 3]]
    });

    assert_matches_reference(&png_bytes);
    assert_eq!(decode(&png_bytes).unwrap().into_bytes(), drop_alpha(&rgba));
}

#[test]
fn encoder_output_passes_crc_verification() {
    let (png_bytes, _) = rgba_png(16, 16, |x, y| [x as u8, y as u8, 0, 128]);
    let options = DecodeOptions { verify_checksums: true };

    assert!(decode_with(&png_bytes, &options, &ZlibInflater).is_ok());
}

#[test]
fn rgb_images_are_rejected() {
    let image = RgbImage::from_raw(2, 2, vec![0; 12]).unwrap();
    let png_bytes = encode(DynamicImage::ImageRgb8(image));

    assert_eq!(decode(&png_bytes), Err(DecodeError::UnsupportedColorModel(2)));
    assert_eq!(decode_header(&png_bytes), Err(DecodeError::UnsupportedColorModel(2)));
}

#[test]
fn header_describes_geometry() {
    let (png_bytes, _) = rgba_png(5, 3, |_, _| [1, 2, 3, 4]);
    let header = decode_header(&png_bytes).unwrap();

    assert_eq!((header.width, header.height), (5, 3));
    assert_eq!(header.bit_depth, 8);
    assert_eq!(header.color_model, 6);
    assert_eq!(header.scanline_stride(), Ok(5 * 4 + 1));
}

#[test]
fn ppm_dump_has_header_and_rows() {
    let (png_bytes, rgba) = rgba_png(3, 2, |x, y| [x as u8, y as u8, 7, 0]);
    let decoded = decode(&png_bytes).unwrap();

    let ppm = decoded.write_ppm(Vec::new()).unwrap();

    let mut expected = b"P6\n3 2\n255\n".to_vec();
    expected.extend_from_slice(&drop_alpha(&rgba));
    assert_eq!(ppm, expected);
}
