use std::path::Path;

use crate::error::DecodeError;
use crate::resource::face::{CubeFace, FaceImage, PixelFormat};

/// Decodes the fixed-named source image for `face` from `dir` into raw RGBA
/// bytes. PNG files decode as sRGB; 8-bit RGB input is expanded to RGBA, any
/// other layout is rejected.
pub fn decode_face(dir: &Path, face: CubeFace) -> Result<FaceImage, DecodeError> {
    let path = dir.join(face.source_file_name());
    let image = image::open(&path).map_err(|source| DecodeError::Image {
        path: path.clone(),
        source,
    })?;

    let rgba = match image {
        image::DynamicImage::ImageRgba8(rgba) => rgba,
        image::DynamicImage::ImageRgb8(rgb) => image::DynamicImage::ImageRgb8(rgb).to_rgba8(),
        other => {
            return Err(DecodeError::UnsupportedColor {
                path,
                color: other.color(),
            })
        }
    };

    let (width, height) = rgba.dimensions();
    Ok(FaceImage::new(
        face,
        width,
        height,
        PixelFormat::Rgba8UnormSrgb,
        rgba.into_raw(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rgba_png() {
        let dir = tempfile::tempdir().unwrap();
        let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        image
            .save(dir.path().join(CubeFace::PositiveX.source_file_name()))
            .unwrap();

        let face = decode_face(dir.path(), CubeFace::PositiveX).unwrap();
        assert_eq!(face.width, 4);
        assert_eq!(face.height, 4);
        assert_eq!(face.format, PixelFormat::Rgba8UnormSrgb);
        assert_eq!(face.data.len(), 4 * 4 * 4);
        assert_eq!(&face.data[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn expands_rgb_png_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let image = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        image
            .save(dir.path().join(CubeFace::NegativeY.source_file_name()))
            .unwrap();

        let face = decode_face(dir.path(), CubeFace::NegativeY).unwrap();
        assert_eq!(face.data.len(), 2 * 2 * 4);
        assert_eq!(&face.data[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rejects_sixteen_bit_png() {
        let dir = tempfile::tempdir().unwrap();
        let image: image::ImageBuffer<image::Rgba<u16>, Vec<u16>> =
            image::ImageBuffer::from_pixel(2, 2, image::Rgba([1000, 2000, 3000, 65535]));
        image
            .save(dir.path().join(CubeFace::PositiveZ.source_file_name()))
            .unwrap();

        let err = decode_face(dir.path(), CubeFace::PositiveZ).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedColor { .. }));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = decode_face(dir.path(), CubeFace::NegativeZ).unwrap_err();
        assert!(matches!(err, DecodeError::Image { .. }));
    }
}
