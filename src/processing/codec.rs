//! Codec adapter: decoding and encoding image files
//!
//! Thin boundary over the `image` crate (and libheif for HEIC/HEIF when the
//! `heif` feature is enabled). The rest of the pipeline treats decode and
//! encode as opaque, format-aware operations.

use std::path::Path;

use image::DynamicImage;
use tracing::debug;

use crate::config::OutputFormat;
use crate::error::{BatchError, Result};

/// Encoded container formats this tool can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
}

impl EncodeFormat {
    /// Determine the encode format mirroring a file's extension
    ///
    /// HEIC/HEIF and unrecognized extensions fall back to JPEG.
    pub fn from_extension(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Self::Png,
            "bmp" => Self::Bmp,
            "tiff" | "tif" => Self::Tiff,
            _ => Self::Jpeg,
        }
    }
}

impl From<OutputFormat> for EncodeFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Jpeg => Self::Jpeg,
            OutputFormat::Png => Self::Png,
        }
    }
}

/// Check whether a path points at a HEIC/HEIF container
pub fn is_heic_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("heic") || ext.eq_ignore_ascii_case("heif"))
        .unwrap_or(false)
}

/// Decode an image file into an in-memory raster image
///
/// This is a blocking call; run it on a blocking-capable thread.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    if is_heic_path(path) {
        return decode_heif(path);
    }

    image::open(path).map_err(|e| BatchError::decode(e.to_string(), path.to_path_buf()))
}

/// Encode a raster image to `path` in the given format and quality
///
/// Quality only applies to lossy formats; PNG, BMP, and TIFF ignore it.
/// This is a blocking call; run it on a blocking-capable thread.
pub fn encode(image: &DynamicImage, path: &Path, format: EncodeFormat, quality: u8) -> Result<()> {
    debug!("Encoding {:?} as {:?} (quality {})", path, format, quality);

    match format {
        EncodeFormat::Jpeg => {
            let mut output = std::fs::File::create(path)
                .map_err(|e| BatchError::encode(e.to_string(), path.to_path_buf()))?;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut output, quality);
            // JPEG cannot carry an alpha channel
            image
                .to_rgb8()
                .write_with_encoder(encoder)
                .map_err(|e| BatchError::encode(e.to_string(), path.to_path_buf()))
        }
        EncodeFormat::Png => image
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| BatchError::encode(e.to_string(), path.to_path_buf())),
        EncodeFormat::Bmp => image
            .save_with_format(path, image::ImageFormat::Bmp)
            .map_err(|e| BatchError::encode(e.to_string(), path.to_path_buf())),
        EncodeFormat::Tiff => image
            .save_with_format(path, image::ImageFormat::Tiff)
            .map_err(|e| BatchError::encode(e.to_string(), path.to_path_buf())),
    }
}

#[cfg(feature = "heif")]
fn decode_heif(path: &Path) -> Result<DynamicImage> {
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let decode_err = |message: String| BatchError::decode(message, path.to_path_buf());

    let path_str = path
        .to_str()
        .ok_or_else(|| decode_err("non-UTF-8 path".to_string()))?;

    let lib_heif = LibHeif::new();
    let ctx = HeifContext::read_from_file(path_str).map_err(|e| decode_err(e.to_string()))?;
    let handle = ctx
        .primary_image_handle()
        .map_err(|e| decode_err(e.to_string()))?;
    let decoded = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| decode_err(e.to_string()))?;

    let planes = decoded.planes();
    let interleaved = planes
        .interleaved
        .ok_or_else(|| decode_err("missing interleaved RGB plane".to_string()))?;

    let width = interleaved.width;
    let height = interleaved.height;
    let stride = interleaved.stride;

    // Rows may be padded to the stride; copy them out tightly
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for row in interleaved.data.chunks(stride).take(height as usize) {
        pixels.extend_from_slice(&row[..width as usize * 3]);
    }

    let buffer = image::RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| decode_err("decoded pixel buffer has unexpected size".to_string()))?;

    Ok(DynamicImage::ImageRgb8(buffer))
}

#[cfg(not(feature = "heif"))]
fn decode_heif(path: &Path) -> Result<DynamicImage> {
    Err(BatchError::decode(
        "HEIC support not compiled in; rebuild with the `heif` feature".to_string(),
        path.to_path_buf(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_format_from_extension() {
        let cases = [
            ("test.jpg", EncodeFormat::Jpeg),
            ("test.jpeg", EncodeFormat::Jpeg),
            ("test.JPG", EncodeFormat::Jpeg),
            ("test.png", EncodeFormat::Png),
            ("test.PNG", EncodeFormat::Png),
            ("test.bmp", EncodeFormat::Bmp),
            ("test.tiff", EncodeFormat::Tiff),
            ("test.tif", EncodeFormat::Tiff),
            ("test.heic", EncodeFormat::Jpeg),
            ("test.heif", EncodeFormat::Jpeg),
            ("test.unknown", EncodeFormat::Jpeg),
            ("test", EncodeFormat::Jpeg),
        ];

        for (name, expected) in cases {
            assert_eq!(
                EncodeFormat::from_extension(Path::new(name)),
                expected,
                "extension mapping for {name}"
            );
        }
    }

    #[test]
    fn test_encode_format_from_output_format() {
        assert_eq!(EncodeFormat::from(OutputFormat::Jpeg), EncodeFormat::Jpeg);
        assert_eq!(EncodeFormat::from(OutputFormat::Png), EncodeFormat::Png);
    }

    #[test]
    fn test_is_heic_path() {
        assert!(is_heic_path(Path::new("photo.heic")));
        assert!(is_heic_path(Path::new("photo.HEIF")));
        assert!(!is_heic_path(Path::new("photo.jpg")));
        assert!(!is_heic_path(Path::new("photo")));
    }

    #[test]
    fn test_decode_missing_file_is_decode_error() {
        let result = decode(Path::new("/no/such/image.jpg"));
        assert!(matches!(result, Err(BatchError::Decode { .. })));
    }

    #[cfg(not(feature = "heif"))]
    #[test]
    fn test_heic_decode_fails_without_feature() {
        let result = decode(Path::new("photo.heic"));
        assert!(matches!(result, Err(BatchError::Decode { .. })));
    }

    #[test]
    fn test_encode_decode_jpeg_and_png() {
        let dir = TempDir::new().unwrap();
        let image = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            8,
            4,
            image::Rgb([200, 100, 50]),
        ));

        let jpg_path = dir.path().join("out.jpg");
        encode(&image, &jpg_path, EncodeFormat::Jpeg, 90).unwrap();
        let reloaded = decode(&jpg_path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (8, 4));

        let png_path = dir.path().join("out.png");
        encode(&image, &png_path, EncodeFormat::Png, 90).unwrap();
        let reloaded = decode(&png_path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (8, 4));
    }
}
