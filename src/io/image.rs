//! Decoding, Lanczos resampling and JPEG export of pixel grids

use crate::io::error::{MosaicError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, ImageReader, Rgb};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// RGB pixel grid with 16 bits per channel
pub type Rgb16Image = ImageBuffer<Rgb<u16>, Vec<u16>>;

/// Open and decode an image, guessing the format from its contents
///
/// # Errors
///
/// Returns [`MosaicError::FileSystem`] if the file cannot be opened and
/// [`MosaicError::ImageLoad`] if its contents cannot be decoded
pub fn decode_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| MosaicError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source: e,
        })?;

    reader.decode().map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Decode an in-memory encoded image
///
/// # Errors
///
/// Returns [`MosaicError::ImageLoad`] if the bytes are not a supported image
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(MosaicError::from)?
        .decode()
        .map_err(MosaicError::from)
}

/// Open an image and widen it to 16-bit RGB
///
/// # Errors
///
/// Same conditions as [`decode_image`]
pub fn load_rgb16(path: &Path) -> Result<Rgb16Image> {
    decode_image(path).map(|image| image.to_rgb16())
}

/// Height that keeps the aspect ratio when `width × height` is scaled to `target_width`
///
/// Never returns zero for a non-empty source.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return 0;
    }
    let scaled = (f64::from(height) * f64::from(target_width) / f64::from(width)).round();
    (scaled as u32).max(1)
}

/// Resample an image to `target_width` with a Lanczos3 filter, preserving aspect ratio
pub fn resize_to_width(image: &DynamicImage, target_width: u32) -> Rgb16Image {
    let wide = image.to_rgb16();
    let target_height = scaled_height(wide.width(), wide.height(), target_width);
    imageops::resize(&wide, target_width, target_height, FilterType::Lanczos3)
}

/// Narrow to 8-bit RGB and encode as baseline JPEG
///
/// # Errors
///
/// Returns the encoder error if writing to `writer` fails
pub fn encode_jpeg<W: Write>(image: &Rgb16Image, quality: u8, writer: W) -> image::ImageResult<()> {
    let narrow = DynamicImage::ImageRgb16(image.clone()).to_rgb8();
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    encoder.encode_image(&narrow)
}

/// Write the image to `path` as a JPEG of the given quality
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The output file cannot be created
/// - Encoding or flushing the JPEG stream fails
pub fn save_jpeg(image: &Rgb16Image, path: &Path, quality: u8) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = File::create(path).map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "create output",
        source: e,
    })?;

    let mut writer = BufWriter::new(file);
    encode_jpeg(image, quality, &mut writer).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })?;

    writer.flush().map_err(|e| MosaicError::FileSystem {
        path: path.to_path_buf(),
        operation: "flush output",
        source: e,
    })
}
