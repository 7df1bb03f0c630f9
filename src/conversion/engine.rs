//! Core conversion engine for JPEG to WebP transformation

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use tracing::{debug, warn};

use crate::conversion::config::ConverterConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

/// Largest width or height libwebp can encode
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// Result of one successful conversion
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub width: u32,
    pub height: u32,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub orientation: Orientation,
    pub elapsed: Duration,
}

/// Decodes one image, puts it upright and re-encodes it as lossy WebP
#[derive(Debug, Clone)]
pub struct ImageConverter {
    quality: u8,
    auto_orient: bool,
}

impl ImageConverter {
    /// Create a converter using the codec settings of `config`
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            quality: config.quality,
            auto_orient: config.auto_orient,
        }
    }

    /// Convert `source` into `destination`, replacing whatever is there.
    ///
    /// The destination only changes once the encoded image has been written
    /// completely; on failure it is left as it was.
    pub fn convert(&self, source: &Path, destination: &Path) -> ConversionResult<ConvertedImage> {
        let start = Instant::now();
        let input_bytes = fs::metadata(source)
            .map_err(|e| io_error("cannot stat source", source, e))?
            .len();

        let (image, orientation) = self.decode(source)?;
        let encoded = self.encode_for(&image, source)?;
        write_atomic(destination, &encoded)?;

        let converted = ConvertedImage {
            width: image.width(),
            height: image.height(),
            input_bytes,
            output_bytes: encoded.len() as u64,
            orientation,
            elapsed: start.elapsed(),
        };
        debug!(
            source = %source.display(),
            width = converted.width,
            height = converted.height,
            input_bytes,
            output_bytes = converted.output_bytes,
            elapsed_ms = converted.elapsed.as_millis() as u64,
            "encoded image"
        );
        Ok(converted)
    }

    /// Decode `source` and apply its EXIF orientation (unless disabled)
    pub fn decode_upright(&self, source: &Path) -> ConversionResult<DynamicImage> {
        self.decode(source).map(|(image, _)| image)
    }

    /// Encode an already upright image as lossy WebP at the configured quality
    pub fn encode(&self, image: &DynamicImage) -> ConversionResult<Vec<u8>> {
        self.encode_for(image, Path::new("<memory>"))
    }

    fn decode(&self, source: &Path) -> ConversionResult<(DynamicImage, Orientation)> {
        let reader = ImageReader::open(source)
            .map_err(|e| io_error("cannot open source", source, e))?
            .with_guessed_format()
            .map_err(|e| io_error("cannot read source", source, e))?;
        let mut decoder = reader
            .into_decoder()
            .map_err(|e| decode_error(source, e))?;

        let orientation = if self.auto_orient {
            decoder.orientation().unwrap_or_else(|e| {
                warn!(
                    source = %source.display(),
                    error = %e,
                    "ignoring unreadable orientation metadata"
                );
                Orientation::NoTransforms
            })
        } else {
            Orientation::NoTransforms
        };

        let mut image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(source, e))?;
        if orientation != Orientation::NoTransforms {
            debug!(source = %source.display(), ?orientation, "applying orientation");
            image.apply_orientation(orientation);
        }
        Ok((image, orientation))
    }

    fn encode_for(&self, image: &DynamicImage, source: &Path) -> ConversionResult<Vec<u8>> {
        let (width, height) = (image.width(), image.height());
        if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
            return Err(ConversionError::conversion(ConversionErrorKind::TooLarge {
                width,
                height,
                limit: WEBP_MAX_DIMENSION,
            }));
        }

        let quality = self.quality as f32;
        // libwebp takes packed 8-bit RGB or RGBA only.
        let encoded = if image.color().has_alpha() {
            let rgba = image.to_rgba8();
            webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
        } else {
            let rgb = image.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
        };

        encoded.map(|memory| memory.to_vec()).map_err(|e| {
            ConversionError::conversion(ConversionErrorKind::encode(format!("{:?}", e), source))
        })
    }
}

/// Write `bytes` to a temporary sibling of `destination` and rename it into place.
pub fn write_atomic(destination: &Path, bytes: &[u8]) -> ConversionResult<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".webpconv-").suffix(".tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| io_error("cannot create temporary file", destination, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| io_error("cannot write", destination, e))?;
    tmp.persist(destination)
        .map_err(|e| io_error("cannot move into place", destination, e.error))?;
    Ok(())
}

fn io_error(context: &str, path: &Path, e: std::io::Error) -> ConversionError {
    ConversionError::conversion_with_source(
        ConversionErrorKind::io(
            format!("{} {}", context, path.display()),
            Some(path.to_path_buf()),
        ),
        e.into(),
    )
}

fn decode_error(path: &Path, e: image::ImageError) -> ConversionError {
    ConversionError::conversion_with_source(
        ConversionErrorKind::decode("cannot decode image".to_string(), path),
        e.into(),
    )
}
