//! Logo handling: image files in, `data:` URLs out, and back again.

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;

#[derive(Debug)]
pub enum MediaError {
    Read(std::io::Error),
    Decode(image::ImageError),
    Encode(image::ImageError),
    NotADataUrl,
    Base64(base64::DecodeError),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Read(e) => write!(f, "cannot read image: {e}"),
            MediaError::Decode(e) => write!(f, "cannot decode image: {e}"),
            MediaError::Encode(e) => write!(f, "cannot re-encode image: {e}"),
            MediaError::NotADataUrl => write!(f, "not a base64 data URL"),
            MediaError::Base64(e) => write!(f, "bad base64 payload: {e}"),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<std::io::Error> for MediaError {
    fn from(err: std::io::Error) -> Self {
        MediaError::Read(err)
    }
}

impl From<base64::DecodeError> for MediaError {
    fn from(err: base64::DecodeError) -> Self {
        MediaError::Base64(err)
    }
}

/// Read an image file and re-encode it as a JPEG data URL.
///
/// `quality` is a 0-1 fraction mapped onto the JPEG quality scale. Alpha is
/// flattened since JPEG has no transparency.
pub fn to_data_url(path: &Path, quality: f32) -> Result<String, MediaError> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes).map_err(MediaError::Decode)?;
    let quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode_image(&decoded.to_rgb8())
        .map_err(MediaError::Encode)?;
    tracing::debug!(
        source = %path.display(),
        raw_bytes = bytes.len(),
        jpeg_bytes = jpeg.len(),
        quality,
        "logo encoded"
    );
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(&jpeg)))
}

/// Recover the raw image bytes from a data URL, for raster compositing.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, MediaError> {
    if !url.starts_with("data:") {
        return Err(MediaError::NotADataUrl);
    }
    let (_, payload) = url.split_once(";base64,").ok_or(MediaError::NotADataUrl)?;
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample_png() -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = RgbaImage::from_pixel(12, 12, Rgba([200, 40, 40, 255]));
        img.save(file.path()).unwrap();
        file
    }

    #[test]
    fn encodes_a_png_file_as_jpeg_data_url() {
        let file = sample_png();
        let url = to_data_url(file.path(), 1.0).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn data_url_round_trips_to_a_decodable_image() {
        let file = sample_png();
        let url = to_data_url(file.path(), 0.9).unwrap();
        let bytes = decode_data_url(&url).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.width(), 12);
        assert_eq!(img.height(), 12);
    }

    #[test]
    fn missing_file_reports_read_error() {
        let err = to_data_url(Path::new("/no/such/logo.png"), 1.0).unwrap_err();
        assert!(matches!(err, MediaError::Read(_)));
    }

    #[test]
    fn non_image_bytes_report_decode_error() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        std::fs::write(file.path(), b"definitely not a png").unwrap();
        let err = to_data_url(file.path(), 1.0).unwrap_err();
        assert!(matches!(err, MediaError::Decode(_)));
    }

    #[test]
    fn rejects_plain_strings_as_data_urls() {
        assert!(matches!(decode_data_url("hello"), Err(MediaError::NotADataUrl)));
        assert!(matches!(
            decode_data_url("data:image/jpeg,raw"),
            Err(MediaError::NotADataUrl)
        ));
    }

    #[test]
    fn rejects_corrupt_base64() {
        let err = decode_data_url("data:image/jpeg;base64,!!!").unwrap_err();
        assert!(matches!(err, MediaError::Base64(_)));
    }
}
