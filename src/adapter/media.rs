use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{GenericImageView, ImageOutputFormat};
use tracing::info;

use crate::error::AdapterError;
use crate::models::MediaBlob;

/// Files above this size are downscaled before being sent inline.
pub const MAX_INLINE_BYTES: usize = 3_500_000;

const THUMBNAIL_EDGE: u32 = 2048;
const JPEG_QUALITY: u8 = 80;

/// Everything after the first comma of a data URL.
pub fn strip_data_url_prefix(data_url: &str) -> Option<&str> {
    data_url.split_once(',').map(|(_, payload)| payload)
}

/// MIME type declared in a `data:<mime>;base64,` header, if any.
fn data_url_mime(data_url: &str) -> Option<&str> {
    let (header, _) = data_url.split_once(',')?;
    let mime = header.strip_prefix("data:")?.split(';').next()?.trim();
    (!mime.is_empty()).then_some(mime)
}

impl MediaBlob {
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Accept a browser data URL. An explicit `declared_mime` wins over the
    /// one in the URL header; the payload is passed through as-is.
    pub fn from_data_url(data_url: &str, declared_mime: Option<&str>) -> Result<Self, AdapterError> {
        let payload = strip_data_url_prefix(data_url)
            .ok_or_else(|| AdapterError::InvalidMedia("expected a data URL".to_string()))?;

        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| AdapterError::InvalidMedia(format!("payload is not base64: {}", e)))?;

        let mime_type = declared_mime
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| data_url_mime(data_url))
            .ok_or_else(|| AdapterError::InvalidMedia("missing MIME type".to_string()))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        })
    }

    /// Read an image file, sniff its format and shrink it when oversized.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let bytes = tokio::fs::read(path.as_ref()).await?;

        let format = image::guess_format(&bytes)
            .map_err(|e| AdapterError::InvalidMedia(format!("unrecognized image format: {}", e)))?;

        Self::from_bytes(format.to_mime_type(), &bytes)
            .shrink_if_oversized()
            .await
    }

    /// Re-encode as a downscaled JPEG when the decoded payload is larger than
    /// [`MAX_INLINE_BYTES`]; otherwise return the blob untouched.
    pub async fn shrink_if_oversized(self) -> Result<Self, AdapterError> {
        let bytes = general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| AdapterError::InvalidMedia(format!("payload is not base64: {}", e)))?;

        if bytes.len() <= MAX_INLINE_BYTES {
            return Ok(self);
        }

        let shrunk = tokio::task::spawn_blocking(move || compress(&bytes))
            .await
            .map_err(|e| AdapterError::InvalidMedia(format!("compression task failed: {}", e)))??;

        Ok(Self::from_bytes("image/jpeg", &shrunk))
    }
}

/// Downscale to fit a 2048px box and re-encode as JPEG.
fn compress(bytes: &[u8]) -> Result<Vec<u8>, AdapterError> {
    info!(size_mb = bytes.len() as f64 / 1_000_000.0, "🔄 Compressing image...");

    let img = image::load_from_memory(bytes)
        .map_err(|e| AdapterError::InvalidMedia(format!("decode error: {}", e)))?;

    // thumbnail() also scales up, so only call it for images past the edge.
    let (width, height) = img.dimensions();
    let img = if width > THUMBNAIL_EDGE || height > THUMBNAIL_EDGE {
        img.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE)
    } else {
        img
    };
    let rgb = image::DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(|e| AdapterError::InvalidMedia(format!("compress error: {}", e)))?;

    Ok(buf)
}

/// Random-noise PNG big enough to cross [`MAX_INLINE_BYTES`].
#[cfg(test)]
pub(crate) fn oversized_png() -> Vec<u8> {
    // Low-amplitude noise: incompressible enough for PNG, cheap for JPEG.
    let (width, height) = (1600u32, 1600u32);
    let mut state: u32 = 0x2545_f491;
    let pixels: Vec<u8> = (0..width * height * 3)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            96 + (state >> 27) as u8
        })
        .collect();

    let img = image::RgbImage::from_raw(width, height, pixels).unwrap();
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .unwrap();
    assert!(png.len() > MAX_INLINE_BYTES);
    png
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_BASE64: &str =
        "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn test_strip_prefix_regardless_of_mime() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,QUJD"), Some("QUJD"));
        assert_eq!(strip_data_url_prefix("data:image/heic;base64,QUJD"), Some("QUJD"));
        assert_eq!(strip_data_url_prefix("data:;base64,QUJD"), Some("QUJD"));
        assert_eq!(strip_data_url_prefix("QUJD"), None);
    }

    #[test]
    fn test_from_data_url_mime_resolution() {
        let url = format!("data:image/png;base64,{}", PNG_BASE64);

        let from_header = MediaBlob::from_data_url(&url, None).unwrap();
        assert_eq!(from_header.mime_type, "image/png");
        assert_eq!(from_header.data, PNG_BASE64);

        let declared = MediaBlob::from_data_url(&url, Some("image/webp")).unwrap();
        assert_eq!(declared.mime_type, "image/webp");
        assert_eq!(declared.data, PNG_BASE64);
    }

    #[test]
    fn test_from_data_url_rejects_bad_input() {
        assert!(matches!(
            MediaBlob::from_data_url("no comma here", Some("image/png")),
            Err(AdapterError::InvalidMedia(_))
        ));
        assert!(matches!(
            MediaBlob::from_data_url("data:image/png;base64,@@@", None),
            Err(AdapterError::InvalidMedia(_))
        ));
        assert!(matches!(
            MediaBlob::from_data_url(&format!("data:;base64,{}", PNG_BASE64), None),
            Err(AdapterError::InvalidMedia(_))
        ));
    }

    #[test]
    fn test_from_bytes_encodes_standard_base64() {
        let blob = MediaBlob::from_bytes("image/png", b"ABC");
        assert_eq!(blob.data, "QUJD");
        assert_eq!(blob.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_from_path_sniffs_png() {
        let bytes = general_purpose::STANDARD.decode(PNG_BASE64).unwrap();
        let path = std::env::temp_dir().join(format!("pe-assistant-media-{}.bin", std::process::id()));
        tokio::fs::write(&path, &bytes).await.unwrap();

        let blob = MediaBlob::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.data, PNG_BASE64);
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = MediaBlob::from_path("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(err, AdapterError::Io(_)));
    }

    #[tokio::test]
    async fn test_from_path_shrinks_oversized_file() {
        let png = oversized_png();
        let path = std::env::temp_dir().join(format!("pe-assistant-large-{}.png", std::process::id()));
        tokio::fs::write(&path, &png).await.unwrap();

        let blob = MediaBlob::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        let bytes = general_purpose::STANDARD.decode(&blob.data).unwrap();
        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
        assert!(bytes.len() < png.len());
    }

    #[tokio::test]
    async fn test_shrink_leaves_small_payload_untouched() {
        let url = format!("data:image/png;base64,{}", PNG_BASE64);
        let blob = MediaBlob::from_data_url(&url, None).unwrap();
        assert_eq!(blob.clone().shrink_if_oversized().await.unwrap(), blob);
    }

    #[test]
    fn test_compress_keeps_small_dimensions() {
        let img = image::DynamicImage::new_rgb8(4, 4);
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png).unwrap();

        let jpeg = compress(&png).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (4, 4));
    }

    #[test]
    fn test_compress_outputs_jpeg() {
        let img = image::DynamicImage::new_rgb8(4, 4);
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png).unwrap();

        let jpeg = compress(&png).unwrap();
        assert_eq!(image::guess_format(&jpeg).unwrap(), image::ImageFormat::Jpeg);
    }
}
