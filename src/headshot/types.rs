//! Core types for headshot generation.

use crate::error::{HeadshotError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum accepted upload size in bytes (10 MiB).
///
/// The Gemini API caps inline request payloads around 20 MB; rejecting
/// oversized files here keeps the failure local and immediate instead of
/// burning a network round-trip on a guaranteed rejection.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Supported image formats for uploads and generated results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG format (lossless).
    #[default]
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format (modern, efficient).
    WebP,
}

impl ImageFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }

    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Attempts to detect format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Attempts to match a MIME type string.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// The user-selected headshot style.
///
/// Mirrors the two options the product offers: male subjects get a business
/// suit composited in, female subjects keep their own clothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadshotStyle {
    /// Add a dark business suit with shirt and tie.
    Male,
    /// Keep the subject's existing clothing.
    Female,
}

impl HeadshotStyle {
    /// Returns the style as a short identifier (e.g., "male").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Returns the user-facing label for this style.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male (Add Suit)",
            Self::Female => "Female (Keep Clothes)",
        }
    }

    /// Builds the generation prompt sent alongside the uploaded photo.
    pub fn prompt(&self) -> String {
        let wardrobe = match self {
            Self::Male => {
                "Dress the person in a dark, well-tailored business suit with a \
                 collared shirt and tie."
            }
            Self::Female => "Keep the person's existing clothing exactly as it is.",
        };
        format!(
            "Transform this photo into a polished, studio-quality professional \
             headshot. {wardrobe} Preserve the person's face, identity, and \
             expression. Use soft studio lighting and a clean neutral \
             background, framed from the chest up."
        )
    }
}

impl std::fmt::Display for HeadshotStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-selected portrait photo, encoded and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Raw base64 payload (no data-URL prefix).
    pub data: String,
    /// MIME type detected from the file content.
    pub mime_type: String,
    /// Full data URL (`data:<mime>;base64,<payload>`) for display.
    pub data_url: String,
}

impl UploadedImage {
    /// Encodes raw image bytes into an upload.
    ///
    /// The format is detected from magic bytes; unknown formats and files
    /// over [`MAX_UPLOAD_BYTES`] are rejected before any encoding happens.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(HeadshotError::InvalidRequest(format!(
                "image is {} bytes, larger than the {} byte limit",
                bytes.len(),
                MAX_UPLOAD_BYTES
            )));
        }

        let format = ImageFormat::from_magic_bytes(bytes).ok_or_else(|| {
            HeadshotError::InvalidRequest(
                "unsupported image format (expected PNG, JPEG, or WebP)".into(),
            )
        })?;

        let data = base64::engine::general_purpose::STANDARD.encode(bytes);
        let mime_type = format.mime_type().to_string();
        let data_url = format!("data:{mime_type};base64,{data}");

        Ok(Self {
            data,
            mime_type,
            data_url,
        })
    }

    /// Reads and encodes an image file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the detected image format.
    pub fn format(&self) -> ImageFormat {
        // mime_type is only ever set from a detected format
        ImageFormat::from_mime_type(&self.mime_type).unwrap_or_default()
    }

    /// Decodes the upload back into its original bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        decode_base64_lenient(&self.data)
    }

    /// Returns the upload size in raw (decoded) bytes.
    pub fn size(&self) -> usize {
        // base64 expands 3 bytes to 4 chars; padding over-counts by at most 2
        let padding = self.data.bytes().rev().take_while(|&b| b == b'=').count();
        self.data.len() / 4 * 3 - padding
    }
}

/// Decodes a data URL (`data:<mime>;base64,<payload>`) back into bytes.
pub fn decode_data_url(data_url: &str) -> Result<Vec<u8>> {
    let payload = data_url.split_once(";base64,").map(|(_, p)| p).ok_or_else(|| {
        HeadshotError::Decode("not a base64 data URL (missing \";base64,\" marker)".into())
    })?;
    decode_base64_lenient(payload)
}

/// Decodes a base64 string that may be imperfectly formatted.
///
/// Payloads that have passed through display layers or clipboards often
/// arrive with embedded whitespace or stripped `=` padding, which strict
/// decoders reject. Normalizes both before decoding.
fn decode_base64_lenient(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&cleaned) {
        return Ok(data);
    }

    base64::engine::general_purpose::STANDARD_NO_PAD
        .decode(cleaned.trim_end_matches('='))
        .map_err(|e| HeadshotError::Decode(e.to_string()))
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A generated headshot with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated headshot should be saved or displayed"]
pub struct GeneratedHeadshot {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// Image format.
    pub format: ImageFormat,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedHeadshot {
    /// Creates a new generated headshot.
    pub fn new(data: Vec<u8>, format: ImageFormat, metadata: GenerationMetadata) -> Self {
        Self {
            data,
            format,
            metadata,
        }
    }

    /// Creates a generated headshot, detecting the format from magic bytes.
    pub fn from_bytes(data: Vec<u8>, metadata: GenerationMetadata) -> Result<Self> {
        let format = ImageFormat::from_magic_bytes(&data)
            .ok_or_else(|| HeadshotError::Decode("unknown image format".into()))?;
        Ok(Self::new(data, format, metadata))
    }

    /// Returns the size of the image data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Saves the headshot to the specified path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// Returns the headshot as a data URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            self.to_base64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"not an image"), None);
        assert_eq!(ImageFormat::from_magic_bytes(&[0xFF, 0xD8]), None);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::WebP));
        assert_eq!(ImageFormat::from_extension("gif"), None);
    }

    #[test]
    fn test_format_from_mime_type() {
        assert_eq!(
            ImageFormat::from_mime_type("image/jpeg"),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_mime_type("image/gif"), None);
    }

    #[test]
    fn test_upload_from_jpeg_bytes() {
        let upload = UploadedImage::from_bytes(&JPEG_MAGIC).unwrap();

        assert_eq!(upload.mime_type, "image/jpeg");
        assert!(upload.data_url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(upload.format(), ImageFormat::Jpeg);
        assert_eq!(upload.size(), JPEG_MAGIC.len());
    }

    #[test]
    fn test_upload_round_trip() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7]);

        let upload = UploadedImage::from_bytes(&bytes).unwrap();
        assert_eq!(upload.to_bytes().unwrap(), bytes);
        assert_eq!(decode_data_url(&upload.data_url).unwrap(), bytes);
    }

    #[test]
    fn test_upload_rejects_unknown_format() {
        let err = UploadedImage::from_bytes(b"plain text, not an image").unwrap_err();
        assert!(matches!(err, HeadshotError::InvalidRequest(_)));
    }

    #[test]
    fn test_upload_rejects_oversized_file() {
        let mut bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        bytes[..8].copy_from_slice(&PNG_MAGIC[..8]);

        let err = UploadedImage::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, HeadshotError::InvalidRequest(_)));
        assert!(err.to_string().contains("larger than"));
    }

    #[test]
    fn test_upload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.png");
        std::fs::write(&path, PNG_MAGIC).unwrap();

        let upload = UploadedImage::from_file(&path).unwrap();
        assert_eq!(upload.mime_type, "image/png");

        let missing = UploadedImage::from_file(dir.path().join("nope.png"));
        assert!(matches!(missing, Err(HeadshotError::Io(_))));
    }

    #[test]
    fn test_decode_data_url_rejects_non_data_url() {
        let err = decode_data_url("https://example.com/image.png").unwrap_err();
        assert!(matches!(err, HeadshotError::Decode(_)));
    }

    #[test]
    fn test_decode_base64_lenient() {
        // embedded newlines and stripped padding both decode
        assert_eq!(decode_base64_lenient("aGVs\nbG8=").unwrap(), b"hello");
        assert_eq!(decode_base64_lenient("aGVsbG8").unwrap(), b"hello");
        assert!(decode_base64_lenient("!!!").is_err());
    }

    #[test]
    fn test_style_labels_and_prompts() {
        assert_eq!(HeadshotStyle::Male.as_str(), "male");
        assert_eq!(HeadshotStyle::Female.as_str(), "female");
        assert_eq!(HeadshotStyle::Male.label(), "Male (Add Suit)");
        assert_eq!(HeadshotStyle::Female.label(), "Female (Keep Clothes)");

        assert!(HeadshotStyle::Male.prompt().contains("business suit"));
        assert!(HeadshotStyle::Female.prompt().contains("existing clothing"));
    }

    #[test]
    fn test_style_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&HeadshotStyle::Male).unwrap(),
            "\"male\""
        );
        let style: HeadshotStyle = serde_json::from_str("\"female\"").unwrap();
        assert_eq!(style, HeadshotStyle::Female);
    }

    #[test]
    fn test_generated_headshot_data_url() {
        let headshot =
            GeneratedHeadshot::from_bytes(PNG_MAGIC.to_vec(), GenerationMetadata::default())
                .unwrap();

        assert_eq!(headshot.format, ImageFormat::Png);
        assert!(headshot.to_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(
            decode_data_url(&headshot.to_data_url()).unwrap(),
            PNG_MAGIC.to_vec()
        );
    }

    #[test]
    fn test_generated_headshot_unknown_format() {
        let err =
            GeneratedHeadshot::from_bytes(b"garbage".to_vec(), GenerationMetadata::default())
                .unwrap_err();
        assert!(matches!(err, HeadshotError::Decode(_)));
    }

    #[test]
    fn test_generated_headshot_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ai-headshot.png");

        let headshot = GeneratedHeadshot::new(
            PNG_MAGIC.to_vec(),
            ImageFormat::Png,
            GenerationMetadata::default(),
        );
        headshot.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), PNG_MAGIC.to_vec());
    }
}
