// Core structs: OfferRecord, SearchOutcome, ImagePayload and the error enums
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Mime type sent when nothing better is known about the image.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// One store's quote for the searched product.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRecord {
    pub store_name: String,
    /// Raw price text as the model wrote it.
    pub price: String,
    pub currency: String,
    pub url: String,
    pub notes: String,
    pub is_cheapest: bool,
}

/// Everything a single search produced.
///
/// An empty `offers` list is a valid outcome: the caller shows `raw_text` instead.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub offers: Vec<OfferRecord>,
    pub raw_text: String,
    /// Citation URIs, deduplicated, first-seen order.
    pub source_links: Vec<String>,
    pub searched_at: DateTime<Utc>,
}

/// Inline image part attached ahead of the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64 without any `data:` prefix.
    pub data: String,
}

impl ImagePayload {
    /// Wraps an already-encoded blob. The type is unknown, so JPEG is asserted.
    pub fn from_base64(data: impl Into<String>) -> Self {
        Self {
            mime_type: DEFAULT_IMAGE_MIME.to_string(),
            data: data.into(),
        }
    }

    /// Accepts `data:<mime>;base64,<payload>` as produced by browser file readers.
    pub fn from_data_url(url: &str) -> Result<Self, ImageError> {
        let rest = url.strip_prefix("data:").ok_or(ImageError::InvalidDataUrl)?;
        let (header, data) = rest.split_once(',').ok_or(ImageError::InvalidDataUrl)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(ImageError::InvalidDataUrl)?;
        if data.is_empty() {
            return Err(ImageError::InvalidDataUrl);
        }

        let mime_type = if mime.starts_with("image/") {
            mime.to_string()
        } else {
            DEFAULT_IMAGE_MIME.to_string()
        };
        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    /// Encodes raw image bytes, picking the mime type from the file signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        Ok(Self {
            mime_type: sniff_image_mime(bytes).to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ImageError> {
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }
}

fn sniff_image_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [_, _, _, _, b'f', b't', b'y', b'p', b'h', b'e', b'i', b'c', ..] => "image/heic",
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// What the orchestrator asks the collaborator for.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImagePayload>,
    pub web_search: bool,
}

/// What the collaborator hands back.
#[derive(Debug, Clone, Default)]
pub struct GenerationReply {
    pub text: String,
    /// Citation URIs in reply order; may contain duplicates.
    pub citation_uris: Vec<String>,
}

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API responded {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected Gemini response shape: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("neither a query nor an image was provided")]
    InputEmpty,

    #[error("external service error: {0}")]
    ExternalService(#[from] GeminiError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("type a product name or attach an image first")]
    InputEmpty,

    #[error("a search is already running")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("failed to read image {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image file is empty")]
    Empty,

    #[error("not a base64 data URL")]
    InvalidDataUrl,
}
