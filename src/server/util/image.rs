use base64::{engine::general_purpose::STANDARD, Engine};

use crate::server::error::validation::ValidationError;

/// Image formats accepted for recipe images, as `(extension, content type)`
const ALLOWED_FORMATS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpeg", "image/jpeg"),
    ("jpg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// A decoded recipe image ready to be stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Decode a `data:image/<ext>;base64,<payload>` URI.
///
/// # Returns
/// - `Ok(DecodedImage)` - Supported image format with a valid, non-empty payload
/// - `Err(ValidationError::InvalidImage)` - Anything else, including payloads over `max_bytes`
pub fn decode_data_uri(value: &str, max_bytes: usize) -> Result<DecodedImage, ValidationError> {
    let Some(rest) = value.strip_prefix("data:") else {
        return Err(ValidationError::InvalidImage(
            "expected a data URI starting with `data:`".to_string(),
        ));
    };

    let Some((media_type, payload)) = rest.split_once(";base64,") else {
        return Err(ValidationError::InvalidImage(
            "expected a base64 encoded data URI".to_string(),
        ));
    };

    let content_type = content_type_for(media_type)?;

    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| ValidationError::InvalidImage(format!("invalid base64 payload: {}", e)))?;

    check_size(&data, max_bytes)?;

    Ok(DecodedImage { content_type, data })
}

/// Validate an uploaded image and its declared content type.
pub fn from_upload(
    content_type: Option<&str>,
    data: Vec<u8>,
    max_bytes: usize,
) -> Result<DecodedImage, ValidationError> {
    let Some(content_type) = content_type else {
        return Err(ValidationError::InvalidImage(
            "upload is missing a content type".to_string(),
        ));
    };

    let content_type = content_type_for(content_type)?;
    check_size(&data, max_bytes)?;

    Ok(DecodedImage { content_type, data })
}

fn content_type_for(media_type: &str) -> Result<String, ValidationError> {
    let extension = media_type
        .strip_prefix("image/")
        .ok_or_else(|| ValidationError::InvalidImage(format!("`{}` is not an image", media_type)))?
        .to_ascii_lowercase();

    ALLOWED_FORMATS
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, content_type)| content_type.to_string())
        .ok_or_else(|| {
            ValidationError::InvalidImage(format!("unsupported image format `{}`", extension))
        })
}

fn check_size(data: &[u8], max_bytes: usize) -> Result<(), ValidationError> {
    if data.is_empty() {
        return Err(ValidationError::InvalidImage("image is empty".to_string()));
    }
    if data.len() > max_bytes {
        return Err(ValidationError::InvalidImage(format!(
            "image is {} bytes, the limit is {} bytes",
            data.len(),
            max_bytes
        )));
    }

    Ok(())
}
