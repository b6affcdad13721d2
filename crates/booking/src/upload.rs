//! Payment screenshot upload (legacy path).
//!
//! Older course pages collected a payment screenshot instead of a gateway
//! receipt. That flow still accepts a `data:` URL from the client, pushes
//! the payload to object storage, and records the returned public URL on
//! the booking's form data. Not on the current booking path.

use async_trait::async_trait;

use sarathi_core::error::CoreError;

/// Upper bound on an accepted data URL, base64 inflation included.
pub const MAX_DATA_URL_BYTES: usize = 8 * 1024 * 1024;

/// Screenshot content types the admin review screen can display.
const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

/// A parsed screenshot data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotPayload<'a> {
    pub mime_type: &'a str,
    /// Raw base64 payload, not decoded here; object storage consumes it
    /// as-is.
    pub base64_data: &'a str,
}

/// External object-storage boundary: stores a screenshot payload and
/// returns its public URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn store_screenshot(
        &self,
        mime_type: &str,
        base64_data: &str,
    ) -> Result<String, CoreError>;
}

/// Parse and bound-check a `data:{mime};base64,{payload}` URL.
pub fn parse_data_url(url: &str) -> Result<ScreenshotPayload<'_>, CoreError> {
    if url.len() > MAX_DATA_URL_BYTES {
        return Err(CoreError::Validation(format!(
            "Screenshot exceeds the {MAX_DATA_URL_BYTES} byte limit"
        )));
    }

    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| CoreError::Validation("Screenshot must be a data URL".to_string()))?;

    let (mime_type, base64_data) = rest.split_once(";base64,").ok_or_else(|| {
        CoreError::Validation("Screenshot data URL must carry a base64 payload".to_string())
    })?;

    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(CoreError::Validation(format!(
            "Screenshot content type '{mime_type}' is not supported. Must be one of: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    if base64_data.is_empty() {
        return Err(CoreError::Validation(
            "Screenshot data URL has an empty payload".to_string(),
        ));
    }
    if !base64_data
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
    {
        return Err(CoreError::Validation(
            "Screenshot payload is not valid base64".to_string(),
        ));
    }

    Ok(ScreenshotPayload {
        mime_type,
        base64_data,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
