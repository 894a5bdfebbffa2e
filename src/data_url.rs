//! PNG data-URL codec.
//!
//! Renderers hand their output across as `data:image/png;base64,…`
//! strings; the capture sequence decodes them back to raw bytes.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Encode PNG bytes as a data URL.
pub fn encode_png(png_bytes: &[u8]) -> String {
    format!("{}{}", PNG_PREFIX, STANDARD.encode(png_bytes))
}

/// Decode a PNG data URL back to raw bytes.
pub fn decode(data_url: &str) -> Result<Vec<u8>, DataUrlError> {
    let encoded = data_url
        .strip_prefix(PNG_PREFIX)
        .ok_or(DataUrlError::NotAPngDataUrl)?;
    Ok(STANDARD.decode(encoded)?)
}

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("Expected a data:image/png;base64 URL")]
    NotAPngDataUrl,

    #[error("Invalid base64 image payload: {0}")]
    Base64(#[from] base64::DecodeError),
}
