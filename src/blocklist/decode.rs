//! Payload decoding.
//!
//! The published gfwlist is base64 text wrapped at 64 columns. Local lists
//! are usually plain text.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;

/// Encoding of a raw list payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListEncoding {
    /// Standard base64; whitespace between characters is ignored.
    #[default]
    Base64,
    /// UTF-8 text.
    Plain,
}

/// Error type for payload decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode a raw payload into list text.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the payload is not valid base64 (for
/// [`ListEncoding::Base64`]) or the result is not UTF-8.
///
/// # Example
///
/// ```
/// use gfwlist::blocklist::decode::{ListEncoding, decode};
///
/// let text = decode(b"fHxleGFt\ncGxlLmNvbQo=\n", ListEncoding::Base64).unwrap();
/// assert_eq!(text, "||example.com\n");
/// ```
pub fn decode(payload: &[u8], encoding: ListEncoding) -> Result<String, DecodeError> {
    let bytes = match encoding {
        ListEncoding::Base64 => {
            let compact: Vec<u8> = payload
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect();
            STANDARD.decode(compact)?
        }
        ListEncoding::Plain => payload.to_vec(),
    };

    Ok(String::from_utf8(bytes)?)
}
