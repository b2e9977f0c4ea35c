//! URL transfer form of the block sequence.
//!
//! A shareable link embeds the full serialized sequence (including any
//! image data URIs) as a URL-safe base64 payload in the `data` query
//! parameter. The payload is consumed once at session start, and only
//! when the durable slot yields an empty sequence.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use url::Url;

use crate::block::Block;
use crate::error::{CanvasError, CanvasResult};

/// Query parameter carrying the transfer payload.
pub const TRANSFER_PARAM: &str = "data";

/// Encode the block sequence into a URL-safe payload string.
///
/// Embedded image data URIs are carried verbatim, so payloads can get
/// very large; the byte length is logged for visibility, but no size
/// guard is applied.
///
/// # Errors
///
/// Returns [`CanvasError::Serialization`] if the sequence cannot be
/// serialized.
pub fn encode(blocks: &[Block]) -> CanvasResult<String> {
    let json = serde_json::to_vec(blocks)?;
    let payload = URL_SAFE_NO_PAD.encode(json);
    tracing::debug!(bytes = payload.len(), "encoded transfer payload");
    Ok(payload)
}

/// Decode a transfer payload back into a block sequence.
///
/// # Errors
///
/// Returns [`CanvasError::Decode`] on malformed base64 or JSON.
pub fn decode(payload: &str) -> CanvasResult<Vec<Block>> {
    let json = URL_SAFE_NO_PAD
        .decode(payload.trim())
        .map_err(|e| CanvasError::Decode(format!("invalid base64: {e}")))?;
    serde_json::from_slice(&json).map_err(|e| CanvasError::Decode(format!("invalid sequence: {e}")))
}

/// Build a shareable link by re-encoding the current full sequence
/// onto `base`.
///
/// Any previous `data` parameter on `base` is replaced.
///
/// # Errors
///
/// Returns [`CanvasError::Serialization`] if the sequence cannot be
/// serialized.
pub fn share_url(base: &Url, blocks: &[Block]) -> CanvasResult<Url> {
    let payload = encode(blocks)?;
    let mut url = base.clone();
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != TRANSFER_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(TRANSFER_PARAM, &payload);
    Ok(url)
}

/// Extract the transfer payload from an entry URL, if present.
#[must_use]
pub fn payload_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == TRANSFER_PARAM)
        .map(|(_, v)| v.into_owned())
}
