use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::model::checklist::Checklist;
use crate::parse::escape::{self, EscapeError};
use crate::parse::snapshot::{SnapshotError, parse_snapshot, serialize_snapshot};

/// Standard alphabet; emits padding, accepts tokens with or without it
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Error type for token decoding
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("bad percent escaping in token: {0}")]
    Escape(EscapeError),
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token does not decode to Unicode text: {0}")]
    Unicode(EscapeError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Encode a checklist into a URL-safe share token.
///
/// JSON snapshot → single-byte expansion → base64 → URI-component escaping.
/// The same checklist always yields the same token.
pub fn encode(checklist: &Checklist) -> Result<String, SnapshotError> {
    let json = serialize_snapshot(checklist)?;
    let binary = escape::expand_bytes(&json);
    let base64 = TOKEN_ENGINE.encode(binary);
    Ok(escape::escape_component(&base64))
}

/// Decode a share token produced by [`encode`]
pub fn decode(token: &str) -> Result<Checklist, DecodeError> {
    let base64 = escape::unescape_component(token).map_err(DecodeError::Escape)?;
    let binary = TOKEN_ENGINE.decode(base64.trim())?;
    let json = escape::collapse_bytes(&binary).map_err(DecodeError::Unicode)?;
    Ok(parse_snapshot(&json)?)
}
