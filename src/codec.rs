//! Byte envelope for clocks.
//!
//! Clocks are encoded with bincode using fixed-width little-endian integers: a
//! `u64` entry count followed by each `(actor, counter)` pair in ascending actor
//! order. Because the entries are ordered the output is deterministic, so the
//! decoder only accepts input that is exactly the canonical encoding of what it
//! decoded: no trailing bytes, no duplicated actors, no out-of-order entries.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DecodeError;

/// Default upper bound on the size of an encoded clock (16 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 16 * 1024 * 1024;

/// Limits applied when decoding untrusted bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Inputs longer than this are rejected before any parsing.
    pub max_bytes: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig { max_bytes: DEFAULT_MAX_BYTES }
    }
}

impl DecodeConfig {
    pub fn with_max_bytes(max_bytes: u64) -> Self {
        DecodeConfig { max_bytes }
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
}

/// Encodes `value` into the clock envelope.
///
/// Serializing an ordered map of serde-capable keys to `u64` cannot fail, so
/// this is infallible for the types the crate feeds it. A failing `Serialize`
/// impl on a custom actor type yields an empty buffer, which `decode` rejects.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    match options().serialize(value) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "actor id failed to serialize; emitting empty encoding");
            Vec::new()
        }
    }
}

/// Decodes a value previously produced by [`encode`].
pub fn decode<T>(bytes: &[u8], config: &DecodeConfig) -> Result<T, DecodeError>
where
    T: Serialize + DeserializeOwned,
{
    let result = decode_inner(bytes, config);
    if let Err(ref err) = result {
        tracing::debug!(len = bytes.len(), error = %err, "rejected encoded clock");
    }
    result
}

fn decode_inner<T>(bytes: &[u8], config: &DecodeConfig) -> Result<T, DecodeError>
where
    T: Serialize + DeserializeOwned,
{
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    if bytes.len() as u64 > config.max_bytes {
        return Err(DecodeError::TooLarge { len: bytes.len(), limit: config.max_bytes });
    }

    let value: T = options().deserialize(bytes)?;

    let canonical = options().serialize(&value)?;
    if !bytes.starts_with(&canonical) {
        return Err(DecodeError::InvalidEntry("actors duplicated or out of order".into()));
    }
    if bytes.len() > canonical.len() {
        return Err(DecodeError::TrailingBytes(bytes.len() - canonical.len()));
    }
    Ok(value)
}
