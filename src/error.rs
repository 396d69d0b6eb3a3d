//!
//! Defines error types for vclock.
//!
//! Decoding is the only fallible operation in the crate; every mutation and
//! query on a clock is total.

/// Errors returned when a byte slice cannot be turned back into a clock.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input was zero-length. Even an empty clock encodes to a length prefix.
    #[error("empty input")]
    Empty,
    /// The input is larger than the configured decode limit.
    #[error("encoded clock is {len} bytes, limit is {limit}")]
    TooLarge { len: usize, limit: u64 },
    /// The input ended in the middle of the length prefix or an entry.
    #[error("truncated input")]
    Truncated,
    /// A complete clock was decoded but bytes were left over.
    #[error("{0} trailing bytes after encoded clock")]
    TrailingBytes(usize),
    /// An entry could not be decoded as an actor id / counter pair.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),
    /// Any other envelope failure reported by the codec.
    #[error("invalid envelope: {0}")]
    Envelope(String),
}

impl From<bincode::Error> for DecodeError {
    fn from(err: bincode::Error) -> Self {
        use bincode::ErrorKind;

        match *err {
            ErrorKind::Io(ref io) if io.kind() == std::io::ErrorKind::UnexpectedEof => {
                DecodeError::Truncated
            }
            ErrorKind::InvalidUtf8Encoding(e) => DecodeError::InvalidEntry(e.to_string()),
            ErrorKind::InvalidBoolEncoding(b) => {
                DecodeError::InvalidEntry(format!("invalid bool {b}"))
            }
            ErrorKind::InvalidCharEncoding => DecodeError::InvalidEntry("invalid char".into()),
            ErrorKind::InvalidTagEncoding(t) => {
                DecodeError::InvalidEntry(format!("invalid tag {t}"))
            }
            ErrorKind::Custom(msg) => DecodeError::InvalidEntry(msg),
            other => DecodeError::Envelope(other.to_string()),
        }
    }
}
