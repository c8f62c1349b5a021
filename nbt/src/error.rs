//! Error and result type produced while decoding NBT data.

use std::fmt;

/// Errors the decoder can raise. Every variant here corresponds to one of
/// the failure modes a malformed or truncated NBT stream can trigger; there
/// is deliberately no catch-all variant so callers can match exhaustively.
#[derive(Debug)]
pub enum Error {
    /// The stream ended in the middle of a tag, name, or payload.
    UnexpectedEof,
    /// A tag id byte did not correspond to any known kind.
    UnknownTagId(u8),
    /// An `End` tag was read while the stack top was not a `Compound`, or
    /// the stack was empty.
    MismatchedEnd,
    /// A string, byte array, or int array declared a negative length.
    MalformedLength(i32),
    /// A string's bytes were not valid UTF-8.
    InvalidUtf8,
    /// Any other I/O failure from the underlying reader.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnexpectedEof => write!(f, "unexpected end of nbt stream"),
            Error::UnknownTagId(id) => write!(f, "unknown nbt tag id: {id}"),
            Error::MismatchedEnd => write!(f, "end tag did not close an open compound"),
            Error::MalformedLength(len) => write!(f, "negative length in nbt payload: {len}"),
            Error::InvalidUtf8 => write!(f, "nbt string was not valid utf-8"),
            Error::Io(e) => write!(f, "io error while decoding nbt: {e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e),
        }
    }
}

/// Convenience alias for the decoder's result type.
pub type Result<T> = std::result::Result<T, Error>;
