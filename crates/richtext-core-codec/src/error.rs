use std::io;

use richtext_core::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while encoding or decoding styled content.
pub enum CodecError {
    #[error("unexpected end of stream")]
    /// The stream ended in the middle of a value.
    Truncated,

    #[error("I/O error: {0}")]
    /// Reading or writing the underlying stream failed.
    Io(io::Error),

    #[error("invalid UTF-8 in encoded string: {0}")]
    /// A string payload was not valid UTF-8.
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid boolean byte {0:#04x}")]
    /// A boolean was encoded as something other than 0 or 1.
    InvalidBool(u8),

    #[error("invalid ordinal {ordinal} for enum {name}")]
    /// An enum ordinal did not name a variant.
    InvalidEnumOrdinal {
        /// The enum codec name.
        name: String,
        /// The decoded ordinal.
        ordinal: i32,
    },

    #[error("negative length {0}")]
    /// A list count was negative.
    NegativeLength(i32),

    #[error("string of {0} bytes exceeds the 65535-byte limit")]
    /// A string is too long for its 16-bit length prefix.
    StringTooLong(usize),

    #[error("list of {0} elements exceeds the 32-bit count limit")]
    /// A list is too long for its 32-bit count prefix.
    ListTooLong(usize),

    #[error("invalid document content: {0}")]
    /// The decoded values do not form a valid document.
    Model(#[from] ModelError),
}

impl From<io::Error> for CodecError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(err)
        }
    }
}
