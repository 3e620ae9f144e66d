#![warn(missing_docs)]
//! `richtext-core-codec` - Binary interchange format for `richtext-core` documents.
//!
//! This crate encodes styled content to a compact big-endian byte stream, for example to put a
//! styled selection on the clipboard and paste it back. Style types are application defined, so
//! the document codec is composed from caller-supplied codecs for paragraph styles and character
//! styles, built from the primitive codecs provided here.
//!
//! Decoding never panics on malformed input: truncated or corrupt streams surface as a
//! [`CodecError`], so callers can fall back to plain-text handling.

mod codec;
mod document;
mod error;

pub use codec::{
    BoolCodec, Codec, CodecEnum, Color, ColorCodec, EnumCodec, ListCodec, OptionCodec, StringCodec,
};
pub use document::{ParagraphCodec, StyledDocumentCodec, StyledSegmentCodec};
pub use error::CodecError;
