//! The [`Codec`] trait and codecs for primitive values.
//!
//! All multi-byte integers and floats are big-endian. Composite codecs wrap element codecs, so a
//! document codec is assembled from small pieces:
//!
//! ```rust
//! use richtext_core_codec::{Codec, ListCodec, OptionCodec, StringCodec};
//!
//! let codec: &dyn Codec<Vec<Option<String>>> = &ListCodec::new(OptionCodec::new(StringCodec));
//! assert_eq!(codec.name(), "list<optional<string>>");
//!
//! let value = vec![Some("a".to_string()), None];
//! let bytes = codec.encode_to_vec(&value).unwrap();
//! assert_eq!(codec.decode_from_slice(&bytes).unwrap(), value);
//! ```

use std::io::{Read, Write};
use std::marker::PhantomData;

use crate::error::CodecError;

/// Upper bound on the capacity reserved up front for a decoded list.
const MAX_PREALLOCATED_ELEMENTS: usize = 1024;

/// Encodes values of type `T` to a byte stream and decodes them back.
pub trait Codec<T> {
    /// Name of the encoding, used as a data-format identifier.
    fn name(&self) -> String;

    /// Write `value` to `out`.
    fn encode(&self, out: &mut dyn Write, value: &T) -> Result<(), CodecError>;

    /// Read a value from `input`.
    fn decode(&self, input: &mut dyn Read) -> Result<T, CodecError>;

    /// Encode `value` into a fresh buffer.
    fn encode_to_vec(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode(&mut out, value)?;
        Ok(out)
    }

    /// Decode a value from the start of `bytes`. Trailing bytes are ignored.
    fn decode_from_slice(&self, mut bytes: &[u8]) -> Result<T, CodecError> {
        self.decode(&mut bytes)
    }
}

impl<T, C: Codec<T> + ?Sized> Codec<T> for &C {
    fn name(&self) -> String {
        (**self).name()
    }

    fn encode(&self, out: &mut dyn Write, value: &T) -> Result<(), CodecError> {
        (**self).encode(out, value)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<T, CodecError> {
        (**self).decode(input)
    }
}

pub(crate) fn read_array<const N: usize>(input: &mut dyn Read) -> Result<[u8; N], CodecError> {
    let mut buf = [0u8; N];
    input.read_exact(&mut buf)?;
    Ok(buf)
}

pub(crate) fn read_i32(input: &mut dyn Read) -> Result<i32, CodecError> {
    Ok(i32::from_be_bytes(read_array(input)?))
}

pub(crate) fn read_f64(input: &mut dyn Read) -> Result<f64, CodecError> {
    Ok(f64::from_be_bytes(read_array(input)?))
}

/// Write a 32-bit element count.
pub(crate) fn write_count(out: &mut dyn Write, count: usize) -> Result<(), CodecError> {
    let count = i32::try_from(count).map_err(|_| CodecError::ListTooLong(count))?;
    out.write_all(&count.to_be_bytes())?;
    Ok(())
}

/// Read a 32-bit element count.
pub(crate) fn read_count(input: &mut dyn Read) -> Result<usize, CodecError> {
    let count = read_i32(input)?;
    usize::try_from(count).map_err(|_| CodecError::NegativeLength(count))
}

/// UTF-8 strings behind a 16-bit byte length.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn name(&self) -> String {
        "string".to_string()
    }

    fn encode(&self, out: &mut dyn Write, value: &String) -> Result<(), CodecError> {
        let len = u16::try_from(value.len()).map_err(|_| CodecError::StringTooLong(value.len()))?;
        out.write_all(&len.to_be_bytes())?;
        out.write_all(value.as_bytes())?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<String, CodecError> {
        let len = u16::from_be_bytes(read_array(input)?);
        let mut bytes = vec![0u8; usize::from(len)];
        input.read_exact(&mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component.
    pub red: f64,
    /// Green component.
    pub green: f64,
    /// Blue component.
    pub blue: f64,
    /// Opacity.
    pub opacity: f64,
}

impl Color {
    /// An opaque color.
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red,
            green,
            blue,
            opacity: 1.0,
        }
    }
}

/// Colors as four 64-bit floats: red, green, blue, opacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCodec;

impl Codec<Color> for ColorCodec {
    fn name(&self) -> String {
        "color".to_string()
    }

    fn encode(&self, out: &mut dyn Write, value: &Color) -> Result<(), CodecError> {
        for component in [value.red, value.green, value.blue, value.opacity] {
            out.write_all(&component.to_be_bytes())?;
        }
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Color, CodecError> {
        Ok(Color {
            red: read_f64(input)?,
            green: read_f64(input)?,
            blue: read_f64(input)?,
            opacity: read_f64(input)?,
        })
    }
}

/// Booleans as a single `0` or `1` byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn name(&self) -> String {
        "boolean".to_string()
    }

    fn encode(&self, out: &mut dyn Write, value: &bool) -> Result<(), CodecError> {
        out.write_all(&[u8::from(*value)])?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<bool, CodecError> {
        match read_array::<1>(input)? {
            [0] => Ok(false),
            [1] => Ok(true),
            [other] => Err(CodecError::InvalidBool(other)),
        }
    }
}

/// Optional values: a presence flag, then the value when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionCodec<C> {
    inner: C,
}

impl<C> OptionCodec<C> {
    /// Wrap an element codec.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<T, C: Codec<T>> Codec<Option<T>> for OptionCodec<C> {
    fn name(&self) -> String {
        format!("optional<{}>", self.inner.name())
    }

    fn encode(&self, out: &mut dyn Write, value: &Option<T>) -> Result<(), CodecError> {
        BoolCodec.encode(out, &value.is_some())?;
        match value {
            Some(inner) => self.inner.encode(out, inner),
            None => Ok(()),
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Option<T>, CodecError> {
        if BoolCodec.decode(input)? {
            self.inner.decode(input).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// A fieldless enum that can be encoded by ordinal.
pub trait CodecEnum: Sized {
    /// Codec name for this enum.
    const NAME: &'static str;

    /// Zero-based variant index.
    fn ordinal(&self) -> i32;

    /// The variant at `ordinal`, if any.
    fn from_ordinal(ordinal: i32) -> Option<Self>;
}

/// Enums as a 32-bit ordinal.
#[derive(Debug, Clone, Copy)]
pub struct EnumCodec<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E: CodecEnum> EnumCodec<E> {
    /// Create the codec.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<E: CodecEnum> Default for EnumCodec<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CodecEnum> Codec<E> for EnumCodec<E> {
    fn name(&self) -> String {
        E::NAME.to_string()
    }

    fn encode(&self, out: &mut dyn Write, value: &E) -> Result<(), CodecError> {
        out.write_all(&value.ordinal().to_be_bytes())?;
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<E, CodecError> {
        let ordinal = read_i32(input)?;
        E::from_ordinal(ordinal).ok_or_else(|| CodecError::InvalidEnumOrdinal {
            name: E::NAME.to_string(),
            ordinal,
        })
    }
}

/// Lists as a 32-bit count followed by the elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListCodec<C> {
    element: C,
}

impl<C> ListCodec<C> {
    /// Wrap an element codec.
    pub fn new(element: C) -> Self {
        Self { element }
    }
}

impl<T, C: Codec<T>> Codec<Vec<T>> for ListCodec<C> {
    fn name(&self) -> String {
        format!("list<{}>", self.element.name())
    }

    fn encode(&self, out: &mut dyn Write, value: &Vec<T>) -> Result<(), CodecError> {
        write_count(out, value.len())?;
        for element in value {
            self.element.encode(out, element)?;
        }
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Vec<T>, CodecError> {
        let count = read_count(input)?;
        let mut elements = Vec::with_capacity(count.min(MAX_PREALLOCATED_ELEMENTS));
        for _ in 0..count {
            elements.push(self.element.decode(input)?);
        }
        Ok(elements)
    }
}
