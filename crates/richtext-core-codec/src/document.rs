//! Codecs for styled segments, paragraphs and documents.
//!
//! Layout:
//!
//! ```text
//! document  := count:i32 paragraph*
//! paragraph := paragraph_style count:i32 segment*      (count > 0)
//!            | paragraph_style 0:i32 empty_style       (empty paragraph)
//! segment   := text:string style
//! ```

use std::io::{Read, Write};

use richtext_core::{Paragraph, StyledDocument, StyledSegment};

use crate::codec::{Codec, ListCodec, StringCodec, read_count, write_count};
use crate::error::CodecError;

/// A [`StyledSegment`] as its text followed by its style.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledSegmentCodec<C> {
    style: C,
}

impl<C> StyledSegmentCodec<C> {
    /// Wrap a style codec.
    pub fn new(style: C) -> Self {
        Self { style }
    }
}

impl<S, C: Codec<S>> Codec<StyledSegment<S>> for StyledSegmentCodec<C> {
    fn name(&self) -> String {
        format!("segment<{}>", self.style.name())
    }

    fn encode(&self, out: &mut dyn Write, value: &StyledSegment<S>) -> Result<(), CodecError> {
        StringCodec.encode(out, &value.text().to_string())?;
        self.style.encode(out, value.style())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<StyledSegment<S>, CodecError> {
        let text = StringCodec.decode(input)?;
        let style = self.style.decode(input)?;
        Ok(StyledSegment::new(text, style))
    }
}

/// A [`Paragraph`] as its paragraph style followed by its segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphCodec<PC, SC> {
    paragraph_style: PC,
    style: SC,
}

impl<PC, SC> ParagraphCodec<PC, SC> {
    /// Combine a paragraph-style codec and a style codec.
    pub fn new(paragraph_style: PC, style: SC) -> Self {
        Self {
            paragraph_style,
            style,
        }
    }
}

impl<PS, S, PC, SC> Codec<Paragraph<PS, S>> for ParagraphCodec<PC, SC>
where
    PS: Clone,
    S: Clone + PartialEq,
    PC: Codec<PS>,
    SC: Codec<S>,
{
    fn name(&self) -> String {
        format!(
            "paragraph<{};{}>",
            self.paragraph_style.name(),
            self.style.name()
        )
    }

    fn encode(&self, out: &mut dyn Write, value: &Paragraph<PS, S>) -> Result<(), CodecError> {
        self.paragraph_style.encode(out, value.paragraph_style())?;
        match value {
            Paragraph::Normal(_) => {
                let segments = StyledSegmentCodec::new(&self.style);
                write_count(out, value.segments().len())?;
                for segment in value.segments() {
                    segments.encode(out, segment)?;
                }
                Ok(())
            }
            Paragraph::Empty(p) => {
                write_count(out, 0)?;
                self.style.encode(out, p.empty_style())
            }
        }
    }

    fn decode(&self, input: &mut dyn Read) -> Result<Paragraph<PS, S>, CodecError> {
        let paragraph_style = self.paragraph_style.decode(input)?;
        let count = read_count(input)?;
        if count == 0 {
            let empty_style = self.style.decode(input)?;
            return Ok(Paragraph::empty(paragraph_style, empty_style));
        }

        let codec = StyledSegmentCodec::new(&self.style);
        let mut segments: Vec<StyledSegment<S>> = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            segments.push(codec.decode(input)?);
        }
        Ok(Paragraph::from_segments(paragraph_style, segments)?)
    }
}

/// A [`StyledDocument`] as a list of paragraphs.
///
/// This is the format put on the clipboard for styled copy/paste.
///
/// # Example
///
/// ```rust
/// use richtext_core::StyledDocument;
/// use richtext_core_codec::{BoolCodec, Codec, StringCodec, StyledDocumentCodec};
///
/// let codec: &dyn Codec<StyledDocument<String, bool>> =
///     &StyledDocumentCodec::new(StringCodec, BoolCodec);
/// assert_eq!(codec.name(), "application/richtext-styled-document<string;boolean>");
///
/// let doc = StyledDocument::from_string("one\ntwo", "body".to_string(), false);
/// let bytes = codec.encode_to_vec(&doc).unwrap();
/// assert_eq!(codec.decode_from_slice(&bytes).unwrap(), doc);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StyledDocumentCodec<PC, SC> {
    paragraphs: ParagraphCodec<PC, SC>,
}

impl<PC, SC> StyledDocumentCodec<PC, SC> {
    /// Combine a paragraph-style codec and a style codec.
    pub fn new(paragraph_style: PC, style: SC) -> Self {
        Self {
            paragraphs: ParagraphCodec::new(paragraph_style, style),
        }
    }
}

impl<PS, S, PC, SC> Codec<StyledDocument<PS, S>> for StyledDocumentCodec<PC, SC>
where
    PS: Clone,
    S: Clone + PartialEq,
    PC: Codec<PS>,
    SC: Codec<S>,
{
    fn name(&self) -> String {
        format!(
            "application/richtext-styled-document<{};{}>",
            self.paragraphs.paragraph_style.name(),
            self.paragraphs.style.name()
        )
    }

    fn encode(
        &self,
        out: &mut dyn Write,
        value: &StyledDocument<PS, S>,
    ) -> Result<(), CodecError> {
        write_count(out, value.paragraph_count())?;
        for paragraph in value.paragraphs() {
            self.paragraphs.encode(out, &**paragraph)?;
        }
        Ok(())
    }

    fn decode(&self, input: &mut dyn Read) -> Result<StyledDocument<PS, S>, CodecError> {
        ListCodec::new(&self.paragraphs)
            .decode(input)
            .and_then(|paragraphs: Vec<Paragraph<PS, S>>| {
                Ok(StyledDocument::from_paragraphs(paragraphs)?)
            })
            .inspect_err(|err| {
                log::debug!(
                    "failed to decode {}: {err}",
                    Codec::<StyledDocument<PS, S>>::name(self)
                );
            })
    }
}
