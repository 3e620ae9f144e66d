use std::io::{Read, Write};

use pretty_assertions::assert_eq;
use richtext_core::{ModelError, Paragraph, StyledDocument, StyledSegment};
use richtext_core_codec::{
    BoolCodec, Codec, CodecEnum, CodecError, Color, ColorCodec, EnumCodec, ListCodec, OptionCodec,
    ParagraphCodec, StyledDocumentCodec,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Alignment {
    Left,
    Center,
    Right,
}

impl CodecEnum for Alignment {
    const NAME: &'static str = "Alignment";

    fn ordinal(&self) -> i32 {
        *self as i32
    }

    fn from_ordinal(ordinal: i32) -> Option<Self> {
        [Self::Left, Self::Center, Self::Right]
            .get(usize::try_from(ordinal).ok()?)
            .copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TextStyle {
    bold: bool,
    color: Option<Color>,
}

impl TextStyle {
    fn plain() -> Self {
        Self {
            bold: false,
            color: None,
        }
    }

    fn bold_red() -> Self {
        Self {
            bold: true,
            color: Some(Color::rgb(1.0, 0.0, 0.0)),
        }
    }
}

struct TextStyleCodec;

impl Codec<TextStyle> for TextStyleCodec {
    fn name(&self) -> String {
        "text-style".to_string()
    }

    fn encode(&self, out: &mut dyn Write, value: &TextStyle) -> Result<(), CodecError> {
        BoolCodec.encode(out, &value.bold)?;
        OptionCodec::new(ColorCodec).encode(out, &value.color)
    }

    fn decode(&self, input: &mut dyn Read) -> Result<TextStyle, CodecError> {
        Ok(TextStyle {
            bold: BoolCodec.decode(input)?,
            color: OptionCodec::new(ColorCodec).decode(input)?,
        })
    }
}

type Doc = StyledDocument<Option<Alignment>, TextStyle>;

fn document_codec() -> StyledDocumentCodec<OptionCodec<EnumCodec<Alignment>>, TextStyleCodec> {
    StyledDocumentCodec::new(OptionCodec::new(EnumCodec::new()), TextStyleCodec)
}

fn sample_document() -> Doc {
    StyledDocument::from_paragraphs(vec![
        Paragraph::from_segments(
            Some(Alignment::Center),
            vec![
                StyledSegment::new("Title ", TextStyle::bold_red()),
                StyledSegment::new("plain tail", TextStyle::plain()),
            ],
        )
        .unwrap(),
        Paragraph::empty(None, TextStyle::bold_red()),
        Paragraph::new(Some(Alignment::Right), "héllo wörld", TextStyle::plain()),
    ])
    .unwrap()
}

#[test]
fn test_document_round_trip() {
    let codec = document_codec();
    let doc = sample_document();

    let bytes = codec.encode_to_vec(&doc).unwrap();
    let decoded: Doc = codec.decode_from_slice(&bytes).unwrap();

    assert_eq!(decoded, doc);
    assert_eq!(decoded.text(), "Title plain tail\n\nhéllo wörld");
    assert!(matches!(decoded.paragraph(1), Some(Paragraph::Empty(_))));
}

#[test]
fn test_codec_names() {
    let codec = document_codec();
    assert_eq!(
        Codec::<Doc>::name(&codec),
        "application/richtext-styled-document<optional<Alignment>;text-style>"
    );

    let paragraphs = ParagraphCodec::new(OptionCodec::new(EnumCodec::new()), TextStyleCodec);
    assert_eq!(
        Codec::<Paragraph<Option<Alignment>, TextStyle>>::name(&paragraphs),
        "paragraph<optional<Alignment>;text-style>"
    );
}

#[test]
fn test_empty_paragraph_layout() {
    let paragraphs = ParagraphCodec::new(OptionCodec::new(EnumCodec::new()), TextStyleCodec);
    let bytes = paragraphs
        .encode_to_vec(&Paragraph::empty(None::<Alignment>, TextStyle::plain()))
        .unwrap();

    // No paragraph style, zero segments, then the empty-text style.
    assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_truncated_stream_is_an_error() {
    let codec = document_codec();
    let bytes = codec.encode_to_vec(&sample_document()).unwrap();

    for cut in [0, 3, 4, 10, bytes.len() - 1] {
        let result: Result<Doc, _> = codec.decode_from_slice(&bytes[..cut]);
        assert!(
            matches!(result, Err(CodecError::Truncated)),
            "cut at {cut}: {result:?}"
        );
    }
}

#[test]
fn test_structurally_invalid_documents() {
    let codec = document_codec();

    let result: Result<Doc, _> = codec.decode_from_slice(&[0, 0, 0, 0]);
    assert!(matches!(
        result,
        Err(CodecError::Model(ModelError::NoParagraphs))
    ));

    let result: Result<Doc, _> = codec.decode_from_slice(&[0xff, 0xff, 0xff, 0xfe]);
    assert!(matches!(result, Err(CodecError::NegativeLength(-2))));

    // One paragraph whose alignment ordinal does not exist.
    let result: Result<Doc, _> = codec.decode_from_slice(&[0, 0, 0, 1, 1, 0, 0, 0, 9]);
    assert!(matches!(
        result,
        Err(CodecError::InvalidEnumOrdinal { ordinal: 9, .. })
    ));
}

#[test]
fn test_list_of_documents() {
    let codec = ListCodec::new(document_codec());
    let docs: Vec<Doc> = vec![
        sample_document(),
        StyledDocument::from_string("one\ntwo", None, TextStyle::plain()),
    ];

    let bytes = codec.encode_to_vec(&docs).unwrap();
    let decoded: Vec<Doc> = codec.decode_from_slice(&bytes).unwrap();
    assert_eq!(decoded, docs);
}
