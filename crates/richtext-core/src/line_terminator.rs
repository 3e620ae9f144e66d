//! Line terminator helpers.
//!
//! Documents store paragraphs without their terminators. Text entering a document is split on
//! any of `"\r\n"`, `"\r"` or `"\n"`.
//!
//! Every prefix and suffix of a terminator is itself a terminator, so an edit that splices inside
//! a `"\r\n"` still leaves valid terminators on both sides.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ModelError;

static LINE_TERMINATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r\n|\r|\n").expect("valid line terminator regex"));

/// A line terminator sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineTerminator {
    /// Carriage return (`'\r'`).
    Cr,
    /// Unix-style LF (`'\n'`).
    Lf,
    /// Windows-style CRLF (`"\r\n"`).
    CrLf,
}

impl LineTerminator {
    const ALL: [Self; 3] = [Self::Cr, Self::Lf, Self::CrLf];

    /// Returns `true` for `'\r'` and `'\n'`.
    pub fn is_line_terminator_char(c: char) -> bool {
        c == '\r' || c == '\n'
    }

    /// The pattern matching any terminator, longest first.
    pub fn regex() -> &'static Regex {
        &LINE_TERMINATOR_RE
    }

    /// Split `text` into lines. `N` terminators yield `N + 1` lines.
    pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
        LINE_TERMINATOR_RE.split(text)
    }

    /// Detect the dominant terminator of a source text.
    ///
    /// Policy: any CRLF wins, then any lone CR, otherwise LF.
    pub fn detect_in_text(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else if text.contains('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    /// The terminator as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cr => "\r",
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }

    /// Length in characters (1 or 2).
    pub fn len(self) -> usize {
        self.as_str().len()
    }

    /// Always `false`; terminators are never empty.
    pub fn is_empty(self) -> bool {
        false
    }

    /// The first `length` characters as a terminator.
    pub fn trim(self, length: usize) -> Result<Self, ModelError> {
        let s = self.as_str();
        s.get(..length.min(s.len()))
            .ok_or_else(|| ModelError::NotALineTerminator(s.to_string()))?
            .parse()
    }

    /// The characters from `start` on as a terminator.
    pub fn sub_sequence(self, start: usize) -> Result<Self, ModelError> {
        let s = self.as_str();
        s.get(start.min(s.len())..)
            .ok_or_else(|| ModelError::NotALineTerminator(s.to_string()))?
            .parse()
    }

    /// Convert the `'\n'`-joined text of a document to this terminator.
    pub fn apply_to_text(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            other => text.replace('\n', other.as_str()),
        }
    }
}

impl FromStr for LineTerminator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ModelError::NotALineTerminator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("\r\n".parse::<LineTerminator>(), Ok(LineTerminator::CrLf));
        assert_eq!("\n".parse::<LineTerminator>(), Ok(LineTerminator::Lf));
        assert_eq!(
            "x".parse::<LineTerminator>(),
            Err(ModelError::NotALineTerminator("x".to_string()))
        );
    }

    #[test]
    fn test_splice_inside_crlf() {
        assert_eq!(LineTerminator::CrLf.trim(1), Ok(LineTerminator::Cr));
        assert_eq!(LineTerminator::CrLf.sub_sequence(1), Ok(LineTerminator::Lf));
        assert_eq!(LineTerminator::CrLf.trim(2), Ok(LineTerminator::CrLf));
        assert!(LineTerminator::Lf.trim(0).is_err());
    }

    #[test]
    fn test_split_lines_mixed() {
        let lines: Vec<&str> = LineTerminator::split_lines("a\r\nb\rc\n\nd").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);

        let trailing: Vec<&str> = LineTerminator::split_lines("a\n").collect();
        assert_eq!(trailing, vec!["a", ""]);
    }

    #[test]
    fn test_detect_and_apply() {
        assert_eq!(LineTerminator::detect_in_text("a\r\nb"), LineTerminator::CrLf);
        assert_eq!(LineTerminator::detect_in_text("a\rb"), LineTerminator::Cr);
        assert_eq!(LineTerminator::detect_in_text("ab"), LineTerminator::Lf);
        assert_eq!(LineTerminator::CrLf.apply_to_text("a\nb"), "a\r\nb");
        assert!(LineTerminator::is_line_terminator_char('\r'));
        assert!(!LineTerminator::is_line_terminator_char('x'));
    }
}
