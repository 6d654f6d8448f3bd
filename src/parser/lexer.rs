//! Logos-based lexing of robot test data.
//!
//! The file is first cut into physical lines (keeping their terminators),
//! then every line into whitespace, pipe and text chunks. Cells are formed
//! from chunks by the separator rules of the line's mode.

use logos::Logos;

use super::token::EolKind;
use crate::base::constants::BOM;

/// A chunk of one line with its byte offset within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: ChunkKind,
    pub text: &'a str,
    pub start: usize,
}

impl Chunk<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, ChunkKind::Spaces | ChunkKind::Tab)
    }
}

/// Lexer wrapping the logos-generated chunk tokenizer
pub struct ChunkLexer<'a> {
    inner: logos::Lexer<'a, ChunkKind>,
}

impl<'a> ChunkLexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            inner: ChunkKind::lexer(line),
        }
    }
}

impl<'a> Iterator for ChunkLexer<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?;
        let text = self.inner.slice();
        let start = self.inner.span().start;
        Some(Chunk {
            kind: kind.unwrap_or(ChunkKind::Text),
            text,
            start,
        })
    }
}

/// Chunk the content of a single line (without terminator)
pub fn chunks(line: &str) -> Vec<Chunk<'_>> {
    ChunkLexer::new(line).collect()
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    #[regex(r" +")]
    Spaces,

    #[token("\t")]
    Tab,

    #[token("|")]
    Pipe,

    #[regex(r"[^ \t|]+")]
    Text,
}

/// One physical line of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub content: &'a str,
    pub eol: EolKind,
    /// Byte offset of the line start within the (BOM stripped) text
    pub offset: usize,
}

/// Result of reading a file's text into lines
#[derive(Debug, Clone)]
pub struct ReadLines<'a> {
    pub bom: bool,
    pub lines: Vec<RawLine<'a>>,
}

/// Cut text into lines, remembering each terminator.
///
/// A trailing terminator does not produce an extra empty line; the last
/// line without terminator gets [`EolKind::Eof`].
pub fn read_lines(text: &str) -> ReadLines<'_> {
    let (bom, text) = match text.strip_prefix(BOM) {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(RawLine {
                    content: &text[start..i],
                    eol: EolKind::Lf,
                    offset: start,
                });
                i += 1;
                start = i;
            }
            b'\r' => {
                let crlf = bytes.get(i + 1) == Some(&b'\n');
                lines.push(RawLine {
                    content: &text[start..i],
                    eol: if crlf { EolKind::CrLf } else { EolKind::Cr },
                    offset: start,
                });
                i += if crlf { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(RawLine {
            content: &text[start..],
            eol: EolKind::Eof,
            offset: start,
        });
    }

    ReadLines { bom, lines }
}
