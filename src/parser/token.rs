//! Tokens, separators and physical lines.

use smol_str::SmolStr;
use text_size::TextSize;

use super::token_type::{RobotTokenType, TokenTypes};
use crate::base::constants::{COMMENT_START, CONTINUATION_MARKER, EMPTY_CELL_MARKER};
use crate::base::{FilePosition, FileRegion};

/// One cell of robot test data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotToken {
    text: SmolStr,
    pub types: TokenTypes,
    pub position: FilePosition,
}

impl RobotToken {
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self {
            text: text.into(),
            types: TokenTypes::new(),
            position: FilePosition::default(),
        }
    }

    pub fn with_type(mut self, token_type: RobotTokenType) -> Self {
        self.types.insert(token_type);
        self
    }

    pub fn at(mut self, position: FilePosition) -> Self {
        self.position = position;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping only lexical tags that still apply
    pub fn set_text(&mut self, text: impl Into<SmolStr>) {
        self.text = text.into();
        self.types.clear_semantic();
        self.types.remove(RobotTokenType::Comment);
        self.types.remove(RobotTokenType::EmptyCell);
        if self.text == EMPTY_CELL_MARKER {
            self.types.insert(RobotTokenType::EmptyCell);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn primary_type(&self) -> RobotTokenType {
        self.types.primary()
    }

    pub fn has_type(&self, token_type: RobotTokenType) -> bool {
        self.types.contains(token_type)
    }

    /// Text begins a comment (`#` not escaped)
    pub fn starts_comment(&self) -> bool {
        self.text.starts_with(COMMENT_START)
    }

    pub fn is_continuation_marker(&self) -> bool {
        self.text == CONTINUATION_MARKER
    }

    pub fn is_comment(&self) -> bool {
        self.has_type(RobotTokenType::Comment)
    }

    pub fn region(&self) -> FileRegion {
        let end = FilePosition::new(
            self.position.line,
            self.position.column + self.text.chars().count(),
            self.position.offset + TextSize::of(self.text.as_str()),
        );
        FileRegion::new(self.position, end)
    }
}

/// Kind of a cell separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorKind {
    /// A single space (only at line start or end)
    SingleSpace,
    /// Two or more spaces
    DoubleSpace,
    /// Whitespace containing a tab
    Tab,
    /// Whitespace around a pipe
    Pipe,
}

impl SeparatorKind {
    pub fn classify(raw: &str) -> Self {
        if raw.contains('|') {
            Self::Pipe
        } else if raw.contains('\t') {
            Self::Tab
        } else if raw.chars().count() >= 2 {
            Self::DoubleSpace
        } else {
            Self::SingleSpace
        }
    }
}

/// Whitespace (and pipes) between cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub kind: SeparatorKind,
    pub raw: SmolStr,
    pub position: FilePosition,
}

impl Separator {
    pub fn new(raw: impl Into<SmolStr>) -> Self {
        let raw = raw.into();
        Self {
            kind: SeparatorKind::classify(&raw),
            raw,
            position: FilePosition::default(),
        }
    }

    /// Separator used for new cells on lines of the given mode
    pub fn default_for(mode: SeparatorMode) -> Self {
        match mode {
            SeparatorMode::Space => Self::new("    "),
            SeparatorMode::Pipe => Self::new(" | "),
            SeparatorMode::Tsv => Self::new("\t"),
        }
    }
}

/// How cells of one line are separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeparatorMode {
    /// Two or more spaces, or tabs
    Space,
    /// Pipes surrounded by whitespace
    Pipe,
    /// Single tabs
    Tsv,
}

/// Line terminator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EolKind {
    Lf,
    CrLf,
    Cr,
    /// Last line of the file without terminator
    Eof,
    /// Line continues as another element's line on the same physical line
    Partial,
}

impl EolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Eof | Self::Partial => "",
        }
    }

    pub fn ends_physical_line(&self) -> bool {
        !matches!(self, Self::Partial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndOfLine {
    pub kind: EolKind,
    pub position: FilePosition,
}

impl EndOfLine {
    pub fn new(kind: EolKind) -> Self {
        Self {
            kind,
            position: FilePosition::default(),
        }
    }
}

/// Element of a physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineElement {
    Token(RobotToken),
    Separator(Separator),
}

impl LineElement {
    pub fn text(&self) -> &str {
        match self {
            Self::Token(token) => token.text(),
            Self::Separator(separator) => &separator.raw,
        }
    }

    pub fn as_token(&self) -> Option<&RobotToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Separator(_) => None,
        }
    }

    pub fn as_token_mut(&mut self) -> Option<&mut RobotToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Separator(_) => None,
        }
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator(_))
    }
}

/// One physical source line (or the part of it owned by one element)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotLine {
    pub elements: Vec<LineElement>,
    pub eol: EndOfLine,
    pub mode: SeparatorMode,
    /// Column of the first token on this line
    pub first_column: usize,
}

impl RobotLine {
    pub fn new(
        elements: Vec<LineElement>,
        eol: EolKind,
        mode: SeparatorMode,
        first_column: usize,
    ) -> Self {
        Self {
            elements,
            eol: EndOfLine::new(eol),
            mode,
            first_column,
        }
    }

    /// Empty line with the given terminator
    pub fn blank(eol: EolKind, mode: SeparatorMode) -> Self {
        Self::new(Vec::new(), eol, mode, 0)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &RobotToken> {
        self.elements.iter().filter_map(LineElement::as_token)
    }

    pub fn tokens_mut(&mut self) -> impl Iterator<Item = &mut RobotToken> {
        self.elements.iter_mut().filter_map(LineElement::as_token_mut)
    }

    /// Tokens paired with their cell column
    pub fn cells(&self) -> impl Iterator<Item = (usize, &RobotToken)> {
        self.tokens()
            .enumerate()
            .map(|(i, token)| (self.first_column + i, token))
    }

    pub fn first_token(&self) -> Option<&RobotToken> {
        self.tokens().next()
    }

    /// No token carries any text
    pub fn is_blank(&self) -> bool {
        self.tokens().all(RobotToken::is_empty)
    }

    /// Every non-empty token is part of a comment
    pub fn is_comment_only(&self) -> bool {
        let mut tokens = self.tokens().filter(|t| !t.is_empty()).peekable();
        tokens.peek().is_some() && tokens.all(RobotToken::is_comment)
    }

    /// First data token is the `...` marker
    pub fn is_continuation(&self) -> bool {
        self.tokens()
            .find(|t| !t.is_empty())
            .is_some_and(|t| t.has_type(RobotTokenType::PreviousLineContinue))
    }

    /// Index into `elements` of the n-th token
    pub fn element_index_of_token(&self, token_index: usize) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_separator())
            .nth(token_index)
            .map(|(i, _)| i)
    }

    /// Prevailing separator of the line, used for new cells
    pub fn separator_template(&self) -> Separator {
        let inner = self
            .elements
            .iter()
            .enumerate()
            .filter_map(|(i, e)| match e {
                LineElement::Separator(s) if i > 0 && i + 1 < self.elements.len() => Some(s),
                _ => None,
            })
            .next();
        match inner {
            Some(separator) => Separator::new(separator.raw.clone()),
            None => Separator::default_for(self.mode),
        }
    }

    /// Split the line at `element_index`; `self` keeps the head and becomes a
    /// partial line, the returned line owns the tail and the terminator.
    pub fn split_off(&mut self, element_index: usize) -> RobotLine {
        let tail = self.elements.split_off(element_index);
        let head_tokens = self.tokens().count();
        let eol = std::mem::replace(&mut self.eol, EndOfLine::new(EolKind::Partial));
        RobotLine {
            elements: tail,
            eol,
            mode: self.mode,
            first_column: self.first_column + head_tokens,
        }
    }

    pub fn dump_into(&self, out: &mut String) {
        for element in &self.elements {
            out.push_str(element.text());
        }
        out.push_str(self.eol.kind.as_str());
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out);
        out
    }
}
