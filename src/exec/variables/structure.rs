//! Bracket structure of cell text.
//!
//! First pass of variable extraction: split text into runs of plain text,
//! whitespace and escapes, single sigil characters, and `{}`/`[]` groups.
//! A closing bracket only closes the innermost open group of the same
//! kind; otherwise it stays plain text. Groups still open at the end of
//! the text are kept with no end.

use text_size::{TextRange, TextSize};

/// Opening bracket of a [`Group`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// The whole text
    Root,
    Curly,
    Square,
}

impl Bracket {
    fn closer(self) -> Option<char> {
        match self {
            Self::Root => None,
            Self::Curly => Some('}'),
            Self::Square => Some(']'),
        }
    }
}

/// Kind of a run of characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunKind {
    Text,
    Whitespace,
    /// Backslashes
    Escape,
    /// One of `$ @ & %`
    Sigil,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Run { kind: RunKind, range: TextRange },
    Group(Group),
}

impl Node {
    pub fn range(&self) -> TextRange {
        match self {
            Self::Run { range, .. } => *range,
            Self::Group(group) => group.range(),
        }
    }
}

/// Bracketed span and its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub bracket: Bracket,
    /// Offset of the opening bracket
    pub start: TextSize,
    /// Offset just after the closing bracket
    pub end: Option<TextSize>,
    pub children: Vec<Node>,
}

impl Group {
    fn new(bracket: Bracket, start: TextSize) -> Self {
        Self {
            bracket,
            start,
            end: None,
            children: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    /// Span of the group; open groups run to the end of their last child
    pub fn range(&self) -> TextRange {
        let end = self.end.unwrap_or_else(|| {
            self.children
                .last()
                .map(|c| c.range().end())
                .unwrap_or(self.start + TextSize::of('{'))
        });
        TextRange::new(self.start, end)
    }

    /// Span between the brackets
    pub fn content_range(&self) -> TextRange {
        let start = self.start + TextSize::of('{');
        let end = match self.end {
            Some(end) => end - TextSize::of('}'),
            None => self.range().end(),
        };
        TextRange::new(start, end.max(start))
    }

    fn push_char(&mut self, kind: RunKind, at: TextSize, c: char) {
        let width = TextSize::of(c);
        if kind != RunKind::Sigil {
            if let Some(Node::Run { kind: last, range }) = self.children.last_mut() {
                if *last == kind && range.end() == at {
                    *range = TextRange::new(range.start(), at + width);
                    return;
                }
            }
        }
        self.children.push(Node::Run {
            kind,
            range: TextRange::at(at, width),
        });
    }
}

fn run_kind(c: char) -> RunKind {
    match c {
        '$' | '@' | '&' | '%' => RunKind::Sigil,
        '\\' => RunKind::Escape,
        ' ' | '\t' => RunKind::Whitespace,
        _ => RunKind::Text,
    }
}

/// Build the bracket structure of `text`
pub fn build_structure(text: &str) -> Group {
    let mut stack = vec![Group::new(Bracket::Root, TextSize::from(0))];
    for (offset, c) in text.char_indices() {
        let at = TextSize::try_from(offset).unwrap_or_default();
        match c {
            '{' => stack.push(Group::new(Bracket::Curly, at)),
            '[' => stack.push(Group::new(Bracket::Square, at)),
            '}' | ']' => {
                let closes = stack.len() > 1 && stack.last().and_then(|g| g.bracket.closer()) == Some(c);
                let Some(current) = stack.last_mut() else {
                    continue;
                };
                if closes {
                    current.end = Some(at + TextSize::of(c));
                    if let Some(group) = stack.pop() {
                        attach(&mut stack, group);
                    }
                } else {
                    current.push_char(RunKind::Text, at, c);
                }
            }
            _ => {
                if let Some(current) = stack.last_mut() {
                    current.push_char(run_kind(c), at, c);
                }
            }
        }
    }
    while stack.len() > 1 {
        if let Some(group) = stack.pop() {
            attach(&mut stack, group);
        }
    }
    stack.pop().unwrap_or_else(|| Group::new(Bracket::Root, TextSize::from(0)))
}

fn attach(stack: &mut [Group], group: Group) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Group(group));
    }
}
