//! Variables table elements.

use crate::base::ElementId;
use crate::parser::token::{RobotLine, RobotToken};
use crate::parser::token_type::RobotTokenType;

use super::cells;
use super::table::{SectionId, Table, TableElement};

/// Type of a variable by its declaration sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    Scalar,
    List,
    Dictionary,
    /// Declaration that is not `${..}`, `@{..}` or `&{..}`
    Invalid,
}

impl VariableKind {
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '$' => Some(Self::Scalar),
            '@' => Some(Self::List),
            '&' => Some(Self::Dictionary),
            _ => None,
        }
    }
}

/// Whether `text` is exactly one variable reference, optionally followed by
/// `=` (the assignment form)
pub fn is_variable_declaration(text: &str) -> bool {
    declaration_body(text).is_some()
}

/// Sigil and name of a declaration like `${name}` or `@{name} =`
pub fn declaration_body(text: &str) -> Option<(char, &str)> {
    let text = text.trim_end();
    let text = text.strip_suffix('=').unwrap_or(text).trim_end();
    let mut chars = text.chars();
    let sigil = chars.next()?;
    if !matches!(sigil, '$' | '@' | '&' | '%') {
        return None;
    }
    let rest = &text[sigil.len_utf8()..];
    let inner = rest.strip_prefix('{')?.strip_suffix('}')?;
    // the opening brace has to close at the very end
    let mut depth = 1usize;
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 1).then_some((sigil, inner))
}

/// A variable of the Variables table together with its physical lines
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    id: ElementId,
    section: SectionId,
    kind: VariableKind,
    pub(crate) lines: Vec<RobotLine>,
    pub(crate) trailing: Vec<RobotLine>,
}

impl Variable {
    pub(crate) fn new(section: SectionId, line: RobotLine) -> Self {
        let mut variable = Self {
            id: ElementId::new(),
            section,
            kind: VariableKind::Invalid,
            lines: vec![line],
            trailing: Vec::new(),
        };
        variable.retype();
        variable
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn physical_lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub fn cells(&self) -> Vec<&RobotToken> {
        cells::cells(&self.lines, 0)
    }

    pub fn cell_texts(&self) -> Vec<String> {
        cells::cell_texts(&self.lines, 0)
    }

    pub fn declaration(&self) -> Option<&RobotToken> {
        self.cells().into_iter().next()
    }

    /// Declaration as written (`${name}`)
    pub fn name(&self) -> &str {
        self.declaration().map(RobotToken::text).unwrap_or_default()
    }

    /// Name between the braces
    pub fn bare_name(&self) -> Option<&str> {
        declaration_body(self.name()).map(|(_, name)| name)
    }

    pub fn values(&self) -> Vec<&RobotToken> {
        self.cells()
            .into_iter()
            .skip(1)
            .filter(|t| !t.is_comment())
            .collect()
    }

    pub fn value_texts(&self) -> Vec<String> {
        self.values()
            .into_iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn comment(&self) -> Vec<String> {
        cells::comment_texts(&self.lines, 0)
    }

    pub fn is_orphan_continuation(&self) -> bool {
        self.lines.first().is_some_and(RobotLine::is_continuation)
    }

    /// Re-derive the kind from the declaration and type every cell
    pub fn retype(&mut self) {
        let kind = match declaration_body(self.name()) {
            Some((sigil, name)) if !name.is_empty() => {
                VariableKind::from_sigil(sigil).unwrap_or(VariableKind::Invalid)
            }
            _ => VariableKind::Invalid,
        };
        self.kind = kind;
        cells::for_each_cell_mut(&mut self.lines, 0, |index, token| {
            token.types.clear_semantic();
            if token.is_comment() {
                return;
            }
            let token_type = if index == 0 {
                RobotTokenType::VariableDeclaration
            } else {
                RobotTokenType::VariableValue
            };
            token.types.set_primary(token_type);
        });
    }

    pub(crate) fn absorb(&mut self, line: RobotLine) {
        self.lines.append(&mut self.trailing);
        self.lines.push(line);
    }

    pub(crate) fn has_trailing_comment(&self) -> bool {
        self.trailing.iter().any(RobotLine::is_comment_only)
    }
}

impl TableElement for Variable {
    fn id(&self) -> ElementId {
        self.id
    }

    fn section(&self) -> SectionId {
        self.section
    }

    fn set_section(&mut self, section: SectionId) {
        self.section = section;
    }

    fn lines(&self) -> Vec<&RobotLine> {
        self.lines.iter().chain(&self.trailing).collect()
    }

    fn lines_mut(&mut self) -> Vec<&mut RobotLine> {
        self.lines.iter_mut().chain(self.trailing.iter_mut()).collect()
    }
}

pub type VariableTable = Table<Variable>;

impl Table<Variable> {
    /// Find a variable by declaration, ignoring `=` and surrounding spaces
    pub fn by_name(&self, name: &str) -> Option<&Variable> {
        let wanted = declaration_body(name);
        self.iter()
            .find(|v| wanted.is_some() && declaration_body(v.name()) == wanted)
    }
}
