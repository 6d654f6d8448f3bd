//! Variable expression extractor.
//!
//! Finds `${scalar}`, `@{list}`, `&{dict}` and `%{env}` references in
//! arbitrary cell text, including nested (`${${name}}`) and indexed
//! (`${list}[0]`, `${outer[${inner}]}`) forms. Extraction never fails:
//! malformed syntax stays text and is reported in
//! [`ExtractionResult::messages`].

mod mapper;
pub mod structure;

use smol_str::SmolStr;
use text_size::TextRange;

use crate::base::{FilePosition, FileRegion};
use crate::parser::errors::{BuildMessage, ErrorCode, Severity};
use crate::parser::token::RobotToken;

use mapper::{Mapper, Problem};

/// Scope of a variable, given by its sigil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableScope {
    /// `$`
    Scalar,
    /// `@`
    List,
    /// `&`
    Dictionary,
    /// `%`
    Environment,
}

impl VariableScope {
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '$' => Some(Self::Scalar),
            '@' => Some(Self::List),
            '&' => Some(Self::Dictionary),
            '%' => Some(Self::Environment),
            _ => None,
        }
    }

    pub fn sigil(&self) -> char {
        match self {
            Self::Scalar => '$',
            Self::List => '@',
            Self::Dictionary => '&',
            Self::Environment => '%',
        }
    }
}

/// One variable reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub scope: VariableScope,
    /// From the sigil to the end of the last index
    pub range: TextRange,
    pub text: SmolStr,
    /// Name expression between the braces, without an index
    pub name: SmolStr,
    pub name_range: TextRange,
    /// Text and variables making up the name
    pub name_elements: Vec<Extracted>,
    pub indexes: Vec<IndexDeclaration>,
}

impl VariableDeclaration {
    /// Name is built from other variables (`${${x}}`)
    pub fn has_dynamic_name(&self) -> bool {
        self.name_elements
            .iter()
            .any(|e| matches!(e, Extracted::Variable(_)))
    }

    pub fn is_indexed(&self) -> bool {
        !self.indexes.is_empty()
    }

    /// The variable without its index (`${list}` for `${list}[0]`)
    pub fn base_text(&self) -> String {
        format!("{}{{{}}}", self.scope.sigil(), self.name)
    }

    /// Variables used in the name and the indexes, outermost first
    pub fn nested(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.name_elements
            .iter()
            .chain(self.indexes.iter().flat_map(|i| i.elements.iter()))
            .filter_map(Extracted::as_variable)
    }
}

/// Index expression of a variable (`[0]`, `[${key}]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDeclaration {
    /// Including the brackets
    pub range: TextRange,
    /// Text between the brackets
    pub text: SmolStr,
    pub elements: Vec<Extracted>,
}

impl IndexDeclaration {
    pub fn variables(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.elements.iter().filter_map(Extracted::as_variable)
    }
}

/// A piece of extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Text { range: TextRange, text: SmolStr },
    Variable(VariableDeclaration),
}

impl Extracted {
    pub fn as_variable(&self) -> Option<&VariableDeclaration> {
        match self {
            Self::Variable(variable) => Some(variable),
            Self::Text { .. } => None,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Self::Text { range, .. } => *range,
            Self::Variable(variable) => variable.range,
        }
    }
}

/// Elements of one text plus the problems found in it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    pub elements: Vec<Extracted>,
    pub messages: Vec<BuildMessage>,
}

impl ExtractionResult {
    /// Top level variables
    pub fn variables(&self) -> impl Iterator<Item = &VariableDeclaration> {
        self.elements.iter().filter_map(Extracted::as_variable)
    }

    /// Every variable, nested ones included, in depth-first order
    pub fn all_variables(&self) -> Vec<&VariableDeclaration> {
        fn walk<'a>(variable: &'a VariableDeclaration, out: &mut Vec<&'a VariableDeclaration>) {
            out.push(variable);
            for nested in variable.nested() {
                walk(nested, out);
            }
        }
        let mut out = Vec::new();
        for variable in self.variables() {
            walk(variable, &mut out);
        }
        out
    }

    pub fn text_elements(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Extracted::Text { text, .. } => Some(text.as_str()),
            Extracted::Variable(_) => None,
        })
    }

    /// The whole text is exactly one variable
    pub fn single_variable(&self) -> Option<&VariableDeclaration> {
        match self.elements.as_slice() {
            [Extracted::Variable(variable)] => Some(variable),
            _ => None,
        }
    }
}

/// Extract variables from plain text; messages carry no region
pub fn extract(text: &str) -> ExtractionResult {
    extract_at(text, None)
}

/// Extract variables from a token's text; message regions point into the
/// file
pub fn extract_from_token(token: &RobotToken) -> ExtractionResult {
    extract_at(token.text(), Some(token.position))
}

fn extract_at(text: &str, origin: Option<FilePosition>) -> ExtractionResult {
    let root = structure::build_structure(text);
    let mut mapper = Mapper::new(text);
    let elements = mapper.map_nodes(&root.children);
    let messages = mapper
        .problems
        .into_iter()
        .map(|problem| problem_message(text, origin, problem))
        .collect();
    ExtractionResult { elements, messages }
}

fn problem_message(text: &str, origin: Option<FilePosition>, problem: Problem) -> BuildMessage {
    let (message, range) = match problem {
        Problem::Unclosed(range) => (
            BuildMessage::new(
                ErrorCode::E0402,
                format!("variable '{}' is not closed", &text[range]),
            ),
            range,
        ),
        Problem::SpaceAfterSigil { sigil, range } => (
            BuildMessage::new(
                ErrorCode::E0401,
                format!("incorrect variable with space between {sigil} and '{{'"),
            )
            .with_severity(Severity::Warning),
            range,
        ),
        Problem::UnclosedIndex(range) => (
            BuildMessage::new(
                ErrorCode::E0402,
                format!("index of variable '{}' is not closed", &text[range]),
            ),
            range,
        ),
        Problem::EmptyName(range) => (
            BuildMessage::new(
                ErrorCode::E0401,
                format!("variable '{}' has an empty name", &text[range]),
            ),
            range,
        ),
    };
    match origin {
        Some(origin) => message.with_region(region_in(text, origin, range)),
        None => message,
    }
}

/// File region of `range` inside a token starting at `origin`
pub(crate) fn region_in(text: &str, origin: FilePosition, range: TextRange) -> FileRegion {
    let position = |offset: text_size::TextSize| {
        let prefix = &text[..usize::from(offset)];
        FilePosition::new(origin.line, origin.column + prefix.chars().count(), origin.offset + offset)
    };
    FileRegion::new(position(range.start()), position(range.end()))
}

#[cfg(test)]
mod tests;
