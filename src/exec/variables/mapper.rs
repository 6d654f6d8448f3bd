//! Second pass of variable extraction: give the bracket structure its
//! meaning.
//!
//! A sigil directly followed by a closed `{}` group is a variable unless an
//! odd run of backslashes escapes the sigil. Closed `[]` groups directly
//! after a variable, or closing the content of its braces, are its index
//! expressions. Everything else becomes text, but the content of groups is
//! always searched for further variables. `${}` is text with an error.

use smol_str::SmolStr;
use text_size::TextRange;

use super::structure::{Bracket, Group, Node, RunKind};
use super::{Extracted, IndexDeclaration, VariableDeclaration, VariableScope};

/// Malformed variable syntax found while mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Problem {
    /// Sigil and `{` without a closing `}`
    Unclosed(TextRange),
    /// Whitespace between the sigil and `{`
    SpaceAfterSigil { sigil: char, range: TextRange },
    /// `[` directly after a variable without a closing `]`
    UnclosedIndex(TextRange),
    /// Nothing between the braces
    EmptyName(TextRange),
}

pub(super) struct Mapper<'a> {
    text: &'a str,
    pub(super) problems: Vec<Problem>,
}

impl<'a> Mapper<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            text,
            problems: Vec::new(),
        }
    }

    pub(super) fn map_nodes(&mut self, nodes: &[Node]) -> Vec<Extracted> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < nodes.len() {
            if let Some((variable, consumed)) = self.variable_at(nodes, i) {
                out.push(Extracted::Variable(variable));
                i += consumed;
                continue;
            }
            match &nodes[i] {
                Node::Run { range, .. } => self.push_text(&mut out, *range),
                Node::Group(group) => self.group_as_text(group, &mut out),
            }
            i += 1;
        }
        out
    }

    /// Variable starting with the sigil at `nodes[i]` and the number of
    /// nodes it spans
    fn variable_at(&mut self, nodes: &[Node], i: usize) -> Option<(VariableDeclaration, usize)> {
        let Node::Run {
            kind: RunKind::Sigil,
            range: sigil_range,
        } = &nodes[i]
        else {
            return None;
        };
        let sigil = self.text[*sigil_range].chars().next()?;
        let scope = VariableScope::from_sigil(sigil)?;
        if i > 0 && is_odd_escape(self.text, &nodes[i - 1]) {
            return None;
        }
        let group = match nodes.get(i + 1) {
            Some(Node::Group(group)) if group.bracket == Bracket::Curly => group,
            Some(Node::Run {
                kind: RunKind::Whitespace,
                range,
            }) => {
                if let Some(Node::Group(group)) = nodes.get(i + 2) {
                    if group.bracket == Bracket::Curly && group.is_closed() {
                        self.problems.push(Problem::SpaceAfterSigil {
                            sigil,
                            range: TextRange::new(sigil_range.start(), group.range().end().max(range.end())),
                        });
                    }
                }
                return None;
            }
            _ => return None,
        };
        let Some(end) = group.end else {
            self.problems
                .push(Problem::Unclosed(TextRange::new(sigil_range.start(), group.range().end())));
            return None;
        };
        if group.content_range().is_empty() {
            let empty = TextRange::new(sigil_range.start(), end);
            self.problems.push(Problem::EmptyName(empty));
            return None;
        }

        let mut name_nodes: &[Node] = &group.children;
        let mut indexes = Vec::new();
        let content = group.content_range();
        let mut name_range = content;
        if scope != VariableScope::Environment {
            if let [rest @ .., Node::Group(last)] = group.children.as_slice() {
                if last.bracket == Bracket::Square && last.is_closed() && !rest.is_empty() {
                    name_nodes = rest;
                    name_range = TextRange::new(content.start(), last.start);
                    indexes.push(self.index(last));
                }
            }
        }

        let mut range_end = end;
        let mut consumed = 2;
        if scope != VariableScope::Environment {
            while let Some(Node::Group(next)) = nodes.get(i + consumed) {
                if next.bracket != Bracket::Square || next.start != range_end {
                    break;
                }
                if !next.is_closed() {
                    let unclosed = TextRange::new(sigil_range.start(), next.range().end());
                    self.problems.push(Problem::UnclosedIndex(unclosed));
                    break;
                }
                indexes.push(self.index(next));
                range_end = next.range().end();
                consumed += 1;
            }
        }

        let name_elements = self.map_nodes(name_nodes);
        let range = TextRange::new(sigil_range.start(), range_end);
        let variable = VariableDeclaration {
            scope,
            range,
            text: SmolStr::new(&self.text[range]),
            name: SmolStr::new(&self.text[name_range]),
            name_range,
            name_elements,
            indexes,
        };
        Some((variable, consumed))
    }

    fn index(&mut self, group: &Group) -> IndexDeclaration {
        let content = group.content_range();
        IndexDeclaration {
            range: group.range(),
            text: SmolStr::new(&self.text[content]),
            elements: self.map_nodes(&group.children),
        }
    }

    fn group_as_text(&mut self, group: &Group, out: &mut Vec<Extracted>) {
        let open_end = group.content_range().start();
        self.push_text(out, TextRange::new(group.start, open_end));
        for element in self.map_nodes(&group.children) {
            match element {
                Extracted::Text { range, .. } => self.push_text(out, range),
                variable => out.push(variable),
            }
        }
        if let Some(end) = group.end {
            self.push_text(out, TextRange::new(group.content_range().end(), end));
        }
    }

    /// Append text, merging with a directly preceding text element
    fn push_text(&self, out: &mut Vec<Extracted>, range: TextRange) {
        if range.is_empty() {
            return;
        }
        if let Some(Extracted::Text { range: last, text }) = out.last_mut() {
            if last.end() == range.start() {
                *last = last.cover(range);
                *text = SmolStr::new(&self.text[*last]);
                return;
            }
        }
        out.push(Extracted::Text {
            range,
            text: SmolStr::new(&self.text[range]),
        });
    }
}

fn is_odd_escape(text: &str, node: &Node) -> bool {
    match node {
        Node::Run {
            kind: RunKind::Escape,
            range,
        } => text[*range].len() % 2 == 1,
        _ => false,
    }
}
