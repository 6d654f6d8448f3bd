//! Row descriptor builders.
//!
//! Executable rows are offered to [`BUILDERS`] in order and the first
//! builder accepting the row describes it. [`SimpleRowBuilder`] accepts
//! everything, so every row gets a descriptor.

use crate::base::constants::{END_MARKER, FOR_CONTINUE_MARKER};
use crate::model::{CodeRow, RowKind};
use crate::parser::errors::{BuildMessage, ErrorCode};
use crate::parser::kinds::LocalSettingKind;
use crate::parser::recognizer::{is_for_in_marker, is_for_marker};
use crate::parser::token::RobotToken;
use crate::parser::token_type::RobotTokenType;

use super::descriptor::{RowDescriptor, RowType};

pub trait DescriptorBuilder: Sync {
    fn accepts(&self, rows: &[CodeRow], index: usize) -> bool;

    fn build(&self, rows: &[CodeRow], index: usize) -> RowDescriptor;
}

/// Builders in the order they are tried
pub static BUILDERS: [&dyn DescriptorBuilder; 4] = [
    &ForLoopDeclarationBuilder,
    &ForLoopContinueBuilder,
    &ForLoopEndBuilder,
    &SimpleRowBuilder,
];

/// Describe the row at `index` of `rows`
pub fn describe(rows: &[CodeRow], index: usize) -> RowDescriptor {
    let Some(row) = rows.get(index) else {
        return RowDescriptor::new(RowType::Unknown, index);
    };
    match row.kind() {
        RowKind::Empty => RowDescriptor::new(RowType::Unknown, index),
        RowKind::Setting(kind) => describe_setting(row, kind, index),
        RowKind::Executable if row.is_comment_only() => {
            let mut descriptor = RowDescriptor::new(RowType::CommentedHash, index);
            add_comments(&mut descriptor, row);
            descriptor
        }
        RowKind::Executable if row.is_orphan_continuation() => {
            let mut descriptor = RowDescriptor::new(RowType::Unknown, index);
            add_comments(&mut descriptor, row);
            descriptor
        }
        RowKind::Executable => BUILDERS
            .iter()
            .find(|builder| builder.accepts(rows, index))
            .map(|builder| builder.build(rows, index))
            .unwrap_or_else(|| RowDescriptor::new(RowType::Unknown, index)),
    }
}

/// Describe every row of a holder
pub fn describe_all(rows: &[CodeRow]) -> Vec<RowDescriptor> {
    (0..rows.len()).map(|index| describe(rows, index)).collect()
}

fn add_comments(descriptor: &mut RowDescriptor, row: &CodeRow) {
    for token in row.cells().into_iter().filter(|t| t.is_comment()) {
        descriptor.add_commented(token);
    }
}

fn describe_setting(row: &CodeRow, kind: LocalSettingKind, index: usize) -> RowDescriptor {
    let mut descriptor = RowDescriptor::new(RowType::Setting, index);
    let cells = row.data_cells();
    descriptor.action = cells.first().map(|t| (*t).clone());
    for token in cells.iter().skip(1) {
        if kind == LocalSettingKind::Arguments {
            let name = token.text().split('=').next().unwrap_or_default();
            let declared = RobotToken::new(name).at(token.position);
            if !descriptor.add_created(&declared) {
                descriptor.add_used(token);
            }
        } else {
            descriptor.add_used(token);
        }
        descriptor.arguments.push((*token).clone());
    }
    add_comments(&mut descriptor, row);
    descriptor
}

/// Fill action, assignments and arguments from `cells` the way a keyword
/// call reads them
fn describe_call(descriptor: &mut RowDescriptor, cells: &[&RobotToken]) {
    for token in cells {
        if descriptor.action.is_none() {
            if descriptor.add_created(token) {
                continue;
            }
            descriptor.add_used(token);
            descriptor.action = Some((*token).clone());
        } else {
            descriptor.add_used(token);
            descriptor.arguments.push((*token).clone());
        }
    }
}

fn first_text(row: &CodeRow) -> Option<&str> {
    row.first_cell().map(RobotToken::text)
}

fn is_loop_header(row: &CodeRow) -> bool {
    row.kind() == RowKind::Executable && first_text(row).is_some_and(is_for_marker)
}

fn is_loop_end(row: &CodeRow) -> bool {
    row.kind() == RowKind::Executable
        && row.data_cells().len() == 1
        && first_text(row) == Some(END_MARKER)
}

fn is_loop_body(row: &CodeRow) -> bool {
    row.first_cell().is_some_and(|t| {
        t.text() == FOR_CONTINUE_MARKER || t.has_type(RobotTokenType::ForContinue)
    })
}

/// Header row of the loop owning the body row at `index`.
///
/// Walks back over comments and sibling body rows; nested loops closed by
/// `END` in between are skipped.
pub fn find_loop_start(rows: &[CodeRow], index: usize) -> Option<usize> {
    let mut depth = 0usize;
    for position in (0..index.min(rows.len())).rev() {
        let row = &rows[position];
        if row.is_comment_only() || row.is_empty() {
            continue;
        }
        if is_loop_header(row) {
            if depth == 0 {
                return Some(position);
            }
            depth -= 1;
        } else if is_loop_end(row) {
            depth += 1;
        } else if !is_loop_body(row) {
            return None;
        }
    }
    None
}

// ============================================================================
// Builders
// ============================================================================

pub struct ForLoopDeclarationBuilder;

impl DescriptorBuilder for ForLoopDeclarationBuilder {
    fn accepts(&self, rows: &[CodeRow], index: usize) -> bool {
        rows.get(index).is_some_and(is_loop_header)
    }

    fn build(&self, rows: &[CodeRow], index: usize) -> RowDescriptor {
        let mut descriptor = RowDescriptor::new(RowType::For, index);
        let row = &rows[index];
        let cells = row.data_cells();
        let Some((marker, rest)) = cells.split_first() else {
            return descriptor;
        };
        descriptor.action = Some((*marker).clone());
        if marker.has_type(RobotTokenType::ForContinue) {
            descriptor.loop_start = find_loop_start(rows, index);
        }

        let in_position = rest.iter().position(|t| is_for_in_marker(t.text()));
        let (variables, values) = match in_position {
            Some(position) => (&rest[..position], &rest[position + 1..]),
            None => (rest, &rest[rest.len()..]),
        };
        for token in variables {
            if !descriptor.add_created(token) {
                descriptor.add_used(token);
            }
        }
        for token in values {
            descriptor.add_used(token);
            descriptor.arguments.push((*token).clone());
        }

        let region = marker.region();
        if descriptor.created_variables.is_empty() {
            descriptor.messages.push(
                BuildMessage::new(ErrorCode::E0605, "loop has no loop variables").with_region(region),
            );
        }
        match in_position {
            None => descriptor.messages.push(
                BuildMessage::new(ErrorCode::E0601, "loop has no 'IN' marker").with_region(region),
            ),
            Some(_) if values.is_empty() => descriptor.messages.push(
                BuildMessage::new(ErrorCode::E0602, "loop has no values to iterate").with_region(region),
            ),
            Some(_) => {}
        }
        add_comments(&mut descriptor, row);
        descriptor
    }
}

pub struct ForLoopContinueBuilder;

impl DescriptorBuilder for ForLoopContinueBuilder {
    fn accepts(&self, rows: &[CodeRow], index: usize) -> bool {
        rows.get(index).is_some_and(is_loop_body) && find_loop_start(rows, index).is_some()
    }

    fn build(&self, rows: &[CodeRow], index: usize) -> RowDescriptor {
        let mut descriptor = RowDescriptor::new(RowType::ForContinue, index);
        descriptor.loop_start = find_loop_start(rows, index);
        let row = &rows[index];
        let cells = row.data_cells();
        let body = match cells.split_first() {
            Some((first, rest)) if first.text() == FOR_CONTINUE_MARKER => rest,
            _ => cells.as_slice(),
        };
        describe_call(&mut descriptor, body);
        add_comments(&mut descriptor, row);
        descriptor
    }
}

pub struct ForLoopEndBuilder;

impl DescriptorBuilder for ForLoopEndBuilder {
    fn accepts(&self, rows: &[CodeRow], index: usize) -> bool {
        rows.get(index).is_some_and(is_loop_end)
    }

    fn build(&self, rows: &[CodeRow], index: usize) -> RowDescriptor {
        let mut descriptor = RowDescriptor::new(RowType::ForEnd, index);
        let row = &rows[index];
        descriptor.action = row.first_cell().cloned();
        add_comments(&mut descriptor, row);
        descriptor
    }
}

pub struct SimpleRowBuilder;

impl DescriptorBuilder for SimpleRowBuilder {
    fn accepts(&self, _rows: &[CodeRow], _index: usize) -> bool {
        true
    }

    fn build(&self, rows: &[CodeRow], index: usize) -> RowDescriptor {
        let mut descriptor = RowDescriptor::new(RowType::Simple, index);
        let row = &rows[index];
        describe_call(&mut descriptor, &row.data_cells());
        add_comments(&mut descriptor, row);
        descriptor
    }
}
