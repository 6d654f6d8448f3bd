use crate::model::{CodeHolder, FileModel, RowKind, Setting, TableElement, operation_for};
use crate::parser::errors::{BuildMessage, ErrorCode};
use crate::parser::kinds::{LocalSettingKind, SettingKind};

use super::{PostProcessFixer, line_region, row_region};

/// Joins `...` lines separated from their documentation by comment lines.
///
/// The builder stops a continuation chain at a comment line. Documentation
/// is the one element robot keeps continuing across comments, so orphaned
/// continuation lines directly after it (comments and blanks in between)
/// are moved into the documentation. Orphans anywhere else are reported.
pub struct DocumentationFixer;

impl PostProcessFixer for DocumentationFixer {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn fix(&self, model: &mut FileModel) -> bool {
        let (mut changed, mut messages) = fix_settings(model);
        for holder in model.holders_mut() {
            let (joined, orphans) = fix_holder(holder);
            changed |= joined;
            messages.extend(orphans);
        }
        for message in messages {
            changed |= model.add_diagnostic_once(message);
        }
        changed
    }
}

fn fix_settings(model: &mut FileModel) -> (bool, Vec<BuildMessage>) {
    let table = model.setting_table_mut();
    let mut changed = false;
    let mut messages = Vec::new();
    let mut index = 0;
    while let Some(setting) = table.get(index) {
        if !is_orphan(setting) {
            index += 1;
            continue;
        }
        let joins = index
            .checked_sub(1)
            .and_then(|above| table.get(above))
            .is_some_and(|doc| {
                doc.kind() == SettingKind::Documentation && doc.section() == setting.section()
            });
        if !joins {
            let mut message = BuildMessage::new(
                ErrorCode::E0202,
                "Continuation line has no setting to continue",
            );
            if let Some(region) = setting.physical_lines().first().and_then(line_region) {
                message = message.with_region(region);
            }
            messages.push(message);
            index += 1;
            continue;
        }
        let Some(mut orphan) = table.remove(index) else {
            break;
        };
        if let Some(doc) = table.get_mut(index - 1) {
            doc.lines.append(&mut doc.trailing);
            doc.lines.append(&mut orphan.lines);
            doc.trailing = orphan.trailing;
            operation_for(SettingKind::Documentation).retype(doc);
        }
        changed = true;
    }
    (changed, messages)
}

fn is_orphan(setting: &Setting) -> bool {
    setting.kind() == SettingKind::Unknown && setting.is_orphan_continuation()
}

fn fix_holder(holder: &mut CodeHolder) -> (bool, Vec<BuildMessage>) {
    let mut changed = false;
    let mut messages = Vec::new();
    let mut index = 0;
    while index < holder.children.len() {
        let row = &holder.children[index];
        if row.kind() != RowKind::Executable || !row.is_orphan_continuation() {
            index += 1;
            continue;
        }
        let Some(doc) = documentation_above(holder, index) else {
            let mut message = BuildMessage::new(
                ErrorCode::E0202,
                "Continuation line has no row to continue",
            );
            if let Some(region) = row_region(row) {
                message = message.with_region(region);
            }
            messages.push(message);
            index += 1;
            continue;
        };
        let lines = holder
            .children
            .drain(doc + 1..=index)
            .flat_map(|row| row.lines)
            .collect();
        let documentation = &mut holder.children[doc];
        documentation.absorb(lines);
        documentation.type_cells();
        holder.touch();
        changed = true;
        index = doc + 1;
    }
    (changed, messages)
}

/// Index of the `[Documentation]` row the orphan at `index` continues,
/// looking past comment and empty rows
fn documentation_above(holder: &CodeHolder, index: usize) -> Option<usize> {
    holder.children[..index]
        .iter()
        .rposition(|row| !row.is_empty() && !row.is_comment_only())
        .filter(|&above| {
            holder.children[above].kind() == RowKind::Setting(LocalSettingKind::Documentation)
        })
}
