use crate::model::{FileModel, RowKind, classify_row};
use crate::parser::errors::{BuildMessage, ErrorCode};
use crate::parser::kinds::{HolderKind, LocalSettingKind};
use crate::parser::recognizer::recognize_local_setting;

use super::{PostProcessFixer, row_region};

/// Turns executable rows starting with an unusable `[Name]` into
/// [`LocalSettingKind::Unknown`] settings.
///
/// Names that exist but do not belong in the holder (`[Arguments]` in a
/// test case) are reported differently from names that do not exist.
pub struct UnknownSettingsFixer;

impl PostProcessFixer for UnknownSettingsFixer {
    fn name(&self) -> &'static str {
        "unknown-settings"
    }

    fn fix(&self, model: &mut FileModel) -> bool {
        let mut messages = Vec::new();
        for holder in model.holders_mut() {
            let holder_kind = holder.kind();
            let found: Vec<(usize, String)> = holder
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, row)| row.kind() == RowKind::Executable)
                .filter_map(|(index, row)| {
                    let first = row.first_cell()?.text().to_string();
                    let unknown = RowKind::Setting(LocalSettingKind::Unknown);
                    (classify_row(Some(&first), holder_kind) == unknown).then_some((index, first))
                })
                .collect();
            if found.is_empty() {
                continue;
            }
            for (index, name) in found {
                let Some(row) = holder.row_mut(index) else {
                    continue;
                };
                row.set_kind(RowKind::Setting(LocalSettingKind::Unknown));
                row.type_cells();
                let mut message = BuildMessage::new(ErrorCode::E0203, describe(&name, holder_kind));
                if let Some(region) = row_region(row) {
                    message = message.with_region(region);
                }
                messages.push(message);
            }
        }
        let changed = !messages.is_empty();
        for message in messages {
            model.add_diagnostic_once(message);
        }
        changed
    }
}

fn describe(name: &str, holder: HolderKind) -> String {
    match recognize_local_setting(name) {
        Some(kind) if kind != LocalSettingKind::Unknown => format!(
            "Setting '{name}' is not allowed in a {}",
            holder.display_name()
        ),
        _ => format!("Unknown setting '{name}'"),
    }
}
