use crate::model::{CodeRow, FileModel};

use super::PostProcessFixer;

/// Turns the blank lines a holder collected while building into
/// [`RowKind::Empty`](crate::model::RowKind::Empty) rows at the same place
pub struct EmptyRowsFixer;

impl PostProcessFixer for EmptyRowsFixer {
    fn name(&self) -> &'static str {
        "empty-rows"
    }

    fn fix(&self, model: &mut FileModel) -> bool {
        let mut changed = false;
        for holder in model.holders_mut() {
            if holder.pending.is_empty() {
                continue;
            }
            let mut pending = std::mem::take(&mut holder.pending);
            // stable: blank lines before the same row keep their order
            pending.sort_by_key(|(at, _)| *at);
            for (inserted, (at, line)) in pending.into_iter().enumerate() {
                let index = (at + inserted).min(holder.children.len());
                holder.children.insert(index, CodeRow::empty(line));
            }
            holder.touch();
            changed = true;
        }
        changed
    }
}
