use crate::model::{FileModel, LoopProblem};
use crate::parser::errors::{BuildMessage, ErrorCode};

use super::{PostProcessFixer, row_region};

/// Pairs `FOR` with `END` in every holder and reports what does not pair.
///
/// An `END` without a loop stays an ordinary keyword call.
pub struct ForLoopFixer;

impl PostProcessFixer for ForLoopFixer {
    fn name(&self) -> &'static str {
        "for-loops"
    }

    fn fix(&self, model: &mut FileModel) -> bool {
        let mut messages = Vec::new();
        for holder in model.holders_mut() {
            for problem in holder.link_loops() {
                let (row, message) = match problem {
                    LoopProblem::Unclosed { row } => (
                        row,
                        BuildMessage::new(ErrorCode::E0603, "FOR loop is not closed with END"),
                    ),
                    LoopProblem::UnmatchedEnd { row } => (
                        row,
                        BuildMessage::new(ErrorCode::E0604, "END without an open FOR loop"),
                    ),
                };
                let region = holder.row(row).and_then(row_region);
                messages.push(match region {
                    Some(region) => message.with_region(region),
                    None => message,
                });
            }
        }
        let mut changed = false;
        for message in messages {
            changed |= model.add_diagnostic_once(message);
        }
        changed
    }
}
