//! Builds a [`FileModel`] from tokenized lines.
//!
//! The builder tracks the current section and hands every line to the
//! table of that section. It never fails: lines it cannot place are kept
//! verbatim and reported.

use std::path::PathBuf;

use crate::base::constants::COMMENT_START;
use crate::parser::TokenizedFile;
use crate::parser::errors::{BuildMessage, ErrorCode};
use crate::parser::kinds::{HolderKind, SectionKind, SettingKind};
use crate::parser::recognizer::{
    HeaderMatch, is_header_cell, recognize_header, recognize_local_setting, recognize_setting,
    tag_lexical,
};
use crate::parser::token::{EolKind, RobotLine, SeparatorMode};
use crate::parser::token_type::RobotTokenType;

use super::file::FileModel;
use super::holders::{CodeHolder, CodeRow, ROW_DATA_COLUMN, RowKind};
use super::operations::operation_for;
use super::settings::Setting;
use super::table::{SectionId, TableElement};
use super::variables::{Variable, VariableKind};

pub struct ModelBuilder {
    model: FileModel,
    current: Option<(SectionId, SectionKind)>,
}

impl ModelBuilder {
    pub fn new(tokenized: &TokenizedFile, path: Option<PathBuf>) -> Self {
        let eol = tokenized
            .lines
            .iter()
            .map(|l| l.eol.kind)
            .find(|k| matches!(k, EolKind::Lf | EolKind::CrLf | EolKind::Cr))
            .unwrap_or(EolKind::Lf);
        let mode = tokenized
            .lines
            .iter()
            .find(|l| !l.is_blank())
            .map(|l| l.mode)
            .unwrap_or(SeparatorMode::Space);
        Self {
            model: FileModel::new(path, tokenized.bom, tokenized.format, eol, mode),
            current: None,
        }
    }

    /// Build the model from all lines of `tokenized`
    pub fn build(mut self, tokenized: TokenizedFile) -> FileModel {
        for line in tokenized.lines {
            self.accept(line);
        }
        self.finish()
    }

    fn accept(&mut self, line: RobotLine) {
        if starts_header(&line) {
            self.open_section(line);
            return;
        }
        let (id, kind) = match self.current {
            Some(current) => current,
            None => {
                let id = self.model.add_section(SectionKind::Preamble, None);
                self.current = Some((id, SectionKind::Preamble));
                (id, SectionKind::Preamble)
            }
        };
        match kind {
            SectionKind::Settings => self.setting_line(id, line),
            SectionKind::Variables => self.variable_line(id, line),
            SectionKind::TestCases | SectionKind::Tasks | SectionKind::Keywords => {
                if let Some(holder_kind) = kind.holder_kind() {
                    self.code_line(id, holder_kind, line);
                }
            }
            SectionKind::Preamble | SectionKind::Comments | SectionKind::Unknown => {
                self.leading_line(id, line);
            }
        }
    }

    fn leading_line(&mut self, id: SectionId, line: RobotLine) {
        if let Some(section) = self.model.section_mut(id) {
            section.lines.push(line);
        }
    }

    // ========================================================================
    // Headers
    // ========================================================================

    fn open_section(&mut self, mut line: RobotLine) {
        let Some(header) = line.first_token() else {
            return;
        };
        let text = header.text().to_string();
        let region = header.region();
        let kind = match recognize_header(&text) {
            HeaderMatch::Recognized { kind, deprecated } => {
                if deprecated {
                    self.model.add_diagnostic(
                        BuildMessage::builder(ErrorCode::E0103)
                            .message(format!("Header '{text}' is deprecated"))
                            .region(region)
                            .fix(format!("*** {} ***", kind.display_name()))
                            .build(),
                    );
                }
                kind
            }
            HeaderMatch::Similar { suggestions } => {
                let mut message = BuildMessage::builder(ErrorCode::E0101)
                    .message(format!("Unrecognized header '{text}'"))
                    .region(region);
                for suggestion in suggestions {
                    message = message.fix(suggestion);
                }
                self.model.add_diagnostic(message.build());
                SectionKind::Unknown
            }
            HeaderMatch::Unrecognized => {
                self.model.add_diagnostic(
                    BuildMessage::builder(ErrorCode::E0102)
                        .message(format!("Unrecognized header '{text}'"))
                        .region(region)
                        .build(),
                );
                SectionKind::Unknown
            }
        };
        tracing::trace!(header = %text, ?kind, "section header");

        for (i, token) in line.tokens_mut().enumerate() {
            if token.is_comment() {
                continue;
            }
            let token_type = if i == 0 {
                RobotTokenType::TableHeader(kind)
            } else {
                RobotTokenType::TableHeaderColumn
            };
            token.types.set_primary(token_type);
        }
        let id = self.model.add_section(kind, Some(line));
        self.current = Some((id, kind));
    }

    // ========================================================================
    // Settings
    // ========================================================================

    fn setting_line(&mut self, id: SectionId, line: RobotLine) {
        if line.is_blank() || line.is_comment_only() {
            match self.model.settings.last_in_mut(id) {
                Some(setting) => setting.trailing.push(line),
                None => self.leading_line(id, line),
            }
            return;
        }
        if line.is_continuation() {
            if let Some(setting) = self.model.settings.last_in_mut(id) {
                if !setting.has_trailing_comment() {
                    setting.absorb(line);
                    return;
                }
            }
            // reported by the documentation fixer if nothing claims it
            self.model
                .settings
                .push(Setting::new(SettingKind::Unknown, id, line));
            return;
        }

        let Some(declaration) = line.tokens().find(|t| !t.is_empty()) else {
            return;
        };
        let text = declaration.text().to_string();
        let region = declaration.region();
        let (kind, deprecated) = recognize_setting(&text);
        if kind == SettingKind::Unknown {
            self.model.add_diagnostic(
                BuildMessage::builder(ErrorCode::E0301)
                    .message(format!("Unknown setting '{text}'"))
                    .region(region)
                    .build(),
            );
        } else if deprecated {
            self.model.add_diagnostic(
                BuildMessage::builder(ErrorCode::E0302)
                    .message(format!("Setting '{text}' is deprecated"))
                    .region(region)
                    .fix(kind.canonical_name())
                    .build(),
            );
        }
        self.model.settings.push(Setting::new(kind, id, line));
    }

    // ========================================================================
    // Variables
    // ========================================================================

    fn variable_line(&mut self, id: SectionId, line: RobotLine) {
        if line.is_blank() || line.is_comment_only() {
            match self.model.variables.last_in_mut(id) {
                Some(variable) => variable.trailing.push(line),
                None => self.leading_line(id, line),
            }
            return;
        }
        if line.is_continuation() {
            if let Some(variable) = self.model.variables.last_in_mut(id) {
                if !variable.has_trailing_comment() {
                    variable.absorb(line);
                    return;
                }
            }
            let region = line.tokens().find(|t| !t.is_empty()).map(|t| t.region());
            let mut message = BuildMessage::new(
                ErrorCode::E0202,
                "Continuation line has no variable to continue",
            );
            if let Some(region) = region {
                message = message.with_region(region);
            }
            self.model.add_diagnostic(message);
            self.model.variables.push(Variable::new(id, line));
            return;
        }

        let variable = Variable::new(id, line);
        if variable.kind() == VariableKind::Invalid {
            let name = variable.name().to_string();
            let code = if name.starts_with("%{") {
                ErrorCode::E0403
            } else {
                ErrorCode::E0401
            };
            let mut message =
                BuildMessage::new(code, format!("Invalid variable declaration '{name}'"));
            if let Some(declaration) = variable.declaration() {
                message = message.with_region(declaration.region());
            }
            self.model.add_diagnostic(message);
        }
        self.model.variables.push(variable);
    }

    // ========================================================================
    // Test cases, tasks and keywords
    // ========================================================================

    fn code_line(&mut self, id: SectionId, kind: HolderKind, mut line: RobotLine) {
        tag_lexical(&mut line, ROW_DATA_COLUMN);
        if line.is_blank() {
            match self.model.code_table_mut(kind).last_in_mut(id) {
                Some(holder) => holder.push_pending(line),
                None => self.leading_line(id, line),
            }
            return;
        }

        let opens_holder = line.first_column == 0
            && line.first_token().is_some_and(|t| {
                !t.is_empty() && !t.is_comment() && !t.is_continuation_marker()
            });
        if opens_holder {
            self.open_holder(id, kind, line);
            return;
        }

        let in_holder = self
            .model
            .code_table(kind)
            .last()
            .is_some_and(|h| h.section() == id);
        if !in_holder {
            if !line.is_comment_only() {
                let mut message = BuildMessage::new(
                    ErrorCode::E0201,
                    format!("Step outside of a {}", kind.display_name()),
                );
                if let Some(token) = line.tokens().find(|t| !t.is_empty()) {
                    message = message.with_region(token.region());
                }
                self.model.add_diagnostic(message);
            }
            self.leading_line(id, line);
            return;
        }

        let Some(holder) = self.model.code_table_mut(kind).last_in_mut(id) else {
            return;
        };
        if line.is_continuation() {
            // a continuation after a comment row stays an orphan row
            if let Err(line) = holder.continue_last_row(line) {
                holder.push_row(CodeRow::new(RowKind::Executable, line));
            }
            return;
        }
        let row_kind = initial_row_kind(&line, kind);
        holder.push_row(CodeRow::new(row_kind, line));
    }

    /// Start a holder from its name line; cells after the name form the
    /// first row on the same physical line
    fn open_holder(&mut self, id: SectionId, kind: HolderKind, mut line: RobotLine) {
        let rest_has_data = line
            .tokens()
            .skip(1)
            .find(|t| !t.is_empty())
            .is_some_and(|t| !t.is_comment());
        let mut first_row = None;
        if rest_has_data {
            if let Some(split_at) = line.element_index_of_token(0) {
                let mut tail = line.split_off(split_at + 1);
                tag_lexical(&mut tail, ROW_DATA_COLUMN);
                let row_kind = initial_row_kind(&tail, kind);
                first_row = Some(CodeRow::new(row_kind, tail));
            }
        }
        tracing::trace!(name = ?line.first_token().map(|t| t.text()), "holder");
        let mut holder = CodeHolder::new(kind, id, line);
        if let Some(row) = first_row {
            holder.push_row(row);
        }
        self.model.code_table_mut(kind).push(holder);
    }

    // ========================================================================
    // Finish
    // ========================================================================

    fn finish(mut self) -> FileModel {
        for setting in self.model.settings.iter_mut() {
            operation_for(setting.kind()).type_arguments(setting);
        }
        let missing: Vec<BuildMessage> = self
            .model
            .settings
            .iter()
            .filter(|s| s.kind().is_import() && s.import_path().is_none())
            .map(|s| {
                let mut message = BuildMessage::new(
                    ErrorCode::E0303,
                    format!("{} setting requires a value", s.kind().canonical_name()),
                );
                if let Some(declaration) = s.declaration() {
                    message = message.with_region(declaration.region());
                }
                message
            })
            .collect();
        for message in missing {
            self.model.add_diagnostic(message);
        }

        for holder in self.model.holders_mut() {
            holder.retype_all();
        }
        self.model
    }
}

/// Header lines have a `*` cell in the first column
fn starts_header(line: &RobotLine) -> bool {
    line.first_column == 0
        && line
            .first_token()
            .is_some_and(|t| is_header_cell(t.text()) && !t.text().starts_with(COMMENT_START))
}

/// Row kind at build time: only applicable bracketed names become settings,
/// the rest is left for the unknown-settings fixer
fn initial_row_kind(line: &RobotLine, holder: HolderKind) -> RowKind {
    let first = line
        .cells()
        .find(|(column, _)| *column >= ROW_DATA_COLUMN)
        .map(|(_, t)| t);
    match first.filter(|t| !t.is_comment()).and_then(|t| recognize_local_setting(t.text())) {
        Some(kind) if kind.is_applicable_to(holder) => RowKind::Setting(kind),
        _ => RowKind::Executable,
    }
}
