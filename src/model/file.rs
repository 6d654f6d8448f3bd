//! The in-memory model of one robot file.

use std::path::{Path, PathBuf};

use text_size::TextSize;

use crate::base::FilePosition;
use crate::base::constants::BOM;
use crate::core::CommandError;
use crate::parser::errors::BuildMessage;
use crate::parser::kinds::{HolderKind, SectionKind};
use crate::parser::separator::FileFormat;
use crate::parser::token::{EolKind, LineElement, RobotLine, SeparatorMode};

use super::holders::{CodeHolder, CodeTable};
use super::settings::SettingTable;
use super::table::{Section, SectionId, TableElement};
use super::variables::VariableTable;

/// Sections, tables and diagnostics of one file.
///
/// Tables are live: editor commands mutate them in place and renderers
/// read the same structures. [`FileModel::dump`] writes the file back
/// byte for byte when nothing was edited.
#[derive(Debug, Clone)]
pub struct FileModel {
    path: Option<PathBuf>,
    bom: bool,
    format: FileFormat,
    eol: EolKind,
    line_mode: SeparatorMode,
    pub(crate) sections: Vec<Section>,
    next_section: u32,
    pub(crate) settings: SettingTable,
    pub(crate) variables: VariableTable,
    pub(crate) test_cases: CodeTable,
    pub(crate) tasks: CodeTable,
    pub(crate) keywords: CodeTable,
    diagnostics: Vec<BuildMessage>,
}

impl FileModel {
    pub(crate) fn new(
        path: Option<PathBuf>,
        bom: bool,
        format: FileFormat,
        eol: EolKind,
        line_mode: SeparatorMode,
    ) -> Self {
        Self {
            path,
            bom,
            format,
            eol,
            line_mode,
            sections: Vec::new(),
            next_section: 0,
            settings: SettingTable::new(),
            variables: VariableTable::new(),
            test_cases: CodeTable::new(),
            tasks: CodeTable::new(),
            keywords: CodeTable::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn has_bom(&self) -> bool {
        self.bom
    }

    // ========================================================================
    // Sections
    // ========================================================================

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    /// First section of the given kind
    pub fn first_section(&self, kind: SectionKind) -> Option<SectionId> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.id)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.first_section(kind).is_some()
    }

    pub(crate) fn add_section(&mut self, kind: SectionKind, header: Option<RobotLine>) -> SectionId {
        let id = SectionId(self.next_section);
        self.next_section += 1;
        self.sections.push(Section::new(id, kind, header));
        id
    }

    /// Section a new element of a `kind` table goes to, given the section
    /// of its neighbor in the table
    pub(crate) fn insertion_section(
        &self,
        kind: SectionKind,
        neighbor: Option<SectionId>,
    ) -> Result<SectionId, CommandError> {
        neighbor
            .or_else(|| self.first_section(kind))
            .ok_or(CommandError::MissingTable(kind.display_name()))
    }

    // ========================================================================
    // Tables
    // ========================================================================

    pub fn setting_table(&self) -> &SettingTable {
        &self.settings
    }

    pub fn setting_table_mut(&mut self) -> &mut SettingTable {
        &mut self.settings
    }

    pub fn variable_table(&self) -> &VariableTable {
        &self.variables
    }

    pub fn variable_table_mut(&mut self) -> &mut VariableTable {
        &mut self.variables
    }

    pub fn code_table(&self, kind: HolderKind) -> &CodeTable {
        match kind {
            HolderKind::TestCase => &self.test_cases,
            HolderKind::Task => &self.tasks,
            HolderKind::Keyword => &self.keywords,
        }
    }

    pub fn code_table_mut(&mut self, kind: HolderKind) -> &mut CodeTable {
        match kind {
            HolderKind::TestCase => &mut self.test_cases,
            HolderKind::Task => &mut self.tasks,
            HolderKind::Keyword => &mut self.keywords,
        }
    }

    pub fn test_cases(&self) -> &CodeTable {
        &self.test_cases
    }

    pub fn tasks(&self) -> &CodeTable {
        &self.tasks
    }

    pub fn keywords(&self) -> &CodeTable {
        &self.keywords
    }

    /// Every holder of every code table
    pub fn holders(&self) -> impl Iterator<Item = &CodeHolder> {
        self.test_cases
            .iter()
            .chain(self.tasks.iter())
            .chain(self.keywords.iter())
    }

    pub(crate) fn holders_mut(&mut self) -> impl Iterator<Item = &mut CodeHolder> {
        self.test_cases
            .iter_mut()
            .chain(self.tasks.iter_mut())
            .chain(self.keywords.iter_mut())
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    pub fn diagnostics(&self) -> &[BuildMessage] {
        &self.diagnostics
    }

    pub fn add_diagnostic(&mut self, message: BuildMessage) {
        let message = match (&message.file, &self.path) {
            (None, Some(path)) => message.with_file(path.clone()),
            _ => message,
        };
        self.diagnostics.push(message);
    }

    /// Add `message` unless an equal one is already recorded
    pub fn add_diagnostic_once(&mut self, message: BuildMessage) -> bool {
        let message = match (&message.file, &self.path) {
            (None, Some(path)) => message.with_file(path.clone()),
            _ => message,
        };
        if self.diagnostics.contains(&message) {
            return false;
        }
        self.diagnostics.push(message);
        true
    }

    // ========================================================================
    // Lines
    // ========================================================================

    /// Empty line with the file's prevailing terminator and separator mode
    pub fn line_template(&self) -> RobotLine {
        RobotLine::blank(self.eol, self.line_mode)
    }

    /// All physical lines in file order
    pub fn lines(&self) -> Vec<&RobotLine> {
        let mut lines = Vec::new();
        for section in &self.sections {
            lines.extend(section.header.as_ref());
            lines.extend(&section.lines);
            match section.kind {
                SectionKind::Settings => {
                    for setting in self.settings.in_section(section.id) {
                        lines.extend(setting.lines());
                    }
                }
                SectionKind::Variables => {
                    for variable in self.variables.in_section(section.id) {
                        lines.extend(variable.lines());
                    }
                }
                kind => {
                    if let Some(holder_kind) = kind.holder_kind() {
                        for holder in self.code_table(holder_kind).in_section(section.id) {
                            lines.extend(holder.lines());
                        }
                    }
                }
            }
        }
        lines
    }

    /// Visit all physical lines in file order
    pub fn for_each_line_mut(&mut self, mut visit: impl FnMut(&mut RobotLine)) {
        let Self {
            sections,
            settings,
            variables,
            test_cases,
            tasks,
            keywords,
            ..
        } = self;
        for section in sections.iter_mut() {
            if let Some(header) = section.header.as_mut() {
                visit(header);
            }
            section.lines.iter_mut().for_each(&mut visit);
            let id = section.id;
            match section.kind {
                SectionKind::Settings => settings
                    .in_section_mut(id)
                    .flat_map(|e| e.lines_mut())
                    .for_each(&mut visit),
                SectionKind::Variables => variables
                    .in_section_mut(id)
                    .flat_map(|e| e.lines_mut())
                    .for_each(&mut visit),
                SectionKind::TestCases => test_cases
                    .in_section_mut(id)
                    .flat_map(|e| e.lines_mut())
                    .for_each(&mut visit),
                SectionKind::Tasks => tasks
                    .in_section_mut(id)
                    .flat_map(|e| e.lines_mut())
                    .for_each(&mut visit),
                SectionKind::Keywords => keywords
                    .in_section_mut(id)
                    .flat_map(|e| e.lines_mut())
                    .for_each(&mut visit),
                SectionKind::Preamble | SectionKind::Comments | SectionKind::Unknown => {}
            }
        }
    }

    /// Serialize the model back to text
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if self.bom {
            out.push(BOM);
        }
        for line in self.lines() {
            line.dump_into(&mut out);
        }
        out
    }

    /// Recompute line, column and offset of every token and separator
    pub fn refresh_positions(&mut self) {
        let mut line_number = 0;
        let mut column = 0;
        let mut offset = 0u32;
        self.for_each_line_mut(|line| {
            for element in &mut line.elements {
                let text = element.text();
                let (chars, bytes) = (text.chars().count(), text.len() as u32);
                let position = FilePosition::new(line_number, column, TextSize::new(offset));
                match element {
                    LineElement::Token(token) => token.position = position,
                    LineElement::Separator(separator) => separator.position = position,
                }
                column += chars;
                offset += bytes;
            }
            line.eol.position = FilePosition::new(line_number, column, TextSize::new(offset));
            offset += line.eol.kind.as_str().len() as u32;
            if line.eol.kind.ends_physical_line() {
                line_number += 1;
                column = 0;
            }
        });
    }
}
