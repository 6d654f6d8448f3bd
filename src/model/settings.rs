//! Settings table elements.

use crate::base::ElementId;
use crate::parser::kinds::{SettingKind, SettingsGroup};
use crate::parser::token::{RobotLine, RobotToken};
use crate::parser::token_type::RobotTokenType;

use super::cells;
use super::table::{SectionId, Table, TableElement};

/// A setting of the Settings table together with its physical lines
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    id: ElementId,
    section: SectionId,
    kind: SettingKind,
    pub(crate) lines: Vec<RobotLine>,
    /// Blank and comment lines following the setting
    pub(crate) trailing: Vec<RobotLine>,
}

impl Setting {
    pub(crate) fn new(kind: SettingKind, section: SectionId, line: RobotLine) -> Self {
        Self {
            id: ElementId::new(),
            section,
            kind,
            lines: vec![line],
            trailing: Vec::new(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> SettingKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: SettingKind) {
        self.kind = kind;
    }

    pub fn group(&self) -> SettingsGroup {
        self.kind.group()
    }

    pub fn physical_lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub fn trailing_lines(&self) -> &[RobotLine] {
        &self.trailing
    }

    /// Declaration cell followed by all other cells, comments included
    pub fn cells(&self) -> Vec<&RobotToken> {
        cells::cells(&self.lines, 0)
    }

    pub fn cell_texts(&self) -> Vec<String> {
        cells::cell_texts(&self.lines, 0)
    }

    pub fn declaration(&self) -> Option<&RobotToken> {
        self.cells().into_iter().next()
    }

    /// Declaration text as written
    pub fn name(&self) -> &str {
        self.declaration().map(RobotToken::text).unwrap_or_default()
    }

    /// Data cells after the declaration, without a library alias pair.
    ///
    /// Comments end only their own line, so data on continuation lines
    /// after a commented line still counts.
    pub fn arguments(&self) -> Vec<&RobotToken> {
        self.cells()
            .into_iter()
            .skip(1)
            .filter(|t| {
                !t.is_comment()
                    && !t.has_type(RobotTokenType::LibraryAliasMarker)
                    && !t.has_type(RobotTokenType::LibraryAlias)
            })
            .collect()
    }

    pub fn argument_texts(&self) -> Vec<String> {
        self.arguments()
            .into_iter()
            .map(|t| t.text().to_string())
            .collect()
    }

    /// Name or path of an import
    pub fn import_path(&self) -> Option<&RobotToken> {
        self.cells()
            .into_iter()
            .find(|t| t.has_type(RobotTokenType::ImportPath))
    }

    /// Alias of a library import (`WITH NAME x` / `AS x`)
    pub fn alias(&self) -> Option<&RobotToken> {
        self.cells()
            .into_iter()
            .find(|t| t.has_type(RobotTokenType::LibraryAlias))
    }

    pub fn comment(&self) -> Vec<String> {
        cells::comment_texts(&self.lines, 0)
    }

    /// Setting made of a `...` line that has no element to continue
    pub fn is_orphan_continuation(&self) -> bool {
        self.lines.first().is_some_and(RobotLine::is_continuation)
    }

    /// Move the trailing lines and `line` into the setting itself
    pub(crate) fn absorb(&mut self, line: RobotLine) {
        self.lines.append(&mut self.trailing);
        self.lines.push(line);
    }

    pub(crate) fn has_trailing_comment(&self) -> bool {
        self.trailing.iter().any(RobotLine::is_comment_only)
    }
}

impl TableElement for Setting {
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

pub type SettingTable = Table<Setting>;

impl Table<Setting> {
    pub fn by_kind(&self, kind: SettingKind) -> impl Iterator<Item = &Setting> {
        self.iter().filter(move |s| s.kind() == kind)
    }

    pub fn by_group(&self, group: SettingsGroup) -> impl Iterator<Item = &Setting> {
        self.iter().filter(move |s| s.group() == group)
    }

    /// Library, Resource and Variables imports in file order
    pub fn imports(&self) -> impl Iterator<Item = &Setting> {
        self.iter().filter(|s| s.kind().is_import())
    }

    pub fn libraries(&self) -> impl Iterator<Item = &Setting> {
        self.by_group(SettingsGroup::Libraries)
    }

    pub fn resources(&self) -> impl Iterator<Item = &Setting> {
        self.by_group(SettingsGroup::Resources)
    }

    pub fn documentation(&self) -> Option<&Setting> {
        self.by_kind(SettingKind::Documentation).next()
    }
}
