//! Test cases, tasks and keywords with their rows.
//!
//! A [`CodeHolder`] owns its name line and an ordered list of [`CodeRow`]s.
//! Blank lines met while building are kept as pending lines until the
//! empty-row fixer turns them into [`RowKind::Empty`] rows.
//!
//! Loop structure is not stored. [`CodeHolder::link_loops`] derives it from
//! the rows and tags loop bodies, so any edit can be followed by a relink.

use crate::base::ElementId;
use crate::base::constants::{END_MARKER, FOR_CONTINUE_MARKER, FOR_MARKER};
use crate::parser::kinds::{HolderKind, LocalSettingKind};
use crate::parser::recognizer::{is_for_in_marker, is_for_marker, recognize_local_setting};
use crate::parser::token::{EolKind, RobotLine, RobotToken};
use crate::parser::token_type::RobotTokenType;

use super::cells;
use super::table::{SectionId, Table, TableElement};
use super::variables::is_variable_declaration;

/// Column of the first row cell in code tables
pub const ROW_DATA_COLUMN: usize = 1;

/// What a row of a holder is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowKind {
    /// Keyword call, loop construct or comment
    Executable,
    /// Bracketed local setting
    Setting(LocalSettingKind),
    /// Blank line
    Empty,
}

/// Kind a row gets from its first cell.
///
/// Bracketed names that are unknown or not allowed in `holder` become
/// [`LocalSettingKind::Unknown`] settings.
pub fn classify_row(first_cell: Option<&str>, holder: HolderKind) -> RowKind {
    match first_cell.and_then(recognize_local_setting) {
        Some(kind) if kind.is_applicable_to(holder) => RowKind::Setting(kind),
        Some(_) => RowKind::Setting(LocalSettingKind::Unknown),
        None => RowKind::Executable,
    }
}

/// One row of a holder together with its physical lines
#[derive(Debug, Clone, PartialEq)]
pub struct CodeRow {
    id: ElementId,
    kind: RowKind,
    pub(crate) lines: Vec<RobotLine>,
}

impl CodeRow {
    pub(crate) fn new(kind: RowKind, line: RobotLine) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            lines: vec![line],
        }
    }

    pub(crate) fn empty(line: RobotLine) -> Self {
        Self::new(RowKind::Empty, line)
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn setting_kind(&self) -> Option<LocalSettingKind> {
        match self.kind {
            RowKind::Setting(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn physical_lines(&self) -> &[RobotLine] {
        &self.lines
    }

    pub fn cells(&self) -> Vec<&RobotToken> {
        cells::cells(&self.lines, ROW_DATA_COLUMN)
    }

    pub fn cell_texts(&self) -> Vec<String> {
        cells::cell_texts(&self.lines, ROW_DATA_COLUMN)
    }

    /// Cells that are not comments
    pub fn data_cells(&self) -> Vec<&RobotToken> {
        self.cells()
            .into_iter()
            .filter(|t| !t.is_comment())
            .collect()
    }

    pub fn first_cell(&self) -> Option<&RobotToken> {
        self.data_cells().into_iter().next()
    }

    /// Data cells after the first one
    pub fn arguments(&self) -> Vec<&RobotToken> {
        self.data_cells().into_iter().skip(1).collect()
    }

    pub fn comment(&self) -> Vec<String> {
        cells::comment_texts(&self.lines, ROW_DATA_COLUMN)
    }

    /// Row made only of comment cells
    pub fn is_comment_only(&self) -> bool {
        let cells = self.cells();
        !cells.is_empty() && cells.iter().all(|t| t.is_comment())
    }

    pub fn is_empty(&self) -> bool {
        self.kind == RowKind::Empty
    }

    /// Row made of a `...` line that has no element to continue
    pub fn is_orphan_continuation(&self) -> bool {
        self.lines.first().is_some_and(RobotLine::is_continuation)
    }

    /// Re-derive the kind from the first cell and type every cell
    pub fn reclassify(&mut self, holder: HolderKind) {
        let has_cells = !self.cells().is_empty();
        if has_cells {
            let first = self.first_cell().map(|t| t.text().to_string());
            self.kind = classify_row(first.as_deref(), holder);
        } else if self.kind != RowKind::Empty {
            self.kind = RowKind::Executable;
        }
        self.type_cells();
    }

    pub(crate) fn set_kind(&mut self, kind: RowKind) {
        self.kind = kind;
    }

    /// Type every cell according to the current kind
    pub fn type_cells(&mut self) {
        match self.kind {
            RowKind::Empty => {}
            RowKind::Setting(kind) => {
                cells::for_each_cell_mut(&mut self.lines, ROW_DATA_COLUMN, |index, token| {
                    token.types.clear_semantic();
                    if token.is_comment() {
                        return;
                    }
                    let token_type = if index == 0 {
                        RobotTokenType::LocalSettingDeclaration(kind)
                    } else {
                        local_argument_type(kind, index - 1)
                    };
                    token.types.set_primary(token_type);
                });
            }
            RowKind::Executable => {
                let texts: Vec<String> = self
                    .data_cells()
                    .iter()
                    .map(|t| t.text().to_string())
                    .collect();
                let types = executable_types(&texts);
                cells::for_each_cell_mut(&mut self.lines, ROW_DATA_COLUMN, |index, token| {
                    token.types.clear_semantic();
                    if token.is_comment() {
                        return;
                    }
                    if let Some(token_type) = types.get(index) {
                        token.types.set_primary(*token_type);
                    }
                });
            }
        }
    }

    fn first_cell_mut(&mut self) -> Option<&mut RobotToken> {
        let first = cells::cell_refs(&self.lines, ROW_DATA_COLUMN).into_iter().next()?;
        cells::token_at_mut(&mut self.lines, first).filter(|t| !t.is_comment())
    }

    fn clear_loop_tags(&mut self) {
        cells::for_each_cell_mut(&mut self.lines, ROW_DATA_COLUMN, |_, token| {
            token.types.remove(RobotTokenType::ForContinue);
            if token.has_type(RobotTokenType::ForEndMarker) {
                token.types.remove(RobotTokenType::ForEndMarker);
                token.types.set_primary(RobotTokenType::Action);
            }
        });
    }

    pub(crate) fn absorb(&mut self, mut lines: Vec<RobotLine>) {
        self.lines.append(&mut lines);
    }
}

/// Types of the data cells of an executable row
fn executable_types(texts: &[String]) -> Vec<RobotTokenType> {
    let mut types = Vec::with_capacity(texts.len());
    let mut rest = texts;
    if rest.first().is_some_and(|t| t == FOR_CONTINUE_MARKER) {
        types.push(RobotTokenType::ForContinueMarker);
        rest = &rest[1..];
    }
    if rest.first().is_some_and(|t| is_for_marker(t)) {
        types.push(RobotTokenType::ForMarker);
        let mut after_in = false;
        for text in &rest[1..] {
            let token_type = if after_in {
                RobotTokenType::ActionArgument
            } else if is_for_in_marker(text) {
                after_in = true;
                RobotTokenType::ForInMarker
            } else {
                RobotTokenType::Assignment
            };
            types.push(token_type);
        }
        return types;
    }
    let mut action_seen = false;
    for text in rest {
        let token_type = if action_seen {
            RobotTokenType::ActionArgument
        } else if is_variable_declaration(text) {
            RobotTokenType::Assignment
        } else {
            action_seen = true;
            RobotTokenType::Action
        };
        types.push(token_type);
    }
    types
}

fn local_argument_type(kind: LocalSettingKind, index: usize) -> RobotTokenType {
    match kind {
        LocalSettingKind::Documentation => RobotTokenType::DocumentationText,
        LocalSettingKind::Tags => RobotTokenType::TagName,
        LocalSettingKind::Setup | LocalSettingKind::Teardown | LocalSettingKind::Template => {
            if index == 0 {
                RobotTokenType::KeywordName
            } else {
                RobotTokenType::KeywordArgument
            }
        }
        LocalSettingKind::Timeout => match index {
            0 => RobotTokenType::TimeoutValue,
            1 => RobotTokenType::TimeoutMessage,
            _ => RobotTokenType::UnwantedArgument,
        },
        LocalSettingKind::Arguments => RobotTokenType::ArgumentDeclaration,
        LocalSettingKind::Return => RobotTokenType::ReturnValue,
        LocalSettingKind::Unknown => RobotTokenType::UnwantedArgument,
    }
}

/// Loop structure problem found by [`CodeHolder::link_loops`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopProblem {
    /// `FOR` row without matching `END`
    Unclosed { row: usize },
    /// `END` row without an open loop
    UnmatchedEnd { row: usize },
}

/// A test case, task or keyword
#[derive(Debug, Clone, PartialEq)]
pub struct CodeHolder {
    id: ElementId,
    section: SectionId,
    kind: HolderKind,
    pub(crate) name_line: RobotLine,
    pub(crate) children: Vec<CodeRow>,
    /// Blank lines not yet turned into rows, keyed by the index of the row
    /// they precede
    pub(crate) pending: Vec<(usize, RobotLine)>,
    revision: u64,
}

impl CodeHolder {
    pub(crate) fn new(kind: HolderKind, section: SectionId, name_line: RobotLine) -> Self {
        let mut holder = Self {
            id: ElementId::new(),
            section,
            kind,
            name_line,
            children: Vec::new(),
            pending: Vec::new(),
            revision: 0,
        };
        holder.type_name();
        holder
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> HolderKind {
        self.kind
    }

    /// Bumped on every change to the rows
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
    }

    pub fn name_token(&self) -> Option<&RobotToken> {
        self.name_line.first_token().filter(|_| self.name_line.first_column == 0)
    }

    pub fn name(&self) -> &str {
        self.name_token().map(RobotToken::text).unwrap_or_default()
    }

    pub fn name_line(&self) -> &RobotLine {
        &self.name_line
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        if let Some(token) = self.name_line.tokens_mut().next() {
            token.set_text(name);
        }
        self.type_name();
    }

    fn type_name(&mut self) {
        let kind = self.kind;
        for (i, token) in self.name_line.tokens_mut().enumerate() {
            if i == 0 && !token.is_comment() {
                token.types.clear_semantic();
                token.types.set_primary(RobotTokenType::HolderName(kind));
            }
        }
    }

    pub fn rows(&self) -> &[CodeRow] {
        &self.children
    }

    pub fn row(&self, index: usize) -> Option<&CodeRow> {
        self.children.get(index)
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut CodeRow> {
        self.revision += 1;
        self.children.get_mut(index)
    }

    pub fn row_position(&self, id: ElementId) -> Option<usize> {
        self.children.iter().position(|r| r.id() == id)
    }

    /// Blank lines still waiting for the empty-row fixer
    pub fn pending_lines(&self) -> &[(usize, RobotLine)] {
        &self.pending
    }

    /// Local settings of the given kind
    pub fn settings(&self, kind: LocalSettingKind) -> impl Iterator<Item = &CodeRow> {
        self.children
            .iter()
            .filter(move |r| r.kind() == RowKind::Setting(kind))
    }

    pub fn documentation(&self) -> Option<&CodeRow> {
        self.settings(LocalSettingKind::Documentation).next()
    }

    pub fn executable_rows(&self) -> impl Iterator<Item = &CodeRow> {
        self.children
            .iter()
            .filter(|r| r.kind() == RowKind::Executable)
    }

    pub(crate) fn push_row(&mut self, row: CodeRow) {
        self.children.push(row);
        self.touch();
    }

    pub(crate) fn push_pending(&mut self, line: RobotLine) {
        self.pending.push((self.children.len(), line));
    }

    /// Continue the last row with `line`, taking pending blank lines along.
    ///
    /// Fails when there is no row or the last row is a comment.
    pub(crate) fn continue_last_row(&mut self, line: RobotLine) -> Result<(), RobotLine> {
        let position = self.children.len();
        let Some(last) = self.children.last_mut() else {
            return Err(line);
        };
        if last.is_comment_only() || last.is_empty() {
            return Err(line);
        }
        let mut blanks: Vec<RobotLine> = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        for (at, pending) in self.pending.drain(..) {
            if at == position {
                blanks.push(pending);
            } else {
                kept.push((at, pending));
            }
        }
        self.pending = kept;
        blanks.push(line);
        last.absorb(blanks);
        self.revision += 1;
        Ok(())
    }

    /// Insert `row` at `index` (clamped)
    pub fn insert_row(&mut self, index: usize, row: CodeRow) {
        let index = index.min(self.children.len());
        for (at, _) in &mut self.pending {
            if *at > index {
                *at += 1;
            }
        }
        self.children.insert(index, row);
        self.touch();
    }

    pub fn remove_row(&mut self, index: usize) -> Option<CodeRow> {
        if index >= self.children.len() {
            return None;
        }
        let row = self.children.remove(index);
        if index == 0 && self.name_line.eol.kind == EolKind::Partial {
            self.name_line.eol.kind = row
                .lines
                .first()
                .map(|l| l.eol.kind)
                .unwrap_or(EolKind::Lf);
        }
        for (at, _) in &mut self.pending {
            if *at > index {
                *at -= 1;
            }
        }
        self.touch();
        Some(row)
    }

    pub fn move_row_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.children.len() {
            return false;
        }
        self.children.swap(index - 1, index);
        self.touch();
        true
    }

    pub fn move_row_down(&mut self, index: usize) -> bool {
        index + 1 < self.children.len() && self.move_row_up(index + 1)
    }

    /// Pair `FOR`/`END` rows and tag loop bodies.
    ///
    /// Rows inside a new style loop get [`RobotTokenType::ForContinue`] on
    /// their first cell and the closing `END` becomes a
    /// [`RobotTokenType::ForEndMarker`]. An `END` with no open loop stays an
    /// ordinary call.
    pub fn link_loops(&mut self) -> Vec<LoopProblem> {
        let mut problems = Vec::new();
        let mut open: Vec<usize> = Vec::new();
        for (index, row) in self.children.iter_mut().enumerate() {
            row.clear_loop_tags();
            if row.kind() != RowKind::Executable {
                continue;
            }
            let first = match row.first_cell() {
                Some(token) => token.text().to_string(),
                None => continue,
            };
            let inside = !open.is_empty();
            if first == FOR_MARKER {
                if inside {
                    tag_first(row, RobotTokenType::ForContinue);
                }
                open.push(index);
            } else if first == END_MARKER {
                if open.pop().is_some() {
                    if let Some(token) = row.first_cell_mut() {
                        token.types.remove(RobotTokenType::Action);
                        token.types.set_primary(RobotTokenType::ForEndMarker);
                    }
                } else {
                    problems.push(LoopProblem::UnmatchedEnd { row: index });
                }
            } else if inside {
                tag_first(row, RobotTokenType::ForContinue);
            }
        }
        problems.extend(open.into_iter().map(|row| LoopProblem::Unclosed { row }));
        self.revision += 1;
        problems
    }

    /// Re-type the holder name and every row
    pub fn retype_all(&mut self) {
        self.type_name();
        for row in &mut self.children {
            row.type_cells();
        }
        self.touch();
    }

    /// Reclassify and re-type the row at `index`, then relink loops
    pub fn retype_row(&mut self, index: usize) {
        let kind = self.kind;
        if let Some(row) = self.children.get_mut(index) {
            row.reclassify(kind);
        }
        self.link_loops();
    }
}

fn tag_first(row: &mut CodeRow, token_type: RobotTokenType) {
    if let Some(token) = row.first_cell_mut() {
        token.types.insert(token_type);
    }
}

impl TableElement for CodeHolder {
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
        let mut lines = vec![&self.name_line];
        for position in 0..=self.children.len() {
            lines.extend(
                self.pending
                    .iter()
                    .filter(|(at, _)| *at == position)
                    .map(|(_, line)| line),
            );
            if let Some(row) = self.children.get(position) {
                lines.extend(&row.lines);
            }
        }
        lines
    }

    fn lines_mut(&mut self) -> Vec<&mut RobotLine> {
        let mut pending: Vec<(usize, &mut RobotLine)> =
            self.pending.iter_mut().map(|(at, line)| (*at, line)).collect();
        let mut lines = vec![&mut self.name_line];
        let mut rows = self.children.iter_mut();
        for position in 0..=rows.len() {
            let mut i = 0;
            while i < pending.len() {
                if pending[i].0 == position {
                    lines.push(pending.remove(i).1);
                } else {
                    i += 1;
                }
            }
            if let Some(row) = rows.next() {
                lines.extend(row.lines.iter_mut());
            }
        }
        lines
    }
}

pub type CodeTable = Table<CodeHolder>;

impl Table<CodeHolder> {
    pub fn by_name(&self, name: &str) -> Option<&CodeHolder> {
        let wanted = crate::core::text_utils::normalize_name(name);
        self.iter()
            .find(|h| crate::core::text_utils::normalize_name(h.name()) == wanted)
    }
}
