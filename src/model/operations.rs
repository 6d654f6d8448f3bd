//! Per-kind setting operations.
//!
//! Every setting kind owns its column mapping and the way it is created,
//! updated and removed. The editing layer only talks to the
//! [`SettingOperation`] trait and picks the implementation with
//! [`operation_for`] or [`operation_for_token`].

use smol_str::SmolStr;

use crate::base::ElementId;
use crate::base::constants::{EMPTY_CELL_MARKER, LIBRARY_ALIAS_MARKERS};
use crate::parser::kinds::SettingKind;
use crate::parser::recognizer::recognize_setting;
use crate::parser::token::RobotLine;
use crate::parser::token_type::RobotTokenType;

use super::cells;
use super::settings::{Setting, SettingTable};
use super::table::SectionId;

/// Cell of a setting addressed by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAddress {
    /// Argument after the declaration, 0-based
    Argument(usize),
    /// The trailing comment
    Comment,
}

pub trait SettingOperation: Send + Sync {
    fn kind(&self) -> SettingKind;

    fn is_applicable(&self, token_type: RobotTokenType) -> bool {
        token_type == RobotTokenType::SettingDeclaration(self.kind())
    }

    /// Type of the argument at `index` (0 is the first cell after the
    /// declaration)
    fn argument_type(&self, index: usize) -> RobotTokenType;

    /// Type the declaration and arguments by column alone
    fn type_arguments(&self, setting: &mut Setting) {
        assign_column_types(self, setting);
    }

    /// Re-derive the semantic types of every cell of `setting`
    fn retype(&self, setting: &mut Setting) {
        self.type_arguments(setting);
    }

    /// Build a new setting and insert it at `index`
    fn create(
        &self,
        table: &mut SettingTable,
        index: usize,
        section: SectionId,
        template: &RobotLine,
        arguments: &[String],
        comment: &[String],
    ) -> ElementId {
        let mut texts = vec![self.kind().canonical_name().to_string()];
        texts.extend(arguments.iter().cloned());
        let mut setting = Setting::new(self.kind(), section, cells::new_line(&texts, template, 0));
        crate::parser::recognizer::tag_lexical(&mut setting.lines[0], 0);
        if !comment.is_empty() {
            cells::set_comment(&mut setting.lines, 0, comment);
        }
        self.retype(&mut setting);
        let id = setting.id();
        table.insert(index, setting);
        id
    }

    /// Write `value` into a cell of `setting`
    fn update(&self, setting: &mut Setting, address: CellAddress, value: &str) {
        match address {
            CellAddress::Argument(index) => {
                cells::write_cell(&mut setting.lines, 0, index + 1, value, 1);
            }
            CellAddress::Comment => {
                let comment: Vec<String> = if value.is_empty() {
                    Vec::new()
                } else {
                    vec![value.to_string()]
                };
                cells::set_comment(&mut setting.lines, 0, &comment);
            }
        }
        self.retype(setting);
    }

    /// Insert an argument before argument `index`, shifting the rest right.
    ///
    /// An empty value becomes `\`; one that ends up last is trimmed again.
    fn insert_argument(&self, setting: &mut Setting, index: usize, value: &str) -> bool {
        let arguments = cells::data_cell_count(&setting.lines, 0).saturating_sub(1);
        if index > arguments || setting.declaration().is_none() {
            return false;
        }
        let text = if value.is_empty() { EMPTY_CELL_MARKER } else { value };
        if !cells::insert_cell(&mut setting.lines, 0, index + 1, text) {
            return false;
        }
        cells::trim_trailing_empty(&mut setting.lines, 0, 1);
        self.retype(setting);
        true
    }

    /// Remove argument `index`, shifting the rest left
    fn remove_argument(&self, setting: &mut Setting, index: usize) -> Option<SmolStr> {
        let arguments = cells::data_cell_count(&setting.lines, 0).saturating_sub(1);
        if index >= arguments {
            return None;
        }
        let removed = cells::remove_cell(&mut setting.lines, 0, index + 1)?;
        cells::trim_trailing_empty(&mut setting.lines, 0, 1);
        self.retype(setting);
        Some(removed)
    }

    /// Take the setting out of the table, returning its former index
    fn remove(&self, table: &mut SettingTable, id: ElementId) -> Option<(usize, Setting)> {
        let index = table.position(id)?;
        table.remove(index).map(|setting| (index, setting))
    }
}

/// Type the declaration and arguments of `setting` by the operation's mapping
fn assign_column_types<O: SettingOperation + ?Sized>(operation: &O, setting: &mut Setting) {
    let kind = operation.kind();
    cells::for_each_cell_mut(&mut setting.lines, 0, |index, token| {
        token.types.clear_semantic();
        if token.is_comment() {
            return;
        }
        if index == 0 {
            token.types.set_primary(RobotTokenType::SettingDeclaration(kind));
            if recognize_setting(token.text()).1 {
                token.types.insert(RobotTokenType::Deprecated);
            }
        } else {
            token.types.set_primary(operation.argument_type(index - 1));
        }
    });
}

/// Tag a trailing `WITH NAME alias` pair of a library import.
///
/// Returns whether any token changed type.
pub fn tag_library_alias(setting: &mut Setting) -> bool {
    if setting.kind() != SettingKind::Library {
        return false;
    }
    let data = cells::data_cell_count(&setting.lines, 0);
    // declaration, name, marker, alias
    if data < 4 {
        return false;
    }
    let texts = cells::cell_texts(&setting.lines, 0);
    if !LIBRARY_ALIAS_MARKERS.contains(&texts[data - 2].as_str()) {
        return false;
    }
    let mut changed = false;
    cells::for_each_cell_mut(&mut setting.lines, 0, |index, token| {
        let wanted = if index == data - 2 {
            RobotTokenType::LibraryAliasMarker
        } else if index == data - 1 {
            RobotTokenType::LibraryAlias
        } else {
            return;
        };
        if token.primary_type() != wanted {
            token.types.clear_semantic();
            token.types.set_primary(wanted);
            changed = true;
        }
    });
    changed
}

pub struct LibraryOperation;

impl SettingOperation for LibraryOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Library
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        if index == 0 {
            RobotTokenType::ImportPath
        } else {
            RobotTokenType::ImportArgument
        }
    }

    fn retype(&self, setting: &mut Setting) {
        self.type_arguments(setting);
        tag_library_alias(setting);
    }
}

pub struct ResourceOperation;

impl SettingOperation for ResourceOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Resource
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        if index == 0 {
            RobotTokenType::ImportPath
        } else {
            RobotTokenType::UnwantedArgument
        }
    }
}

pub struct VariablesImportOperation;

impl SettingOperation for VariablesImportOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Variables
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        if index == 0 {
            RobotTokenType::ImportPath
        } else {
            RobotTokenType::ImportArgument
        }
    }
}

pub struct DocumentationOperation;

impl SettingOperation for DocumentationOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Documentation
    }

    fn argument_type(&self, _index: usize) -> RobotTokenType {
        RobotTokenType::DocumentationText
    }
}

pub struct MetadataOperation;

impl SettingOperation for MetadataOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Metadata
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        if index == 0 {
            RobotTokenType::MetadataKey
        } else {
            RobotTokenType::MetadataValue
        }
    }
}

/// Setups, teardowns and templates: a keyword name and its arguments
pub struct KeywordCallOperation(SettingKind);

impl SettingOperation for KeywordCallOperation {
    fn kind(&self) -> SettingKind {
        self.0
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        if index == 0 {
            RobotTokenType::KeywordName
        } else {
            RobotTokenType::KeywordArgument
        }
    }
}

pub struct TimeoutOperation(SettingKind);

impl SettingOperation for TimeoutOperation {
    fn kind(&self) -> SettingKind {
        self.0
    }

    fn argument_type(&self, index: usize) -> RobotTokenType {
        match index {
            0 => RobotTokenType::TimeoutValue,
            1 => RobotTokenType::TimeoutMessage,
            _ => RobotTokenType::UnwantedArgument,
        }
    }
}

pub struct TagsOperation(SettingKind);

impl SettingOperation for TagsOperation {
    fn kind(&self) -> SettingKind {
        self.0
    }

    fn argument_type(&self, _index: usize) -> RobotTokenType {
        RobotTokenType::TagName
    }
}

pub struct UnknownSettingOperation;

impl SettingOperation for UnknownSettingOperation {
    fn kind(&self) -> SettingKind {
        SettingKind::Unknown
    }

    fn argument_type(&self, _index: usize) -> RobotTokenType {
        RobotTokenType::UnwantedArgument
    }
}

static LIBRARY: LibraryOperation = LibraryOperation;
static RESOURCE: ResourceOperation = ResourceOperation;
static VARIABLES: VariablesImportOperation = VariablesImportOperation;
static DOCUMENTATION: DocumentationOperation = DocumentationOperation;
static METADATA: MetadataOperation = MetadataOperation;
static SUITE_SETUP: KeywordCallOperation = KeywordCallOperation(SettingKind::SuiteSetup);
static SUITE_TEARDOWN: KeywordCallOperation = KeywordCallOperation(SettingKind::SuiteTeardown);
static TEST_SETUP: KeywordCallOperation = KeywordCallOperation(SettingKind::TestSetup);
static TEST_TEARDOWN: KeywordCallOperation = KeywordCallOperation(SettingKind::TestTeardown);
static TASK_SETUP: KeywordCallOperation = KeywordCallOperation(SettingKind::TaskSetup);
static TASK_TEARDOWN: KeywordCallOperation = KeywordCallOperation(SettingKind::TaskTeardown);
static TEST_TEMPLATE: KeywordCallOperation = KeywordCallOperation(SettingKind::TestTemplate);
static TASK_TEMPLATE: KeywordCallOperation = KeywordCallOperation(SettingKind::TaskTemplate);
static TEST_TIMEOUT: TimeoutOperation = TimeoutOperation(SettingKind::TestTimeout);
static TASK_TIMEOUT: TimeoutOperation = TimeoutOperation(SettingKind::TaskTimeout);
static FORCE_TAGS: TagsOperation = TagsOperation(SettingKind::ForceTags);
static DEFAULT_TAGS: TagsOperation = TagsOperation(SettingKind::DefaultTags);
static TEST_TAGS: TagsOperation = TagsOperation(SettingKind::TestTags);
static KEYWORD_TAGS: TagsOperation = TagsOperation(SettingKind::KeywordTags);
static UNKNOWN: UnknownSettingOperation = UnknownSettingOperation;

/// All operations, one per setting kind
static OPERATIONS: [&dyn SettingOperation; 20] = [
    &LIBRARY,
    &RESOURCE,
    &VARIABLES,
    &DOCUMENTATION,
    &METADATA,
    &SUITE_SETUP,
    &SUITE_TEARDOWN,
    &TEST_SETUP,
    &TEST_TEARDOWN,
    &TASK_SETUP,
    &TASK_TEARDOWN,
    &TEST_TEMPLATE,
    &TASK_TEMPLATE,
    &TEST_TIMEOUT,
    &TASK_TIMEOUT,
    &FORCE_TAGS,
    &DEFAULT_TAGS,
    &TEST_TAGS,
    &KEYWORD_TAGS,
    &UNKNOWN,
];

/// Operation owning settings of `kind`
pub fn operation_for(kind: SettingKind) -> &'static dyn SettingOperation {
    OPERATIONS
        .iter()
        .copied()
        .find(|op| op.kind() == kind)
        .unwrap_or(&UNKNOWN)
}

/// Operation applicable to a declaration token of the given type
pub fn operation_for_token(token_type: RobotTokenType) -> Option<&'static dyn SettingOperation> {
    OPERATIONS
        .iter()
        .copied()
        .find(|op| op.is_applicable(token_type))
}
