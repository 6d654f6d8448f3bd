//! Semantic type tags of tokens.

use super::kinds::{HolderKind, LocalSettingKind, SectionKind, SettingKind};

/// Semantic tag of a token.
///
/// A token carries a set of these; the first one is its primary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotTokenType {
    Unknown,

    // =========================================================================
    // Headers
    // =========================================================================
    TableHeader(SectionKind),
    TableHeaderColumn,

    // =========================================================================
    // Settings table
    // =========================================================================
    SettingDeclaration(SettingKind),
    /// Library name or resource/variables file path
    ImportPath,
    ImportArgument,
    /// `WITH NAME` or `AS`
    LibraryAliasMarker,
    LibraryAlias,
    DocumentationText,
    MetadataKey,
    MetadataValue,
    /// Keyword run by a setup/teardown/template setting
    KeywordName,
    KeywordArgument,
    TagName,
    TimeoutValue,
    TimeoutMessage,
    /// Value a setting does not accept
    UnwantedArgument,

    // =========================================================================
    // Variables table
    // =========================================================================
    VariableDeclaration,
    VariableValue,

    // =========================================================================
    // Code tables
    // =========================================================================
    HolderName(HolderKind),
    LocalSettingDeclaration(LocalSettingKind),
    /// Formal argument in `[Arguments]`
    ArgumentDeclaration,
    ReturnValue,
    /// Keyword called by an executable row
    Action,
    ActionArgument,
    /// Variable assigned from the result of the action
    Assignment,
    ForMarker,
    ForInMarker,
    ForEndMarker,
    /// Old style `\` loop body marker
    ForContinueMarker,
    /// Row belongs to the body of a loop
    ForContinue,

    // =========================================================================
    // Lexical
    // =========================================================================
    Comment,
    PreviousLineContinue,
    EmptyCell,
    Deprecated,
}

impl RobotTokenType {
    /// Tags that belong to the lexical layer and survive re-typing of a cell
    pub fn is_lexical(&self) -> bool {
        matches!(
            self,
            Self::Comment | Self::PreviousLineContinue | Self::EmptyCell
        )
    }
}

/// Ordered set of token types (first entry is the primary type)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenTypes(Vec<RobotTokenType>);

impl TokenTypes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn single(token_type: RobotTokenType) -> Self {
        Self(vec![token_type])
    }

    pub fn primary(&self) -> RobotTokenType {
        self.0.first().copied().unwrap_or(RobotTokenType::Unknown)
    }

    pub fn contains(&self, token_type: RobotTokenType) -> bool {
        self.0.contains(&token_type)
    }

    pub fn contains_any(&self, types: &[RobotTokenType]) -> bool {
        types.iter().any(|t| self.contains(*t))
    }

    /// Add a type unless already present
    pub fn insert(&mut self, token_type: RobotTokenType) {
        if !self.contains(token_type) {
            self.0.push(token_type);
        }
    }

    /// Make `token_type` the primary type
    pub fn set_primary(&mut self, token_type: RobotTokenType) {
        self.0.retain(|t| *t != token_type);
        self.0.insert(0, token_type);
    }

    pub fn remove(&mut self, token_type: RobotTokenType) {
        self.0.retain(|t| *t != token_type);
    }

    /// Drop every non-lexical type
    pub fn clear_semantic(&mut self) {
        self.0.retain(|t| t.is_lexical());
    }

    pub fn iter(&self) -> impl Iterator<Item = &RobotTokenType> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
