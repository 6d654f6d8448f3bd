//! Derived view of one row of a test case, task or keyword.

use crate::base::FileRegion;
use crate::parser::errors::BuildMessage;
use crate::parser::token::RobotToken;

use super::variables::{VariableDeclaration, VariableScope, extract_from_token, region_in};

/// Classification of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowType {
    /// Keyword call, possibly assigning its result
    Simple,
    /// Loop header (`FOR` or `:FOR`)
    For,
    /// Row inside a loop body
    ForContinue,
    /// `END` closing a loop
    ForEnd,
    /// Bracketed local setting
    Setting,
    /// Row holding only a comment
    CommentedHash,
    /// Blank or orphan rows
    Unknown,
}

/// A variable found in a cell, with its place in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    pub variable: VariableDeclaration,
    pub region: FileRegion,
}

impl VariableReference {
    fn new(token: &RobotToken, variable: &VariableDeclaration) -> Self {
        Self {
            region: region_in(token.text(), token.position, variable.range),
            variable: variable.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.variable.text
    }
}

/// Everything derived from one row.
///
/// Descriptors are never stored in the model; rebuild them after the row
/// changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub row_type: RowType,
    /// Index of the row in its holder
    pub row: usize,
    /// Called keyword, loop marker or setting declaration
    pub action: Option<RobotToken>,
    /// Variables assigned by the row
    pub created_variables: Vec<VariableReference>,
    pub used_variables: Vec<VariableReference>,
    /// Variables inside comments
    pub commented_variables: Vec<VariableReference>,
    /// Cells passed to the action
    pub arguments: Vec<RobotToken>,
    pub messages: Vec<BuildMessage>,
    /// Row of the loop header owning a loop body row
    pub loop_start: Option<usize>,
}

impl RowDescriptor {
    pub fn new(row_type: RowType, row: usize) -> Self {
        Self {
            row_type,
            row,
            action: None,
            created_variables: Vec::new(),
            used_variables: Vec::new(),
            commented_variables: Vec::new(),
            arguments: Vec::new(),
            messages: Vec::new(),
            loop_start: None,
        }
    }

    pub fn action_name(&self) -> Option<&str> {
        self.action.as_ref().map(RobotToken::text)
    }

    pub fn argument_texts(&self) -> Vec<&str> {
        self.arguments.iter().map(RobotToken::text).collect()
    }

    pub fn created_names(&self) -> Vec<&str> {
        self.created_variables.iter().map(VariableReference::text).collect()
    }

    pub fn used_names(&self) -> Vec<&str> {
        self.used_variables.iter().map(VariableReference::text).collect()
    }

    /// Record `token` as a created variable when it is exactly one
    /// variable (a trailing `=` allowed). Returns whether it was.
    pub(crate) fn add_created(&mut self, token: &RobotToken) -> bool {
        let text = token.text().trim_end_matches('=').trim_end();
        let result = super::variables::extract(text);
        let Some(variable) = result.single_variable() else {
            return false;
        };
        if variable.scope == VariableScope::Environment {
            return false;
        }
        self.created_variables.push(VariableReference::new(token, variable));
        for nested in variable.nested() {
            self.used_variables.push(VariableReference::new(token, nested));
        }
        true
    }

    /// Record every variable of `token` as used
    pub(crate) fn add_used(&mut self, token: &RobotToken) {
        let result = extract_from_token(token);
        for variable in result.all_variables() {
            self.used_variables.push(VariableReference::new(token, variable));
        }
        self.messages.extend(result.messages);
    }

    /// Record the variables of a comment cell
    pub(crate) fn add_commented(&mut self, token: &RobotToken) {
        let result = extract_from_token(token);
        for variable in result.all_variables() {
            self.commented_variables.push(VariableReference::new(token, variable));
        }
    }
}
