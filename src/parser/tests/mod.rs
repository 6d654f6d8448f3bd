#![allow(clippy::unwrap_used)]

mod tests_separator;

use super::token::RobotLine;

/// Texts of all tokens of a line
pub(super) fn token_texts(line: &RobotLine) -> Vec<String> {
    line.tokens().map(|t| t.text().to_string()).collect()
}

/// Raw texts of all separators of a line
pub(super) fn separator_texts(line: &RobotLine) -> Vec<String> {
    line.elements
        .iter()
        .filter(|e| e.is_separator())
        .map(|e| e.text().to_string())
        .collect()
}
