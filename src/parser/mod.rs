//! Token recognizer and line reader.
//!
//! Turns file text into [`RobotLine`]s of typed tokens and separators:
//! - [`lexer`] cuts text into lines and lines into logos chunks
//! - [`separator`] forms cells according to the line's separator mode
//! - [`recognizer`] recognizes headers, setting names and lexical markers
//!
//! Reading never fails: malformed input still produces a best-effort line
//! sequence and problems surface later as [`BuildMessage`]s.

pub mod errors;
pub mod kinds;
pub mod lexer;
pub mod recognizer;
pub mod separator;
pub mod token;
pub mod token_type;

pub use errors::{BuildMessage, ErrorCode, Severity};
pub use kinds::{HolderKind, LocalSettingKind, SectionKind, SettingKind, SettingsGroup};
pub use separator::{FileFormat, FormatHint};
pub use token::{
    EndOfLine, EolKind, LineElement, RobotLine, RobotToken, Separator, SeparatorKind,
    SeparatorMode,
};
pub use token_type::{RobotTokenType, TokenTypes};

/// File text split into typed lines
#[derive(Debug, Clone)]
pub struct TokenizedFile {
    pub bom: bool,
    pub format: FileFormat,
    pub lines: Vec<RobotLine>,
}

/// Read file text into lines of tokens and separators.
pub fn tokenize(text: &str, hint: FormatHint) -> TokenizedFile {
    let read = lexer::read_lines(text);
    let format = separator::detect_format(&read.lines, hint);
    let lines = read
        .lines
        .iter()
        .enumerate()
        .map(|(number, raw)| {
            let mode = separator::line_mode(raw.content, format, hint);
            let mut line = separator::split_line(raw, number, mode);
            recognizer::tag_lexical(&mut line, 0);
            line
        })
        .collect::<Vec<_>>();
    tracing::trace!(lines = lines.len(), ?format, "tokenized file");
    TokenizedFile {
        bom: read.bom,
        format,
        lines,
    }
}

#[cfg(test)]
mod tests;
