//! Separator modes and splitting of lines into cells.

use std::path::Path;

use text_size::TextSize;

use super::lexer::{Chunk, ChunkKind, RawLine, chunks};
use super::token::{LineElement, RobotLine, RobotToken, Separator, SeparatorMode};
use crate::base::FilePosition;
use crate::base::constants::TSV_EXTENSION;

/// Declared dialect of a file.
///
/// Any hint other than `Auto` skips detection from the first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatHint {
    /// TSV when the first non-blank line is tab separated, else per line
    #[default]
    Auto,
    /// Every line is space separated; pipes are cell text
    TxtSpace,
    /// Lines opening with `| ` are pipe separated. Lines written without a
    /// leading pipe, such as bare headers, stay space separated.
    TxtPipe,
    Tsv,
}

impl FormatHint {
    /// Hint derived from a file name: `.tsv` files are tab separated
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case(TSV_EXTENSION) => Self::Tsv,
            _ => Self::Auto,
        }
    }
}

/// Dialect actually used for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileFormat {
    /// Space or pipe separated, decided per line
    Txt,
    Tsv,
}

/// Resolve the format of a file from its hint and first non-blank line
pub fn detect_format(lines: &[RawLine<'_>], hint: FormatHint) -> FileFormat {
    match hint {
        FormatHint::Tsv => FileFormat::Tsv,
        FormatHint::TxtSpace | FormatHint::TxtPipe => FileFormat::Txt,
        FormatHint::Auto => {
            let first = lines.iter().map(|l| l.content).find(|c| !c.trim().is_empty());
            match first {
                Some(content) => {
                    let pipe = content.trim_start().starts_with('|');
                    if !pipe && content.contains('\t') && !content.contains("  ") {
                        FileFormat::Tsv
                    } else {
                        FileFormat::Txt
                    }
                }
                None => FileFormat::Txt,
            }
        }
    }
}

/// Mode of one line of a file in the given format
pub fn line_mode(content: &str, format: FileFormat, hint: FormatHint) -> SeparatorMode {
    match (format, hint) {
        (FileFormat::Tsv, _) => SeparatorMode::Tsv,
        (FileFormat::Txt, FormatHint::TxtSpace) => SeparatorMode::Space,
        (FileFormat::Txt, _) => {
            let trimmed = content.trim_start_matches([' ', '\t']);
            let opens_with_pipe = trimmed.starts_with('|')
                && trimmed[1..]
                    .chars()
                    .next()
                    .is_none_or(|c| c == ' ' || c == '\t');
            if opens_with_pipe {
                SeparatorMode::Pipe
            } else {
                SeparatorMode::Space
            }
        }
    }
}

/// A piece of a line before positions are assigned
enum Piece {
    Cell(usize, usize),
    Separator(usize, usize),
    EmptyCell(usize),
}

/// Split one raw line into tokens and separators.
pub fn split_line(raw: &RawLine<'_>, line_number: usize, mode: SeparatorMode) -> RobotLine {
    let content = raw.content;
    let parts = chunks(content);
    let pieces = match mode {
        SeparatorMode::Space => split_space(&parts),
        SeparatorMode::Pipe => split_pipe(&parts),
        SeparatorMode::Tsv => split_tsv(&parts),
    };

    let first_column = match (mode, pieces.first()) {
        (SeparatorMode::Pipe, _) => 0,
        (_, Some(Piece::Separator(..))) => 1,
        _ => 0,
    };

    let position_at = |byte: usize| {
        FilePosition::new(
            line_number,
            content[..byte].chars().count(),
            TextSize::new((raw.offset + byte) as u32),
        )
    };

    let elements = pieces
        .into_iter()
        .map(|piece| match piece {
            Piece::Cell(start, end) => {
                LineElement::Token(RobotToken::new(&content[start..end]).at(position_at(start)))
            }
            Piece::EmptyCell(at) => LineElement::Token(RobotToken::new("").at(position_at(at))),
            Piece::Separator(start, end) => {
                let mut separator = Separator::new(&content[start..end]);
                separator.position = position_at(start);
                LineElement::Separator(separator)
            }
        })
        .collect();

    let mut line = RobotLine::new(elements, raw.eol, mode, first_column);
    line.eol.position = position_at(content.len());
    line
}

fn push_cell(pieces: &mut Vec<Piece>, cell: &mut Option<(usize, usize)>) {
    if let Some((start, end)) = cell.take() {
        pieces.push(Piece::Cell(start, end));
    }
}

fn extend_cell(cell: &mut Option<(usize, usize)>, chunk: &Chunk<'_>) {
    *cell = match *cell {
        Some((start, _)) => Some((start, chunk.end())),
        None => Some((chunk.start, chunk.end())),
    };
}

/// Two or more spaces or any tab separate cells; whitespace at either end
/// of the line is always a separator.
fn split_space(parts: &[Chunk<'_>]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut cell = None;
    let mut i = 0;
    while i < parts.len() {
        if !parts[i].is_whitespace() {
            extend_cell(&mut cell, &parts[i]);
            i += 1;
            continue;
        }
        let mut j = i;
        while j < parts.len() && parts[j].is_whitespace() {
            j += 1;
        }
        let start = parts[i].start;
        let end = parts[j - 1].end();
        let has_tab = parts[i..j].iter().any(|c| c.kind == ChunkKind::Tab);
        if i == 0 || j == parts.len() || has_tab || end - start >= 2 {
            push_cell(&mut pieces, &mut cell);
            pieces.push(Piece::Separator(start, end));
        } else {
            extend_cell(&mut cell, &parts[i]);
        }
        i = j;
    }
    push_cell(&mut pieces, &mut cell);
    pieces
}

/// A pipe separates cells when surrounded by whitespace (or line ends).
/// Whitespace around such pipes belongs to the separator; consecutive
/// separating pipes delimit empty cells.
fn split_pipe(parts: &[Chunk<'_>]) -> Vec<Piece> {
    let separating: Vec<bool> = (0..parts.len())
        .map(|k| {
            parts[k].kind == ChunkKind::Pipe
                && (k == 0 || parts[..k].iter().all(Chunk::is_whitespace) || parts[k - 1].is_whitespace())
                && (k + 1 == parts.len() || parts[k + 1].is_whitespace())
        })
        .collect();
    let in_group = |k: usize| parts[k].is_whitespace() || separating[k];

    let mut pieces = Vec::new();
    let mut cell = None;
    let mut k = 0;
    while k < parts.len() {
        if !in_group(k) {
            extend_cell(&mut cell, &parts[k]);
            k += 1;
            continue;
        }
        let mut j = k;
        while j < parts.len() && in_group(j) {
            j += 1;
        }
        let pipes: Vec<usize> = (k..j).filter(|x| separating[*x]).collect();
        if pipes.is_empty() && k > 0 && j < parts.len() {
            // whitespace inside a cell
            extend_cell(&mut cell, &parts[k]);
            for chunk in &parts[k + 1..j] {
                extend_cell(&mut cell, chunk);
            }
            k = j;
            continue;
        }
        push_cell(&mut pieces, &mut cell);
        let mut piece_start = parts[k].start;
        for pipe in pipes.iter().skip(1) {
            let boundary = parts[*pipe].start;
            pieces.push(Piece::Separator(piece_start, boundary));
            pieces.push(Piece::EmptyCell(boundary));
            piece_start = boundary;
        }
        pieces.push(Piece::Separator(piece_start, parts[j - 1].end()));
        k = j;
    }
    push_cell(&mut pieces, &mut cell);
    pieces
}

/// Every tab separates cells; consecutive tabs delimit empty cells.
fn split_tsv(parts: &[Chunk<'_>]) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut cell = None;
    let mut previous_was_separator = false;
    for chunk in parts {
        if chunk.kind == ChunkKind::Tab {
            if cell.is_none() && previous_was_separator {
                pieces.push(Piece::EmptyCell(chunk.start));
            }
            push_cell(&mut pieces, &mut cell);
            pieces.push(Piece::Separator(chunk.start, chunk.end()));
            previous_was_separator = true;
        } else {
            extend_cell(&mut cell, chunk);
            previous_was_separator = false;
        }
    }
    push_cell(&mut pieces, &mut cell);
    pieces
}
