//! Cell access and editing over the physical lines of one element.
//!
//! An element (setting, variable, row) owns one or more lines. Its cells
//! are the tokens of those lines at or after the element's data column,
//! minus `...` continuation markers. Comment tokens are cells too; they
//! always trail the data cells.

use smol_str::SmolStr;

use crate::base::constants::{COMMENT_START, EMPTY_CELL_MARKER};
use crate::parser::recognizer::tag_lexical;
use crate::parser::token::{LineElement, RobotLine, RobotToken, Separator};
use crate::parser::token_type::RobotTokenType;

/// Location of a cell token inside an element's lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub line: usize,
    pub element: usize,
}

/// Locate every cell of the element
pub fn cell_refs(lines: &[RobotLine], data_column: usize) -> Vec<CellRef> {
    let mut refs = Vec::new();
    for (line_index, line) in lines.iter().enumerate() {
        let mut column = line.first_column;
        for (element_index, element) in line.elements.iter().enumerate() {
            let LineElement::Token(token) = element else {
                continue;
            };
            let cell_column = column;
            column += 1;
            if cell_column < data_column && token.is_empty() {
                continue;
            }
            if token.has_type(RobotTokenType::PreviousLineContinue) {
                continue;
            }
            refs.push(CellRef {
                line: line_index,
                element: element_index,
            });
        }
    }
    refs
}

pub fn token_at(lines: &[RobotLine], cell: CellRef) -> Option<&RobotToken> {
    lines.get(cell.line)?.elements.get(cell.element)?.as_token()
}

pub fn token_at_mut(lines: &mut [RobotLine], cell: CellRef) -> Option<&mut RobotToken> {
    lines
        .get_mut(cell.line)?
        .elements
        .get_mut(cell.element)?
        .as_token_mut()
}

/// All cell tokens in order
pub fn cells(lines: &[RobotLine], data_column: usize) -> Vec<&RobotToken> {
    cell_refs(lines, data_column)
        .into_iter()
        .filter_map(|r| token_at(lines, r))
        .collect()
}

/// Visit every cell token mutably, in order
pub fn for_each_cell_mut(
    lines: &mut [RobotLine],
    data_column: usize,
    mut visit: impl FnMut(usize, &mut RobotToken),
) {
    for (index, cell) in cell_refs(lines, data_column).into_iter().enumerate() {
        if let Some(token) = token_at_mut(lines, cell) {
            visit(index, token);
        }
    }
}

/// Texts of all cells
pub fn cell_texts(lines: &[RobotLine], data_column: usize) -> Vec<String> {
    cells(lines, data_column)
        .into_iter()
        .map(|t| t.text().to_string())
        .collect()
}

/// Number of cells before the first comment cell
pub fn data_cell_count(lines: &[RobotLine], data_column: usize) -> usize {
    cells(lines, data_column)
        .iter()
        .take_while(|t| !t.is_comment())
        .count()
}

/// Texts of the comment cells
pub fn comment_texts(lines: &[RobotLine], data_column: usize) -> Vec<String> {
    cells(lines, data_column)
        .into_iter()
        .filter(|t| t.is_comment())
        .map(|t| t.text().to_string())
        .collect()
}

/// Replace the text of the cell at `index`
pub fn set_cell(lines: &mut [RobotLine], data_column: usize, index: usize, text: &str) -> bool {
    let Some(cell) = cell_refs(lines, data_column).get(index).copied() else {
        return false;
    };
    match token_at_mut(lines, cell) {
        Some(token) => {
            token.set_text(text);
            tag_lexical(&mut lines[cell.line], data_column);
            true
        }
        None => false,
    }
}

/// Insert a cell before `index` (or append when `index` equals the count)
pub fn insert_cell(lines: &mut [RobotLine], data_column: usize, index: usize, text: &str) -> bool {
    let refs = cell_refs(lines, data_column);
    if index > refs.len() || lines.is_empty() {
        return false;
    }
    let token = LineElement::Token(RobotToken::new(text));

    if let Some(cell) = refs.get(index).copied() {
        let line = &mut lines[cell.line];
        let separator = LineElement::Separator(line.separator_template());
        line.elements.insert(cell.element, separator);
        line.elements.insert(cell.element, token);
        tag_lexical(line, data_column);
        return true;
    }

    if let Some(last) = refs.last().copied() {
        let line = &mut lines[last.line];
        let separator = LineElement::Separator(line.separator_template());
        line.elements.insert(last.element + 1, token);
        line.elements.insert(last.element + 1, separator);
        tag_lexical(line, data_column);
        return true;
    }

    // no cells yet: place the token at the data column of the first line
    let line = &mut lines[0];
    let template = line.separator_template();
    match line.elements.last() {
        Some(LineElement::Token(_)) => {
            line.elements.push(LineElement::Separator(template));
        }
        None if data_column > 0 => {
            line.elements.push(LineElement::Separator(template));
            line.first_column = data_column;
        }
        _ => {}
    }
    line.elements.push(token);
    tag_lexical(line, data_column);
    true
}

/// Remove the cell at `index` together with one adjacent separator
pub fn remove_cell(lines: &mut Vec<RobotLine>, data_column: usize, index: usize) -> Option<SmolStr> {
    let cell = cell_refs(lines, data_column).get(index).copied()?;
    let line = &mut lines[cell.line];
    let at = cell.element;
    let removed = match line.elements.get(at) {
        Some(LineElement::Token(token)) => SmolStr::new(token.text()),
        _ => return None,
    };

    let next_is_separator = line.elements.get(at + 1).is_some_and(LineElement::is_separator);
    let token_follows = line.elements[at + 1..].iter().any(|e| !e.is_separator());
    if next_is_separator && token_follows {
        line.elements.drain(at..at + 2);
    } else if at > 0 && line.elements[at - 1].is_separator() {
        line.elements.drain(at - 1..at + 1);
    } else {
        line.elements.remove(at);
        if next_is_separator && at < line.elements.len() {
            line.elements.remove(at);
        }
    }
    tag_lexical(line, data_column);

    // a continuation line left with nothing but its marker goes away
    if cell.line > 0 {
        let leftover = &lines[cell.line];
        let has_data = leftover
            .tokens()
            .any(|t| !t.is_empty() && !t.has_type(RobotTokenType::PreviousLineContinue));
        if !has_data {
            lines.remove(cell.line);
        }
    }
    Some(removed)
}

/// Remove trailing `\` data cells (never the first `keep` cells)
pub fn trim_trailing_empty(lines: &mut Vec<RobotLine>, data_column: usize, keep: usize) -> Vec<SmolStr> {
    let mut removed = Vec::new();
    loop {
        let data = data_cell_count(lines, data_column);
        if data <= keep {
            break;
        }
        let last_is_empty = cells(lines, data_column)
            .get(data - 1)
            .is_some_and(|t| t.text() == EMPTY_CELL_MARKER);
        if !last_is_empty {
            break;
        }
        match remove_cell(lines, data_column, data - 1) {
            Some(text) => removed.push(text),
            None => break,
        }
    }
    removed
}

/// Write `value` into data cell `index`.
///
/// An empty value in a middle cell becomes the escaped empty cell `\`; an
/// empty value in the last cell removes it along with trailing `\` cells.
/// Writing past the end pads the gap with `\`. The first `keep` cells are
/// never removed.
pub fn write_cell(lines: &mut Vec<RobotLine>, data_column: usize, index: usize, value: &str, keep: usize) {
    let data = data_cell_count(lines, data_column);
    if value.is_empty() && index >= keep {
        if index + 1 == data {
            remove_cell(lines, data_column, index);
            trim_trailing_empty(lines, data_column, keep);
        } else if index < data {
            set_cell(lines, data_column, index, EMPTY_CELL_MARKER);
        }
        return;
    }
    for gap in data..index {
        insert_cell(lines, data_column, gap, EMPTY_CELL_MARKER);
    }
    if index < data {
        set_cell(lines, data_column, index, value);
    } else {
        insert_cell(lines, data_column, index, value);
    }
}

/// Both element line lists render to the same text, whatever the token
/// types and positions
pub fn same_text(a: &[RobotLine], b: &[RobotLine]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.dump() == y.dump())
}

/// Replace all comment cells with `comment` (each entry becomes one cell).
pub fn set_comment(lines: &mut Vec<RobotLine>, data_column: usize, comment: &[String]) {
    while let Some(index) = cells(lines, data_column).iter().rposition(|t| t.is_comment()) {
        if remove_cell(lines, data_column, index).is_none() {
            break;
        }
    }
    for text in comment_cells(comment) {
        let count = cell_refs(lines, data_column).len();
        insert_cell(lines, data_column, count, &text);
    }
}

/// Cell texts [`set_comment`] writes for `comment`: the first one gets a
/// `# ` prefix unless it already starts a comment
pub fn comment_cells(comment: &[String]) -> Vec<String> {
    comment
        .iter()
        .enumerate()
        .map(|(i, text)| {
            if i == 0 && !text.starts_with(COMMENT_START) {
                format!("# {text}")
            } else {
                text.clone()
            }
        })
        .collect()
}

/// Build a fresh line holding `cells`, indented when `data_column` is 1
pub fn new_line(cells: &[String], template: &RobotLine, data_column: usize) -> RobotLine {
    let separator = Separator::default_for(template.mode);
    let mut elements = Vec::new();
    if data_column > 0 {
        elements.push(LineElement::Separator(separator.clone()));
    }
    for (i, text) in cells.iter().enumerate() {
        if i > 0 {
            elements.push(LineElement::Separator(separator.clone()));
        }
        elements.push(LineElement::Token(RobotToken::new(text.as_str())));
    }
    RobotLine::new(elements, template.eol.kind, template.mode, data_column)
}
