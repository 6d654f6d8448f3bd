/// Position tracking for tokens and model elements
///
/// Stores the source location (line/column/offset) of tokens so that
/// diagnostics and editor collaborators can point back into the file.
use text_size::{TextRange, TextSize};

/// A position in a robot file (line and column are 0-indexed).
///
/// `offset` is the byte offset from the start of the file contents, after
/// the byte order mark (if any) has been stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FilePosition {
    pub line: usize,
    pub column: usize,
    pub offset: TextSize,
}

impl FilePosition {
    pub fn new(line: usize, column: usize, offset: TextSize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Line number as reported to tooling (1-based)
    pub fn reported_line(&self) -> usize {
        self.line + 1
    }
}

/// A region spanning two positions in a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileRegion {
    pub start: FilePosition,
    pub end: FilePosition,
}

impl FileRegion {
    pub fn new(start: FilePosition, end: FilePosition) -> Self {
        Self { start, end }
    }

    /// Region covering both `self` and `other`
    pub fn merge(&self, other: &FileRegion) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if a position falls within this region
    pub fn contains(&self, position: FilePosition) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }

    /// Byte range of this region
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start.offset, self.end.offset.max(self.start.offset))
    }
}
