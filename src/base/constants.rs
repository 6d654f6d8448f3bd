//! Domain constants shared across the crate.

/// Extensions of files that may contain robot test data
pub const ROBOT_FILE_EXTENSIONS: &[&str] = &["robot", "resource", "txt", "tsv"];

/// Extension of tab separated robot files
pub const TSV_EXTENSION: &str = "tsv";

/// Escaped empty cell
pub const EMPTY_CELL_MARKER: &str = "\\";

/// Marks a line as continuation of the previous element
pub const CONTINUATION_MARKER: &str = "...";

/// Starts a comment which runs until the end of line
pub const COMMENT_START: char = '#';

/// Byte order mark remembered by the line reader
pub const BOM: char = '\u{feff}';

/// New style loop markers
pub const FOR_MARKER: &str = "FOR";
pub const END_MARKER: &str = "END";

/// Old style loop continuation cell
pub const FOR_CONTINUE_MARKER: &str = "\\";

/// Separators between loop variables and loop values
pub const FOR_IN_MARKERS: &[&str] = &["IN", "IN RANGE", "IN ENUMERATE", "IN ZIP"];

/// Library alias markers (`WITH NAME` before RF 6, `AS` since)
pub const LIBRARY_ALIAS_MARKERS: &[&str] = &["WITH NAME", "AS"];

/// Edit distance under which an unknown header is reported as a misspelling
pub const HEADER_SIMILARITY_THRESHOLD: usize = 2;
