use rstest::rstest;

use super::{separator_texts, token_texts};
use crate::parser::lexer::read_lines;
use crate::parser::separator::{FileFormat, FormatHint, detect_format, line_mode, split_line};
use crate::parser::token::{RobotLine, SeparatorKind, SeparatorMode};
use crate::parser::tokenize;

fn split(content: &str, mode: SeparatorMode) -> RobotLine {
    let read = read_lines(content);
    split_line(&read.lines[0], 0, mode)
}

#[rstest]
#[case("Log    Hello world", vec!["Log", "Hello world"], 0)]
#[case("    Log    x", vec!["Log", "x"], 1)]
#[case("Log\tx", vec!["Log", "x"], 0)]
#[case("Log  x  ", vec!["Log", "x"], 0)]
#[case(" Log", vec!["Log"], 1)]
fn test_space_mode(#[case] content: &str, #[case] tokens: Vec<&str>, #[case] first_column: usize) {
    let line = split(content, SeparatorMode::Space);
    assert_eq!(token_texts(&line), tokens);
    assert_eq!(line.first_column, first_column);
    assert_eq!(line.dump(), content);
}

#[rstest]
#[case("| Log | x |", vec!["Log", "x"])]
#[case("| | Log | x |", vec!["", "Log", "x"])]
#[case("|  a  b  |c|  d", vec!["a  b  |c|  d"])]
#[case("| a |  | b |", vec!["a", "", "b"])]
fn test_pipe_mode(#[case] content: &str, #[case] tokens: Vec<&str>) {
    let line = split(content, SeparatorMode::Pipe);
    assert_eq!(token_texts(&line), tokens);
    assert_eq!(line.first_column, 0);
    assert_eq!(line.dump(), content);
}

#[test]
fn test_pipe_separators_are_pipe_kind() {
    let line = split("| Log | x |", SeparatorMode::Pipe);
    assert_eq!(separator_texts(&line), vec!["| ", " | ", " |"]);
    assert!(line.elements.iter().all(|e| match e {
        crate::parser::LineElement::Separator(s) => s.kind == SeparatorKind::Pipe,
        _ => true,
    }));
}

#[rstest]
#[case("a\tb", vec!["a", "b"], 0)]
#[case("\t\tLog", vec!["", "Log"], 1)]
#[case("a\t\tb", vec!["a", "", "b"], 0)]
#[case("a b\tc  d", vec!["a b", "c  d"], 0)]
fn test_tsv_mode(#[case] content: &str, #[case] tokens: Vec<&str>, #[case] first_column: usize) {
    let line = split(content, SeparatorMode::Tsv);
    assert_eq!(token_texts(&line), tokens);
    assert_eq!(line.first_column, first_column);
    assert_eq!(line.dump(), content);
}

#[test]
fn test_token_positions() {
    let read = read_lines("x\nLog  ${é}  y");
    let line = split_line(&read.lines[1], 1, SeparatorMode::Space);
    let tokens: Vec<_> = line.tokens().collect();

    assert_eq!(tokens[1].position.line, 1);
    assert_eq!(tokens[1].position.column, 5);
    assert_eq!(u32::from(tokens[1].position.offset), 7);
    // 'é' is two bytes but one column
    assert_eq!(tokens[2].position.column, 11);
    assert_eq!(u32::from(tokens[2].position.offset), 14);
}

#[rstest]
#[case("*** Settings ***\nLibrary  X", FormatHint::Auto, FileFormat::Txt)]
#[case("\n*** Settings ***\tx\nLibrary\tX", FormatHint::Auto, FileFormat::Tsv)]
#[case("| *** Settings *** |\t|", FormatHint::Auto, FileFormat::Txt)]
#[case("a\tb", FormatHint::TxtSpace, FileFormat::Txt)]
#[case("a  b", FormatHint::Tsv, FileFormat::Tsv)]
fn test_detect_format(#[case] text: &str, #[case] hint: FormatHint, #[case] expected: FileFormat) {
    let read = read_lines(text);
    assert_eq!(detect_format(&read.lines, hint), expected);
}

#[rstest]
#[case("| a |", SeparatorMode::Pipe)]
#[case("  | a |", SeparatorMode::Pipe)]
#[case("|a", SeparatorMode::Space)]
#[case("a | b", SeparatorMode::Space)]
#[case("|", SeparatorMode::Pipe)]
fn test_line_mode(#[case] content: &str, #[case] expected: SeparatorMode) {
    assert_eq!(line_mode(content, FileFormat::Txt, FormatHint::Auto), expected);
    assert_eq!(line_mode(content, FileFormat::Txt, FormatHint::TxtPipe), expected);
}

#[test]
fn test_space_hint_keeps_pipes_as_text() {
    let text = "| *** Settings *** |\n| Library | X |\n";
    let tokenized = tokenize(text, FormatHint::TxtSpace);
    assert_eq!(tokenized.lines[0].mode, SeparatorMode::Space);
    let cells: Vec<_> = tokenized.lines[1].tokens().map(|t| t.text().to_string()).collect();
    assert_eq!(cells, vec!["| Library | X |"]);

    let piped = tokenize(text, FormatHint::TxtPipe);
    assert_eq!(piped.lines[1].mode, SeparatorMode::Pipe);
}

#[test]
fn test_format_hint_for_path() {
    assert_eq!(FormatHint::for_path(std::path::Path::new("a/b.tsv")), FormatHint::Tsv);
    assert_eq!(FormatHint::for_path(std::path::Path::new("a/b.robot")), FormatHint::Auto);
}

#[test]
fn test_tokenize_round_trips_every_line() {
    let text = "\u{feff}*** Test Cases ***\r\nT\n    Log    x    # c\n| | Log | y |\n";
    let file = tokenize(text, FormatHint::Auto);
    assert!(file.bom);
    let dumped: String = file.lines.iter().map(RobotLine::dump).collect();
    assert_eq!(format!("\u{feff}{dumped}"), text);
}
