use rstest::rstest;

use super::build;

#[rstest]
#[case::empty("")]
#[case::no_trailing_newline("*** Settings ***\nLibrary    Collections")]
#[case::preamble("some notes\n\n*** Test Cases ***\nT\n    Log    x\n")]
#[case::crlf("*** Test Cases ***\r\nT\r\n    Log    x\r\n")]
#[case::old_mac("*** Variables ***\r${a}    1\r")]
#[case::bom("\u{feff}*** Settings ***\nResource    a.resource\n")]
#[case::pipes("| *** Test Cases *** |\n| My Test | Log | hello |\n| | Log | again |\n")]
#[case::tsv("*** Test Cases ***\nT\n\tLog\tx\n\t\tmore\n")]
#[case::inline_first_row("*** Keywords ***\nKw    [Arguments]    ${a}\n    Log    ${a}\n")]
#[case::continuation_across_blank(
    "*** Settings ***\nDocumentation    first\n\n...    second\nLibrary    X\n"
)]
#[case::comments_everywhere(
    "# head\n*** Variables ***\n# c\n${a}    1    # trailing\n\n*** Comments ***\nanything\n  goes\n"
)]
#[case::repeated_sections(
    "*** Test Cases ***\nA\n    No Operation\n*** Keywords ***\nK\n    Log    k\n*** Test Cases ***\nB\n    Log    b\n"
)]
#[case::odd_whitespace("*** Test Cases ***  \nT \n \t Log  \t  x   \n    \n")]
#[case::unknown_header("*** Setings ***\nLibrary    X\n*** Foo ***\nbar\n")]
fn test_dump_reproduces_input(#[case] text: &str) {
    let model = build(text);
    assert_eq!(model.dump(), text);
}

#[test]
fn test_refresh_positions_matches_tokenizer() {
    let text = "*** Test Cases ***\nMy Test    Log    one\n    Log    two\n";
    let mut model = build(text);
    let before: Vec<_> = model
        .lines()
        .iter()
        .flat_map(|l| l.tokens().map(|t| t.position).collect::<Vec<_>>())
        .collect();
    model.refresh_positions();
    let after: Vec<_> = model
        .lines()
        .iter()
        .flat_map(|l| l.tokens().map(|t| t.position).collect::<Vec<_>>())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_partial_line_keeps_physical_line_number() {
    let mut model = build("*** Test Cases ***\nMy Test    Log    one\n");
    model.refresh_positions();
    let holder = model.test_cases().get(0).unwrap();
    let log = holder.rows()[0].first_cell().unwrap();
    assert_eq!(log.position.line, 1);
    assert_eq!(log.position.column, 11);
}
