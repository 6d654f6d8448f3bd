use robotide::exec::{RowType, describe_holder};
use robotide::parser::HolderKind;

use crate::helpers::fixtures::SUITE;
use crate::helpers::parse;

#[test]
fn test_old_style_loop_rows_point_at_header() {
    let model = parse(SUITE);
    let legacy = model.code_table(HolderKind::TestCase).get(1).unwrap();
    let rows = describe_holder(legacy);

    assert_eq!(rows[0].row_type, RowType::For);
    assert_eq!(rows[0].created_names(), vec!["${index}"]);
    for row in &rows[1..3] {
        assert_eq!(row.row_type, RowType::ForContinue);
        assert_eq!(row.loop_start, Some(0));
        assert_eq!(row.action_name(), Some("Log"));
    }
    assert_eq!(rows[2].used_names(), vec!["${USERS}[${index}]", "${index}"]);
}

#[test]
fn test_new_style_loop_and_assignment() {
    let model = parse(SUITE);
    let valid = model.code_table(HolderKind::TestCase).get(0).unwrap();
    let rows = describe_holder(valid);
    let types: Vec<RowType> = rows.iter().map(|r| r.row_type).collect();
    assert_eq!(
        &types[2..7],
        &[
            RowType::For,
            RowType::ForContinue,
            RowType::ForContinue,
            RowType::ForEnd,
            RowType::Simple,
        ]
    );
    assert_eq!(rows[6].created_names(), vec!["${status}"]);
    assert_eq!(rows[6].action_name(), Some("Run Keyword And Return Status"));
}
