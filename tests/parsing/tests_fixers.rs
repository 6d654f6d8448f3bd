use robotide::ErrorCode;
use robotide::fixers::run_fixers;

use crate::helpers::fixtures::SUITE;
use crate::helpers::parse;

#[test]
fn test_fixers_are_idempotent_after_parse() {
    let mut model = parse(SUITE);
    let diagnostics = model.diagnostics().to_vec();

    run_fixers(&mut model);

    assert_eq!(model.diagnostics(), diagnostics.as_slice());
    assert_eq!(model.dump(), SUITE);
}

#[test]
fn test_broken_loops_are_reported_not_fatal() {
    let text = "*** Keywords ***\nKw\n    FOR    ${x}    IN    a\n        Log    ${x}\n\n*** Test Cases ***\nT\n    END\n";
    let mut model = parse(text);
    assert_eq!(model.dump(), text);
    let codes: Vec<ErrorCode> = model.diagnostics().iter().map(|d| d.code).collect();
    assert!(codes.contains(&ErrorCode::E0603));
    assert!(codes.contains(&ErrorCode::E0604));
    let count = codes.len();

    run_fixers(&mut model);
    assert_eq!(model.diagnostics().len(), count);
}
