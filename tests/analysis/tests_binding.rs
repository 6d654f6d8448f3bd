use robotide::exec::variables::{VariableScope, extract};
use robotide::libraries::{ArgumentsDescriptor, bind};

#[test]
fn test_positional_after_named_does_not_bind() {
    let descriptor = ArgumentsDescriptor::parse(&["a", "b=2", "*args", "**kwargs"]);
    assert!(bind(&descriptor, &["1", "b=5", "2"]).is_none());

    let bound = bind(&descriptor, &["1", "b=5", "c=3"]).unwrap();
    assert_eq!(bound.last_value_bound_to(1).as_deref(), Some("5"));
    assert_eq!(bound.values_bound_to(3), vec!["c=3"]);
}

#[test]
fn test_binding_row_tokens_of_a_parsed_keyword_call() {
    let model = crate::helpers::parse(
        "*** Test Cases ***\nT\n    Should Be Equal    ${a}    ${b}    msg=differ\n",
    );
    let row = &model.test_cases().get(0).unwrap().rows()[0];
    let arguments = row.arguments();
    let descriptor =
        ArgumentsDescriptor::parse(&["first", "second", "msg=None", "values=True"]);

    let bound = bind(&descriptor, &arguments).unwrap();
    assert_eq!(bound.arguments_of(0), &[0]);
    assert_eq!(bound.arguments_of(1), &[1]);
    assert_eq!(bound.last_value_bound_to(2).as_deref(), Some("differ"));
    assert!(bound.arguments_of(3).is_empty());
}

#[test]
fn test_nested_index_variable_is_found() {
    let result = extract("${outer[${inner}]}");
    let top: Vec<_> = result.variables().collect();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].scope, VariableScope::Scalar);
    assert_eq!(top[0].name, "outer");

    let nested: Vec<_> = top[0].indexes.iter().flat_map(|i| i.variables()).collect();
    assert_eq!(nested.len(), 1);
    assert_eq!(nested[0].name, "inner");
    assert_eq!(nested[0].scope, VariableScope::Scalar);
}
