use super::build;
use crate::model::operations::{CellAddress, operation_for, operation_for_token, tag_library_alias};
use crate::model::table::TableElement;
use crate::parser::kinds::SettingKind;
use crate::parser::token_type::RobotTokenType;

#[test]
fn test_lookup_by_kind_and_token_type() {
    for kind in SettingKind::ALL {
        assert_eq!(operation_for(kind).kind(), kind);
        let by_token = operation_for_token(RobotTokenType::SettingDeclaration(kind)).unwrap();
        assert_eq!(by_token.kind(), kind);
    }
    assert!(operation_for_token(RobotTokenType::Action).is_none());
}

#[test]
fn test_library_column_mapping() {
    let mut model = build("*** Settings ***\nLibrary    Remote    http://x    WITH NAME    R    # c\n");
    let setting = model.setting_table_mut().get_mut(0).unwrap();
    operation_for(SettingKind::Library).retype(setting);
    let types: Vec<_> = setting.cells().iter().map(|t| t.primary_type()).collect();
    assert_eq!(
        types,
        vec![
            RobotTokenType::SettingDeclaration(SettingKind::Library),
            RobotTokenType::ImportPath,
            RobotTokenType::ImportArgument,
            RobotTokenType::LibraryAliasMarker,
            RobotTokenType::LibraryAlias,
            RobotTokenType::Comment,
        ]
    );
    assert_eq!(setting.argument_texts(), vec!["Remote", "http://x"]);
    assert_eq!(setting.alias().unwrap().text(), "R");
}

#[test]
fn test_alias_needs_a_library_name() {
    let mut model = build("*** Settings ***\nLibrary    WITH NAME    R\n");
    let setting = model.setting_table_mut().get_mut(0).unwrap();
    assert!(!tag_library_alias(setting));
    assert!(setting.alias().is_none());
}

#[test]
fn test_create_inserts_typed_setting() {
    let mut model = build("*** Settings ***\nLibrary    A\n");
    let template = model.line_template();
    let section = model.setting_table().get(0).unwrap().section();
    let operation = operation_for(SettingKind::Resource);
    let id = operation.create(
        model.setting_table_mut(),
        1,
        section,
        &template,
        &["common.resource".to_string()],
        &["shared".to_string()],
    );
    let setting = model.setting_table().find(id).unwrap();
    assert_eq!(setting.cell_texts(), vec!["Resource", "common.resource", "# shared"]);
    assert_eq!(setting.import_path().unwrap().text(), "common.resource");
    assert_eq!(
        model.dump(),
        "*** Settings ***\nLibrary    A\nResource    common.resource    # shared\n"
    );
}

#[test]
fn test_update_argument_and_comment() {
    let mut model = build("*** Settings ***\nMetadata    Version    1.0\n");
    let setting = model.setting_table_mut().get_mut(0).unwrap();
    let operation = operation_for(SettingKind::Metadata);
    operation.update(setting, CellAddress::Argument(1), "2.0");
    operation.update(setting, CellAddress::Comment, "bumped");
    assert_eq!(setting.cell_texts(), vec!["Metadata", "Version", "2.0", "# bumped"]);
    assert_eq!(setting.cells()[2].primary_type(), RobotTokenType::MetadataValue);

    operation.update(setting, CellAddress::Argument(1), "");
    assert_eq!(setting.argument_texts(), vec!["Version"]);
}

#[test]
fn test_remove_reports_index() {
    let mut model = build("*** Settings ***\nLibrary    A\nLibrary    B\n");
    let id = model.setting_table().get(1).unwrap().id();
    let (index, removed) = operation_for(SettingKind::Library)
        .remove(model.setting_table_mut(), id)
        .unwrap();
    assert_eq!(index, 1);
    assert_eq!(removed.argument_texts(), vec!["B"]);
    assert_eq!(model.setting_table().len(), 1);
}
