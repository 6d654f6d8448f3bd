use super::build;
use crate::exec::DescriptorCache;
use crate::model::{ROW_DATA_COLUMN, cells};
use crate::parser::kinds::HolderKind;

#[test]
fn test_cache_reuses_until_holder_changes() {
    let mut model = build("*** Test Cases ***\nT\n    Log    x\n");
    let mut cache = DescriptorCache::new();

    let holder = model.test_cases().get(0).unwrap();
    assert_eq!(cache.descriptors(holder)[0].argument_texts(), vec!["x"]);
    assert_eq!(cache.descriptors(holder).len(), 1);
    assert_eq!(cache.rebuilds(), 1);

    let holder = model.code_table_mut(HolderKind::TestCase).get_mut(0).unwrap();
    let row = holder.row_mut(0).unwrap();
    assert!(cells::set_cell(&mut row.lines, ROW_DATA_COLUMN, 1, "${y}"));

    let holder = model.test_cases().get(0).unwrap();
    let descriptor = cache.descriptor(holder, 0).unwrap();
    assert_eq!(descriptor.argument_texts(), vec!["${y}"]);
    assert_eq!(descriptor.used_names(), vec!["${y}"]);
    assert_eq!(cache.rebuilds(), 2);
}

#[test]
fn test_cache_invalidate_and_clear() {
    let model = build("*** Test Cases ***\nA\n    Log    a\nB\n    Log    b\n");
    let mut cache = DescriptorCache::new();
    for holder in model.test_cases() {
        cache.descriptors(holder);
    }
    assert_eq!(cache.len(), 2);

    let first = model.test_cases().get(0).unwrap();
    cache.invalidate(first.id());
    assert_eq!(cache.len(), 1);
    cache.descriptors(first);
    assert_eq!(cache.rebuilds(), 3);

    cache.clear();
    assert!(cache.is_empty());
}
