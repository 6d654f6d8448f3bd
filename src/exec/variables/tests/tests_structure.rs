use crate::exec::variables::structure::{Bracket, Node, RunKind, build_structure};

#[test]
fn test_runs_are_merged() {
    let root = build_structure("ab  \\\\c");
    let kinds: Vec<_> = root
        .children
        .iter()
        .map(|n| match n {
            Node::Run { kind, .. } => *kind,
            Node::Group(_) => panic!("unexpected group"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![RunKind::Text, RunKind::Whitespace, RunKind::Escape, RunKind::Text]
    );
}

#[test]
fn test_nested_groups() {
    let root = build_structure("${a[1]}");
    let Node::Group(curly) = &root.children[1] else {
        panic!("expected group");
    };
    assert_eq!(curly.bracket, Bracket::Curly);
    assert!(curly.is_closed());
    let Node::Group(square) = &curly.children[1] else {
        panic!("expected group");
    };
    assert_eq!(square.bracket, Bracket::Square);
    assert_eq!(u32::from(square.start), 3);
    assert_eq!(square.end.map(u32::from), Some(6));
}

#[test]
fn test_mismatched_closer_is_text() {
    let root = build_structure("{a]");
    let Node::Group(group) = &root.children[0] else {
        panic!("expected group");
    };
    assert!(!group.is_closed());
    assert_eq!(group.children.len(), 1);
}

#[test]
fn test_stray_closer_at_top_level() {
    let root = build_structure("a}");
    assert_eq!(root.children.len(), 1);
    assert!(matches!(root.children[0], Node::Run { kind: RunKind::Text, .. }));
}
