//! Tests for ForestBuilder

use std::collections::BTreeSet;

use famtree::domain::{ForestBuilder, Member};

fn member(id: &str, father: Option<&str>, mother: Option<&str>) -> Member {
    Member {
        father_id: father.map(String::from),
        mother_id: mother.map(String::from),
        ..Member::new(id, id.to_uppercase(), "Family")
    }
}

#[test]
fn given_flat_members_when_building_then_no_member_lost_or_duplicated() {
    // Arrange
    let members = vec![
        member("a", None, None),
        member("b", Some("a"), None),
        member("c", Some("a"), Some("b")),
        member("d", Some("missing"), None),
        member("e", None, Some("b")),
    ];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert: union of ids reachable from the roots equals the input id set
    let reachable: BTreeSet<String> = forest.iter().map(|(_, n)| n.member.id.clone()).collect();
    let expected: BTreeSet<String> = members.iter().map(|m| m.id.clone()).collect();
    assert_eq!(reachable, expected);
    assert_eq!(forest.len(), members.len());
}

#[test]
fn given_both_parents_resolvable_when_building_then_attached_to_father_only() {
    // Arrange
    let members = vec![
        member("father", None, None),
        member("mother", None, None),
        member("child", Some("father"), Some("mother")),
    ];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert
    let father_children = forest.children_of("father");
    let mother_children = forest.children_of("mother");
    assert_eq!(father_children.len(), 1);
    assert_eq!(father_children[0].member.id, "child");
    assert!(mother_children.is_empty());
}

#[test]
fn given_unresolvable_parents_when_building_then_member_is_root() {
    // Arrange
    let members = vec![
        member("a", Some("ghost"), None),
        member("b", None, Some("phantom")),
        member("c", None, None),
    ];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert: all three are roots, in input order
    let root_ids: Vec<_> = forest
        .root_nodes()
        .map(|node| node.member.id.clone())
        .collect();
    assert_eq!(root_ids, vec!["a", "b", "c"]);
}

#[test]
fn given_father_absent_and_mother_resolvable_when_building_then_attached_to_mother() {
    // End-to-end scenario from the drill-down view:
    // A (root), B (father=A), C (mother=A) -> forest = [A{children: [B, C]}]
    let members = vec![
        member("A", None, None),
        member("B", Some("A"), None),
        member("C", None, Some("A")),
    ];

    let forest = ForestBuilder::new().build(&members);

    assert_eq!(forest.roots().len(), 1);
    let children: Vec<_> = forest
        .children_of("A")
        .iter()
        .map(|n| n.member.id.clone())
        .collect();
    assert_eq!(children, vec!["B", "C"]);
}

#[test]
fn given_children_when_building_then_child_order_follows_input_order() {
    // Arrange
    let members = vec![
        member("root", None, None),
        member("z", Some("root"), None),
        member("a", Some("root"), None),
        member("m", Some("root"), None),
    ];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert
    let children: Vec<_> = forest
        .children_of("root")
        .iter()
        .map(|n| n.member.id.clone())
        .collect();
    assert_eq!(children, vec!["z", "a", "m"]);
}

#[test]
fn given_self_referential_parent_when_building_then_member_is_root() {
    // Arrange
    let members = vec![member("loner", Some("loner"), Some("loner"))];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert
    assert_eq!(forest.roots().len(), 1);
    assert!(forest.node_by_id("loner").unwrap().children.is_empty());
}

#[test]
fn given_parent_cycle_when_building_then_every_member_stays_reachable() {
    // Arrange: three-member cycle plus an attached child
    let members = vec![
        member("a", Some("c"), None),
        member("b", Some("a"), None),
        member("c", Some("b"), None),
        member("d", Some("a"), None),
    ];

    // Act
    let forest = ForestBuilder::new().build(&members);

    // Assert
    let reachable: BTreeSet<String> = forest.iter().map(|(_, n)| n.member.id.clone()).collect();
    assert_eq!(reachable.len(), 4);
    assert!(!forest.roots().is_empty());
}

#[test]
fn given_empty_member_list_when_building_then_forest_is_empty() {
    let forest = ForestBuilder::new().build(&[]);

    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
    assert_eq!(forest.depth(), 0);
}

#[test]
fn given_multi_generation_family_when_building_then_depth_counts_generations() {
    let members = vec![
        member("grandparent", None, None),
        member("parent", Some("grandparent"), None),
        member("child", Some("parent"), None),
        member("uncle", Some("grandparent"), None),
    ];

    let forest = ForestBuilder::new().build(&members);

    assert_eq!(forest.depth(), 3);
    let leaves: BTreeSet<_> = forest
        .leaf_members()
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(
        leaves,
        BTreeSet::from(["child".to_string(), "uncle".to_string()])
    );
}
