//! Forest builder: turns a flat member list into family trees.

use generational_arena::Index;
use tracing::warn;

use crate::domain::entities::Member;
use crate::domain::forest::Forest;

/// Constructs a [`Forest`] from a flat list of members with optional
/// father/mother links.
///
/// Attachment rules, applied per member in input order:
/// - a resolvable father wins over a resolvable mother, so each member ends
///   up in exactly one parent's child list and the structure stays a forest;
/// - a dangling parent id counts as "no parent";
/// - a self-referential parent id is ignored, never inserted into its own
///   child list;
/// - an attachment that would close a parent cycle is skipped and the member
///   becomes a root, keeping every member reachable from some root.
///
/// Malformed input never raises an error; the builder degrades by promoting
/// unattachable members to roots.
#[derive(Debug, Default)]
pub struct ForestBuilder;

impl ForestBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, members: &[Member]) -> Forest {
        let mut forest = Forest::new();

        // Pass 1: index every member so parent resolution sees the full set
        let indices: Vec<Index> = members
            .iter()
            .map(|member| forest.insert_node(member.clone()))
            .collect();

        // Pass 2: resolve parentage in input order
        for (member, &idx) in members.iter().zip(&indices) {
            match self.resolve_parent(&forest, member, idx) {
                Some(parent_idx) => forest.attach_child(parent_idx, idx),
                None => forest.mark_root(idx),
            }
        }

        forest
    }

    /// Pick the parent to attach under: father first, then mother, else none.
    fn resolve_parent(&self, forest: &Forest, member: &Member, idx: Index) -> Option<Index> {
        for parent_id in [&member.father_id, &member.mother_id].into_iter().flatten() {
            if parent_id == &member.id {
                warn!(member = %member.id, "ignoring self-referential parent id");
                continue;
            }
            let Some(parent_idx) = forest.lookup(parent_id) else {
                // Dangling reference: fall through to the other parent
                continue;
            };
            if self.would_cycle(forest, parent_idx, idx) {
                warn!(member = %member.id, parent = %parent_id, "parent cycle detected, treating member as root");
                continue;
            }
            return Some(parent_idx);
        }
        None
    }

    /// True if `child` already appears in `parent`'s ancestor chain.
    ///
    /// Members are attached in input order, so the chain above `parent` is
    /// final at the time of the check and the walk terminates.
    fn would_cycle(&self, forest: &Forest, parent: Index, child: Index) -> bool {
        let mut current = Some(parent);
        while let Some(idx) = current {
            if idx == child {
                return true;
            }
            current = forest.get(idx).and_then(|node| node.parent);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, father: Option<&str>, mother: Option<&str>) -> Member {
        Member {
            father_id: father.map(String::from),
            mother_id: mother.map(String::from),
            ..Member::new(id, id, "Test")
        }
    }

    #[test]
    fn given_self_referential_father_when_building_then_member_is_root() {
        let members = vec![member("a", Some("a"), None)];

        let forest = ForestBuilder::new().build(&members);

        assert_eq!(forest.roots().len(), 1);
        assert!(forest.node_by_id("a").unwrap().children.is_empty());
    }

    #[test]
    fn given_mutual_parent_cycle_when_building_then_all_members_reachable() {
        // a claims b as father, b claims a as father
        let members = vec![member("a", Some("b"), None), member("b", Some("a"), None)];

        let forest = ForestBuilder::new().build(&members);

        // a attaches under b, the reverse attachment is skipped
        assert_eq!(forest.roots().len(), 1);
        let reachable: Vec<_> = forest.iter().map(|(_, n)| n.member.id.clone()).collect();
        assert_eq!(reachable.len(), 2);
    }
}
