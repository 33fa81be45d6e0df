//! Arena-based forest structure for family hierarchies.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};

use crate::domain::entities::Member;

/// Tree node wrapping a member with its position in the hierarchy.
#[derive(Debug)]
pub struct TreeNode {
    /// Member data for this node
    pub member: Member,
    /// Index of the parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in source member order
    pub children: Vec<Index>,
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.member.full_name())
    }
}

/// Arena-based forest of family trees.
///
/// Uses a generational arena for memory-safe node references and O(1)
/// lookups. A forest holds every member of one family: the trees reachable
/// from `roots` partition the full member set. Built fresh on every query
/// and never persisted.
#[derive(Debug, Default)]
pub struct Forest {
    /// Arena storage for all nodes
    arena: Arena<TreeNode>,
    /// Root nodes (members without a resolvable parent), in source order
    roots: Vec<Index>,
    /// Member id -> arena index
    index: HashMap<String, Index>,
}

impl Forest {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert a node with no parent and no children yet.
    ///
    /// Parent/child wiring and root marking happen in a second pass, once
    /// every member is indexed (see `ForestBuilder`).
    pub(crate) fn insert_node(&mut self, member: Member) -> Index {
        let id = member.id.clone();
        let idx = self.arena.insert(TreeNode {
            member,
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(id, idx);
        idx
    }

    pub(crate) fn attach_child(&mut self, parent: Index, child: Index) {
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
    }

    pub(crate) fn mark_root(&mut self, idx: Index) {
        self.roots.push(idx);
    }

    pub fn get(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    /// Look up a node index by member id.
    pub fn lookup(&self, member_id: &str) -> Option<Index> {
        self.index.get(member_id).copied()
    }

    pub fn node_by_id(&self, member_id: &str) -> Option<&TreeNode> {
        self.lookup(member_id).and_then(|idx| self.get(idx))
    }

    /// Root node indices in original member order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn root_nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.roots.iter().filter_map(|&idx| self.get(idx))
    }

    /// Children of the given member, in source order. Empty when the id is
    /// unknown or the member has no children.
    pub fn children_of(&self, member_id: &str) -> Vec<&TreeNode> {
        self.node_by_id(member_id)
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&idx| self.get(idx))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Total number of nodes in the forest.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Depth-first iterator over all trees, roots in source order.
    pub fn iter(&self) -> ForestIterator {
        ForestIterator::new(self)
    }

    /// Maximum depth over all trees (0 for an empty forest).
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.node_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn node_depth(&self, idx: Index) -> usize {
        if let Some(node) = self.get(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.node_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf members (members with no children).
    pub fn leaf_members(&self) -> Vec<&Member> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.member)
            .collect()
    }
}

pub struct ForestIterator<'a> {
    forest: &'a Forest,
    stack: Vec<Index>,
}

impl<'a> ForestIterator<'a> {
    fn new(forest: &'a Forest) -> Self {
        // Push roots in reverse so the first root is visited first
        let stack = forest.roots.iter().rev().copied().collect();
        Self { forest, stack }
    }
}

impl<'a> Iterator for ForestIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        if let Some(node) = self.forest.get(current_idx) {
            // Push children in reverse order for left-to-right traversal
            for &child in node.children.iter().rev() {
                self.stack.push(child);
            }
            return Some((current_idx, node));
        }
        None
    }
}
