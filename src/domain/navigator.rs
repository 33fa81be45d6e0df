//! Drill-down cursor over a built forest.

use crate::domain::forest::{Forest, TreeNode};

/// Stateful drill-down cursor: a current subtree root plus a back-stack.
///
/// The navigator stores member ids, not arena indices, so it tolerates the
/// forest being rebuilt underneath it: a stale id simply yields an empty
/// level. Every operation degrades to a no-op or an empty result; none of
/// them can fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNavigator {
    /// None = viewing the root forest
    current: Option<String>,
    back_stack: Vec<Option<String>>,
}

impl TreeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into `member_id`'s children.
    ///
    /// No-op when the member is unknown or has no children, so UI drill-down
    /// stays robust against stale state after concurrent edits.
    pub fn view_children(&mut self, forest: &Forest, member_id: &str) {
        let has_children = forest
            .node_by_id(member_id)
            .map(|node| !node.children.is_empty())
            .unwrap_or(false);
        if !has_children {
            return;
        }
        self.back_stack.push(self.current.take());
        self.current = Some(member_id.to_string());
    }

    /// Return to the previous level. No-op on an empty back-stack.
    pub fn go_back(&mut self) {
        if let Some(previous) = self.back_stack.pop() {
            self.current = previous;
        }
    }

    /// Nodes at the current level: the forest roots when no member is
    /// selected, otherwise the selected member's children. Empty when the
    /// selected id is no longer present (e.g. after a deletion).
    pub fn current_level<'a>(&self, forest: &'a Forest) -> Vec<&'a TreeNode> {
        match &self.current {
            None => forest.root_nodes().collect(),
            Some(id) => forest.children_of(id),
        }
    }

    /// Id of the member whose children are being viewed, if any.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// How many levels deep the cursor is.
    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }
}
