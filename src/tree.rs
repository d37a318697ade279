//! Display trees
//!
//! A [`Tree`] is the materialized, immutable form of a [`Trie`], where every
//! node also carries the view state it should initially be shown in.

use std::fmt::Display;

use serde::Serialize;

use crate::trie::Trie;

/// Initial expand/collapse state of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewState {
    Expanded,
    Collapsed,
}

impl ViewState {
    pub fn is_expanded(&self) -> bool {
        matches!(self, ViewState::Expanded)
    }
}

/// A labelled node with ordered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree<T> {
    pub label: T,
    pub children: Vec<Tree<T>>,
    pub view_state: ViewState,
}

impl<T> Tree<T> {
    pub fn new(label: T, children: Vec<Tree<T>>, view_state: ViewState) -> Self {
        Self {
            label,
            children,
            view_state,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of leaves below (or at) this node
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children.iter().map(Tree::leaf_count).sum()
        }
    }

    /// Length of the longest path from this node to a leaf, counting this node
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Tree::depth).max().unwrap_or(0)
    }

    /// Pre-order traversal yielding each node with its depth (the node itself is at 0)
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Tree<T>)> + '_ {
        let mut stack = vec![(0, self)];
        std::iter::from_fn(move || {
            let (depth, node) = stack.pop()?;
            stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
            Some((depth, node))
        })
    }
}

impl<T: PartialEq> Tree<T> {
    /// Returns the direct child with the given label
    pub fn child(&self, label: &T) -> Option<&Tree<T>> {
        self.children.iter().find(|child| &child.label == label)
    }
}

impl<T: Clone> Tree<T> {
    /// Returns a copy with every node that has children marked expanded
    pub fn with_all_expanded(&self) -> Tree<T> {
        Tree {
            label: self.label.clone(),
            children: self.children.iter().map(Tree::with_all_expanded).collect(),
            view_state: if self.is_leaf() {
                ViewState::Collapsed
            } else {
                ViewState::Expanded
            },
        }
    }
}

/// Materializes `trie` under `label`.
///
/// Children are sorted by the rendering of their label. The children of a
/// node with exactly one child are expanded, every other child is collapsed.
/// A node without children is always collapsed, whatever `state` asks for.
pub fn tree_from_trie<T>(label: T, trie: &Trie<T>, state: ViewState) -> Tree<T>
where
    T: Clone + Display,
{
    let mut entries: Vec<&(T, Trie<T>)> = trie.entries().iter().collect();
    entries.sort_by_cached_key(|(child_label, _)| child_label.to_string());

    let child_state = if trie.size() == 1 {
        ViewState::Expanded
    } else {
        ViewState::Collapsed
    };
    let children = entries
        .into_iter()
        .map(|(child_label, child_trie)| {
            tree_from_trie(child_label.clone(), child_trie, child_state)
        })
        .collect();

    let view_state = if trie.size() == 0 {
        ViewState::Collapsed
    } else {
        state
    };

    Tree::new(label, children, view_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn leaf(label: &'static str) -> Tree<&'static str> {
        Tree::new(label, Vec::new(), ViewState::Collapsed)
    }

    #[test]
    fn test_view_state_rule() {
        // root branches, so its children start collapsed
        let trie = Trie::from_paths(vec![vec!["a", "b", "f"], vec!["c", "d"], vec!["c", "e"]]);
        let tree = tree_from_trie("root", &trie, ViewState::Expanded);

        assert_eq!(
            tree,
            Tree::new(
                "root",
                vec![
                    Tree::new(
                        "a",
                        vec![Tree::new("b", vec![leaf("f")], ViewState::Expanded)],
                        ViewState::Collapsed,
                    ),
                    Tree::new("c", vec![leaf("d"), leaf("e")], ViewState::Collapsed),
                ],
                ViewState::Expanded,
            )
        );
    }

    #[test]
    fn test_only_child_is_expanded_even_when_it_branches() {
        let trie = Trie::from_paths(vec![vec!["a", "b"], vec!["a", "c"]]);
        let tree = tree_from_trie("root", &trie, ViewState::Expanded);

        assert_eq!(
            tree,
            Tree::new(
                "root",
                vec![Tree::new("a", vec![leaf("b"), leaf("c")], ViewState::Expanded)],
                ViewState::Expanded,
            )
        );
    }

    #[test]
    fn test_leaf_root_is_collapsed() {
        let empty: Vec<Vec<&str>> = Vec::new();
        let tree = tree_from_trie("root", &Trie::from_paths(empty), ViewState::Expanded);
        assert_eq!(tree, leaf("root"));
    }

    #[test]
    fn test_root_state_is_caller_supplied() {
        let trie = Trie::from_paths(vec![vec!["a"], vec!["b"]]);
        let tree = tree_from_trie("root", &trie, ViewState::Collapsed);
        assert_eq!(tree.view_state, ViewState::Collapsed);
    }

    #[test]
    fn test_children_sorted_regardless_of_insertion_order() {
        let forward = Trie::from_paths(vec![vec!["b"], vec!["a"], vec!["c"]]);
        let backward = Trie::from_paths(vec![vec!["c"], vec!["a"], vec!["b"]]);

        let forward = tree_from_trie("root", &forward, ViewState::Expanded);
        let backward = tree_from_trie("root", &backward, ViewState::Expanded);

        assert_eq!(forward, backward);
        let labels: Vec<_> = forward.children.iter().map(|child| child.label).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_uses_string_rendering() {
        let trie = Trie::from_paths(vec![vec![10], vec![9], vec![100]]);
        let tree = tree_from_trie(0, &trie, ViewState::Expanded);
        let labels: Vec<_> = tree.children.iter().map(|child| child.label).collect();
        assert_eq!(labels, vec![10, 100, 9]);
    }

    #[test]
    fn test_queries() {
        let trie = Trie::from_paths(vec![vec!["a", "b", "c"], vec!["a", "d"], vec!["e"]]);
        let tree = tree_from_trie("root", &trie, ViewState::Expanded);

        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 4);
        assert!(tree.child(&"a").unwrap().child(&"d").unwrap().is_leaf());

        let visited: Vec<_> = tree.iter().map(|(depth, node)| (depth, node.label)).collect();
        assert_eq!(
            visited,
            vec![(0, "root"), (1, "a"), (2, "b"), (3, "c"), (2, "d"), (1, "e")]
        );
    }

    #[test]
    fn test_with_all_expanded() {
        let trie = Trie::from_paths(vec![vec!["a", "b"], vec!["a", "c"], vec!["z"]]);
        let tree = tree_from_trie("root", &trie, ViewState::Expanded);
        assert_eq!(tree.child(&"a").unwrap().view_state, ViewState::Collapsed);

        let expanded = tree.with_all_expanded();
        assert_eq!(expanded.child(&"a").unwrap().view_state, ViewState::Expanded);
        assert_eq!(
            expanded.child(&"a").unwrap().child(&"b").unwrap().view_state,
            ViewState::Collapsed
        );
        // the original is untouched
        assert_eq!(tree.child(&"a").unwrap().view_state, ViewState::Collapsed);
    }
}
