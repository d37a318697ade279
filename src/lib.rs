//! Cachereport library crate
//!
//! This library regroups the flat list of problems recorded for a
//! configuration cache run into two browsable trees: one grouped by message
//! and one grouped by task.
//!
//! The pipeline is pure: raw problems are classified into [`ProblemNode`]s,
//! laid out as one path per problem for each grouping, merged into a
//! [`Trie`](trie::Trie) and materialized as a [`Tree`](tree::Tree) with an
//! initial expand/collapse state on every node.

pub mod api;
pub mod cli;
pub mod html;
pub mod input;
pub mod problem;
pub mod report;
pub mod text;
pub mod tree;
pub mod trie;

// Re-export the types most callers need
pub use input::{LoadError, ReportInput};
pub use problem::ProblemNode;
pub use report::{GroupingAxis, ReportPage};
pub use text::PrettyText;
pub use tree::{Tree, ViewState};
