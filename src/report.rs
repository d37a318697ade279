//! Report page model
//!
//! This module regroups the flat list of problems into the two trees shown by
//! the report: one grouped by message and one grouped by task.

use serde::Serialize;

use crate::input::ReportInput;
use crate::problem::{ImportedProblem, ProblemNode};
use crate::tree::{tree_from_trie, Tree, ViewState};
use crate::trie::Trie;

/// Title of the tree grouped by message
pub const MESSAGE_TREE_TITLE: &str = "Problems grouped by message";

/// Title of the tree grouped by task
pub const TASK_TREE_TITLE: &str = "Problems grouped by task";

/// The two ways problems are grouped for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupingAxis {
    Message,
    Task,
}

impl GroupingAxis {
    pub fn title(&self) -> &'static str {
        match self {
            GroupingAxis::Message => MESSAGE_TREE_TITLE,
            GroupingAxis::Task => TASK_TREE_TITLE,
        }
    }

    /// Parses the name used on the command line and in API paths
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "message" => Some(GroupingAxis::Message),
            "task" => Some(GroupingAxis::Task),
            _ => None,
        }
    }
}

/// Everything a renderer needs to draw the report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPage {
    pub cache_action: String,
    pub documentation_link: String,
    pub total_problems: usize,
    pub message_tree: Tree<ProblemNode>,
    pub task_tree: Tree<ProblemNode>,
}

impl ReportPage {
    /// Classifies every problem of `input` and materializes both trees
    pub fn from_input(input: &ReportInput) -> Self {
        let problems: Vec<ImportedProblem> =
            input.problems.iter().map(ImportedProblem::from_raw).collect();

        let message_tree = tree_model_for(
            ProblemNode::label(MESSAGE_TREE_TITLE),
            problem_nodes_by_message(&problems),
        );
        let task_tree = tree_model_for(
            ProblemNode::label(TASK_TREE_TITLE),
            problem_nodes_by_task(&problems),
        );

        tracing::debug!(
            "Materialized report: {} problems, {} message groups, {} task groups",
            problems.len(),
            message_tree.children.len(),
            task_tree.children.len()
        );

        Self {
            cache_action: input.cache_action.clone(),
            documentation_link: input.documentation_link.clone(),
            total_problems: input.problems.len(),
            message_tree,
            task_tree,
        }
    }

    pub fn tree(&self, axis: GroupingAxis) -> &Tree<ProblemNode> {
        match axis {
            GroupingAxis::Message => &self.message_tree,
            GroupingAxis::Task => &self.task_tree,
        }
    }
}

/// One path per problem: the severity-wrapped message, then the trace, then
/// the exception if there is one
pub fn problem_nodes_by_message(problems: &[ImportedProblem]) -> Vec<Vec<ProblemNode>> {
    problems
        .iter()
        .map(|problem| {
            let mut path = Vec::with_capacity(problem.trace.len() + 2);
            path.push(problem.error_or_warning_node(problem.message_node(), problem.doc_link()));
            path.extend(problem.trace.iter().cloned());
            path.extend(problem.exception_node());
            path
        })
        .collect()
}

/// One path per problem: the trace from outermost to innermost context, with
/// the outermost entry severity-wrapped, then the exception or the message.
///
/// The root carries no documentation link; it is only shown in the message
/// tree.
pub fn problem_nodes_by_task(problems: &[ImportedProblem]) -> Vec<Vec<ProblemNode>> {
    problems
        .iter()
        .map(|problem| {
            let mut path: Vec<ProblemNode> = problem
                .trace
                .iter()
                .rev()
                .enumerate()
                .map(|(index, node)| match index {
                    0 => problem.error_or_warning_node(node.clone(), None),
                    _ => node.clone(),
                })
                .collect();
            path.push(problem.exception_or_message_node());
            path
        })
        .collect()
}

fn tree_model_for(label: ProblemNode, paths: Vec<Vec<ProblemNode>>) -> Tree<ProblemNode> {
    tree_from_trie(label, &Trie::from_paths(paths), ViewState::Expanded)
}
