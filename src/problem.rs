//! Problem nodes
//!
//! Every entry of a problem's trace is classified into a [`ProblemNode`]. The
//! same type also carries the synthesized nodes (severity, exception, message,
//! documentation link) that the groupings in [`crate::report`] stitch around
//! the trace.

use std::fmt;

use serde::Serialize;

use crate::input::{RawProblem, RawTrace};
use crate::text::PrettyText;

/// Label used for trace entries whose kind is not recognised
pub const GRADLE_RUNTIME: &str = "Gradle runtime";

/// Display text of the documentation link attached to severity nodes
pub const DOC_LINK_TEXT: &str = " ?";

/// The role a property plays in a [`ProblemNode::Property`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKind {
    Field,
    InputProperty,
    OutputProperty,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::Field => "field",
            PropertyKind::InputProperty => "input property",
            PropertyKind::OutputProperty => "output property",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of a problem's path through either report tree.
///
/// Equality is structural: two nodes of the same variant with equal fields
/// are the same node as far as grouping is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ProblemNode {
    Task {
        path: String,
        #[serde(rename = "type")]
        type_name: String,
    },
    Bean {
        #[serde(rename = "type")]
        type_name: String,
    },
    /// `owner` is the declaring type of a field, or the owning task path of
    /// an input/output property.
    Property {
        property_kind: PropertyKind,
        name: String,
        owner: String,
    },
    Label {
        text: String,
    },
    Message {
        text: PrettyText,
    },
    Exception {
        raw_text: String,
    },
    Error {
        inner: Box<ProblemNode>,
        doc_link: Option<Box<ProblemNode>>,
    },
    Warning {
        inner: Box<ProblemNode>,
        doc_link: Option<Box<ProblemNode>>,
    },
    Link {
        url: String,
        display_text: String,
    },
}

impl ProblemNode {
    pub fn label(text: impl Into<String>) -> Self {
        ProblemNode::Label { text: text.into() }
    }

    pub fn property(
        property_kind: PropertyKind,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        ProblemNode::Property {
            property_kind,
            name: name.into(),
            owner: owner.into(),
        }
    }

    /// Classifies one raw trace entry.
    ///
    /// Never fails: a kind that is not recognised becomes the
    /// [`GRADLE_RUNTIME`] label, and a missing field of a recognised kind is
    /// read as the empty string.
    pub fn from_trace(trace: &RawTrace) -> Self {
        match trace.kind.as_str() {
            "Task" => ProblemNode::Task {
                path: or_empty(&trace.path),
                type_name: or_empty(&trace.type_name),
            },
            "Bean" => ProblemNode::Bean {
                type_name: or_empty(&trace.type_name),
            },
            "Field" => ProblemNode::property(
                PropertyKind::Field,
                or_empty(&trace.name),
                or_empty(&trace.declaring_type),
            ),
            "InputProperty" => ProblemNode::property(
                PropertyKind::InputProperty,
                or_empty(&trace.name),
                or_empty(&trace.task),
            ),
            "OutputProperty" => ProblemNode::property(
                PropertyKind::OutputProperty,
                or_empty(&trace.name),
                or_empty(&trace.task),
            ),
            other => {
                tracing::warn!("Unrecognised trace kind '{}', using fallback label", other);
                ProblemNode::label(GRADLE_RUNTIME)
            }
        }
    }
}

fn or_empty(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn write_with_link(
    f: &mut fmt::Formatter<'_>,
    severity: &str,
    inner: &ProblemNode,
    doc_link: &Option<Box<ProblemNode>>,
) -> fmt::Result {
    write!(f, "{}: {}", severity, inner)?;
    if let Some(link) = doc_link {
        write!(f, " {}", link)?;
    }
    Ok(())
}

/// Canonical rendering, also used as the sort key of tree children
impl fmt::Display for ProblemNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemNode::Task { path, type_name } => {
                write!(f, "task `{}` of type `{}`", path, type_name)
            }
            ProblemNode::Bean { type_name } => write!(f, "bean of type `{}`", type_name),
            ProblemNode::Property {
                property_kind,
                name,
                owner,
            } => write!(f, "{} `{}` of `{}`", property_kind, name, owner),
            ProblemNode::Label { text } => f.write_str(text),
            ProblemNode::Message { text } => write!(f, "{}", text),
            ProblemNode::Exception { raw_text } => write!(f, "exception: {}", raw_text),
            ProblemNode::Error { inner, doc_link } => {
                write_with_link(f, "error", inner, doc_link)
            }
            ProblemNode::Warning { inner, doc_link } => {
                write_with_link(f, "warning", inner, doc_link)
            }
            ProblemNode::Link { url, display_text } => {
                write!(f, "[{}]({})", display_text.trim(), url)
            }
        }
    }
}

/// A problem whose message and trace have been classified
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedProblem {
    pub message: PrettyText,
    pub trace: Vec<ProblemNode>,
    pub error: Option<String>,
    pub documentation_link: Option<String>,
}

impl ImportedProblem {
    pub fn from_raw(raw: &RawProblem) -> Self {
        Self {
            message: PrettyText::from_raw(&raw.message),
            trace: raw.trace.iter().map(ProblemNode::from_trace).collect(),
            error: raw.error.clone(),
            documentation_link: raw.documentation_link.clone(),
        }
    }

    /// Wraps `label` as an error if this problem carries error text, or as a
    /// warning otherwise
    pub fn error_or_warning_node(
        &self,
        label: ProblemNode,
        doc_link: Option<ProblemNode>,
    ) -> ProblemNode {
        let inner = Box::new(label);
        let doc_link = doc_link.map(Box::new);
        match self.error {
            Some(_) => ProblemNode::Error { inner, doc_link },
            None => ProblemNode::Warning { inner, doc_link },
        }
    }

    pub fn exception_node(&self) -> Option<ProblemNode> {
        self.error.as_ref().map(|raw_text| ProblemNode::Exception {
            raw_text: raw_text.clone(),
        })
    }

    pub fn doc_link(&self) -> Option<ProblemNode> {
        self.documentation_link.as_ref().map(|url| ProblemNode::Link {
            url: url.clone(),
            display_text: DOC_LINK_TEXT.to_string(),
        })
    }

    pub fn message_node(&self) -> ProblemNode {
        ProblemNode::Message {
            text: self.message.clone(),
        }
    }

    /// The exception if there is one, the message otherwise
    pub fn exception_or_message_node(&self) -> ProblemNode {
        self.exception_node().unwrap_or_else(|| self.message_node())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawFragment;

    fn problem(error: Option<&str>, documentation_link: Option<&str>) -> ImportedProblem {
        ImportedProblem::from_raw(&RawProblem {
            trace: vec![RawTrace::task(":a", "DefaultTask")],
            message: vec![RawFragment::text("bad value")],
            error: error.map(str::to_string),
            documentation_link: documentation_link.map(str::to_string),
        })
    }

    #[test]
    fn test_classify_known_kinds() {
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::task(":app:build", "Build")),
            ProblemNode::Task {
                path: ":app:build".to_string(),
                type_name: "Build".to_string(),
            }
        );
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::bean("Foo")),
            ProblemNode::Bean {
                type_name: "Foo".to_string(),
            }
        );
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::field("project", "Foo")),
            ProblemNode::property(PropertyKind::Field, "project", "Foo")
        );
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::input_property("x", ":a")),
            ProblemNode::property(PropertyKind::InputProperty, "x", ":a")
        );
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::output_property("out", ":a")),
            ProblemNode::property(PropertyKind::OutputProperty, "out", ":a")
        );
    }

    #[test]
    fn test_classify_unknown_kind_falls_back() {
        for kind in ["Unknown", "", "task", "BuildLogic"] {
            assert_eq!(
                ProblemNode::from_trace(&RawTrace::of_kind(kind)),
                ProblemNode::label(GRADLE_RUNTIME)
            );
        }
    }

    #[test]
    fn test_classify_missing_fields() {
        assert_eq!(
            ProblemNode::from_trace(&RawTrace::of_kind("InputProperty")),
            ProblemNode::property(PropertyKind::InputProperty, "", "")
        );
    }

    #[test]
    fn test_error_or_warning() {
        let warning = problem(None, None);
        let node = warning.error_or_warning_node(warning.message_node(), warning.doc_link());
        assert!(matches!(node, ProblemNode::Warning { doc_link: None, .. }));

        let error = problem(Some("java.lang.Exception: boom"), Some("https://docs/x"));
        let node = error.error_or_warning_node(error.message_node(), error.doc_link());
        match node {
            ProblemNode::Error { inner, doc_link } => {
                assert_eq!(*inner, error.message_node());
                assert_eq!(
                    doc_link.map(|link| *link),
                    Some(ProblemNode::Link {
                        url: "https://docs/x".to_string(),
                        display_text: " ?".to_string(),
                    })
                );
            }
            other => panic!("expected an error node, got {:?}", other),
        }
    }

    #[test]
    fn test_exception_supersedes_message() {
        let plain = problem(None, None);
        assert_eq!(plain.exception_node(), None);
        assert_eq!(plain.exception_or_message_node(), plain.message_node());

        let failing = problem(Some("stack trace"), None);
        assert_eq!(
            failing.exception_or_message_node(),
            ProblemNode::Exception {
                raw_text: "stack trace".to_string(),
            }
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = problem(None, Some("https://docs/x"));
        let b = problem(None, Some("https://docs/x"));
        assert_eq!(
            a.error_or_warning_node(a.message_node(), a.doc_link()),
            b.error_or_warning_node(b.message_node(), b.doc_link())
        );
        assert_ne!(
            a.error_or_warning_node(a.message_node(), a.doc_link()),
            a.error_or_warning_node(a.message_node(), None)
        );
    }

    #[test]
    fn test_display() {
        let failing = problem(Some("boom"), Some("https://docs/x"));
        let node = failing.error_or_warning_node(failing.message_node(), failing.doc_link());
        assert_eq!(node.to_string(), "error: bad value [?](https://docs/x)");

        assert_eq!(
            ProblemNode::property(PropertyKind::InputProperty, "x", ":a").to_string(),
            "input property `x` of `:a`"
        );
        assert_eq!(ProblemNode::label(GRADLE_RUNTIME).to_string(), "Gradle runtime");
    }
}
