//! Input model
//!
//! This module contains the raw problem records handed to the report by the
//! data producer. Nothing here is interpreted; classification happens in
//! [`crate::problem`] and [`crate::text`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors that can occur while loading the raw input model
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input could not be read
    #[error("failed to read report input: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not a valid report model
    #[error("invalid report input: {0}")]
    Json(#[from] serde_json::Error),
}

/// The complete model produced for one report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInput {
    #[serde(default)]
    pub cache_action: String,
    #[serde(default)]
    pub documentation_link: String,
    #[serde(default)]
    pub problems: Vec<RawProblem>,
}

impl ReportInput {
    /// Parses a report model from its JSON form
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A single recorded problem, as produced by the data producer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProblem {
    #[serde(default)]
    pub trace: Vec<RawTrace>,
    #[serde(default)]
    pub message: Vec<RawFragment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_link: Option<String>,
}

/// One entry of a problem's trace.
///
/// Which fields are meaningful depends on `kind`; all of them are optional
/// here so that malformed entries still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrace {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl RawTrace {
    /// Creates a trace entry of the given kind with no fields set
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// A `Task` entry
    pub fn task(path: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            type_name: Some(type_name.into()),
            ..Self::of_kind("Task")
        }
    }

    /// A `Bean` entry
    pub fn bean(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::of_kind("Bean")
        }
    }

    /// A `Field` entry
    pub fn field(name: impl Into<String>, declaring_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            declaring_type: Some(declaring_type.into()),
            ..Self::of_kind("Field")
        }
    }

    /// An `InputProperty` entry
    pub fn input_property(name: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            task: Some(task.into()),
            ..Self::of_kind("InputProperty")
        }
    }

    /// An `OutputProperty` entry
    pub fn output_property(name: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            task: Some(task.into()),
            ..Self::of_kind("OutputProperty")
        }
    }
}

/// One fragment of a problem message.
///
/// `text` and `name` are only set when they hold strings. The fragment's JSON
/// object is kept whole, null and unknown keys included, so an unrecognised
/// fragment can be reported as it was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct RawFragment {
    pub text: Option<String>,
    pub name: Option<String>,
    fields: Map<String, Value>,
}

impl RawFragment {
    /// A literal text fragment
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_field("text", text.into())
    }

    /// A symbolic reference fragment
    pub fn name(name: impl Into<String>) -> Self {
        Self::from_field("name", name.into())
    }

    fn from_field(key: &str, value: String) -> Self {
        let mut fields = Map::new();
        fields.insert(key.to_string(), Value::String(value));
        Self::from(fields)
    }

    /// The fragment exactly as it appeared in the input
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for RawFragment {
    fn from(fields: Map<String, Value>) -> Self {
        let string_field =
            |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            text: string_field("text"),
            name: string_field("name"),
            fields,
        }
    }
}

impl From<RawFragment> for Map<String, Value> {
    fn from(fragment: RawFragment) -> Self {
        fragment.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_model() {
        let input = ReportInput::from_json(
            r#"{
                "cacheAction": "storing",
                "documentationLink": "https://docs.example/cc",
                "problems": [{
                    "trace": [
                        {"kind": "Task", "path": ":app:compile", "type": "JavaCompile"},
                        {"kind": "Field", "name": "project", "declaringType": "Foo"}
                    ],
                    "message": [{"text": "cannot serialize "}, {"name": "Project"}],
                    "error": "boom",
                    "documentationLink": "https://docs.example/p"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(input.cache_action, "storing");
        assert_eq!(input.documentation_link, "https://docs.example/cc");
        assert_eq!(input.problems.len(), 1);

        let problem = &input.problems[0];
        assert_eq!(problem.trace[0], RawTrace::task(":app:compile", "JavaCompile"));
        assert_eq!(problem.trace[1], RawTrace::field("project", "Foo"));
        assert_eq!(problem.message[1], RawFragment::name("Project"));
        assert_eq!(problem.error.as_deref(), Some("boom"));
        assert_eq!(
            problem.documentation_link.as_deref(),
            Some("https://docs.example/p")
        );
    }

    #[test]
    fn test_missing_optional_fields() {
        let input = ReportInput::from_json(
            r#"{"cacheAction": "reusing", "documentationLink": "", "problems": [{}]}"#,
        )
        .unwrap();

        let problem = &input.problems[0];
        assert!(problem.trace.is_empty());
        assert!(problem.message.is_empty());
        assert!(problem.error.is_none());
        assert!(problem.documentation_link.is_none());
    }

    #[test]
    fn test_unknown_fragment_fields_are_kept() {
        let input = ReportInput::from_json(
            r#"{"problems": [{"message": [{"weird": 42}], "trace": [{"kind": "Other", "x": 1}]}]}"#,
        )
        .unwrap();

        let fragment = &input.problems[0].message[0];
        assert!(fragment.text.is_none());
        assert_eq!(fragment.fields().get("weird"), Some(&Value::from(42)));
        assert_eq!(input.problems[0].trace[0].kind, "Other");
    }

    #[test]
    fn test_null_fragment_fields_are_kept() {
        let input = ReportInput::from_json(
            r#"{"problems": [{"message": [{"text": null, "name": null}]}]}"#,
        )
        .unwrap();

        let fragment = &input.problems[0].message[0];
        assert!(fragment.text.is_none());
        assert!(fragment.name.is_none());
        assert_eq!(fragment.fields().get("text"), Some(&Value::Null));
        assert_eq!(fragment.fields().get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = ReportInput::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
