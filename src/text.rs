//! Structured message text
//!
//! Problem messages arrive as a list of fragments, some literal and some naming
//! a symbol (a type, a property, ...). [`PrettyText`] keeps that distinction so
//! renderers can style references differently from prose.

use std::fmt;

use serde::Serialize;

use crate::input::RawFragment;

/// One piece of a formatted message
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Fragment {
    Text(String),
    Reference(String),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(text),
            Fragment::Reference(name) => write!(f, "`{}`", name),
        }
    }
}

/// An immutable, ordered sequence of message fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PrettyText {
    fragments: Vec<Fragment>,
}

impl PrettyText {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }

    /// Formats raw message fragments.
    ///
    /// A fragment with literal text wins over one naming a symbol; a fragment
    /// carrying neither is kept as a diagnostic text fragment instead of
    /// failing the whole message.
    pub fn from_raw(raw: &[RawFragment]) -> Self {
        Self::new(raw.iter().map(fragment_from_raw).collect())
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

impl fmt::Display for PrettyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        Ok(())
    }
}

fn fragment_from_raw(raw: &RawFragment) -> Fragment {
    if let Some(text) = &raw.text {
        return Fragment::Text(text.clone());
    }
    if let Some(name) = &raw.name {
        return Fragment::Reference(name.clone());
    }

    let dump = serde_json::to_string(raw.fields()).unwrap_or_else(|_| format!("{:?}", raw));
    tracing::warn!("Unrecognised message fragment: {}", dump);
    Fragment::Text(format!("Unrecognised message fragment: {}", dump))
}
