//! Display strings for steps: literal text or localization keys resolved
//! through a host-supplied context.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Display/localization context handed to step label producers.
pub trait LabelContext {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Context without any translations; keys resolve to themselves.
impl LabelContext for () {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// A display string, either given verbatim or looked up by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Text(String),
    Key(String),
}

impl Label {
    pub fn text(text: impl Into<String>) -> Self {
        Label::Text(text.into())
    }

    pub fn key(key: impl Into<String>) -> Self {
        Label::Key(key.into())
    }

    /// Resolves the label. Missing keys fall back to the key itself.
    pub fn resolve(&self, ctx: &dyn LabelContext) -> String {
        match self {
            Label::Text(text) => text.clone(),
            Label::Key(key) => ctx.lookup(key).unwrap_or_else(|| key.clone()),
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Label::Text(String::new())
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

/// Key to string table for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locale: String,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LabelContext for Catalog {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
