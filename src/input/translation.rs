//! Translation data model: nested scopes whose leaves are plain text or plural forms.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::runtime::plural::PluralCategory;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Translation document must be an object keyed by locale, found {found}")]
    InvalidRoot { found: &'static str },

    #[error("Locale '{locale}' must map to an object, found {found}")]
    InvalidLocale { locale: String, found: &'static str },
}

/// Strings keyed by plural category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms(BTreeMap<PluralCategory, String>);

impl PluralForms {
    #[must_use]
    pub fn get(&self, category: PluralCategory) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// First form present among `candidates`, then `other`.
    #[must_use]
    pub fn select(&self, candidates: &[PluralCategory]) -> Option<&str> {
        candidates
            .iter()
            .find_map(|category| self.get(*category))
            .or_else(|| self.get(PluralCategory::Other))
    }

    pub fn iter(&self) -> impl Iterator<Item = (PluralCategory, &str)> {
        self.0.iter().map(|(category, text)| (*category, text.as_str()))
    }

    /// Interprets a JSON object as plural forms when every key is a category and every value a string.
    fn from_json_object(map: &serde_json::Map<String, Value>) -> Option<Self> {
        if map.is_empty() {
            return None;
        }

        map.iter()
            .map(|(key, value)| {
                let category = key.parse::<PluralCategory>().ok()?;
                let text = value.as_str()?;
                Some((category, text.to_string()))
            })
            .collect::<Option<BTreeMap<_, _>>>()
            .map(Self)
    }
}

impl<const N: usize> From<[(PluralCategory, &str); N]> for PluralForms {
    fn from(forms: [(PluralCategory, &str); N]) -> Self {
        Self(forms.into_iter().map(|(category, text)| (category, text.to_string())).collect())
    }
}

/// A translation leaf, classified once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    PlainText(String),
    PluralForms(PluralForms),
}

/// A node of the translation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    Message(Message),
    Scope(BTreeMap<String, MessageNode>),
}

impl Default for MessageNode {
    fn default() -> Self {
        Self::Scope(BTreeMap::new())
    }
}

impl MessageNode {
    /// Builds a node from JSON. `null` has no node.
    ///
    /// Numbers and booleans become their text, arrays become scopes keyed by index.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(Self::text(s.clone())),
            Value::Bool(_) | Value::Number(_) => Some(Self::text(value.to_string())),
            Value::Array(items) => Some(Self::Scope(
                items
                    .iter()
                    .enumerate()
                    .filter_map(|(index, item)| Some((index.to_string(), Self::from_json(item)?)))
                    .collect(),
            )),
            Value::Object(map) => {
                if let Some(forms) = PluralForms::from_json_object(map) {
                    return Some(Self::Message(Message::PluralForms(forms)));
                }
                Some(Self::Scope(
                    map.iter()
                        .filter_map(|(key, item)| Some((key.clone(), Self::from_json(item)?)))
                        .collect(),
                ))
            }
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Message(Message::PlainText(text.into()))
    }

    /// Child named `segment`. Plural forms expose their categories as children.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Self> {
        match self {
            Self::Scope(children) => children.get(segment),
            Self::Message(_) => None,
        }
    }

    /// Walks `segments` from this node.
    ///
    /// An empty text stops the walk and is returned as is, even with segments left.
    #[must_use]
    pub fn walk<'a, I>(&self, segments: I) -> Option<MessageRef<'_>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = MessageRef::Node(self);
        for segment in segments {
            if current.is_empty_text() {
                break;
            }
            current = match current {
                MessageRef::Node(Self::Message(Message::PluralForms(forms))) => {
                    let category = segment.parse::<PluralCategory>().ok()?;
                    MessageRef::Text(forms.get(category)?)
                }
                MessageRef::Node(node) => MessageRef::Node(node.get(segment)?),
                MessageRef::Text(_) => return None,
            };
        }
        Some(current)
    }

    /// Deep-merges `other` into this node. Leaves from `other` replace existing ones.
    pub fn merge(&mut self, other: Self) {
        match (self, other) {
            (Self::Scope(children), Self::Scope(other_children)) => {
                for (key, child) in other_children {
                    match children.get_mut(&key) {
                        Some(existing) => existing.merge(child),
                        None => {
                            children.insert(key, child);
                        }
                    }
                }
            }
            (this, other) => {
                tracing::debug!("Replacing translation node during merge");
                *this = other;
            }
        }
    }

    /// Visits every plain-text leaf with its path relative to this node.
    pub fn for_each_text<F>(&self, f: &mut F)
    where
        F: FnMut(&[&str], &str),
    {
        let mut path = Vec::new();
        self.for_each_text_at(&mut path, f);
    }

    /// Recursive helper for [`Self::for_each_text`].
    fn for_each_text_at<'a, F>(&'a self, path: &mut Vec<&'a str>, f: &mut F)
    where
        F: FnMut(&[&str], &str),
    {
        match self {
            Self::Message(Message::PlainText(text)) => f(path.as_slice(), text.as_str()),
            Self::Message(Message::PluralForms(_)) => {}
            Self::Scope(children) => {
                for (key, child) in children {
                    path.push(key);
                    child.for_each_text_at(path, f);
                    path.pop();
                }
            }
        }
    }
}

/// A lookup hit: a tree node or a single plural form reached by its category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRef<'a> {
    Node(&'a MessageNode),
    Text(&'a str),
}

impl<'a> MessageRef<'a> {
    /// Text of a plain-text hit.
    #[must_use]
    pub fn as_text(self) -> Option<&'a str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Node(MessageNode::Message(Message::PlainText(text))) => Some(text.as_str()),
            Self::Node(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty_text(self) -> bool {
        self.as_text().is_some_and(str::is_empty)
    }
}

/// Returns the JSON type name used in error messages.
const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Splits a locale-keyed document into one root node per locale.
///
/// # Errors
/// The root or a locale entry is not an object.
pub fn parse_locale_document(
    document: &Value,
) -> Result<Vec<(String, MessageNode)>, TranslationError> {
    let Value::Object(locales) = document else {
        return Err(TranslationError::InvalidRoot { found: json_type_name(document) });
    };

    locales
        .iter()
        .map(|(locale, tree)| {
            if !tree.is_object() {
                return Err(TranslationError::InvalidLocale {
                    locale: locale.clone(),
                    found: json_type_name(tree),
                });
            }
            Ok((locale.clone(), MessageNode::from_json(tree).unwrap_or_default()))
        })
        .collect()
}

/// Reads and parses a locale-keyed translation file.
///
/// # Errors
/// Returns error if file read, JSON parse or document shape check fails.
pub fn load_translation_file(
    file_path: &Path,
) -> Result<Vec<(String, MessageNode)>, TranslationError> {
    let content = std::fs::read_to_string(file_path)?;
    let json: Value = serde_json::from_str(&content)?;

    parse_locale_document(&json)
}
