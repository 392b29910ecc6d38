//! Compiled templates of one locale, keyed by template id.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::ast::Template;
use super::eval::{
    RenderError,
    evaluate,
};
use super::parser::{
    CompileError,
    compile,
};
use crate::runtime::plural::PluralRules;

/// A template compiled at load time, kept with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    source: String,
    template: Template,
}

impl CompiledTemplate {
    /// # Errors
    /// The source is not a well-formed template.
    pub fn compile(source: impl Into<String>) -> Result<Self, CompileError> {
        let source = source.into();
        let template = compile(&source)?;
        Ok(Self { source, template })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub const fn template(&self) -> &Template {
        &self.template
    }

    /// # Errors
    /// See [`evaluate`].
    pub fn render(
        &self,
        data: &Value,
        locale: &str,
        rules: &PluralRules,
    ) -> Result<String, RenderError> {
        evaluate(&self.template, data, locale, rules)
    }
}

/// Flat template id to compiled template mapping for a single locale.
#[derive(Debug, Clone)]
pub struct MessageFormatRegistry {
    locale: String,
    rules: Arc<PluralRules>,
    templates: HashMap<String, CompiledTemplate>,
}

impl MessageFormatRegistry {
    #[must_use]
    pub fn new(locale: impl Into<String>, rules: Arc<PluralRules>) -> Self {
        Self { locale: locale.into(), rules, templates: HashMap::new() }
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Compiles `source` and registers it under `id`, replacing any previous template.
    ///
    /// # Errors
    /// The source is not a well-formed template. The registry is left unchanged.
    pub fn compile(&mut self, id: impl Into<String>, source: &str) -> Result<(), CompileError> {
        let compiled = CompiledTemplate::compile(source)?;
        self.insert(id, compiled);
        Ok(())
    }

    pub fn insert(&mut self, id: impl Into<String>, template: CompiledTemplate) {
        self.templates.insert(id.into(), template);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CompiledTemplate> {
        self.templates.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template ids in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Renders template `id` with `data`.
    ///
    /// Returns `None` for an unknown id.
    ///
    /// # Errors
    /// Evaluation of a registered template fails.
    pub fn try_render(&self, id: &str, data: &Value) -> Option<Result<String, RenderError>> {
        self.get(id).map(|template| template.render(data, &self.locale, &self.rules))
    }

    /// Renders template `id` with `data`, turning every fault into text.
    ///
    /// An unknown id yields `Missing Key: <id>` and an evaluation error yields its message.
    #[must_use]
    pub fn render(&self, id: &str, data: &Value) -> String {
        match self.try_render(id, data) {
            Some(Ok(rendered)) => rendered,
            Some(Err(error)) => {
                tracing::debug!(template = id, "Template evaluation failed: {error}");
                error.to_string()
            }
            None => format!("Missing Key: {id}"),
        }
    }
}
