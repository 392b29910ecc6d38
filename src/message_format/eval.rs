//! Interpreter for compiled templates.

use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use super::ast::{
    Node,
    PluralBranch,
    PluralKey,
    SelectBranch,
    Template,
};
use crate::runtime::plural::{
    PluralCategory,
    PluralRules,
};
use crate::types::format_number;

/// Evaluation fault. The message text is what callers of `render` see.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("MessageFormat: No data passed to function.")]
    NoData,

    #[error("MessageFormat: `{0}` isnt a number.")]
    NotANumber(String),

    #[error("MessageFormat: `{0}` is required.")]
    MissingArgument(String),
}

/// Renders `template` against `data`, using `locale`'s plural rule.
///
/// # Errors
/// `data` is not an object, a plural argument is not numeric, or a plain argument is missing.
pub fn evaluate(
    template: &Template,
    data: &Value,
    locale: &str,
    rules: &PluralRules,
) -> Result<String, RenderError> {
    let Value::Object(fields) = data else {
        return Err(RenderError::NoData);
    };

    let evaluator = Evaluator { fields, locale, rules };
    let mut output = String::new();
    evaluator.render(template, None, &mut output)?;
    Ok(output)
}

/// Immutable evaluation state shared by every node.
struct Evaluator<'a> {
    fields: &'a Map<String, Value>,
    locale: &'a str,
    rules: &'a PluralRules,
}

impl Evaluator<'_> {
    /// Appends `template` to `output`. `count` is the value `#` renders.
    fn render(
        &self,
        template: &Template,
        count: Option<f64>,
        output: &mut String,
    ) -> Result<(), RenderError> {
        for node in &template.nodes {
            match node {
                Node::Literal(text) => output.push_str(text),
                Node::Argument(name) => {
                    let value = self
                        .field(name)
                        .ok_or_else(|| RenderError::MissingArgument(name.clone()))?;
                    output.push_str(&stringify(value));
                }
                Node::Octothorpe => {
                    if let Some(count) = count {
                        output.push_str(&format_number(count));
                    }
                }
                Node::Plural { name, offset, branches } => {
                    let value = self
                        .field(name)
                        .and_then(to_number)
                        .ok_or_else(|| RenderError::NotANumber(name.clone()))?;
                    #[allow(clippy::float_arithmetic)]
                    let shifted = value - offset;
                    if let Some(branch) = self.plural_branch(branches, value, shifted) {
                        self.render(&branch.body, Some(shifted), output)?;
                    }
                }
                Node::Select { name, branches } => {
                    let key = self.field(name).map(stringify);
                    if let Some(branch) = select_branch(branches, key.as_deref()) {
                        self.render(&branch.body, count, output)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Present, non-null field.
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    /// Exact match on the raw `value` first, then the locale rule's categories for `shifted`,
    /// then `other`.
    fn plural_branch<'b>(
        &self,
        branches: &'b [PluralBranch],
        value: f64,
        shifted: f64,
    ) -> Option<&'b PluralBranch> {
        #[allow(clippy::float_cmp)]
        let exact = branches.iter().find(|branch| branch.key == PluralKey::Exact(value));
        if exact.is_some() {
            return exact;
        }

        let categories = self.rules.categories(self.locale, shifted);
        categories
            .iter()
            .find_map(|category| {
                branches.iter().find(|branch| branch.key == PluralKey::Category(*category))
            })
            .or_else(|| {
                branches
                    .iter()
                    .find(|branch| branch.key == PluralKey::Category(PluralCategory::Other))
            })
    }
}

/// Branch named `key`, else `other`.
fn select_branch<'b>(branches: &'b [SelectBranch], key: Option<&str>) -> Option<&'b SelectBranch> {
    key.and_then(|key| branches.iter().find(|branch| branch.key == key))
        .or_else(|| branches.iter().find(|branch| branch.key == "other"))
}

/// Text form of a field value.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map_or_else(|| n.to_string(), format_number),
        other => other.to_string(),
    }
}

/// Numeric form of a field value. Numeric strings and booleans convert, everything else does not.
fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!n.is_nan()).then_some(n)
}
