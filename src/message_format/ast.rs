//! Compiled form of a structured template.

use crate::runtime::plural::PluralCategory;

/// A sequence of nodes rendered left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Verbatim text.
    Literal(String),
    /// `{NAME}`: the stringified field, which must be present.
    Argument(String),
    /// `{NAME, plural, offset:N ...}`.
    Plural { name: String, offset: f64, branches: Vec<PluralBranch> },
    /// `{NAME, select, ...}`.
    Select { name: String, branches: Vec<SelectBranch> },
    /// `#` inside a plural branch: the count minus the offset.
    Octothorpe,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PluralKey {
    /// `=N` or bare `N`, matched against the count before rule dispatch.
    Exact(f64),
    Category(PluralCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralBranch {
    pub key: PluralKey,
    pub body: Template,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectBranch {
    pub key: String,
    pub body: Template,
}

impl Template {
    /// Names of every field the template can read, in order of first appearance.
    #[must_use]
    pub fn argument_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_argument_names(&mut names);
        names
    }

    /// Recursive helper for [`Self::argument_names`].
    fn collect_argument_names<'a>(&'a self, names: &mut Vec<&'a str>) {
        for node in &self.nodes {
            let name = match node {
                Node::Argument(name) | Node::Plural { name, .. } | Node::Select { name, .. } => {
                    name.as_str()
                }
                Node::Literal(_) | Node::Octothorpe => continue,
            };
            if !names.contains(&name) {
                names.push(name);
            }
            match node {
                Node::Plural { branches, .. } => {
                    for branch in branches {
                        branch.body.collect_argument_names(names);
                    }
                }
                Node::Select { branches, .. } => {
                    for branch in branches {
                        branch.body.collect_argument_names(names);
                    }
                }
                _ => {}
            }
        }
    }
}
