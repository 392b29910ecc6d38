//! Structured templates: nested plural and select dispatch over a data record.
//!
//! Templates are compiled once when a catalog is built and evaluated by a small
//! interpreter. Faults never escape [`MessageFormatRegistry::render`]; they come back
//! as text.

pub mod ast;
pub mod eval;
pub mod parser;
pub mod registry;

pub use ast::{
    Node,
    PluralBranch,
    PluralKey,
    SelectBranch,
    Template,
};
pub use eval::RenderError;
pub use parser::{
    CompileError,
    compile,
};
pub use registry::{
    CompiledTemplate,
    MessageFormatRegistry,
};

/// Suffix marking a translation leaf as a structured template.
pub const TEMPLATE_SUFFIX: &str = "_MF";
