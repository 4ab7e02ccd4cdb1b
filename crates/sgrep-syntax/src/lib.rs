//! Tree-sitter powered source trees for structural search.
//!
//! This crate owns everything sgrep knows about source code:
//!
//! - **Parsing** via [`Parser`], producing a [`SourceTree`] that keeps the
//!   text alongside the syntax tree
//! - **Traversal** via [`walk`] and the [`Visitor`] trait, which visit every
//!   node in source order and report name references, function definitions,
//!   calls and class definitions
//! - **Node handles** via [`NodeHandle`], which matchers return and reporting
//!   renders
//!
//! # Supported Languages
//!
//! - Python (`.py`, `.pyi`), the default
//! - Rust (`.rs`)
//! - TypeScript (`.ts`, `.tsx`, `.mts`, `.cts`)
//!
//! # Example
//!
//! ```
//! use sgrep_syntax::{FunctionNode, Parser, SupportedLanguage, Visitor, walk};
//!
//! struct Names(Vec<String>);
//!
//! impl<'t> Visitor<'t> for Names {
//!     fn visit_function(&mut self, node: FunctionNode<'t>) {
//!         self.0.extend(node.name().map(str::to_owned));
//!     }
//! }
//!
//! let mut parser = Parser::new(SupportedLanguage::Python)?;
//! let tree = parser.parse("def hello():\n    pass\n")?;
//! let mut names = Names(Vec::new());
//! walk(&tree, &mut names);
//! assert_eq!(names.0, vec!["hello"]);
//! # Ok::<(), sgrep_syntax::SyntaxError>(())
//! ```

mod error;
mod language;
mod node;
mod parser;
mod position;
mod structure;
mod visit;

pub use error::SyntaxError;
pub use language::{LanguageParseError, SupportedLanguage};
pub use node::NodeHandle;
pub use parser::{ErrorSite, Parser, SourceTree};
pub use structure::{CallNode, ClassNode, Entry, FunctionNode, StructuralKind, classify};
pub use visit::{Visitor, walk};
