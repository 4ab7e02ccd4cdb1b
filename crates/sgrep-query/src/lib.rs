//! The sgrep query language.
//!
//! A query is a compact description of a source construct:
//!
//! - `$name`, `$*name`, `$name*`, `$*`: identifiers used as values
//! - `def`, `def $name`, `def (args=2, ^$self, $key)`: function definitions
//! - `call ...`: call sites, with the same grammar as `def`
//! - `class`, `class $name`: class definitions
//! - any other reserved word, such as `import` or `None`
//!
//! [`Lexer`] turns the text into [`Token`]s and [`parse_query`] builds the
//! [`Query`] model from them.
//!
//! # Example
//!
//! ```
//! use sgrep_query::{NameMatching, Query, parse_query};
//!
//! let Query::Function(function) = parse_query("def (args=2, ^$self)")? else {
//!     panic!("expected a function pattern");
//! };
//! let args = function.args().expect("argument constraints");
//! assert!(args.matches(&["self", "other"], NameMatching::Substring));
//! # Ok::<(), sgrep_query::QuerySyntaxError>(())
//! ```

mod error;
mod keywords;
mod lexer;
mod model;
mod parser;
mod token;

pub use error::QuerySyntaxError;
pub use keywords::{PYTHON_KEYWORDS, QUERY_WORDS, is_python_keyword, is_reserved};
pub use lexer::Lexer;
pub use model::{
    ArgumentsPattern, ClassPattern, FunctionPattern, IdentifierPattern, KeywordContext,
    KeywordPattern, NameMatching, PatternKind, Query,
};
pub use parser::parse_query;
pub use token::{Token, TokenKind};
