//! The typed query model.
//!
//! A query parses to exactly one [`Query`] node. Every node is immutable
//! once built; matchers only read it.

use serde::Serialize;
use strum::Display;

/// How identifier patterns compare against source names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// The pattern name must occur somewhere in the source name. Wildcard
    /// markers are ignored.
    #[default]
    Substring,
    /// Wildcard markers anchor the comparison: `$name` is an exact match,
    /// `$*name` a suffix match, `$name*` a prefix match and `$*name*` a
    /// substring match.
    Anchored,
}

/// A `$`-prefixed identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierPattern {
    name: String,
    is_wildcard: bool,
    has_prefix_wildcard: bool,
    has_suffix_wildcard: bool,
}

impl IdentifierPattern {
    /// The stored name of the bare `$*` pattern.
    pub const WILDCARD_NAME: &'static str = "*";

    /// Creates a named pattern.
    ///
    /// `prefix` records a `*` before the name and `suffix` a `*` after it.
    #[must_use]
    pub fn named(name: impl Into<String>, prefix: bool, suffix: bool) -> Self {
        Self {
            name: name.into(),
            is_wildcard: false,
            has_prefix_wildcard: prefix,
            has_suffix_wildcard: suffix,
        }
    }

    /// Creates the `$*` pattern, which matches any name.
    #[must_use]
    pub fn wildcard() -> Self {
        Self {
            name: Self::WILDCARD_NAME.to_owned(),
            is_wildcard: true,
            has_prefix_wildcard: false,
            has_suffix_wildcard: false,
        }
    }

    /// Returns the name with `$` and wildcard markers removed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether this is the bare `$*` pattern.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        self.is_wildcard
    }

    /// Returns whether a `*` preceded the name.
    #[must_use]
    pub const fn has_prefix_wildcard(&self) -> bool {
        self.has_prefix_wildcard
    }

    /// Returns whether a `*` followed the name.
    #[must_use]
    pub const fn has_suffix_wildcard(&self) -> bool {
        self.has_suffix_wildcard
    }

    /// Tests a source name against the pattern.
    ///
    /// # Example
    ///
    /// ```
    /// use sgrep_query::{IdentifierPattern, NameMatching};
    ///
    /// let pattern = IdentifierPattern::named("get", false, true);
    /// assert!(pattern.matches("forget", NameMatching::Substring));
    /// assert!(!pattern.matches("forget", NameMatching::Anchored));
    /// assert!(pattern.matches("get_user", NameMatching::Anchored));
    /// ```
    #[must_use]
    pub fn matches(&self, text: &str, matching: NameMatching) -> bool {
        if self.is_wildcard {
            return true;
        }
        let name = self.name.as_str();
        match matching {
            NameMatching::Substring => text.contains(name),
            NameMatching::Anchored => match (self.has_prefix_wildcard, self.has_suffix_wildcard) {
                (false, false) => text == name,
                (true, false) => text.ends_with(name),
                (false, true) => text.starts_with(name),
                (true, true) => text.contains(name),
            },
        }
    }
}

/// Constraints on a positional parameter or argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArgumentsPattern {
    count: Option<usize>,
    first_arg: Option<IdentifierPattern>,
    contains: Vec<IdentifierPattern>,
}

impl ArgumentsPattern {
    /// Creates an argument pattern.
    #[must_use]
    pub const fn new(
        count: Option<usize>,
        first_arg: Option<IdentifierPattern>,
        contains: Vec<IdentifierPattern>,
    ) -> Self {
        Self {
            count,
            first_arg,
            contains,
        }
    }

    /// Returns the exact list length required by `args=N`.
    #[must_use]
    pub const fn count(&self) -> Option<usize> {
        self.count
    }

    /// Returns the pattern the first entry must match (`^$name`).
    #[must_use]
    pub const fn first_arg(&self) -> Option<&IdentifierPattern> {
        self.first_arg.as_ref()
    }

    /// Returns the patterns that must each match some entry.
    #[must_use]
    pub fn contains(&self) -> &[IdentifierPattern] {
        &self.contains
    }

    /// Evaluates the constraints against entry names in list order.
    ///
    /// Every present constraint must hold: the length must equal `count`,
    /// the list must be non-empty with a first entry matching `first_arg`,
    /// and each `contains` pattern must match at least one entry.
    #[must_use]
    pub fn matches(&self, entries: &[&str], matching: NameMatching) -> bool {
        if self.count.is_some_and(|count| count != entries.len()) {
            return false;
        }
        if let Some(first_arg) = &self.first_arg {
            let first_matches = entries
                .first()
                .is_some_and(|first| first_arg.matches(first, matching));
            if !first_matches {
                return false;
            }
        }
        self.contains.iter().all(|wanted| {
            entries
                .iter()
                .any(|entry| wanted.matches(entry, matching))
        })
    }
}

/// `def ...` or `call ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionPattern {
    name: Option<IdentifierPattern>,
    args: Option<ArgumentsPattern>,
    is_call: bool,
}

impl FunctionPattern {
    /// Creates a function pattern. `is_call` selects call sites instead of
    /// definitions.
    #[must_use]
    pub const fn new(
        name: Option<IdentifierPattern>,
        args: Option<ArgumentsPattern>,
        is_call: bool,
    ) -> Self {
        Self {
            name,
            args,
            is_call,
        }
    }

    /// Returns the name constraint.
    #[must_use]
    pub const fn name(&self) -> Option<&IdentifierPattern> {
        self.name.as_ref()
    }

    /// Returns the argument-list constraint.
    #[must_use]
    pub const fn args(&self) -> Option<&ArgumentsPattern> {
        self.args.as_ref()
    }

    /// Returns whether call sites, rather than definitions, are targeted.
    #[must_use]
    pub const fn is_call(&self) -> bool {
        self.is_call
    }
}

/// `class ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassPattern {
    name: Option<IdentifierPattern>,
    inherits: Vec<IdentifierPattern>,
}

impl ClassPattern {
    /// Creates a class pattern.
    #[must_use]
    pub const fn new(name: Option<IdentifierPattern>, inherits: Vec<IdentifierPattern>) -> Self {
        Self { name, inherits }
    }

    /// Returns the name constraint.
    #[must_use]
    pub const fn name(&self) -> Option<&IdentifierPattern> {
        self.name.as_ref()
    }

    /// Returns the base-class patterns. The query grammar never fills this
    /// in and matchers do not check it.
    #[must_use]
    pub fn inherits(&self) -> &[IdentifierPattern] {
        &self.inherits
    }
}

/// Reserved slot for the syntactic position of a keyword match.
///
/// No query syntax produces a context yet, so it is always absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeywordContext {}

/// Any reserved word other than `def`, `class` and `call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordPattern {
    keyword: String,
    context: Option<KeywordContext>,
}

impl KeywordPattern {
    /// Creates a keyword pattern.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            context: None,
        }
    }

    /// Returns the keyword, such as `import`.
    #[must_use]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Returns the keyword context.
    #[must_use]
    pub const fn context(&self) -> Option<KeywordContext> {
        self.context
    }
}

/// The variant tag of a [`Query`], used to dispatch to a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// [`Query::Identifier`]
    Identifier,
    /// [`Query::Function`]
    Function,
    /// [`Query::Class`]
    Class,
    /// [`Query::Keyword`]
    Keyword,
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    /// `$name` and its wildcard forms.
    Identifier(IdentifierPattern),
    /// `def ...` or `call ...`.
    Function(FunctionPattern),
    /// `class ...`.
    Class(ClassPattern),
    /// Any other reserved word.
    Keyword(KeywordPattern),
}

impl Query {
    /// Returns the variant tag.
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        match self {
            Self::Identifier(_) => PatternKind::Identifier,
            Self::Function(_) => PatternKind::Function,
            Self::Class(_) => PatternKind::Class,
            Self::Keyword(_) => PatternKind::Keyword,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(IdentifierPattern::named("one", false, false), "someone", true, false)]
    #[case(IdentifierPattern::named("one", false, false), "one", true, true)]
    #[case(IdentifierPattern::named("one", true, false), "someone", true, true)]
    #[case(IdentifierPattern::named("one", true, false), "onerous", true, false)]
    #[case(IdentifierPattern::named("one", false, true), "onerous", true, true)]
    #[case(IdentifierPattern::named("one", true, true), "phones", true, true)]
    #[case(IdentifierPattern::named("one", true, true), "two", false, false)]
    #[case(IdentifierPattern::wildcard(), "anything", true, true)]
    fn identifier_matching(
        #[case] pattern: IdentifierPattern,
        #[case] text: &str,
        #[case] substring: bool,
        #[case] anchored: bool,
    ) {
        assert_eq!(pattern.matches(text, NameMatching::Substring), substring);
        assert_eq!(pattern.matches(text, NameMatching::Anchored), anchored);
    }

    fn ident(name: &str) -> IdentifierPattern {
        IdentifierPattern::named(name, false, false)
    }

    #[rstest]
    #[case(ArgumentsPattern::new(Some(0), None, vec![]), vec![], true)]
    #[case(ArgumentsPattern::new(Some(0), None, vec![]), vec!["a"], false)]
    #[case(ArgumentsPattern::new(Some(2), None, vec![]), vec!["a", "b"], true)]
    #[case(ArgumentsPattern::new(None, Some(ident("x")), vec![]), vec!["x", "y"], true)]
    #[case(ArgumentsPattern::new(None, Some(ident("x")), vec![]), vec!["y", "x"], false)]
    #[case(ArgumentsPattern::new(None, Some(ident("x")), vec![]), vec![], false)]
    #[case(ArgumentsPattern::new(None, None, vec![ident("y")]), vec!["a", "key"], true)]
    #[case(ArgumentsPattern::new(None, None, vec![ident("y"), ident("z")]), vec!["key"], false)]
    #[case(ArgumentsPattern::new(Some(1), None, vec![ident("a")]), vec!["a", "b"], false)]
    #[case(
        ArgumentsPattern::new(Some(2), Some(ident("self")), vec![ident("b")]),
        vec!["self", "b"],
        true
    )]
    #[case(ArgumentsPattern::default(), vec!["anything"], true)]
    fn argument_matching(
        #[case] pattern: ArgumentsPattern,
        #[case] entries: Vec<&str>,
        #[case] expected: bool,
    ) {
        assert_eq!(pattern.matches(&entries, NameMatching::Substring), expected);
    }

    #[test]
    fn queries_report_their_kind() {
        let query = Query::Keyword(KeywordPattern::new("import"));
        assert_eq!(query.kind(), PatternKind::Keyword);
        assert_eq!(query.kind().to_string(), "keyword");
    }
}
