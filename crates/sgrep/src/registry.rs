//! Dispatch from a query's pattern kind to the matcher that runs it.
//!
//! The registry is an explicit table built by the caller and handed to the
//! [`Engine`](crate::Engine); there is no global registration.

use std::collections::HashMap;

use sgrep_query::{PatternKind, Query};

use crate::engine::MatchOptions;
use crate::error::EngineError;
use crate::matchers::{ClassMatcher, FunctionMatcher, IdentifierMatcher, KeywordMatcher, Matcher};

/// Builds a matcher for a query of one pattern kind.
pub type MatcherConstructor = fn(&Query, &MatchOptions) -> Result<Box<dyn Matcher>, EngineError>;

/// Table from [`PatternKind`] to [`MatcherConstructor`].
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    constructors: HashMap<PatternKind, MatcherConstructor>,
}

impl PatternRegistry {
    /// Creates a registry with no matchers.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry with the four built-in matchers.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(PatternKind::Identifier, identifier_matcher);
        registry.register(PatternKind::Function, function_matcher);
        registry.register(PatternKind::Class, class_matcher);
        registry.register(PatternKind::Keyword, keyword_matcher);
        registry
    }

    /// Adds a constructor, replacing any previous one for `kind`.
    pub fn register(&mut self, kind: PatternKind, constructor: MatcherConstructor) {
        self.constructors.insert(kind, constructor);
    }

    /// Returns whether a constructor is registered for `kind`.
    #[must_use]
    pub fn contains(&self, kind: PatternKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Builds the matcher for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PatternNotImplemented`] when no constructor is
    /// registered for the query's kind, or whatever the constructor itself
    /// reports.
    pub fn create(
        &self,
        query: &Query,
        options: &MatchOptions,
    ) -> Result<Box<dyn Matcher>, EngineError> {
        let kind = query.kind();
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or_else(|| EngineError::pattern_not_implemented(kind))?;
        constructor(query, options)
    }
}

fn identifier_matcher(
    query: &Query,
    options: &MatchOptions,
) -> Result<Box<dyn Matcher>, EngineError> {
    let Query::Identifier(pattern) = query else {
        return Err(EngineError::pattern_mismatch(
            PatternKind::Identifier,
            query.kind(),
        ));
    };
    Ok(Box::new(IdentifierMatcher::new(
        pattern.clone(),
        options.name_matching,
    )))
}

fn function_matcher(
    query: &Query,
    options: &MatchOptions,
) -> Result<Box<dyn Matcher>, EngineError> {
    let Query::Function(pattern) = query else {
        return Err(EngineError::pattern_mismatch(
            PatternKind::Function,
            query.kind(),
        ));
    };
    Ok(Box::new(FunctionMatcher::new(
        pattern.clone(),
        options.name_matching,
    )))
}

fn class_matcher(query: &Query, options: &MatchOptions) -> Result<Box<dyn Matcher>, EngineError> {
    let Query::Class(pattern) = query else {
        return Err(EngineError::pattern_mismatch(PatternKind::Class, query.kind()));
    };
    Ok(Box::new(ClassMatcher::new(
        pattern.clone(),
        options.name_matching,
    )))
}

fn keyword_matcher(
    query: &Query,
    _options: &MatchOptions,
) -> Result<Box<dyn Matcher>, EngineError> {
    let Query::Keyword(pattern) = query else {
        return Err(EngineError::pattern_mismatch(
            PatternKind::Keyword,
            query.kind(),
        ));
    };
    Ok(Box::new(KeywordMatcher::new(pattern.clone())))
}
