//! The reserved words of the query language.

/// Python's reserved keywords, in `keyword.kwlist` order.
pub const PYTHON_KEYWORDS: [&str; 35] = [
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Words that only exist in the query language.
pub const QUERY_WORDS: [&str; 2] = ["call", "args"];

/// Returns whether `word` is a Python keyword.
#[must_use]
pub fn is_python_keyword(word: &str) -> bool {
    PYTHON_KEYWORDS.contains(&word)
}

/// Returns whether `word` may appear as a bare keyword in a query.
#[must_use]
pub fn is_reserved(word: &str) -> bool {
    is_python_keyword(word) || QUERY_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("def", true)]
    #[case("None", true)]
    #[case("call", true)]
    #[case("args", true)]
    #[case("print", false)]
    #[case("Def", false)]
    fn reserved_words(#[case] word: &str, #[case] expected: bool) {
        assert_eq!(is_reserved(word), expected);
    }

    #[test]
    fn query_words_are_not_python_keywords() {
        assert!(QUERY_WORDS.iter().all(|word| !is_python_keyword(word)));
    }
}
