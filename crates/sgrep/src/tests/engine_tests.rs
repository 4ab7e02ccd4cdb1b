//! Tests for the `Engine`, the registry it owns and the built-in matchers.

use rstest::{fixture, rstest};
use sgrep_syntax::{Parser, SourceTree, SupportedLanguage};

use crate::{Engine, EngineError, MatchOptions, PatternKind, PatternRegistry};

const SAMPLE: &str = "\
four = 4
def some(one, two):
    return one + two + three
class Other:
    pass
";

#[fixture]
fn engine() -> Engine {
    Engine::new(MatchOptions::default())
}

fn parse(language: SupportedLanguage, source: &str) -> SourceTree {
    let mut parser = Parser::new(language).expect("parser init");
    parser.parse(source).expect("parse")
}

fn texts(engine: &Engine, query: &str, source: &str) -> Vec<String> {
    let compiled = engine.compile(query).expect("compile");
    let tree = parse(SupportedLanguage::Python, source);
    compiled
        .find_all(&tree)
        .iter()
        .map(|node| node.text().to_owned())
        .collect()
}

fn lines(engine: &Engine, query: &str, source: &str) -> Vec<u32> {
    let compiled = engine.compile(query).expect("compile");
    let tree = parse(SupportedLanguage::Python, source);
    compiled.find_all(&tree).iter().map(|node| node.line()).collect()
}

#[rstest]
fn wildcard_matches_name_references_in_order(engine: Engine) {
    assert_eq!(
        texts(&engine, "$*", SAMPLE),
        vec!["four", "one", "two", "three"]
    );
}

#[rstest]
fn identifier_matches_by_substring(engine: Engine) {
    assert_eq!(texts(&engine, "$o", SAMPLE), vec!["four", "one", "two"]);
}

#[rstest]
fn def_matches_each_definition_once(engine: Engine) {
    let source = "\
curve_ball_def = 1234

def one() -> int:
    return 1

def two() -> int:
    return 2

def three() -> int:
    return 3
";
    assert_eq!(lines(&engine, "def", source), vec![3, 6, 9]);
}

#[rstest]
fn empty_source_yields_no_matches(engine: Engine) {
    for query in ["$*", "def $some", "call", "class", "import"] {
        assert!(texts(&engine, query, "").is_empty(), "{query} on empty source");
    }
}

#[rstest]
#[case("def (args=0)", vec![1])]
#[case("def (args=1)", vec![2])]
#[case("def (args=2)", vec![3, 4])]
#[case("def (^$x)", vec![3])]
#[case("def ($y)", vec![3, 4])]
#[case("def ($x, $y)", vec![3, 4])]
#[case("def ($x, $z)", vec![])]
#[case("def (args=2, ^$x)", vec![3])]
fn argument_constraints(engine: Engine, #[case] query: &str, #[case] expected: Vec<u32>) {
    let source = "\
def none(): pass
def single(a): pass
def pair(x, why): pass
def other(y, x): pass
";
    assert_eq!(lines(&engine, query, source), expected);
}

#[rstest]
fn name_or_arguments_either_matches(engine: Engine) {
    let source = "\
def get(a): pass
def fetch(a, b): pass
def put(a, b, c): pass
";
    assert_eq!(lines(&engine, "def $get (args=2)", source), vec![1, 2]);
}

#[rstest]
fn a_definition_matching_name_and_arguments_is_reported_once(engine: Engine) {
    let source = "def get(a, b): pass\n";
    assert_eq!(lines(&engine, "def $get (args=2)", source), vec![1]);
    assert_eq!(lines(&engine, "call $get (args=1)", "get(x)\n"), vec![1]);
}

#[rstest]
fn empty_argument_list_accepts_every_definition(engine: Engine) {
    let source = "def get(a): pass\ndef put(): pass\n";
    assert_eq!(lines(&engine, "def $get ()", source), vec![1, 2]);
    assert_eq!(lines(&engine, "def $get (...)", source), vec![1, 2]);
    assert_eq!(lines(&engine, "def ()", source), vec![1, 2]);
}

#[rstest]
fn nested_definitions_are_matched(engine: Engine) {
    let source = "\
class Outer:
    def method(self):
        def helper():
            pass
";
    assert_eq!(lines(&engine, "def", source), vec![2, 3]);
}

#[rstest]
fn calls_match_callee_and_positional_arguments(engine: Engine) {
    let source = "\
print(value)
client.get(url, timeout=3)
run()
";
    assert_eq!(lines(&engine, "call", source), vec![1, 2, 3]);
    assert_eq!(lines(&engine, "call $get", source), vec![2]);
    assert_eq!(lines(&engine, "call (args=1)", source), vec![1, 2]);
    assert_eq!(lines(&engine, "call (^$url)", source), vec![2]);
    assert!(lines(&engine, "def", source).is_empty());
}

#[rstest]
fn classes_match_by_name(engine: Engine) {
    let source = "class Other:\n    pass\nclass Thing(Other):\n    pass\n";
    assert_eq!(lines(&engine, "class", source), vec![1, 3]);
    assert_eq!(lines(&engine, "class $Oth", source), vec![1]);
    assert!(lines(&engine, "class $Missing", source).is_empty());
}

#[rstest]
#[case("import", "import os\nfrom sys import path\nx = 1\n", vec![1, 2])]
#[case("None", "x = None\ny = 2\n", vec![1])]
#[case("if", "if x:\n    pass\ny = a if b else c\n", vec![1, 3])]
#[case("return", "def f():\n    return 1\n", vec![2])]
fn keywords_match_bearing_nodes(
    engine: Engine,
    #[case] query: &str,
    #[case] source: &str,
    #[case] expected: Vec<u32>,
) {
    assert_eq!(lines(&engine, query, source), expected);
}

#[test]
fn anchored_matching_honours_wildcard_markers() {
    let engine = Engine::new(MatchOptions::anchored(true));
    let source = "get = 1\nforget = 2\nget_all = 3\n";

    assert_eq!(texts(&engine, "$get", source), vec!["get"]);
    assert_eq!(texts(&engine, "$*get", source), vec!["get", "forget"]);
    assert_eq!(texts(&engine, "$get*", source), vec!["get", "get_all"]);
    assert_eq!(
        texts(&engine, "$*get*", source),
        vec!["get", "forget", "get_all"]
    );
}

#[rstest]
fn one_matcher_serves_many_trees(engine: Engine) {
    let compiled = engine.compile("def").expect("compile");
    let first = parse(SupportedLanguage::Python, "def a(): pass\n");
    let second = parse(SupportedLanguage::Python, "def b(): pass\ndef c(): pass\n");

    assert_eq!(compiled.find_all(&first).len(), 1);
    assert_eq!(compiled.find_all(&second).len(), 2);
    assert_eq!(compiled.find_all(&first).len(), 1);
}

#[rstest]
fn rendered_matches_reparse_to_the_same_construct(engine: Engine) {
    let source = "\
class Box:
    def open(self, lid):
        if lid:
            return True
";
    for query in ["def", "class"] {
        let compiled = engine.compile(query).expect("compile");
        let tree = parse(SupportedLanguage::Python, source);
        for node in compiled.find_all(&tree) {
            let reparsed = parse(SupportedLanguage::Python, &node.render());
            let again = compiled.find_all(&reparsed);
            let first = again.first().expect("rendered match should match again");
            assert_eq!(first.kind(), node.kind());
            assert_eq!(first.text().lines().next(), node.text().lines().next());
            assert!(!reparsed.has_errors(), "{}", node.render());
        }
    }
}

#[rstest]
fn rust_and_typescript_sources_are_searchable(engine: Engine) {
    let compiled = engine.compile("def (^$self)").expect("compile");
    let rust = parse(
        SupportedLanguage::Rust,
        "impl A { fn get(&self) {} fn new() -> Self { A } }",
    );
    let matches = compiled.find_all(&rust);
    let [method] = matches.as_slice() else {
        panic!("expected one match, got {matches:?}");
    };
    assert!(method.text().starts_with("fn get"));

    let class = engine.compile("class $Greeter").expect("compile");
    let typescript = parse(SupportedLanguage::TypeScript, "class Greeter { greet() {} }");
    assert_eq!(class.find_all(&typescript).len(), 1);
}

#[rstest]
fn malformed_queries_fail_compilation(engine: Engine) {
    for query in ["@", "..", "$class", ""] {
        let error = engine.compile(query).expect_err("malformed query");
        assert!(matches!(error, EngineError::Query(_)), "{query}: {error}");
    }
}

#[test]
fn registry_miss_is_reported() {
    let engine = Engine::with_registry(PatternRegistry::empty(), MatchOptions::default());
    let error = engine.compile("def").expect_err("no matchers registered");
    assert!(matches!(
        error,
        EngineError::PatternNotImplemented {
            kind: PatternKind::Function
        }
    ));
}
