//! Structural classification of syntax-tree nodes.
//!
//! Matchers do not care about grammar-specific node kinds. They ask for
//! "every function definition" or "every name reference", and this module
//! answers per language: which Tree-sitter kinds play which role, where the
//! declared name lives, and which children form the positional parameter or
//! argument list.

use crate::language::SupportedLanguage;
use crate::node::NodeHandle;

/// The structural roles the match engine can visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    /// An identifier used as a value, not declared by a definition.
    NameReference,
    /// A function or method definition.
    FunctionDefinition,
    /// A call expression.
    Call,
    /// A class-like type definition.
    ClassDefinition,
}

struct Profile {
    functions: &'static [&'static str],
    calls: &'static [&'static str],
    classes: &'static [&'static str],
}

const PYTHON: Profile = Profile {
    functions: &["function_definition"],
    calls: &["call"],
    classes: &["class_definition"],
};

const RUST: Profile = Profile {
    functions: &["function_item", "function_signature_item"],
    calls: &["call_expression"],
    classes: &["struct_item", "enum_item", "union_item", "trait_item"],
};

const TYPESCRIPT: Profile = Profile {
    functions: &[
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
    ],
    calls: &["call_expression"],
    classes: &["class_declaration", "abstract_class_declaration"],
};

const fn profile(language: SupportedLanguage) -> &'static Profile {
    match language {
        SupportedLanguage::Python => &PYTHON,
        SupportedLanguage::Rust => &RUST,
        SupportedLanguage::TypeScript => &TYPESCRIPT,
    }
}

/// Classifies a node, returning `None` for nodes with no structural role.
#[must_use]
pub fn classify(language: SupportedLanguage, node: NodeHandle<'_>) -> Option<StructuralKind> {
    let kind = node.kind();
    let profile = profile(language);

    if profile.functions.contains(&kind) {
        Some(StructuralKind::FunctionDefinition)
    } else if profile.calls.contains(&kind) {
        Some(StructuralKind::Call)
    } else if profile.classes.contains(&kind) {
        Some(StructuralKind::ClassDefinition)
    } else if kind == "identifier" && is_reference(language, node) {
        Some(StructuralKind::NameReference)
    } else {
        None
    }
}

/// One positional entry of a parameter or argument list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'t> {
    name: &'t str,
}

impl<'t> Entry<'t> {
    /// Returns the text identifier patterns are matched against: the
    /// parameter name for definitions, the argument text for calls.
    #[must_use]
    pub const fn name(&self) -> &'t str {
        self.name
    }
}

/// A function or method definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionNode<'t> {
    handle: NodeHandle<'t>,
    language: SupportedLanguage,
}

impl<'t> FunctionNode<'t> {
    pub(crate) const fn new(handle: NodeHandle<'t>, language: SupportedLanguage) -> Self {
        Self { handle, language }
    }

    /// Returns the definition node.
    #[must_use]
    pub const fn handle(&self) -> NodeHandle<'t> {
        self.handle
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> Option<&'t str> {
        self.handle.field("name").map(|name| name.text())
    }

    /// Returns the positional parameters in declaration order.
    ///
    /// For Python this mirrors `ast.arguments.args`: positional-only
    /// parameters (before `/`) and everything from `*`, `*args` or
    /// `**kwargs` onwards are not part of the list.
    #[must_use]
    pub fn parameters(&self) -> Vec<Entry<'t>> {
        let Some(list) = self.handle.field("parameters") else {
            return Vec::new();
        };
        match self.language {
            SupportedLanguage::Python => python_parameters(list),
            SupportedLanguage::Rust => rust_parameters(list),
            SupportedLanguage::TypeScript => typescript_parameters(list),
        }
    }
}

/// A call expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallNode<'t> {
    handle: NodeHandle<'t>,
    language: SupportedLanguage,
}

impl<'t> CallNode<'t> {
    pub(crate) const fn new(handle: NodeHandle<'t>, language: SupportedLanguage) -> Self {
        Self { handle, language }
    }

    /// Returns the call node.
    #[must_use]
    pub const fn handle(&self) -> NodeHandle<'t> {
        self.handle
    }

    /// Returns the callee text, such as `print` or `self.client.get`.
    #[must_use]
    pub fn name(&self) -> Option<&'t str> {
        self.handle.field("function").map(|callee| callee.text())
    }

    /// Returns the positional arguments in call order.
    ///
    /// Keyword arguments and `**mapping` splats are not positional and are
    /// left out for Python.
    #[must_use]
    pub fn arguments(&self) -> Vec<Entry<'t>> {
        let Some(list) = self.handle.field("arguments") else {
            return Vec::new();
        };
        if list.kind() == "generator_expression" {
            return vec![Entry { name: list.text() }];
        }

        list.named_children()
            .into_iter()
            .filter(|arg| match self.language {
                SupportedLanguage::Python => {
                    !matches!(arg.kind(), "keyword_argument" | "dictionary_splat")
                }
                SupportedLanguage::Rust => arg.kind() != "attribute_item",
                SupportedLanguage::TypeScript => true,
            })
            .map(|arg| Entry { name: arg.text() })
            .collect()
    }
}

/// A class-like type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassNode<'t> {
    handle: NodeHandle<'t>,
}

impl<'t> ClassNode<'t> {
    pub(crate) const fn new(handle: NodeHandle<'t>) -> Self {
        Self { handle }
    }

    /// Returns the definition node.
    #[must_use]
    pub const fn handle(&self) -> NodeHandle<'t> {
        self.handle
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> Option<&'t str> {
        self.handle.field("name").map(|name| name.text())
    }
}

fn entry_named(name: Option<NodeHandle<'_>>) -> Option<Entry<'_>> {
    name.map(|ident| Entry { name: ident.text() })
}

fn python_parameters(list: NodeHandle<'_>) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    for param in list.named_children() {
        match param.kind() {
            "identifier" => entries.push(Entry { name: param.text() }),
            "default_parameter" | "typed_default_parameter" => {
                entries.extend(entry_named(param.field("name")));
            }
            "typed_parameter" => {
                let Some(first) = param.named_children().into_iter().next() else {
                    continue;
                };
                if first.kind() != "identifier" {
                    // `*args: T` or `**kwargs: T`: nothing positional follows.
                    break;
                }
                entries.push(Entry { name: first.text() });
            }
            "positional_separator" => entries.clear(),
            "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
            _ => {}
        }
    }
    entries
}

fn rust_parameters(list: NodeHandle<'_>) -> Vec<Entry<'_>> {
    list.named_children()
        .into_iter()
        .filter_map(|param| match param.kind() {
            "parameter" => entry_named(param.field("pattern")),
            "self_parameter" => Some(Entry { name: "self" }),
            _ => None,
        })
        .collect()
}

fn typescript_parameters(list: NodeHandle<'_>) -> Vec<Entry<'_>> {
    list.named_children()
        .into_iter()
        .filter_map(|param| match param.kind() {
            "required_parameter" | "optional_parameter" => entry_named(param.field("pattern")),
            "identifier" => Some(Entry { name: param.text() }),
            "assignment_pattern" => entry_named(param.field("left")),
            _ => None,
        })
        .collect()
}

fn is_reference(language: SupportedLanguage, node: NodeHandle<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };

    let declares_name = classify(language, parent).is_some_and(|kind| {
        matches!(
            kind,
            StructuralKind::FunctionDefinition | StructuralKind::ClassDefinition
        )
    }) && node.is_field_of(&parent, "name");
    if declares_name {
        return false;
    }

    match language {
        SupportedLanguage::Python => !is_python_binding(node, parent),
        SupportedLanguage::Rust => {
            !(parent.kind() == "parameter" && node.is_field_of(&parent, "pattern"))
        }
        SupportedLanguage::TypeScript => match parent.kind() {
            "required_parameter" | "optional_parameter" => !node.is_field_of(&parent, "pattern"),
            "formal_parameters" => false,
            _ => true,
        },
    }
}

/// Python identifiers that `ast` does not represent as `Name` nodes:
/// parameters, attribute and keyword names, import names, `global` and
/// `nonlocal` names, and exception aliases.
fn is_python_binding(node: NodeHandle<'_>, parent: NodeHandle<'_>) -> bool {
    match parent.kind() {
        "parameters" | "lambda_parameters" | "typed_parameter" => true,
        "default_parameter" | "typed_default_parameter" => node.is_field_of(&parent, "name"),
        "list_splat_pattern" | "dictionary_splat_pattern" => parent.parent().is_some_and(|outer| {
            matches!(
                outer.kind(),
                "parameters" | "lambda_parameters" | "typed_parameter"
            )
        }),
        "attribute" => node.is_field_of(&parent, "attribute"),
        "keyword_argument" => node.is_field_of(&parent, "name"),
        "global_statement" | "nonlocal_statement" => true,
        "except_clause" | "except_group_clause" => node.is_field_of(&parent, "alias"),
        "as_pattern_target" => parent
            .parent()
            .and_then(|pattern| pattern.parent())
            .is_some_and(|clause| clause.kind().starts_with("except")),
        _ => within_import(parent),
    }
}

fn within_import(start: NodeHandle<'_>) -> bool {
    let mut current = Some(start);
    while let Some(node) = current {
        match node.kind() {
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                return true;
            }
            "dotted_name" | "aliased_import" | "relative_import" | "wildcard_import" => {
                current = node.parent();
            }
            _ => return false,
        }
    }
    false
}
