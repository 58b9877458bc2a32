//! Transform utilities for syntax analysis.
//!
//! Lexical queries the class-member transforms rely on: which `this`/`super`
//! references belong to a given context, which `var` names a block declares,
//! where a class is declared and what name it is known by.

use crate::parser::{NodeArena, NodeIndex, is_statement_container, node_flags, syntax_kind_ext};

/// `this` and `super` references bound to one context, in source order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReceiverReferences {
    pub this_nodes: Vec<NodeIndex>,
    pub super_nodes: Vec<NodeIndex>,
}

impl ReceiverReferences {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.this_nodes.is_empty() && self.super_nodes.is_empty()
    }
}

/// Collect the `this`/`super` nodes under `root` that are bound to the same
/// context as `root` itself.
///
/// The walk does not enter ordinary functions, which rebind `this`, but does
/// enter arrow functions. For a class other than `owner` only the parts
/// evaluated in the surrounding context are visited: the heritage clause and
/// computed member keys. Passing `owner = None` treats every class that way.
#[must_use]
pub fn collect_receiver_references(
    arena: &NodeArena,
    root: NodeIndex,
    owner: Option<NodeIndex>,
) -> ReceiverReferences {
    let mut refs = ReceiverReferences::default();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(node) = arena.get(index) else {
            continue;
        };
        match node.kind {
            syntax_kind_ext::THIS_KEYWORD => refs.this_nodes.push(index),
            syntax_kind_ext::SUPER_KEYWORD => refs.super_nodes.push(index),
            syntax_kind_ext::FUNCTION_DECLARATION | syntax_kind_ext::FUNCTION_EXPRESSION => {}
            syntax_kind_ext::CLASS if owner != Some(index) => {
                // Pushed in reverse so they pop in source order.
                let keys: Vec<NodeIndex> = arena
                    .children(arena.class_members(index))
                    .iter()
                    .filter(|&&m| {
                        matches!(
                            arena.kind(m),
                            syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION
                                | syntax_kind_ext::COMPUTED_METHOD_DECLARATION
                        )
                    })
                    .map(|&m| arena.first_child(m))
                    .collect();
                stack.extend(keys.into_iter().rev());
                let heritage = arena.class_heritage(index);
                if heritage.is_some() {
                    stack.push(heritage);
                }
            }
            _ => stack.extend(node.children.iter().rev().copied()),
        }
    }
    refs
}

/// Whether `root` uses `this` or `super` of the context it appears in.
#[must_use]
pub fn references_enclosing_receiver(arena: &NodeArena, root: NodeIndex) -> bool {
    !collect_receiver_references(arena, root, None).is_empty()
}

/// Whether `root` contains a `super` not hidden by an ordinary function.
#[must_use]
pub fn references_super(arena: &NodeArena, root: NodeIndex) -> bool {
    !collect_receiver_references(arena, root, None)
        .super_nodes
        .is_empty()
}

/// Names declared with `var` directly in `root`, without entering functions
/// or class bodies.
#[must_use]
pub fn vars_declared_in_branch(arena: &NodeArena, root: NodeIndex) -> Vec<String> {
    let mut names = Vec::new();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        let Some(node) = arena.get(index) else {
            continue;
        };
        match node.kind {
            syntax_kind_ext::FUNCTION_DECLARATION
            | syntax_kind_ext::FUNCTION_EXPRESSION
            | syntax_kind_ext::ARROW_FUNCTION
            | syntax_kind_ext::CLASS_MEMBERS => {}
            syntax_kind_ext::VARIABLE_STATEMENT if node.has_flag(node_flags::VAR) => {
                for &decl in &node.children {
                    names.push(arena.text(arena.first_child(decl)).to_string());
                    stack.extend(arena.children(decl).iter().skip(1).rev().copied());
                }
            }
            _ => stack.extend(node.children.iter().rev().copied()),
        }
    }
    names
}

/// The statement containing `index`: the nearest ancestor-or-self whose
/// parent is a statement list.
#[must_use]
pub fn enclosing_statement(arena: &NodeArena, index: NodeIndex) -> NodeIndex {
    let mut current = index;
    while current.is_some() {
        let parent = arena.parent(current);
        if parent.is_none() {
            return NodeIndex::NONE;
        }
        if is_statement_container(arena.kind(parent)) {
            return current;
        }
        current = parent;
    }
    NodeIndex::NONE
}

/// Whether `index` sits inside an ordinary function (one that binds `this`).
#[must_use]
pub fn is_in_ordinary_function(arena: &NodeArena, index: NodeIndex) -> bool {
    let mut current = arena.parent(index);
    while current.is_some() {
        if arena.is_ordinary_function(current) {
            return true;
        }
        current = arena.parent(current);
    }
    false
}

/// A class in statement position.
#[must_use]
pub fn is_class_declaration(arena: &NodeArena, class: NodeIndex) -> bool {
    arena.is_kind(class, syntax_kind_ext::CLASS) && arena.is_statement(class)
}

/// The node naming a class from the outside.
///
/// - `class C {}` gives `C`
/// - `let c = class {}` gives `c`
/// - `a.b = class {}` gives `a.b`
/// - otherwise the class's own name, `NONE` for an anonymous class.
#[must_use]
pub fn class_name_node(arena: &NodeArena, class: NodeIndex) -> NodeIndex {
    if is_class_declaration(arena, class) {
        return arena.class_name(class);
    }
    let parent = arena.parent(class);
    match arena.kind(parent) {
        syntax_kind_ext::VARIABLE_DECLARATION if arena.child(parent, 1) == class => {
            return arena.first_child(parent);
        }
        syntax_kind_ext::ASSIGNMENT_EXPRESSION
            if arena.text(parent) == "="
                && arena.child(parent, 1) == class
                && arena.is_qualified_name(arena.first_child(parent)) =>
        {
            return arena.first_child(parent);
        }
        _ => {}
    }
    arena.class_name(class)
}

/// The statement after which code referring to the class by `name_node` may
/// be placed, or `NONE` when the class is not in one of the shapes:
///
/// - `class C {}`
/// - `let C = class {};`
/// - `a.b.C = class {};` as a whole expression statement
#[must_use]
pub fn statement_declaring_class(
    arena: &NodeArena,
    class: NodeIndex,
    name_node: NodeIndex,
) -> NodeIndex {
    if name_node.is_none() {
        return NodeIndex::NONE;
    }
    if is_class_declaration(arena, class) {
        return class;
    }
    let parent = arena.parent(class);
    if arena.is_kind(parent, syntax_kind_ext::VARIABLE_DECLARATION)
        && arena.first_child(parent) == name_node
    {
        let list = arena.parent(parent);
        // Later declarators would run before the static members are set.
        if arena.is_statement(list) && arena.children(list).len() == 1 {
            return list;
        }
        return NodeIndex::NONE;
    }
    if arena.is_kind(parent, syntax_kind_ext::ASSIGNMENT_EXPRESSION)
        && arena.first_child(parent) == name_node
    {
        let statement = arena.parent(parent);
        if arena.is_kind(statement, syntax_kind_ext::EXPRESSION_STATEMENT)
            && arena.is_statement(statement)
        {
            return statement;
        }
    }
    NodeIndex::NONE
}

/// Keys whose evaluation cannot have or observe side effects.
#[must_use]
pub fn is_pure_key(arena: &NodeArena, key: NodeIndex) -> bool {
    matches!(
        arena.kind(key),
        syntax_kind_ext::IDENTIFIER
            | syntax_kind_ext::NUMERIC_LITERAL
            | syntax_kind_ext::STRING_LITERAL
            | syntax_kind_ext::TRUE_KEYWORD
            | syntax_kind_ext::FALSE_KEYWORD
            | syntax_kind_ext::NULL_KEYWORD
    )
}
