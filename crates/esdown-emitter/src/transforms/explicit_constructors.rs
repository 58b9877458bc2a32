//! Explicit constructor synthesis.
//!
//! Passes that move code into a constructor need one to exist. A class
//! without a `constructor` method gets the default one the language would
//! have implied:
//!
//! ```text
//! class A {}            =>  class A { constructor() {} }
//! class B extends A {}  =>  class B extends A { constructor() { super(...arguments); } }
//! ```

use esdown_parser::AstFactory;
use esdown_parser::parser::{NodeArena, NodeIndex};
use tracing::trace;

/// Return the constructor of `class`, inserting the default one first when
/// the class has none. Calling it again returns the same node.
pub fn ensure_constructor(arena: &mut NodeArena, class: NodeIndex) -> NodeIndex {
    let existing = arena.class_constructor(class);
    if existing.is_some() {
        return existing;
    }

    let color = arena.color(class);
    let function = arena.create_empty_function(color);
    if arena.class_heritage(class).is_some() {
        let callee = arena.create_super(None);
        let arguments = arena.create_name("arguments", None);
        let spread = arena.create_spread(arguments);
        let call = arena.create_call(callee, &[spread], None);
        let statement = arena.expr_result(call);
        let body = arena.function_body(function);
        arena.append_child(body, statement);
    }

    let constructor = arena.create_member_function_def("constructor", function);
    arena.srcref_tree_if_missing(constructor, class);
    let members = arena.class_members(class);
    arena.add_child_to_front(members, constructor);
    trace!(class = class.0, "synthesized default constructor");
    constructor
}

#[cfg(test)]
#[path = "tests/explicit_constructors.rs"]
mod tests;
