//! Tests for the lexical queries used by class-member transforms.
use esdown_parser::syntax::transform_utils::{
    class_name_node, collect_receiver_references, enclosing_statement, is_class_declaration,
    is_in_ordinary_function, is_pure_key, references_enclosing_receiver, references_super,
    statement_declaring_class, vars_declared_in_branch,
};
use esdown_parser::{AstFactory, NodeArena, NodeIndex, ParserState, syntax_kind_ext};

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected diagnostics: {:?}",
        parser.get_diagnostics()
    );
    (parser.into_arena(), root)
}

/// Every node of `kind` in pre-order.
fn find_all(arena: &NodeArena, root: NodeIndex, kind: u16) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    let mut stack = vec![root];
    while let Some(index) = stack.pop() {
        if arena.kind(index) == kind {
            found.push(index);
        }
        stack.extend(arena.children(index).iter().rev().copied());
    }
    found
}

fn first_class(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    find_all(arena, root, syntax_kind_ext::CLASS)[0]
}

#[test]
fn receiver_references_skip_ordinary_functions() {
    let (arena, root) = parse("this.a; (() => this.b)(); function f() { this.c; }");
    let refs = collect_receiver_references(&arena, root, None);
    assert_eq!(refs.this_nodes.len(), 2);
    assert!(refs.super_nodes.is_empty());
}

#[test]
fn receiver_references_see_heritage_and_computed_keys_of_nested_classes() {
    let (arena, root) = parse("class A extends this.B { [this.k] = 1; m() { this.x; } y = this; }");
    let class = first_class(&arena, root);

    let outside = collect_receiver_references(&arena, root, None);
    assert_eq!(outside.this_nodes.len(), 2);

    let inside = collect_receiver_references(&arena, class, Some(class));
    assert_eq!(inside.this_nodes.len(), 3);
}

#[test]
fn field_initializer_references() {
    let (arena, root) = parse("class A extends B { x = super.y; z = function() { return this; }; }");
    let class = first_class(&arena, root);
    let members = arena.children(arena.class_members(class)).to_vec();
    assert!(references_super(&arena, members[0]));
    assert!(references_enclosing_receiver(&arena, members[0]));
    assert!(!references_enclosing_receiver(&arena, members[1]));
}

#[test]
fn vars_declared_in_branch_stops_at_functions() {
    let (arena, root) = parse(
        "{ var a = 1; if (x) { var b; } let c; function g() { var d; } (() => { var e; })(); }",
    );
    let block = arena.first_child(root);
    assert_eq!(vars_declared_in_branch(&arena, block), ["a", "b"]);
}

#[test]
fn enclosing_statement_walks_to_statement_list() {
    let (arena, root) = parse("if (a) { foo(class {}); }");
    let class = first_class(&arena, root);
    let statement = enclosing_statement(&arena, class);
    assert_eq!(arena.kind(statement), syntax_kind_ext::EXPRESSION_STATEMENT);
    assert!(arena.is_statement(statement));
    assert!(enclosing_statement(&arena, root).is_none());
}

#[test]
fn ordinary_function_ancestry() {
    let (arena, root) = parse("function f() { class A {} } let g = () => class B {};");
    let classes = find_all(&arena, root, syntax_kind_ext::CLASS);
    assert!(is_in_ordinary_function(&arena, classes[0]));
    assert!(!is_in_ordinary_function(&arena, classes[1]));
}

#[test]
fn class_name_node_shapes() {
    let (arena, root) = parse(
        "class A {} let b = class {}; a.b.c = class D {}; foo(class E {}); foo(class {});",
    );
    let classes = find_all(&arena, root, syntax_kind_ext::CLASS);
    let names: Vec<Option<String>> = classes
        .iter()
        .map(|&c| arena.qualified_name(class_name_node(&arena, c)))
        .collect();
    assert_eq!(
        names,
        [
            Some("A".to_string()),
            Some("b".to_string()),
            Some("a.b.c".to_string()),
            Some("E".to_string()),
            None,
        ]
    );
    assert!(is_class_declaration(&arena, classes[0]));
    assert!(!is_class_declaration(&arena, classes[1]));
}

#[test]
fn statement_declaring_class_shapes() {
    let (arena, root) = parse(
        "class A {} let b = class {}; a.b.c = class {}; let x = 1, y = class {}; foo(class E {}); z = w = class {};",
    );
    let statements = arena.children(root).to_vec();
    let classes = find_all(&arena, root, syntax_kind_ext::CLASS);
    let declaring: Vec<NodeIndex> = classes
        .iter()
        .map(|&c| statement_declaring_class(&arena, c, class_name_node(&arena, c)))
        .collect();
    assert_eq!(declaring[0], classes[0]);
    assert_eq!(declaring[1], statements[1]);
    assert_eq!(declaring[2], statements[2]);
    assert!(declaring[3].is_none());
    assert!(declaring[4].is_none());
    assert!(declaring[5].is_none());
}

#[test]
fn pure_keys() {
    let (arena, root) = parse("o[a]; o['s']; o[1]; o[true]; o[f()]; o[a.b];");
    let keys: Vec<bool> = find_all(&arena, root, syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION)
        .into_iter()
        .map(|access| is_pure_key(&arena, arena.child(access, 1)))
        .collect();
    assert_eq!(keys, [true, true, true, true, false, false]);
}

#[test]
fn factory_builds_qualified_names() {
    let mut arena = NodeArena::new();
    let qname = arena.create_qname("a.b.c", None);
    assert_eq!(arena.qualified_name(qname).as_deref(), Some("a.b.c"));
    let this_name = arena.create_qname("this.x", None);
    assert_eq!(arena.kind(arena.first_child(this_name)), syntax_kind_ext::THIS_KEYWORD);

    let value = arena.create_name("v", None);
    let statement = arena.create_assign_statement(qname, value);
    let assign = arena.first_child(statement);
    assert_eq!(arena.kind(assign), syntax_kind_ext::ASSIGNMENT_EXPRESSION);
    assert_eq!(arena.text(assign), "=");
    assert_eq!(arena.parent(qname), assign);
}

#[test]
fn factory_builds_iife() {
    let mut arena = NodeArena::new();
    let ret = {
        let value = arena.create_name("X", None);
        arena.create_return(value)
    };
    let body = arena.create_block(&[ret]);
    let call = arena.create_zero_arg_iife(body, None);
    let arrow = arena.first_child(call);
    assert_eq!(arena.kind(call), syntax_kind_ext::CALL_EXPRESSION);
    assert_eq!(arena.kind(arrow), syntax_kind_ext::ARROW_FUNCTION);
    assert_eq!(arena.function_body(arrow), body);
    assert!(arena.children(arena.function_params(arrow)).is_empty());
}
