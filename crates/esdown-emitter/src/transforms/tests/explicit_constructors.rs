use super::*;
use crate::print_to_string;
use esdown_parser::ParserState;
use esdown_parser::parser::syntax_kind_ext;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "unexpected parse errors");
    (parser.into_arena(), root)
}

fn first_class(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    arena
        .children(root)
        .iter()
        .copied()
        .find(|&s| arena.is_kind(s, syntax_kind_ext::CLASS))
        .expect("source should declare a class")
}

#[test]
fn base_class_gets_empty_constructor() {
    let (mut arena, root) = parse("class A { m() {} }");
    let class = first_class(&arena, root);
    let ctor = ensure_constructor(&mut arena, class);

    assert_eq!(arena.text(ctor), "constructor");
    assert_eq!(arena.children(arena.class_members(class))[0], ctor);
    assert_eq!(
        print_to_string(&arena, root),
        "class A {\n    constructor() {}\n    m() {}\n}\n"
    );
}

#[test]
fn derived_class_constructor_forwards_arguments() {
    let (mut arena, root) = parse("class B extends A {}");
    let class = first_class(&arena, root);
    ensure_constructor(&mut arena, class);

    assert_eq!(
        print_to_string(&arena, root),
        "class B extends A {\n    constructor() {\n        super(...arguments);\n    }\n}\n"
    );
}

#[test]
fn existing_constructor_is_returned_unchanged() {
    let (mut arena, root) = parse("class A { constructor(a) { this.a = a; } }");
    let class = first_class(&arena, root);
    let before = arena.class_constructor(class);
    let ctor = ensure_constructor(&mut arena, class);

    assert_eq!(ctor, before);
    assert_eq!(arena.children(arena.class_members(class)).len(), 1);
}

#[test]
fn ensure_constructor_is_idempotent() {
    let (mut arena, root) = parse("class A {}");
    let class = first_class(&arena, root);
    let first = ensure_constructor(&mut arena, class);
    let second = ensure_constructor(&mut arena, class);

    assert_eq!(first, second);
    assert_eq!(arena.children(arena.class_members(class)).len(), 1);
}

#[test]
fn synthesized_constructor_takes_class_range() {
    let (mut arena, root) = parse("class A {}");
    let class = first_class(&arena, root);
    let ctor = ensure_constructor(&mut arena, class);

    let class_node = arena.get(class).expect("class node");
    let ctor_node = arena.get(ctor).expect("constructor node");
    assert_eq!((ctor_node.pos, ctor_node.end), (class_node.pos, class_node.end));
}

#[test]
fn static_constructor_named_method_is_not_a_constructor() {
    let (mut arena, root) = parse("class A { static constructor() {} }");
    let class = first_class(&arena, root);
    ensure_constructor(&mut arena, class);

    assert_eq!(arena.children(arena.class_members(class)).len(), 2);
}
