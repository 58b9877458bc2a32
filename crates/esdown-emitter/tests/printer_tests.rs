//! Integration tests for the JavaScript printer.

use esdown_emitter::{Printer, print_to_string};
use esdown_parser::ParserState;

fn print(source: &str) -> String {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors in {source:?}: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    print_to_string(&arena, root)
}

/// Print `source`, which must already be in printed form.
fn assert_stable(source: &str) {
    assert_eq!(print(source), source);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_redundant_parentheses_are_dropped() {
    assert_eq!(print("(a + (b * c));"), "a + b * c;\n");
    assert_eq!(print("((a - b) - c);"), "a - b - c;\n");
    assert_eq!(print("x = (y = z);"), "x = y = z;\n");
    assert_eq!(print("f((a), (b));"), "f(a, b);\n");
}

#[test]
fn test_required_parentheses_are_kept() {
    assert_stable("(a + b) * c;\n");
    assert_stable("a - (b - c);\n");
    assert_stable("(a ** b) ** c;\n");
    assert_stable("a ** b ** c;\n");
    assert_stable("f((a, b));\n");
    assert_stable("(a ? b : c) ? d : e;\n");
    assert_stable("a ? b : c ? d : e;\n");
}

#[test]
fn test_nullish_and_logical_operators_stay_separated() {
    assert_stable("a ?? (b || c);\n");
    assert_stable("(a && b) ?? c;\n");
}

#[test]
fn test_unary_operators() {
    assert_stable("typeof x;\n");
    assert_stable("- -a;\n");
    assert_stable("!(a && b);\n");
}

#[test]
fn test_member_access_on_literals() {
    assert_stable("(1).toString();\n");
    assert_stable("1.5.toFixed();\n");
    assert_stable("'a'.length;\n");
}

#[test]
fn test_optional_chains() {
    assert_stable("a?.b.c;\n");
    assert_stable("a?.[0];\n");
    assert_stable("f?.();\n");
}

// =============================================================================
// Statement positions
// =============================================================================

#[test]
fn test_function_expression_statement_is_parenthesized() {
    assert_stable("(function () {})();\n");
    assert_stable("(() => {})();\n");
}

#[test]
fn test_object_literal_statement_is_parenthesized() {
    assert_eq!(print("({ a: 1 }).a;"), "({ a: 1 }.a);\n");
}

#[test]
fn test_arrow_returning_object_is_parenthesized() {
    assert_stable("let f = () => ({ a: 1 });\n");
    assert_stable("let g = (x) => x + 1;\n");
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn test_if_else_chain() {
    assert_eq!(
        print("if (a) b(); else if (c) { d(); } else e();"),
        "if (a) {\n    b();\n} else if (c) {\n    d();\n} else {\n    e();\n}\n"
    );
}

#[test]
fn test_loops() {
    assert_stable("for (let i = 0; i < n; i++) {\n    f(i);\n}\n");
    assert_stable("for (;;) {\n    break;\n}\n");
    assert_stable("for (const x of xs) {}\n");
    assert_stable("for (var k in o) {}\n");
    assert_stable("while (a) {\n    continue;\n}\n");
    assert_stable("do {\n    a--;\n} while (a);\n");
}

#[test]
fn test_functions() {
    assert_stable("function f(a, b = 1, ...c) {\n    return a;\n}\n");
    assert_stable("function* g() {}\n");
    assert_stable("let h = function named() {\n    throw e;\n};\n");
}

#[test]
fn test_classes() {
    assert_stable(
        "class A extends B {\n    static x = 1;\n    y;\n    [k] = 2;\n    constructor() {\n        super();\n    }\n    get a() {\n        return 1;\n    }\n    static {\n        f();\n    }\n}\n",
    );
}

#[test]
fn test_class_heritage_call_is_parenthesized_only_when_needed() {
    assert_stable("class A extends mixin(B) {}\n");
    assert_stable("class A extends (a, b) {}\n");
}

#[test]
fn test_literals() {
    assert_eq!(print(r#"let s = "it's";"#), "let s = 'it\\'s';\n");
    assert_stable("let a = [1, , 2];\n");
    assert_stable("let b = [1, ,];\n");
    assert_stable("let o = { a: 1, b, 'c d': 2, [e]: 3, m() {} };\n");
    assert_stable("let n = null, t = true, f = false;\n");
}

// =============================================================================
// Printer API
// =============================================================================

#[test]
fn test_printer_emits_single_expressions() {
    let mut parser = ParserState::new("test.js".to_string(), "f(a + b);".to_string());
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let statement = arena.first_child(root);
    let call = arena.first_child(statement);

    let mut printer = Printer::new(&arena);
    printer.emit(call);
    assert_eq!(printer.finish(), "f(a + b)");
}

#[test]
fn test_printing_is_a_fixed_point() {
    let source = r"
        var z = 1;
        class C extends ns.B {
            static y = (a, b);
            m() { return this.y?.z ?? (() => 0)(); }
        }
        for (const a of b) { if (a) { continue; } }
    ";
    let once = print(source);
    assert_eq!(print(&once), once);
}
