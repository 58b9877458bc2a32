//! Integration tests for class field and static block lowering.
//!
//! Each test parses an input and an expected program, lowers the input and
//! compares the printed results, so formatting never matters.

use esdown_common::{Diagnostic, UniqueIdSupplier};
use esdown_emitter::{ClassMembersSummary, print_to_string, rewrite_class_members};
use esdown_parser::parser::{NodeArena, NodeIndex};
use esdown_parser::{ColorId, ParserState, syntax_kind_ext};

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors in {source:?}: {:?}",
        parser.get_diagnostics()
    );
    (parser.into_arena(), root)
}

fn normalize(source: &str) -> String {
    let (arena, root) = parse(source);
    print_to_string(&arena, root)
}

fn lower(source: &str) -> (String, ClassMembersSummary) {
    let (mut arena, root) = parse(source);
    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let summary = rewrite_class_members(&mut arena, root, &mut ids, "test.js", &mut diagnostics);
    assert!(
        diagnostics.is_empty(),
        "unexpected diagnostics: {diagnostics:?}"
    );
    (print_to_string(&arena, root), summary)
}

fn test(input: &str, expected: &str) {
    let (actual, _) = lower(input);
    assert_eq!(actual, normalize(expected), "input:\n{input}");
}

fn test_same(input: &str) {
    test(input, input);
}

// =============================================================================
// Static blocks
// =============================================================================

#[test]
fn test_empty_static_block() {
    test("class C { static {} }", "class C {}\n{}");
}

#[test]
fn test_static_block_becomes_block() {
    test(
        "class C { static { let x = 2; const y = x; } }",
        "class C {}\n{ let x = 2; const y = x; }",
    );
}

#[test]
fn test_static_block_with_control_flow() {
    test(
        r"class C {
            static {
                let x = 2;
                const y = x;
                let z;
                if (x - y == 0) { z = 1; } else { z = 2; }
                while (x - z > 10) { z++; }
                for (;;) { break; }
            }
        }",
        r"class C {}
        {
            let x = 2;
            const y = x;
            let z;
            if (x - y == 0) { z = 1; } else { z = 2; }
            while (x - z > 10) { z++; }
            for (;;) { break; }
        }",
    );
}

#[test]
fn test_multiple_static_blocks_keep_order() {
    test(
        "class C { static { let x = 2; } static { const y = x; } }
         class D { static { let z = 1; } }",
        "class C {}
         { let x = 2; }
         { const y = x; }
         class D {}
         { let z = 1; }",
    );
}

#[test]
fn test_static_block_with_functions() {
    test(
        r"class C {
            static {
                let x = function () { return 1; };
                const y = () => { return 2; };
                function a() { return 3; }
                let z = (() => { return 4; })();
            }
        }",
        r"class C {}
        {
            let x = function () { return 1; };
            const y = () => { return 2; };
            function a() { return 3; }
            let z = (() => { return 4; })();
        }",
    );
}

#[test]
fn test_static_block_referring_to_class_by_name() {
    test("class C { static { C.x = 2; } }", "class C {}\n{ C.x = 2; }");
}

#[test]
fn test_nested_static_blocks() {
    test(
        "class Foo { static { let x = 5; class Bar { static { let x = 'str'; } } } }",
        "class Foo {}\n{ let x = 5; class Bar {} { let x = 'str'; } }",
    );
}

#[test]
fn test_static_block_with_var_becomes_iife() {
    test(
        "var z = 1; class C { static { let x = 2; var z = 3; } }",
        "var z = 1; class C {} (() => { let x = 2; var z = 3; })();",
    );
}

#[test]
fn test_nested_static_block_with_var_becomes_iife() {
    test(
        "class Foo { static { let x = 5; class Bar { static { var x = 'str'; } } } }",
        "class Foo {}\n{ let x = 5; class Bar {} (() => { var x = 'str'; })(); }",
    );
}

#[test]
fn test_var_inside_nested_function_does_not_need_iife() {
    test(
        "class C { static { function f() { var x = 1; } } }",
        "class C {}\n{ function f() { var x = 1; } }",
    );
}

// =============================================================================
// Static fields
// =============================================================================

#[test]
fn test_static_field() {
    test("class C { static x = 2 }", "class C {}\nC.x = 2;");
}

#[test]
fn test_static_field_without_initializer() {
    test("class C { static x; }", "class C {}\nC.x;");
}

#[test]
fn test_static_fields_keep_order() {
    test(
        "class C { static x = 2; static y = 'hi'; static z; }",
        "class C {}\nC.x = 2;\nC.y = 'hi';\nC.z;",
    );
}

#[test]
fn test_static_fields_of_sibling_classes() {
    test(
        "class C { static x = 2; static y = 3; } class D { static z = 1; }",
        "class C {} C.x = 2; C.y = 3; class D {} D.z = 1;",
    );
}

#[test]
fn test_static_function_values() {
    test(
        r"class C {
            static w = function () { return 1; };
            static x = () => { return 2; };
            static y = (function a() { return 3; })();
            static z = (() => { return 4; })();
        }",
        r"class C {}
        C.w = function () { return 1; };
        C.x = () => { return 2; };
        C.y = (function a() { return 3; })();
        C.z = (() => { return 4; })();",
    );
}

#[test]
fn test_static_field_referring_to_earlier_field() {
    test(
        "class C { static x = 2; static y = C.x; }",
        "class C {}\nC.x = 2;\nC.y = C.x;",
    );
}

#[test]
fn test_static_field_and_block_interleave() {
    test(
        "class C { static x = 2; static { let y = C.x; } static z = 3; }",
        "class C {}\nC.x = 2;\n{ let y = C.x; }\nC.z = 3;",
    );
}

#[test]
fn test_static_this_becomes_class_name() {
    test(
        "class C { static x = 1; static y = this.x; }",
        "class C {}\nC.x = 1;\nC.y = C.x;",
    );
}

#[test]
fn test_static_this_in_arrow_becomes_class_name() {
    test(
        "class C { static f = () => this.g(); }",
        "class C {}\nC.f = () => C.g();",
    );
}

#[test]
fn test_static_this_in_ordinary_function_is_kept() {
    test(
        "class C { static f = function () { return this; }; }",
        "class C {}\nC.f = function () { return this; };",
    );
}

#[test]
fn test_static_super_becomes_superclass() {
    test(
        "class C extends B { static y = super.x; }",
        "class C extends B {}\nC.y = B.x;",
    );
}

#[test]
fn test_static_super_with_qualified_superclass() {
    test(
        "class C extends ns.B { static y = super.x + 1; }",
        "class C extends ns.B {}\nC.y = ns.B.x + 1;",
    );
}

// =============================================================================
// Instance fields
// =============================================================================

#[test]
fn test_instance_field_with_nonempty_constructor() {
    test(
        "class C { x = 1; constructor() { this.y = 2; } }",
        r"class C {
            $esdown$mem$func$name$test$0() { this.x = 1; }
            constructor() {
                this.$esdown$mem$func$name$test$0();
                this.y = 2;
            }
        }",
    );
}

#[test]
fn test_instance_field_without_initializer() {
    test(
        "class C { x; constructor() { this.y = 2; } }",
        r"class C {
            $esdown$mem$func$name$test$0() { this.x; }
            constructor() {
                this.$esdown$mem$func$name$test$0();
                this.y = 2;
            }
        }",
    );
}

#[test]
fn test_instance_fields_around_constructor_keep_order() {
    test(
        "class C { x = 1; constructor() { alert(3); this.z = 4; } y = 2; }",
        r"class C {
            $esdown$mem$func$name$test$0() {
                this.x = 1;
                this.y = 2;
            }
            constructor() {
                this.$esdown$mem$func$name$test$0();
                alert(3);
                this.z = 4;
            }
        }",
    );
}

#[test]
fn test_instance_fields_of_sibling_classes_get_distinct_methods() {
    test(
        "class C { x = 1; constructor() {} } class D { a = 5; constructor() { this.b = 6; } }",
        r"class C {
            $esdown$mem$func$name$test$0() { this.x = 1; }
            constructor() { this.$esdown$mem$func$name$test$0(); }
        }
        class D {
            $esdown$mem$func$name$test$1() { this.a = 5; }
            constructor() {
                this.$esdown$mem$func$name$test$1();
                this.b = 6;
            }
        }",
    );
}

#[test]
fn test_instance_field_without_constructor() {
    test(
        "class C { foo() {} x = 2; }",
        r"class C {
            $esdown$mem$func$name$test$0() { this.x = 2; }
            constructor() { this.$esdown$mem$func$name$test$0(); }
            foo() {}
        }",
    );
}

#[test]
fn test_instance_and_static_fields() {
    test(
        "class C { static x = 2; y = C.x; }",
        r"class C {
            $esdown$mem$func$name$test$0() { this.y = C.x; }
            constructor() { this.$esdown$mem$func$name$test$0(); }
        }
        C.x = 2;",
    );
}

#[test]
fn test_instance_function_values() {
    test(
        r"class C {
            w = function () { return 1; };
            x = () => { return 2; };
            y = (function a() { return 3; })();
            z = (() => { return 4; })();
        }",
        r"class C {
            $esdown$mem$func$name$test$0() {
                this.w = function () { return 1; };
                this.x = () => { return 2; };
                this.y = (function a() { return 3; })();
                this.z = (() => { return 4; })();
            }
            constructor() { this.$esdown$mem$func$name$test$0(); }
        }",
    );
}

#[test]
fn test_instance_this_and_super_are_kept() {
    test(
        "class C extends B { x = 1; y = this.x + super.z; }",
        r"class C extends B {
            $esdown$mem$func$name$test$0() {
                this.x = 1;
                this.y = this.x + super.z;
            }
            constructor() {
                super(...arguments);
                this.$esdown$mem$func$name$test$0();
            }
        }",
    );
}

#[test]
fn test_constructor_parameters_do_not_capture_field_values() {
    test(
        "let x = 2; class C { constructor(x) { var y = x; } y = x; }",
        r"let x = 2;
        class C {
            $esdown$mem$func$name$test$0() { this.y = x; }
            constructor(x) {
                this.$esdown$mem$func$name$test$0();
                var y = x;
            }
        }",
    );
}

// =============================================================================
// Super calls
// =============================================================================

#[test]
fn test_field_call_follows_super_call() {
    test(
        "class C extends A { x = 1; constructor() { super(); this.y = 2; } }",
        r"class C extends A {
            $esdown$mem$func$name$test$0() { this.x = 1; }
            constructor() {
                super();
                this.$esdown$mem$func$name$test$0();
                this.y = 2;
            }
        }",
    );
}

#[test]
fn test_field_call_follows_late_super_call() {
    test(
        "class C extends A { y; constructor() { alert(3); super(); this.z = 4; } }",
        r"class C extends A {
            $esdown$mem$func$name$test$0() { this.y; }
            constructor() {
                alert(3);
                super();
                this.$esdown$mem$func$name$test$0();
                this.z = 4;
            }
        }",
    );
}

#[test]
fn test_derived_class_without_constructor_forwards_arguments() {
    test(
        "class B { constructor(a, b) {} y = 2; } class C extends B { x = 1; }",
        r"class B {
            $esdown$mem$func$name$test$0() { this.y = 2; }
            constructor(a, b) { this.$esdown$mem$func$name$test$0(); }
        }
        class C extends B {
            $esdown$mem$func$name$test$1() { this.x = 1; }
            constructor() {
                super(...arguments);
                this.$esdown$mem$func$name$test$1();
            }
        }",
    );
}

#[test]
fn test_nested_super_call_falls_back_to_start() {
    test(
        "class C extends A { x = 1; constructor() { if (a) { super(1); } else { super(2); } } }",
        r"class C extends A {
            $esdown$mem$func$name$test$0() { this.x = 1; }
            constructor() {
                this.$esdown$mem$func$name$test$0();
                if (a) { super(1); } else { super(2); }
            }
        }",
    );
}

// =============================================================================
// Computed keys
// =============================================================================

#[test]
fn test_pure_computed_keys_stay_in_place() {
    test(
        "class C { ['x'] = 1; static [2] = 3; [k] = 4; }",
        r"class C {
            $esdown$mem$func$name$test$0() {
                this['x'] = 1;
                this[k] = 4;
            }
            constructor() { this.$esdown$mem$func$name$test$0(); }
        }
        C[2] = 3;",
    );
}

#[test]
fn test_impure_computed_keys_are_hoisted_in_order() {
    test(
        "class C { [f()] = 1; static [g()] = 2; }",
        r"const $esdown$comp$key$test$0 = f();
        const $esdown$comp$key$test$1 = g();
        class C {
            $esdown$mem$func$name$test$2() { this[$esdown$comp$key$test$0] = 1; }
            constructor() { this.$esdown$mem$func$name$test$2(); }
        }
        C[$esdown$comp$key$test$1] = 2;",
    );
}

#[test]
fn test_impure_method_keys_are_hoisted_with_field_keys() {
    test(
        "class C { [a()]() {} static [b()] = 1; }",
        r"const $esdown$comp$key$test$0 = a();
        const $esdown$comp$key$test$1 = b();
        class C {
            [$esdown$comp$key$test$0]() {}
        }
        C[$esdown$comp$key$test$1] = 1;",
    );
}

#[test]
fn test_method_keys_of_classes_without_fields_are_kept() {
    test_same("class C { [a()]() {} }");
}

#[test]
fn test_static_computed_field_this_becomes_class_name() {
    test(
        "class C { static [1] = 1; static [2] = this[1]; }",
        "class C {}\nC[1] = 1;\nC[2] = C[1];",
    );
}

// =============================================================================
// Class expressions
// =============================================================================

#[test]
fn test_anonymous_class_bound_to_variable() {
    test(
        "let c = class { static { let x = 1; } }",
        "let c = class {};\n{ let x = 1; }",
    );
    test("let c = class { static x = 1 }", "let c = class {};\nc.x = 1;");
}

#[test]
fn test_class_name_matching_binding() {
    test("let c = class c { static x = 1 }", "let c = class c {};\nc.x = 1;");
}

#[test]
fn test_class_name_differing_from_binding_is_wrapped() {
    test(
        "let c = class C { static x = 1 }",
        "let c = (() => { class C {} C.x = 1; return C; })();",
    );
    test(
        "let c = class C { static { let x = 1; } }",
        "let c = (() => { class C {} { let x = 1; } return C; })();",
    );
}

#[test]
fn test_class_assigned_to_property() {
    test(
        "class A {} A.c = class { static x = 1 }",
        "class A {} A.c = class {}; A.c.x = 1;",
    );
}

#[test]
fn test_class_assigned_to_element_is_wrapped() {
    test(
        "class A {} A[1] = class { static x = 1 }",
        r"class A {}
        A[1] = (() => {
            class $esdown$class$name$test$0 {}
            $esdown$class$name$test$0.x = 1;
            return $esdown$class$name$test$0;
        })();",
    );
}

#[test]
fn test_wrapped_anonymous_class_ids_precede_method_ids() {
    test(
        "foo(class { y = 2; })",
        r"foo((() => {
            class $esdown$class$name$test$0 {
                $esdown$mem$func$name$test$1() { this.y = 2; }
                constructor() { this.$esdown$mem$func$name$test$1(); }
            }
            return $esdown$class$name$test$0;
        })());",
    );
}

#[test]
fn test_named_class_argument_is_wrapped() {
    test(
        "foo(class C { static y = 2; x = C.y; })",
        r"foo((() => {
            class C {
                $esdown$mem$func$name$test$0() { this.x = C.y; }
                constructor() { this.$esdown$mem$func$name$test$0(); }
            }
            C.y = 2;
            return C;
        })());",
    );
}

#[test]
fn test_matching_inner_name_with_instance_fields_is_not_wrapped() {
    test(
        "let C = class C { y = 2; }",
        r"let C = class C {
            $esdown$mem$func$name$test$0() { this.y = 2; }
            constructor() { this.$esdown$mem$func$name$test$0(); }
        };",
    );
}

#[test]
fn test_class_in_default_parameter_is_wrapped() {
    test(
        "function foo(c = class { static x; }) {}",
        r"function foo(c = (() => {
            class $esdown$class$name$test$0 {}
            $esdown$class$name$test$0.x;
            return $esdown$class$name$test$0;
        })()) {}",
    );
}

#[test]
fn test_class_in_assignment_argument_is_wrapped() {
    test(
        "foo(c = class C { static x; })",
        "foo(c = (() => { class C {} C.x; return C; })());",
    );
}

#[test]
fn test_multiple_declarators_are_wrapped() {
    test(
        "let a = 1, c = class { static x = 1 };",
        r"let a = 1, c = (() => {
            class $esdown$class$name$test$0 {}
            $esdown$class$name$test$0.x = 1;
            return $esdown$class$name$test$0;
        })();",
    );
}

#[test]
fn test_classes_without_fields_are_never_wrapped() {
    test_same("foo(class { m() {} });");
    test_same("let c = class C { static m() {} };");
}

// =============================================================================
// Nested classes
// =============================================================================

#[test]
fn test_class_in_constructor_is_lowered_first() {
    test(
        r"let x = 1;
        class C {
            y = 3;
            constructor() {
                class D {
                    constructor(x) {}
                    z = 2;
                }
            }
        }",
        r"let x = 1;
        class C {
            $esdown$mem$func$name$test$1() { this.y = 3; }
            constructor() {
                this.$esdown$mem$func$name$test$1();
                class D {
                    $esdown$mem$func$name$test$0() { this.z = 2; }
                    constructor(x) { this.$esdown$mem$func$name$test$0(); }
                }
            }
        }",
    );
}

#[test]
fn test_static_field_of_class_in_constructor() {
    test(
        "class C { static y = 3; constructor() { class D { constructor(x) {} static x = 2; } } }",
        r"class C {
            constructor() {
                class D { constructor(x) {} }
                D.x = 2;
            }
        }
        C.y = 3;",
    );
}

#[test]
fn test_class_in_static_block() {
    test(
        r"class C {
            static {
                let c = class {
                    static x = 1;
                    static { let y = 2; }
                    z = 3;
                };
            }
            a = 4;
            static b = 5;
        }",
        r"class C {
            $esdown$mem$func$name$test$1() { this.a = 4; }
            constructor() { this.$esdown$mem$func$name$test$1(); }
        }
        {
            let c = class {
                $esdown$mem$func$name$test$0() { this.z = 3; }
                constructor() { this.$esdown$mem$func$name$test$0(); }
            };
            c.x = 1;
            { let y = 2; }
        }
        C.b = 5;",
    );
}

#[test]
fn test_anonymous_class_in_instance_field() {
    test(
        r"class C {
            static { let c = 4; }
            a = class {
                static x = 1;
                static { let y = 2; }
                z = 3;
            };
            static b = 5;
        }",
        r"class C {
            $esdown$mem$func$name$test$2() {
                this.a = (() => {
                    class $esdown$class$name$test$0 {
                        $esdown$mem$func$name$test$1() { this.z = 3; }
                        constructor() { this.$esdown$mem$func$name$test$1(); }
                    }
                    $esdown$class$name$test$0.x = 1;
                    { let y = 2; }
                    return $esdown$class$name$test$0;
                })();
            }
            constructor() { this.$esdown$mem$func$name$test$2(); }
        }
        { let c = 4; }
        C.b = 5;",
    );
}

#[test]
fn test_named_class_in_static_field() {
    test(
        r"class C {
            static { let c = 5; }
            a = 4;
            static b = class B {
                static x = 1;
                static { let y = 2; }
                z = 3;
            };
        }",
        r"class C {
            $esdown$mem$func$name$test$1() { this.a = 4; }
            constructor() { this.$esdown$mem$func$name$test$1(); }
        }
        { let c = 5; }
        C.b = (() => {
            class B {
                $esdown$mem$func$name$test$0() { this.z = 3; }
                constructor() { this.$esdown$mem$func$name$test$0(); }
            }
            B.x = 1;
            { let y = 2; }
            return B;
        })();",
    );
}

// =============================================================================
// Outermost classes
// =============================================================================

#[test]
fn test_global_this_in_heritage_becomes_global_name() {
    test(
        "class C extends this.Base { static x = 1; }",
        "class C extends Base {}\nC.x = 1;",
    );
}

#[test]
fn test_class_inside_function_keeps_this_in_heritage() {
    test(
        "function f() { class C extends this.Base { static x = 1; } }",
        "function f() { class C extends this.Base {} C.x = 1; }",
    );
}

// =============================================================================
// Pass properties
// =============================================================================

#[test]
fn test_second_run_is_a_no_op() {
    let input = "class C extends B { [f()] = 1; static y = this.x; static { var z; } }";
    let (once, _) = lower(input);
    let (twice, summary) = lower(&once);
    assert_eq!(twice, once);
    assert_eq!(summary, ClassMembersSummary::default());
}

#[test]
fn test_summary_counts_lowered_classes() {
    let (_, summary) = lower("class A { x; } class B { m() {} } let c = class { static {} };");
    assert_eq!(summary.classes_lowered, 2);
    assert_eq!(summary.classes_unconverted, 0);
}

#[test]
fn test_generated_nodes_carry_class_colors() {
    let (mut arena, root) = parse("class C { x = this.y; }");
    let class = arena.first_child(root);
    arena.set_color(class, Some(ColorId(1)));
    arena.set_instance_color(class, ColorId(2));

    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    rewrite_class_members(&mut arena, root, &mut ids, "test.js", &mut diagnostics);

    let method = arena.first_child(arena.class_members(class));
    let function = arena.method_function(method);
    assert_eq!(arena.color(function), Some(ColorId(1)));

    let assignment = arena.first_child(arena.first_child(arena.function_body(function)));
    let receiver = arena.first_child(arena.first_child(assignment));
    assert!(arena.is_kind(receiver, syntax_kind_ext::THIS_KEYWORD));
    assert_eq!(arena.color(receiver), Some(ColorId(2)));
    let value_receiver = arena.first_child(arena.child(assignment, 1));
    assert_eq!(arena.color(value_receiver), Some(ColorId(2)));
}

#[test]
fn test_generated_nodes_have_source_ranges() {
    let (mut arena, root) = parse("let c = class C extends B { [f()] = 1; static y = 2; static { var z; } }");
    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    rewrite_class_members(&mut arena, root, &mut ids, "test.js", &mut diagnostics);

    let mut stack = arena.children(root).to_vec();
    while let Some(index) = stack.pop() {
        let node = arena.get(index).expect("attached node");
        assert!(
            node.has_source_range(),
            "node {} of kind {} has no source range",
            index.0,
            node.kind
        );
        stack.extend(node.children.iter().copied());
    }
}
