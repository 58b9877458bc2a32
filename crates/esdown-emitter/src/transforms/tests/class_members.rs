use super::*;
use crate::print_to_string;
use esdown_common::DiagnosticCategory;
use esdown_parser::ParserState;

fn parse(source: &str) -> (NodeArena, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    (parser.into_arena(), root)
}

fn run(source: &str) -> (NodeArena, NodeIndex, Vec<Diagnostic>, ClassMembersSummary) {
    let (mut arena, root) = parse(source);
    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let summary = rewrite_class_members(&mut arena, root, &mut ids, "test.js", &mut diagnostics);
    (arena, root, diagnostics, summary)
}

fn first_class(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    arena
        .children(root)
        .iter()
        .copied()
        .find(|&s| arena.is_kind(s, syntax_kind_ext::CLASS))
        .expect("source should declare a class")
}

// =============================================================================
// Error kinds
// =============================================================================

#[test]
fn error_kinds_map_to_codes_and_templates() {
    assert_eq!(TranspilationErrorKind::CannotConvert.code(), 9001);
    assert_eq!(TranspilationErrorKind::CannotConvertYet.code(), 9002);
    assert!(
        TranspilationErrorKind::CannotConvert
            .template()
            .starts_with("This code cannot be converted")
    );
    assert!(
        TranspilationErrorKind::CannotConvertYet
            .template()
            .contains("not yet implemented")
    );
}

#[test]
fn diagnostics_are_errors_with_the_member_range() {
    let source = "class A { static { this.x = 1; } }";
    let (_, _, diagnostics, summary) = run(source);

    assert_eq!(summary.classes_unconverted, 1);
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(diagnostic.file, "test.js");
    let start = diagnostic.start as usize;
    let end = start + diagnostic.length as usize;
    assert_eq!(&source[start..end], "static { this.x = 1; }");
    assert_eq!(
        diagnostic.message_text,
        "ES2022 transpilation of 'Member references this or super' is not yet implemented."
    );
}

// =============================================================================
// Class records
// =============================================================================

#[test]
fn record_partitions_members_by_placement() {
    let mut record = ClassRecord::new(NodeIndex(0), "C".to_string(), NodeIndex(0));
    record.record(NodeIndex(1), false);
    record.record(NodeIndex(2), true);
    record.record(NodeIndex(3), false);

    assert!(record.is_lowered());
    assert_eq!(record.instance_members, vec![NodeIndex(1), NodeIndex(3)]);
    assert_eq!(record.static_members, vec![NodeIndex(2)]);
}

#[test]
fn passive_record_is_not_lowered() {
    let record = ClassRecord::passive(NodeIndex(7));
    assert!(!record.is_lowered());
    assert!(record.declaring_statement.is_none());
    assert!(record.qualified_name.is_empty());
}

// =============================================================================
// Validation
// =============================================================================

fn rejections_for(source: &str) -> Vec<(TranspilationErrorKind, &'static str)> {
    let (mut arena, root) = parse(source);
    let class = first_class(&arena, root);
    let mut ids = UniqueIdSupplier::new("test.js");
    let mut sink: Vec<Diagnostic> = Vec::new();
    let transform = ClassMembersTransform {
        arena: &mut arena,
        ids: &mut ids,
        sink: &mut sink,
        file_name: "test.js",
        class_stack: Vec::new(),
        summary: ClassMembersSummary::default(),
        visit_depth: 0,
        depth_exceeded: false,
    };
    let refs = transform.global_receiver_references(class);
    transform
        .validate_class(class, refs.as_ref())
        .into_iter()
        .map(|r| (r.kind, r.detail))
        .collect()
}

#[test]
fn valid_class_has_no_rejections() {
    assert!(rejections_for("class A extends B { x = this.y; static z = super.w; }").is_empty());
}

#[test]
fn static_super_without_superclass_is_rejected() {
    assert_eq!(
        rejections_for("class A { static x = super.y; }"),
        vec![(
            TranspilationErrorKind::CannotConvert,
            "Super node with no superclass"
        )]
    );
}

#[test]
fn static_super_with_computed_superclass_is_deferred() {
    assert_eq!(
        rejections_for("class A extends mixin(B) { static x = super.y; }"),
        vec![(
            TranspilationErrorKind::CannotConvertYet,
            "super with a computed superclass"
        )]
    );
}

#[test]
fn static_block_using_receiver_is_deferred() {
    let rejections = rejections_for("class A { static { const f = () => this; } }");
    assert_eq!(
        rejections,
        vec![(
            TranspilationErrorKind::CannotConvertYet,
            "Member references this or super"
        )]
    );
}

#[test]
fn static_block_this_inside_ordinary_function_is_allowed() {
    assert!(rejections_for("class A { static { function f() { return this; } } }").is_empty());
}

#[test]
fn global_this_outside_property_access_is_rejected() {
    assert_eq!(
        rejections_for("class A extends this { x = 1; }"),
        vec![(
            TranspilationErrorKind::CannotConvert,
            "Improper global this use"
        )]
    );
}

#[test]
fn global_this_property_access_is_allowed() {
    assert!(rejections_for("class A extends this.B { x = 1; }").is_empty());
}

#[test]
fn every_rejection_of_a_class_is_collected() {
    let rejections = rejections_for("class A { static x = super.y; static { this.z; } }");
    assert_eq!(rejections.len(), 2);
}

// =============================================================================
// Field values
// =============================================================================

#[test]
fn field_value_finds_initializers() {
    let (arena, root) = parse("class A { a = 1; b; [c] = 2; [d]; }");
    let class = first_class(&arena, root);
    let members = arena.children(arena.class_members(class)).to_vec();

    assert_eq!(arena.text(field_value(&arena, members[0])), "1");
    assert!(field_value(&arena, members[1]).is_none());
    assert_eq!(arena.text(field_value(&arena, members[2])), "2");
    assert!(field_value(&arena, members[3]).is_none());
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn summary_counts_lowered_classes() {
    let (_, _, diagnostics, summary) = run("class A { x = 1; } class B { static y = 2; } class C {}");
    assert!(diagnostics.is_empty());
    assert_eq!(
        summary,
        ClassMembersSummary {
            classes_lowered: 2,
            classes_unconverted: 0,
        }
    );
}

#[test]
fn lowered_tree_prints_without_fields() {
    let (arena, root, _, _) = run("class A { static x = 1; }");
    assert_eq!(print_to_string(&arena, root), "class A {}\nA.x = 1;\n");
}

#[test]
fn script_without_class_members_is_skipped() {
    let (mut arena, root) = parse("class A { m() {} }");
    arena.set_script_features(root, FeatureSet::CLASSES);
    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let summary = rewrite_class_members(&mut arena, root, &mut ids, "test.js", &mut diagnostics);

    assert_eq!(summary, ClassMembersSummary::default());
    assert_eq!(arena.script_features(root), Some(FeatureSet::CLASSES));
    assert_eq!(ids.unique_id(), "test$0");
}

#[test]
fn unrecorded_features_do_not_gate_the_walk() {
    let (mut arena, root) = parse("class A { x = 1; }");
    let bare_root = arena.add_node(syntax_kind_ext::SOURCE_FILE, "", &[], 0, 0);
    let statement = arena.first_child(root);
    arena.detach(statement);
    arena.append_child(bare_root, statement);

    let mut ids = UniqueIdSupplier::new("test.js");
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let summary =
        rewrite_class_members(&mut arena, bare_root, &mut ids, "test.js", &mut diagnostics);

    assert_eq!(summary.classes_lowered, 1);
    assert_eq!(arena.script_features(bare_root), None);
}
