//! Query Lowering Tests
//!
//! End-to-end behavior of the lowering pipeline: flag encoding, predicate
//! resolution, instruction selection, and update-statement shapes, checked
//! through the printed text of synthesized definitions.

use rstest::rstest;
use trellis::output::{print_expression, print_statements, variable, Expression, Statement};
use trellis::{
    lower_content_queries, lower_view_queries, ConstantPool, ForwardRefHandling, QueryDescriptor,
    QueryPredicate,
};

/// Helper to reach one phase block of a synthesized definition
fn phase_body(function: &Expression, index: usize) -> &[Statement] {
    let Expression::Fn(function) = function else {
        panic!("expected a function expression");
    };
    let Statement::If { then_body, .. } = &function.body[index] else {
        panic!("expected a phase gate");
    };
    then_body
}

/// Helper to print an expression statement
fn printed(statement: &Statement) -> String {
    let Statement::Expr(expression) = statement else {
        panic!("expected an expression statement");
    };
    print_expression(expression)
}

// ============================================================================
// Flag Encoding
// ============================================================================

#[rstest]
// Single bits
#[case(false, false, false, "viewQuery(_c0, 0)")]
#[case(true, false, false, "viewQuery(_c0, 1)")]
#[case(false, true, false, "viewQuery(_c0, 2)")]
#[case(false, false, true, "viewQuery(_c0, 4)")]
// Combined bits
#[case(true, false, true, "viewQuery(_c0, 5)")]
#[case(true, true, true, "viewQuery(_c0, 7)")]
fn test_flag_bits_reach_the_create_call(
    #[case] descendants: bool,
    #[case] is_static: bool,
    #[case] distinct: bool,
    #[case] expected: &str,
) {
    let mut pool = ConstantPool::new();
    let mut query = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    query.descendants = descendants;
    query.is_static = is_static;
    query.emit_distinct_changes_only = distinct;

    let function = lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    assert_eq!(printed(&phase_body(&function, 0)[0]), expected);
}

// ============================================================================
// Predicate Resolution
// ============================================================================

#[rstest]
// Entries may carry embedded comma lists
#[case(vec!["ref, #child"], "const _c0 = [\"ref\", \"#child\"];")]
#[case(vec!["ref", "#child"], "const _c0 = [\"ref\", \"#child\"];")]
// Whitespace around names is trimmed
#[case(vec![" a , b "], "const _c0 = [\"a\", \"b\"];")]
// Duplicates are preserved, not collapsed
#[case(vec!["a, a"], "const _c0 = [\"a\", \"a\"];")]
fn test_selector_lists_flatten_into_one_pooled_array(
    #[case] selectors: Vec<&str>,
    #[case] expected: &str,
) {
    let mut pool = ConstantPool::new();
    let query = QueryDescriptor::new("items", QueryPredicate::selectors(selectors));
    lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    assert_eq!(print_statements(&pool.statements()), expected);
}

#[rstest]
#[case(ForwardRefHandling::None, "viewQuery(ChildDir, 0)")]
#[case(ForwardRefHandling::Unwrapped, "viewQuery(ChildDir, 0)")]
#[case(ForwardRefHandling::Wrapped, "viewQuery(resolveForwardRef(ChildDir), 0)")]
fn test_forward_ref_dispositions(
    #[case] forward_ref: ForwardRefHandling,
    #[case] expected: &str,
) {
    let mut pool = ConstantPool::new();
    let query = QueryDescriptor::new(
        "child",
        QueryPredicate::expression(variable("ChildDir"), forward_ref),
    );
    let function = lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    assert_eq!(printed(&phase_body(&function, 0)[0]), expected);
    assert!(pool.is_empty(), "expression predicates are never pooled");
}

#[test]
fn test_selector_constants_shared_across_owners() {
    let mut pool = ConstantPool::new();
    let view_query = QueryDescriptor::new("a", QueryPredicate::selectors(["item"]));
    let content_query = QueryDescriptor::new("b", QueryPredicate::selectors(["item"]));

    let view = lower_view_queries(&[view_query], &mut pool, Some("A")).unwrap();
    let content = lower_content_queries(&[content_query], &mut pool, Some("B")).unwrap();

    assert_eq!(pool.len(), 1);
    assert_eq!(printed(&phase_body(&view, 0)[0]), "viewQuery(_c0, 0)");
    assert_eq!(
        printed(&phase_body(&content, 0)[0]),
        "contentQuery(dirIndex, _c0, 0)"
    );
}

// ============================================================================
// Instruction Selection
// ============================================================================

#[rstest]
#[case(false, false, "viewQuery(_c0, 0)")]
#[case(true, false, "viewQuerySignal(ctx.items, _c0, 0)")]
#[case(false, true, "contentQuery(dirIndex, _c0, 0)")]
#[case(true, true, "contentQuerySignal(dirIndex, ctx.items, _c0, 0)")]
fn test_instruction_selection(
    #[case] is_signal: bool,
    #[case] content: bool,
    #[case] expected: &str,
) {
    let mut pool = ConstantPool::new();
    let mut query = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    query.is_signal = is_signal;

    let function = if content {
        lower_content_queries(&[query], &mut pool, Some("Owner")).unwrap()
    } else {
        lower_view_queries(&[query], &mut pool, Some("Owner")).unwrap()
    };
    assert_eq!(printed(&phase_body(&function, 0)[0]), expected);
}

#[test]
fn test_read_override_is_the_last_argument() {
    let mut pool = ConstantPool::new();
    let mut query = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    query.read = Some(variable("TemplateRef"));
    let function = lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    assert_eq!(
        printed(&phase_body(&function, 0)[0]),
        "viewQuery(_c0, 0, TemplateRef)"
    );
}

// ============================================================================
// Update-Phase Shapes
// ============================================================================

#[rstest]
#[case(false, "queryRefresh(_t = loadQuery()) && (ctx.items = _t)")]
#[case(true, "queryRefresh(_t = loadQuery()) && (ctx.items = _t.first)")]
fn test_refresh_guard_shape(#[case] first: bool, #[case] expected: &str) {
    let mut pool = ConstantPool::new();
    let mut query = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    query.first = first;

    let function = lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    let update = phase_body(&function, 1);
    assert_eq!(update.len(), 2, "one declaration plus one guard");
    assert_eq!(printed(&update[1]), expected);
}

#[test]
fn test_signal_update_is_a_single_advance() {
    let mut pool = ConstantPool::new();
    let mut query = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    query.is_signal = true;

    let function = lower_view_queries(&[query], &mut pool, Some("Cmp")).unwrap();
    let update = phase_body(&function, 1);
    assert_eq!(update.len(), 1);
    assert_eq!(printed(&update[0]), "queryAdvance()");
}

#[test]
fn test_mixed_owner_orders_statements_by_descriptor() {
    let mut pool = ConstantPool::new();
    let plain = QueryDescriptor::new("items", QueryPredicate::selectors(["item"]));
    let mut signal = QueryDescriptor::new("chart", QueryPredicate::selectors(["chart"]));
    signal.is_signal = true;

    let function =
        lower_view_queries(&[plain, signal], &mut pool, Some("Cmp")).unwrap();

    let create = phase_body(&function, 0);
    assert_eq!(printed(&create[0]), "viewQuery(_c0, 0)");
    assert_eq!(printed(&create[1]), "viewQuerySignal(ctx.chart, _c1, 0)");

    let update = phase_body(&function, 1);
    assert_eq!(update.len(), 3);
    assert!(matches!(&update[0], Statement::DeclareVar { .. }));
    assert_eq!(
        printed(&update[1]),
        "queryRefresh(_t = loadQuery()) && (ctx.items = _t)"
    );
    assert_eq!(printed(&update[2]), "queryAdvance()");
}

// ============================================================================
// End-to-End Scenario
// ============================================================================

#[test]
fn test_refreshing_then_signal_descriptor_pair() {
    let mut pool = ConstantPool::new();
    let mut refs = QueryDescriptor::new("ref", QueryPredicate::selectors(["ref"]));
    refs.first = true;
    refs.descendants = true;
    let mut signal = QueryDescriptor::new(
        "sig",
        QueryPredicate::expression(variable("SigDir"), ForwardRefHandling::None),
    );
    signal.is_signal = true;

    let function = lower_view_queries(&[refs, signal], &mut pool, Some("Cmp")).unwrap();

    let create = phase_body(&function, 0);
    assert_eq!(create.len(), 2);
    assert_eq!(printed(&create[0]), "viewQuery(_c0, 1)");
    assert_eq!(printed(&create[1]), "viewQuerySignal(ctx.sig, SigDir, 0)");

    let update = phase_body(&function, 1);
    assert_eq!(update.len(), 3);
    assert!(matches!(&update[0], Statement::DeclareVar { .. }));
    assert_eq!(
        printed(&update[1]),
        "queryRefresh(_t = loadQuery()) && (ctx.ref = _t.first)"
    );
    assert_eq!(printed(&update[2]), "queryAdvance()");
}

// ============================================================================
// Definition Naming
// ============================================================================

#[test]
fn test_owner_names_suffix_the_definitions() {
    let mut pool = ConstantPool::new();
    let view = lower_view_queries(&[], &mut pool, Some("AppCmp")).unwrap();
    let content = lower_content_queries(&[], &mut pool, Some("SideDir")).unwrap();

    assert!(print_expression(&view).starts_with("function AppCmp_Query(rf, ctx)"));
    assert!(print_expression(&content)
        .starts_with("function SideDir_ContentQueries(rf, ctx, dirIndex)"));
}

#[test]
fn test_anonymous_owner_yields_anonymous_definition() {
    let mut pool = ConstantPool::new();
    let view = lower_view_queries(&[], &mut pool, None).unwrap();
    assert!(print_expression(&view).starts_with("function (rf, ctx)"));
}
