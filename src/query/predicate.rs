//! Predicate resolution.
//!
//! Turns a descriptor's predicate into the expression the create instruction
//! receives. Selector lists become pooled string arrays; expression
//! predicates pass through, wrapped in a runtime unwrap call when still
//! forward-wrapped.

use crate::output::{external, literal_arr, str_lit, Expression};
use crate::pool::{ConstantPool, PoolError};
use crate::runtime::Identifiers;

use super::descriptor::{ForwardRefHandling, QueryPredicate};

/// Resolve a predicate to its emitted form.
///
/// Selector entries are split on commas and trimmed, so `ref, #child` and
/// `["ref", "#child"]` resolve to the same flattened array. The array is
/// always pooled with sharing forced: equal selector lists across all
/// queries of a compilation unit collapse to one constant.
pub fn resolve_predicate(
    predicate: &QueryPredicate,
    pool: &mut ConstantPool,
) -> Result<Expression, PoolError> {
    match predicate {
        QueryPredicate::Selectors(selectors) => {
            let mut names = Vec::new();
            for selector in selectors {
                names.extend(selector.split(',').map(|name| str_lit(name.trim())));
            }
            pool.get_const_literal(literal_arr(names), true)
        }
        QueryPredicate::Expression {
            expression,
            forward_ref,
        } => match forward_ref {
            ForwardRefHandling::None | ForwardRefHandling::Unwrapped => Ok(expression.clone()),
            ForwardRefHandling::Wrapped => {
                Ok(external(Identifiers::RESOLVE_FORWARD_REF).call(vec![expression.clone()]))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{print_expression, variable};
    use std::sync::Arc;

    #[test]
    fn test_selector_list_flattens_and_trims() {
        let mut pool = ConstantPool::new();
        let predicate = QueryPredicate::selectors(["ref, #child", "other"]);
        resolve_predicate(&predicate, &mut pool).unwrap();

        let statements = pool.statements();
        assert_eq!(statements.len(), 1);
        assert_eq!(
            crate::output::print_statement(&statements[0]),
            "const _c0 = [\"ref\", \"#child\", \"other\"];"
        );
    }

    #[test]
    fn test_equal_selector_lists_share_one_constant() {
        let mut pool = ConstantPool::new();
        let split = QueryPredicate::selectors(["a,b"]);
        let listed = QueryPredicate::selectors(["a", "b"]);

        let first = resolve_predicate(&split, &mut pool).unwrap();
        let second = resolve_predicate(&listed, &mut pool).unwrap();

        let (Expression::ReadVar(a), Expression::ReadVar(b)) = (&first, &second) else {
            panic!("expected pooled references");
        };
        assert!(Arc::ptr_eq(a, b));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_plain_expression_passes_through() {
        let mut pool = ConstantPool::new();
        let predicate =
            QueryPredicate::expression(variable("ChildDirective"), ForwardRefHandling::None);
        let resolved = resolve_predicate(&predicate, &mut pool).unwrap();
        assert_eq!(resolved, variable("ChildDirective"));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_unwrapped_expression_passes_through() {
        let mut pool = ConstantPool::new();
        let predicate =
            QueryPredicate::expression(variable("ChildDirective"), ForwardRefHandling::Unwrapped);
        let resolved = resolve_predicate(&predicate, &mut pool).unwrap();
        assert_eq!(resolved, variable("ChildDirective"));
    }

    #[test]
    fn test_wrapped_expression_gains_unwrap_call() {
        let mut pool = ConstantPool::new();
        let predicate =
            QueryPredicate::expression(variable("forwardChild"), ForwardRefHandling::Wrapped);
        let resolved = resolve_predicate(&predicate, &mut pool).unwrap();
        assert_eq!(print_expression(&resolved), "resolveForwardRef(forwardChild)");
    }
}
