//! Query descriptor model.
//!
//! A descriptor is the lowering input: one per query declaration, already
//! validated upstream. Everything here is plain data; behavior lives in the
//! sibling modules.

use std::sync::Arc;

use crate::output::Expression;

/// Disposition of an expression predicate with respect to forward
/// referencing.
///
/// The set is closed: every predicate expression arrives in exactly one of
/// these states, so downstream matches are total and no "unknown
/// disposition" failure path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForwardRefHandling {
    /// Never forward-wrapped.
    None,
    /// Still wrapped; the emitted code must unwrap it at runtime.
    Wrapped,
    /// Was wrapped, already unwrapped upstream.
    Unwrapped,
}

/// What a query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPredicate {
    /// One or more string selectors. Each entry may itself hold a
    /// comma-separated list; resolution flattens and trims them.
    Selectors(Vec<Arc<str>>),
    /// An arbitrary expression, usually a type reference.
    Expression {
        expression: Expression,
        forward_ref: ForwardRefHandling,
    },
}

impl QueryPredicate {
    pub fn selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::Selectors(selectors.into_iter().map(Into::into).collect())
    }

    pub fn expression(expression: Expression, forward_ref: ForwardRefHandling) -> Self {
        Self::Expression {
            expression,
            forward_ref,
        }
    }
}

/// One query declaration, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    /// Property on the owning instance that receives the query result.
    pub property_name: Arc<str>,
    /// What the query matches.
    pub predicate: QueryPredicate,
    /// Take only the first match instead of the full result list.
    pub first: bool,
    /// Search the whole subtree, not just direct children.
    pub descendants: bool,
    /// Resolve once, before change detection first runs.
    pub is_static: bool,
    /// Only report identity-changed result lists.
    pub emit_distinct_changes_only: bool,
    /// Signal-based query: the runtime writes through the property's
    /// signal, so no per-cycle refresh is lowered.
    pub is_signal: bool,
    /// Optional override of what to read from matched nodes.
    pub read: Option<Expression>,
}

impl QueryDescriptor {
    /// Descriptor with every flag cleared and no read override.
    pub fn new(property_name: impl Into<Arc<str>>, predicate: QueryPredicate) -> Self {
        Self {
            property_name: property_name.into(),
            predicate,
            first: false,
            descendants: false,
            is_static: false,
            emit_distinct_changes_only: false,
            is_signal: false,
            read: None,
        }
    }
}
