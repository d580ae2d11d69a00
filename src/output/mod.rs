//! Output AST for generated JavaScript.
//!
//! This module owns everything about the *shape* of generated code and
//! nothing about its meaning:
//! - [`ast`]: immutable expression/statement node types, constructors,
//!   and consuming builder methods
//! - [`printer`]: deterministic text rendition for golden-file comparison
//! - [`temp`]: the one-slot [`TemporaryAllocator`] a generated function's
//!   update block shares across statements
//!
//! Nodes are plain structural values (`Clone + PartialEq + Eq + Hash`);
//! nothing here mutates a previously built node.

mod ast;
mod printer;
mod temp;

pub use ast::{
    assign_prop, assign_var, bool_lit, external, fn_expr, int_lit, literal_arr, null_lit, str_lit,
    variable, AssignTarget, BinaryOp, Expression, ExternalRef, FnExpr, Literal, Statement,
};
pub use printer::{print_expression, print_statement, print_statements};
pub use temp::TemporaryAllocator;
