//! Node types for the generated-code AST.
//!
//! The target language is the untyped JavaScript consumed by the Trellis
//! runtime. Nodes are immutable values: builders consume their inputs and
//! wrap them, and no constructor ever mutates a previously built node, so
//! every node supports structural comparison and hashing.

use std::sync::Arc;

// ============================================================================
// LEAF VALUES
// ============================================================================

/// A literal value embedded directly in generated code.
///
/// Numbers are integers on purpose: everything this crate emits (flag masks,
/// phase bits) is integral, and `i64` keeps `Eq`/`Hash` derivable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Str(Arc<str>),
    Int(i64),
    Bool(bool),
    Null,
}

/// Reference to an export of a runtime module.
///
/// Treated as an uninterpreted token; resolving it to an import binding is
/// the embedding host's concern. `&'static str` fields keep the instruction
/// table `const`-constructible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExternalRef {
    pub module: &'static str,
    pub name: &'static str,
}

/// The writable half of an assignment.
///
/// Keeping lvalues a closed sub-type makes assignment construction total:
/// there is no "not assignable" failure to discover at lowering time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssignTarget {
    Var(Arc<str>),
    Prop {
        receiver: Box<Expression>,
        name: Arc<str>,
    },
}

/// Binary operators the generated code needs: logical AND for update guards,
/// bitwise AND for phase gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    BitAnd,
}

// ============================================================================
// EXPRESSIONS
// ============================================================================

/// An expression in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expression {
    Literal(Literal),
    LiteralArray(Vec<Expression>),
    /// Read of a local or module-level variable.
    ReadVar(Arc<str>),
    /// Property read, `receiver.name`.
    ReadProp {
        receiver: Box<Expression>,
        name: Arc<str>,
    },
    External(ExternalRef),
    /// Call, `target(args…)`.
    Invoke {
        target: Box<Expression>,
        args: Vec<Expression>,
    },
    /// Assignment in expression position, `target = value`.
    Assign {
        target: AssignTarget,
        value: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    /// Function literal, named or anonymous.
    Fn(FnExpr),
}

/// A function literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FnExpr {
    /// `None` emits an anonymous function expression.
    pub name: Option<Arc<str>>,
    pub params: Vec<Arc<str>>,
    pub body: Vec<Statement>,
}

// ============================================================================
// STATEMENTS
// ============================================================================

/// A statement in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Expr(Expression),
    /// `let name;`, `let name = init;` or `const name = init;`.
    DeclareVar {
        name: Arc<str>,
        init: Option<Expression>,
        constant: bool,
    },
    /// `if (condition) { then_body }`; no else branch is ever generated.
    If {
        condition: Expression,
        then_body: Vec<Statement>,
    },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// String literal expression.
pub fn str_lit(value: impl Into<Arc<str>>) -> Expression {
    Expression::Literal(Literal::Str(value.into()))
}

/// Integer literal expression.
pub fn int_lit(value: i64) -> Expression {
    Expression::Literal(Literal::Int(value))
}

/// Boolean literal expression.
pub fn bool_lit(value: bool) -> Expression {
    Expression::Literal(Literal::Bool(value))
}

/// The `null` literal.
pub fn null_lit() -> Expression {
    Expression::Literal(Literal::Null)
}

/// Array literal from already-built element expressions.
pub fn literal_arr(items: Vec<Expression>) -> Expression {
    Expression::LiteralArray(items)
}

/// Variable read.
pub fn variable(name: impl Into<Arc<str>>) -> Expression {
    Expression::ReadVar(name.into())
}

/// Reference to a runtime export.
pub fn external(reference: ExternalRef) -> Expression {
    Expression::External(reference)
}

/// `name = value` in expression position.
pub fn assign_var(name: impl Into<Arc<str>>, value: Expression) -> Expression {
    Expression::Assign {
        target: AssignTarget::Var(name.into()),
        value: Box::new(value),
    }
}

/// `receiver.name = value` in expression position.
pub fn assign_prop(
    receiver: Expression,
    name: impl Into<Arc<str>>,
    value: Expression,
) -> Expression {
    Expression::Assign {
        target: AssignTarget::Prop {
            receiver: Box::new(receiver),
            name: name.into(),
        },
        value: Box::new(value),
    }
}

/// Function literal expression.
pub fn fn_expr(name: Option<Arc<str>>, params: Vec<Arc<str>>, body: Vec<Statement>) -> Expression {
    Expression::Fn(FnExpr { name, params, body })
}

// ============================================================================
// BUILDERS
// ============================================================================

impl Expression {
    /// Invoke this expression with the given arguments.
    pub fn call(self, args: Vec<Expression>) -> Expression {
        Expression::Invoke {
            target: Box::new(self),
            args,
        }
    }

    /// Read a property off this expression.
    pub fn prop(self, name: impl Into<Arc<str>>) -> Expression {
        Expression::ReadProp {
            receiver: Box::new(self),
            name: name.into(),
        }
    }

    /// Short-circuiting logical AND with `rhs`.
    pub fn and(self, rhs: Expression) -> Expression {
        Expression::Binary {
            op: BinaryOp::And,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    /// Bitwise AND with `rhs`.
    pub fn bit_and(self, rhs: Expression) -> Expression {
        Expression::Binary {
            op: BinaryOp::BitAnd,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }

    /// Wrap this expression as an expression statement.
    pub fn into_stmt(self) -> Statement {
        Statement::Expr(self)
    }

    /// Static tag for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "literal",
            Expression::LiteralArray(_) => "literal array",
            Expression::ReadVar(_) => "variable read",
            Expression::ReadProp { .. } => "property read",
            Expression::External(_) => "external reference",
            Expression::Invoke { .. } => "call",
            Expression::Assign { .. } => "assignment",
            Expression::Binary { .. } => "binary operation",
            Expression::Fn(_) => "function",
        }
    }
}
