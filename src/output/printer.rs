//! Deterministic JavaScript rendition of the output AST.
//!
//! Generated definitions are compared against golden files, so the printer
//! guarantees byte-stable output for a given tree: fixed two-space indent,
//! fixed escaping, and a fixed parenthesization policy. Printing is total;
//! every node kind renders.
//!
//! Parenthesization keeps the shapes the runtime's golden corpus uses:
//! operands of a binary operator that are themselves binary or assignment
//! expressions are wrapped (`refresh(…) && (ctx.x = _t)`), everything else
//! prints bare (`refresh(_t = loadQuery())`).

use super::ast::{AssignTarget, BinaryOp, Expression, FnExpr, Literal, Statement};

const INDENT: &str = "  ";

/// Render a single expression.
pub fn print_expression(expression: &Expression) -> String {
    let mut printer = Printer::new();
    printer.expression(expression);
    printer.out
}

/// Render a single statement (multi-line for `if` bodies), no trailing
/// newline.
pub fn print_statement(statement: &Statement) -> String {
    let mut printer = Printer::new();
    printer.statement(statement);
    printer.out
}

/// Render a statement list, one statement per line.
pub fn print_statements(statements: &[Statement]) -> String {
    let mut printer = Printer::new();
    for (index, statement) in statements.iter().enumerate() {
        if index > 0 {
            printer.out.push('\n');
        }
        printer.statement(statement);
    }
    printer.out
}

struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn pad(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    fn statement(&mut self, statement: &Statement) {
        self.pad();
        match statement {
            Statement::Expr(expression) => {
                self.expression(expression);
                self.out.push(';');
            }
            Statement::DeclareVar {
                name,
                init,
                constant,
            } => {
                self.out.push_str(if *constant { "const " } else { "let " });
                self.out.push_str(name);
                if let Some(init) = init {
                    self.out.push_str(" = ");
                    self.expression(init);
                }
                self.out.push(';');
            }
            Statement::If {
                condition,
                then_body,
            } => {
                self.out.push_str("if (");
                self.expression(condition);
                self.out.push_str(") ");
                self.block(then_body);
            }
        }
    }

    fn block(&mut self, statements: &[Statement]) {
        if statements.is_empty() {
            self.out.push_str("{}");
            return;
        }
        self.out.push_str("{\n");
        self.depth += 1;
        for statement in statements {
            self.statement(statement);
            self.out.push('\n');
        }
        self.depth -= 1;
        self.pad();
        self.out.push('}');
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn expression(&mut self, expression: &Expression) {
        match expression {
            Expression::Literal(literal) => self.literal(literal),
            Expression::LiteralArray(items) => {
                self.out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.expression(item);
                }
                self.out.push(']');
            }
            Expression::ReadVar(name) => self.out.push_str(name),
            Expression::ReadProp { receiver, name } => {
                self.receiver(receiver);
                self.property(name);
            }
            Expression::External(reference) => self.out.push_str(reference.name),
            Expression::Invoke { target, args } => {
                self.receiver(target);
                self.out.push('(');
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    self.expression(arg);
                }
                self.out.push(')');
            }
            Expression::Assign { target, value } => {
                match target {
                    AssignTarget::Var(name) => self.out.push_str(name),
                    AssignTarget::Prop { receiver, name } => {
                        self.receiver(receiver);
                        self.property(name);
                    }
                }
                self.out.push_str(" = ");
                self.expression(value);
            }
            Expression::Binary { op, lhs, rhs } => {
                self.operand(lhs);
                self.out.push_str(match op {
                    BinaryOp::And => " && ",
                    BinaryOp::BitAnd => " & ",
                });
                self.operand(rhs);
            }
            Expression::Fn(function) => self.function(function),
        }
    }

    /// Operand of a binary operator.
    fn operand(&mut self, expression: &Expression) {
        let needs_parens = matches!(
            expression,
            Expression::Binary { .. } | Expression::Assign { .. }
        );
        self.maybe_parenthesized(needs_parens, expression);
    }

    /// Call target or property-access receiver; anything non-atomic keeps
    /// explicit parentheses so `(5).x` style stays well-formed.
    fn receiver(&mut self, expression: &Expression) {
        let needs_parens = matches!(
            expression,
            Expression::Binary { .. }
                | Expression::Assign { .. }
                | Expression::Fn(_)
                | Expression::Literal(_)
        );
        self.maybe_parenthesized(needs_parens, expression);
    }

    fn maybe_parenthesized(&mut self, parenthesized: bool, expression: &Expression) {
        if parenthesized {
            self.out.push('(');
            self.expression(expression);
            self.out.push(')');
        } else {
            self.expression(expression);
        }
    }

    /// `.name` when the property is identifier-shaped, `["name"]` otherwise.
    fn property(&mut self, name: &str) {
        if is_js_identifier(name) {
            self.out.push('.');
            self.out.push_str(name);
        } else {
            self.out.push('[');
            self.string(name);
            self.out.push(']');
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Str(value) => self.string(value),
            Literal::Int(value) => self.out.push_str(&value.to_string()),
            Literal::Bool(value) => self.out.push_str(if *value { "true" } else { "false" }),
            Literal::Null => self.out.push_str("null"),
        }
    }

    fn string(&mut self, value: &str) {
        self.out.push('"');
        for ch in value.chars() {
            match ch {
                '\\' => self.out.push_str("\\\\"),
                '"' => self.out.push_str("\\\""),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                _ => self.out.push(ch),
            }
        }
        self.out.push('"');
    }

    fn function(&mut self, function: &FnExpr) {
        self.out.push_str("function ");
        if let Some(name) = &function.name {
            self.out.push_str(name);
        }
        self.out.push('(');
        for (index, param) in function.params.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.out.push_str(param);
        }
        self.out.push_str(") ");
        self.block(&function.body);
    }
}

/// JavaScript allows any `XID` identifier plus `$` and `_`; reserved words
/// are legal after a dot, so no keyword check is needed.
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(unicode_ident::is_xid_start(first) || first == '_' || first == '$') {
        return false;
    }
    chars.all(|ch| unicode_ident::is_xid_continue(ch) || ch == '$')
}
