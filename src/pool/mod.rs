//! Constant pool: structural dedup of literal values.
//!
//! Generated definitions share bulky literals (selector arrays above all)
//! through module-level `const _cN = …;` declarations. The pool keys each
//! candidate value structurally, so two requests for equal values resolve to
//! the *same* shared reference, and emits the backing declarations in
//! first-allocation order. One pool instance serves one compilation unit;
//! `&mut` access makes exclusivity a compile-time fact.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use thiserror::Error;

use crate::output::{Expression, Literal, Statement};

/// Insertion-ordered map with the fast non-cryptographic hasher.
type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Prefix for pool-allocated constant names: `_c0`, `_c1`, …
const CONSTANT_PREFIX: &str = "_c";

/// Pooling failure.
///
/// The only runtime error this crate produces: a value whose shape cannot be
/// keyed structurally reached a pooling site. That is an upstream invariant
/// violation, raised synchronously and propagated to the invoking
/// compilation unit, which aborts lowering for that unit only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Only literal shapes (literals, arrays of them, external references,
    /// variable reads) can be pooled.
    #[error("cannot derive a structural key for a {0} expression")]
    Unkeyable(&'static str),
}

#[derive(Debug)]
struct PoolEntry {
    name: Arc<str>,
    value: Expression,
}

/// Dedup store for shared literal constants.
#[derive(Debug, Default)]
pub struct ConstantPool {
    literals: FxIndexMap<String, PoolEntry>,
    next_id: usize,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `value` to an expression usable at its request site.
    ///
    /// Plain literals are returned unchanged and never pooled. Anything
    /// else is keyed structurally:
    /// - a previously pooled value resolves to the existing shared name,
    /// - an unseen value is pooled under a fresh `_cN` name when
    ///   `force_shared` is set, and returned unchanged otherwise.
    ///
    /// All references to one entry clone one `Arc` name, so sharing is
    /// observable as pointer identity, not merely value equality.
    pub fn get_const_literal(
        &mut self,
        value: Expression,
        force_shared: bool,
    ) -> Result<Expression, PoolError> {
        if matches!(value, Expression::Literal(_)) {
            return Ok(value);
        }

        let key = structural_key(&value)?;
        if let Some(entry) = self.literals.get(&key) {
            return Ok(Expression::ReadVar(entry.name.clone()));
        }
        if !force_shared {
            return Ok(value);
        }

        let name: Arc<str> = format!("{CONSTANT_PREFIX}{}", self.next_id).into();
        self.next_id += 1;
        tracing::debug!("[POOL] new shared constant `{}` for key {}", name, key);
        self.literals.insert(
            key,
            PoolEntry {
                name: name.clone(),
                value,
            },
        );
        Ok(Expression::ReadVar(name))
    }

    /// Backing declarations, `const _cN = <value>;`, in first-allocation
    /// order. The embedding host places these ahead of the definitions that
    /// reference them.
    pub fn statements(&self) -> Vec<Statement> {
        self.literals
            .values()
            .map(|entry| Statement::DeclareVar {
                name: entry.name.clone(),
                init: Some(entry.value.clone()),
                constant: true,
            })
            .collect()
    }

    /// Number of pooled constants.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Structural key for a poolable value.
///
/// Keys are tagged so distinct shapes never collide: string literals render
/// quoted, variable reads as `var:`, external references as `ext:`.
fn structural_key(expression: &Expression) -> Result<String, PoolError> {
    let mut key = String::new();
    write_key(expression, &mut key)?;
    Ok(key)
}

fn write_key(expression: &Expression, out: &mut String) -> Result<(), PoolError> {
    match expression {
        Expression::Literal(literal) => match literal {
            Literal::Str(value) => out.push_str(&format!("{value:?}")),
            Literal::Int(value) => out.push_str(&value.to_string()),
            Literal::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
            Literal::Null => out.push_str("null"),
        },
        Expression::LiteralArray(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_key(item, out)?;
            }
            out.push(']');
        }
        Expression::External(reference) => {
            out.push_str("ext:");
            out.push_str(reference.module);
            out.push(':');
            out.push_str(reference.name);
        }
        Expression::ReadVar(name) => {
            out.push_str("var:");
            out.push_str(name);
        }
        other => return Err(PoolError::Unkeyable(other.kind_name())),
    }
    Ok(())
}
