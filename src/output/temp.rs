//! Reusable temporary for a generated function's update block.
//!
//! Update statements execute strictly sequentially, so one local slot can be
//! shared by every refreshing query in a function; there is never a second
//! live temporary. The allocator is an explicit one-slot scope object passed by
//! `&mut` into the lowering loop, which keeps the reuse contract visible and
//! independently testable.

use std::sync::Arc;

use super::ast::Statement;

/// Hands out one shared local variable, declaring it on first use.
#[derive(Debug)]
pub struct TemporaryAllocator {
    name: Arc<str>,
    declared: bool,
}

impl TemporaryAllocator {
    /// A fresh allocator whose slot is not yet declared.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            declared: false,
        }
    }

    /// Name of the shared temporary.
    ///
    /// The first call appends `let <name>;` to `statements`; later calls
    /// return the same name without touching the list. Returned names are
    /// clones of one `Arc`, so callers observe a single shared slot rather
    /// than value-equal copies.
    pub fn require(&mut self, statements: &mut Vec<Statement>) -> Arc<str> {
        if !self.declared {
            statements.push(Statement::DeclareVar {
                name: self.name.clone(),
                init: None,
                constant: false,
            });
            self.declared = true;
        }
        self.name.clone()
    }
}
