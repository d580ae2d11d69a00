//! # trellis-codegen
//!
//! Compile-time lowering of query declarations into the runtime instruction
//! calls of synthesized definition functions.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! query    → query lowering (flags, predicates, create calls, synthesis)
//!   ↓
//! runtime  → runtime ABI (instruction identities, render-flag gates)
//!   ↓
//! pool     → constant pool (structural dedup of shared literals)
//!   ↓
//! output   → output AST, deterministic printer, temporary allocation
//! ```

// ============================================================================
// MODULES (dependency order: output → pool → runtime → query)
// ============================================================================

/// Output AST: expression/statement nodes, printer, temporary allocation
pub mod output;

/// Constant pool: structural dedup of shared literal constants
pub mod pool;

/// Runtime ABI: instruction identities, render flags, parameter names
pub mod runtime;

/// Query lowering: descriptors, flag encoding, definition synthesis
pub mod query;

// Re-export the lowering entry points
pub use query::{
    lower_content_queries, lower_view_queries, ForwardRefHandling, QueryDescriptor,
    QueryPredicate,
};

// Re-export the shared-constant store every entry point threads through
pub use pool::{ConstantPool, PoolError};
