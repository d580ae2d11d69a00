//! Query lowering.
//!
//! Compiles query declarations into the runtime instruction calls of a
//! synthesized per-owner definition. Submodules in dependency order:
//!
//! ```text
//! descriptor      input model (QueryDescriptor, QueryPredicate)
//!     |
//! flags           behavioral booleans -> wire bitmask
//!     |
//! predicate       selector pooling / forward-ref unwrapping
//!     |
//! create          creation-phase instruction call assembly
//!     |
//! synthesize      per-owner definition functions (view / content)
//! ```

mod create;
mod descriptor;
mod predicate;
mod synthesize;

pub mod flags;

pub use create::{create_query_call, QueryCreateIds};
pub use descriptor::{ForwardRefHandling, QueryDescriptor, QueryPredicate};
pub use predicate::resolve_predicate;
pub use synthesize::{lower_content_queries, lower_view_queries};
