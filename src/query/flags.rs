//! Behavioral flag encoding.
//!
//! Four descriptor booleans collapse into one bitmask literal so the create
//! instruction takes a single numeric argument. Bit values are runtime ABI;
//! they never change between releases.

use super::descriptor::QueryDescriptor;

pub const NONE: u32 = 0;
/// Search the whole subtree.
pub const DESCENDANTS: u32 = 1 << 0;
/// Resolve before change detection first runs.
pub const STATIC: u32 = 1 << 1;
/// Only report identity-changed result lists.
pub const EMIT_DISTINCT_CHANGES_ONLY: u32 = 1 << 2;

/// Fold the descriptor's behavioral booleans into the wire bitmask.
///
/// `first` and `is_signal` are not encoded here; they steer instruction
/// selection and update-statement shape instead.
pub fn encode(query: &QueryDescriptor) -> u32 {
    let mut flags = NONE;
    if query.descendants {
        flags |= DESCENDANTS;
    }
    if query.is_static {
        flags |= STATIC;
    }
    if query.emit_distinct_changes_only {
        flags |= EMIT_DISTINCT_CHANGES_ONLY;
    }
    flags
}
