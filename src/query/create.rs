//! Create-call assembly.
//!
//! Builds the single creation-phase instruction call for one descriptor.
//! Argument order is runtime ABI: prepended arguments, then the signal
//! property read when applicable, then predicate, flags, and the optional
//! read override.

use crate::output::{external, int_lit, variable, Expression, ExternalRef};
use crate::pool::{ConstantPool, PoolError};
use crate::runtime::CONTEXT_VAR;

use super::descriptor::QueryDescriptor;
use super::flags;

/// Instruction pair one synthesizer selects between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryCreateIds {
    /// Instruction for signal-based descriptors.
    pub signal_based: ExternalRef,
    /// Instruction for everything else.
    pub non_signal: ExternalRef,
}

/// Assemble the creation-phase call for `query`.
///
/// `prepend` carries caller-scoped leading arguments (the host directive
/// index for content queries, nothing for view queries).
pub fn create_query_call(
    query: &QueryDescriptor,
    pool: &mut ConstantPool,
    ids: QueryCreateIds,
    prepend: &[Expression],
) -> Result<Expression, PoolError> {
    let mut args = prepend.to_vec();
    if query.is_signal {
        args.push(variable(CONTEXT_VAR).prop(query.property_name.clone()));
    }
    args.push(super::predicate::resolve_predicate(&query.predicate, pool)?);
    args.push(int_lit(i64::from(flags::encode(query))));
    if let Some(read) = &query.read {
        args.push(read.clone());
    }

    let target = if query.is_signal {
        ids.signal_based
    } else {
        ids.non_signal
    };
    Ok(external(target).call(args))
}
