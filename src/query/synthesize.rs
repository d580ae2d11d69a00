//! Definition synthesis.
//!
//! Lowers an owner's query descriptors into one synthesized function with
//! exactly two phase-gated blocks: every creation-phase instruction first,
//! every update-phase statement second, both lists in descriptor order.
//! View and content scope differ only in instruction pair, parameter list,
//! prepended arguments, and name suffix; the shared builder carries the rest.

use std::sync::Arc;

use crate::output::{
    assign_prop, assign_var, external, fn_expr, variable, Expression, Statement,
    TemporaryAllocator,
};
use crate::pool::{ConstantPool, PoolError};
use crate::runtime::{
    render_flag_check, Identifiers, RenderFlags, CONTEXT_VAR, DIR_INDEX_VAR, RENDER_FLAGS_VAR,
};

use super::create::{create_query_call, QueryCreateIds};
use super::descriptor::QueryDescriptor;

/// Reusable update-phase temporary holding the refreshed result.
const TEMPORARY_NAME: &str = "_t";

/// Accumulates both phase blocks across an owner's descriptors.
struct QueryFnBuilder {
    create_statements: Vec<Statement>,
    update_statements: Vec<Statement>,
    temps: TemporaryAllocator,
}

impl QueryFnBuilder {
    fn new() -> Self {
        Self {
            create_statements: Vec::new(),
            update_statements: Vec::new(),
            temps: TemporaryAllocator::new(TEMPORARY_NAME),
        }
    }

    /// Append one descriptor's contribution to both phases.
    fn lower(
        &mut self,
        query: &QueryDescriptor,
        pool: &mut ConstantPool,
        ids: QueryCreateIds,
        prepend: &[Expression],
    ) -> Result<(), PoolError> {
        let create = create_query_call(query, pool, ids, prepend)?;
        self.create_statements.push(create.into_stmt());

        if query.is_signal {
            // The runtime writes signal results through the bound property;
            // the update phase only advances the query cursor.
            tracing::trace!(
                "[QUERY] `{}` is signal-based, advancing only",
                query.property_name
            );
            self.update_statements
                .push(external(Identifiers::QUERY_ADVANCE).call(Vec::new()).into_stmt());
            return Ok(());
        }

        let temp = self.temps.require(&mut self.update_statements);
        let load = external(Identifiers::LOAD_QUERY).call(Vec::new());
        let refresh =
            external(Identifiers::QUERY_REFRESH).call(vec![assign_var(temp.clone(), load)]);
        let result = if query.first {
            variable(temp).prop("first")
        } else {
            Expression::ReadVar(temp)
        };
        let write = assign_prop(variable(CONTEXT_VAR), query.property_name.clone(), result);
        self.update_statements.push(refresh.and(write).into_stmt());
        Ok(())
    }

    /// Wrap the accumulated blocks in their phase gates and close the
    /// function. Both gates are always present, empty or not, so the
    /// definition's shape never depends on its query mix.
    fn into_function(self, name: Option<Arc<str>>, params: Vec<Arc<str>>) -> Expression {
        let body = vec![
            render_flag_check(RenderFlags::Create, self.create_statements),
            render_flag_check(RenderFlags::Update, self.update_statements),
        ];
        fn_expr(name, params, body)
    }
}

/// Synthesize the view-scoped query definition for one owner.
///
/// `name` is the owner identifier; the function is named `{owner}_Query`,
/// or left anonymous when the owner is itself anonymous.
pub fn lower_view_queries(
    queries: &[QueryDescriptor],
    pool: &mut ConstantPool,
    name: Option<&str>,
) -> Result<Expression, PoolError> {
    tracing::debug!(
        "[QUERY] lowering {} view queries for {:?}",
        queries.len(),
        name
    );
    let ids = QueryCreateIds {
        signal_based: Identifiers::VIEW_QUERY_SIGNAL,
        non_signal: Identifiers::VIEW_QUERY,
    };

    let mut builder = QueryFnBuilder::new();
    for query in queries {
        builder.lower(query, pool, ids, &[])?;
    }

    let fn_name = name.map(|owner| format!("{owner}_Query").into());
    let params = vec![Arc::from(RENDER_FLAGS_VAR), Arc::from(CONTEXT_VAR)];
    Ok(builder.into_function(fn_name, params))
}

/// Synthesize the content-scoped query definition for one owner.
///
/// Content instructions are registered against a host directive, so every
/// create call leads with the `dirIndex` parameter and the definition takes
/// it as a third parameter.
pub fn lower_content_queries(
    queries: &[QueryDescriptor],
    pool: &mut ConstantPool,
    name: Option<&str>,
) -> Result<Expression, PoolError> {
    tracing::debug!(
        "[QUERY] lowering {} content queries for {:?}",
        queries.len(),
        name
    );
    let ids = QueryCreateIds {
        signal_based: Identifiers::CONTENT_QUERY_SIGNAL,
        non_signal: Identifiers::CONTENT_QUERY,
    };
    let prepend = [variable(DIR_INDEX_VAR)];

    let mut builder = QueryFnBuilder::new();
    for query in queries {
        builder.lower(query, pool, ids, &prepend)?;
    }

    let fn_name = name.map(|owner| format!("{owner}_ContentQueries").into());
    let params = vec![
        Arc::from(RENDER_FLAGS_VAR),
        Arc::from(CONTEXT_VAR),
        Arc::from(DIR_INDEX_VAR),
    ];
    Ok(builder.into_function(fn_name, params))
}
