//! Runtime ABI surface.
//!
//! The generated code calls into a fixed table of runtime instructions, all
//! imported from one module. This module is the single authority for those
//! import identities and for the well-known parameter names of synthesized
//! definitions, so the rest of the crate never spells a runtime name twice.

use crate::output::{int_lit, variable, ExternalRef, Statement};

/// Module specifier every runtime instruction is imported from.
pub const RUNTIME_MODULE: &str = "@trellis/runtime";

/// First parameter of a synthesized definition: the phase selector.
pub const RENDER_FLAGS_VAR: &str = "rf";

/// Second parameter: the component or directive instance.
pub const CONTEXT_VAR: &str = "ctx";

/// Third parameter of content-scoped definitions: the host directive index.
pub const DIR_INDEX_VAR: &str = "dirIndex";

/// Import identities of the runtime instructions the lowering emits.
pub struct Identifiers;

impl Identifiers {
    pub const VIEW_QUERY: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "viewQuery",
    };
    pub const VIEW_QUERY_SIGNAL: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "viewQuerySignal",
    };
    pub const CONTENT_QUERY: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "contentQuery",
    };
    pub const CONTENT_QUERY_SIGNAL: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "contentQuerySignal",
    };
    pub const LOAD_QUERY: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "loadQuery",
    };
    pub const QUERY_REFRESH: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "queryRefresh",
    };
    pub const QUERY_ADVANCE: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "queryAdvance",
    };
    pub const RESOLVE_FORWARD_REF: ExternalRef = ExternalRef {
        module: RUNTIME_MODULE,
        name: "resolveForwardRef",
    };
}

/// Execution phases of a synthesized definition.
///
/// The runtime invokes each definition once per phase and selects the active
/// phase through the `rf` parameter, one bit per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RenderFlags {
    /// Instantiation work, runs once.
    Create = 0b01,
    /// Per-change-detection work, runs repeatedly.
    Update = 0b10,
}

impl RenderFlags {
    pub fn bit(self) -> u32 {
        self as u32
    }
}

/// Gate `statements` behind a phase check: `if (rf & <phase>) { … }`.
///
/// The guard is a bitwise test, not equality, so a combined-phase invocation
/// enters both gates.
pub fn render_flag_check(flags: RenderFlags, statements: Vec<Statement>) -> Statement {
    Statement::If {
        condition: variable(RENDER_FLAGS_VAR).bit_and(int_lit(i64::from(flags.bit()))),
        then_body: statements,
    }
}
