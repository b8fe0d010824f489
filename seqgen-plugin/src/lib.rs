//! Seqgen Plugin System
//!
//! Function plugins expose the core generators to any caller through a
//! uniform `Value`-in, `Value`-out boundary with self-describing metadata.

mod context;
mod registry;
mod traits;

pub use context::EvalContext;
pub use registry::PluginRegistry;
pub use traits::{ArgMeta, FunctionMeta, FunctionPlugin};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry};
    pub use seqgen_core::prelude::*;
}
