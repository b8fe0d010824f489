//! Seqgen Sequence Plugin
//!
//! Arithmetic and geometric generators, closed-form sums, summaries and
//! formula text. All functions follow the never-panic philosophy and return
//! `Value::Error` on failure.

mod generators;
mod helpers;
mod series;

pub mod formula;

use seqgen_plugin::PluginRegistry;

/// Load sequence functions into registry
pub fn load_sequence_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Generators
        .with_function(generators::Arithmetic)
        .with_function(generators::Geometric)
        .with_function(generators::NthTerm)

        // Series operations
        .with_function(series::SumSeq)
        .with_function(series::SumFormula)
        .with_function(series::Summarize)

        // Formula text
        .with_function(series::NthTermFormula)
}

/// Registry holding every sequence function
pub fn sequence_registry() -> PluginRegistry {
    load_sequence_library(PluginRegistry::new())
}
