//! Evaluation Context

use crate::PluginRegistry;
use seqgen_core::MAX_TERMS;
use std::sync::Arc;

/// Evaluation context passed to plugins
#[derive(Clone)]
pub struct EvalContext {
    /// Largest term count a generator may produce in this context
    pub max_terms: usize,
    pub registry: Arc<PluginRegistry>,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            max_terms: MAX_TERMS,
            registry,
        }
    }

    /// Lower the term cap; values above `MAX_TERMS` are clamped
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms.clamp(1, MAX_TERMS);
        self
    }
}
