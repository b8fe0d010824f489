//! Seqgen - arithmetic and geometric sequences, rendered
//!
//! The engine validates a request, calls the pure generators in
//! `seqgen-core` and hands the result to the markdown renderer or an
//! exporter. Nothing computed here outlives the call.

mod export;
mod render;

pub use export::{export, to_csv, to_json, to_text, Export, ExportFormat};
pub use render::{Renderer, DEFAULT_PREVIEW_TERMS};

use seqgen_core::{
    SeqError, Sequence, SequenceKind, SequenceParameters, SequenceSummary, SumCheck, Value,
    MAX_TERMS,
};
use seqgen_plugin::{EvalContext, PluginRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a caller asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub kind: SequenceKind,
    pub first_term: f64,
    /// Common difference or common ratio
    pub step: f64,
    pub num_terms: i64,
}

/// A generated sequence with its derived values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated {
    pub sequence: Sequence,
    pub summary: SequenceSummary,
    pub check: SumCheck,
}

/// Main engine
pub struct Seqgen {
    registry: Arc<PluginRegistry>,
    max_terms: usize,
    renderer: Renderer,
}

impl Seqgen {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            max_terms: MAX_TERMS,
            renderer: Renderer::new(),
        }
    }

    pub fn with_sequence_library() -> Self {
        Self::new(seqgen_sequence::sequence_registry())
    }

    /// Lower the term cap; never above `MAX_TERMS`
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms.clamp(1, MAX_TERMS);
        self
    }

    pub fn with_preview_terms(mut self, preview_terms: usize) -> Self {
        self.renderer = Renderer::new().with_preview_terms(preview_terms);
        self
    }

    pub fn max_terms(&self) -> usize {
        self.max_terms
    }

    /// Validate and generate
    pub fn generate(&self, req: &GenerateRequest) -> Result<Generated, SeqError> {
        let params =
            SequenceParameters::with_limit(req.first_term, req.step, req.num_terms, self.max_terms)?;
        let sequence = params.generate(req.kind);
        let summary = sequence.summary();
        let check = SumCheck::of(&sequence);
        Ok(Generated {
            sequence,
            summary,
            check,
        })
    }

    /// Markdown report for a request
    pub fn report(&self, req: &GenerateRequest) -> Result<String, SeqError> {
        Ok(self.render(&self.generate(req)?))
    }

    /// Markdown report for an already generated sequence
    pub fn render(&self, generated: &Generated) -> String {
        self.renderer.render(&generated.sequence)
    }

    /// Downloadable file for a request
    pub fn export(&self, req: &GenerateRequest, format: ExportFormat) -> Result<Export, SeqError> {
        self.export_generated(&self.generate(req)?, format)
    }

    /// Downloadable file for an already generated sequence
    pub fn export_generated(&self, generated: &Generated, format: ExportFormat) -> Result<Export, SeqError> {
        export::export(&generated.sequence, format)
    }

    /// Invoke a registered function by name
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        let ctx = EvalContext::new(self.registry.clone()).with_max_terms(self.max_terms);
        self.registry.call_function(name, args, &ctx)
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Seqgen {
    fn default() -> Self {
        Self::with_sequence_library()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqgen_core::codes;

    fn request(kind: SequenceKind, first_term: f64, step: f64, num_terms: i64) -> GenerateRequest {
        GenerateRequest {
            kind,
            first_term,
            step,
            num_terms,
        }
    }

    #[test]
    fn test_generate_arithmetic() {
        let out = Seqgen::default()
            .generate(&request(SequenceKind::Arithmetic, 0.0, 1.0, 10))
            .unwrap();
        assert_eq!(out.sequence.terms(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(out.summary.sum, 45.0);
        assert_eq!(out.summary.last_term, 9.0);
        assert!(out.check.consistent);
    }

    #[test]
    fn test_generate_rejects_bad_count() {
        let err = Seqgen::default()
            .generate(&request(SequenceKind::Geometric, 1.0, 2.0, 0))
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_COUNT);
        assert_eq!(err.message, "Please enter a positive number of terms.");
    }

    #[test]
    fn test_engine_cap_applies_to_generate_and_call() {
        let engine = Seqgen::default().with_max_terms(5);
        assert!(engine.generate(&request(SequenceKind::Arithmetic, 0.0, 1.0, 6)).is_err());
        let out = engine.call(
            "arithmetic",
            &[Value::Number(0.0), Value::Number(1.0), Value::Number(6.0)],
        );
        assert_eq!(out.as_error().map(|e| e.code.as_str()), Some(codes::TOO_MANY_TERMS));
    }

    #[test]
    fn test_report_and_export() {
        let engine = Seqgen::default();
        let req = request(SequenceKind::Geometric, 5.0, 1.0, 4);
        let report = engine.report(&req).unwrap();
        assert!(report.contains("| Sum of Sequence | 20 |"));
        let csv = engine.export(&req, ExportFormat::Csv).unwrap();
        assert_eq!(csv.content, "n,a_n\n1,5\n2,5\n3,5\n4,5\n");
    }

    #[test]
    fn test_render_and_export_reuse_generated() {
        let engine = Seqgen::default();
        let req = request(SequenceKind::Geometric, 0.1, 1.0, 10);
        let generated = engine.generate(&req).unwrap();
        assert_eq!(generated.summary.sum, 1.0);
        assert_eq!(engine.render(&generated), engine.report(&req).unwrap());
        assert_eq!(
            engine.export_generated(&generated, ExportFormat::Text).unwrap(),
            engine.export(&req, ExportFormat::Text).unwrap()
        );
    }

    #[test]
    fn test_request_deserializes_lowercase_kind() {
        let req: GenerateRequest = serde_json::from_str(
            r#"{"kind": "geometric", "first_term": 2, "step": -1, "num_terms": 4}"#,
        )
        .unwrap();
        let out = Seqgen::default().generate(&req).unwrap();
        assert_eq!(out.sequence.terms(), &[2.0, -2.0, 2.0, -2.0]);
        assert_eq!(out.summary.sum, 0.0);
    }

    #[test]
    fn test_help_and_listing() {
        let engine = Seqgen::default();
        assert_eq!(engine.help(Some("geometric")).get("name").as_text(), Some("geometric"));
        let generators = engine.list_functions(Some("sequence/generators"));
        assert_eq!(generators.as_list().map(|l| l.len()), Some(3));
    }
}
