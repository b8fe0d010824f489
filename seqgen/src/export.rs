//! Downloadable renditions of a generated sequence

use seqgen_core::{SeqError, Sequence, SequenceSummary};
use seqgen_sequence::formula::{self, format_number, FormulaStyle};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// File format of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// Export content plus the file name a client should offer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// Render `seq` in `format`
pub fn export(seq: &Sequence, format: ExportFormat) -> Result<Export, SeqError> {
    let content = match format {
        ExportFormat::Text => to_text(seq),
        ExportFormat::Csv => to_csv(seq),
        ExportFormat::Json => to_json(seq)?,
    };
    Ok(Export {
        format,
        file_name: format!("{}_sequence.{}", seq.kind().name(), format.extension()),
        mime_type: format.mime_type(),
        content,
    })
}

/// Header block followed by one `a_n = value` line per term
pub fn to_text(seq: &Sequence) -> String {
    let p = seq.params();
    let kind = seq.kind();
    let summary = seq.summary();
    let mut out = String::new();

    let _ = writeln!(out, "{} Sequence", title_case(kind.name()));
    let _ = writeln!(out, "First Term (a₁): {}", format_number(p.first_term()));
    let _ = writeln!(
        out,
        "{} ({}): {}",
        kind.step_label(),
        kind.step_symbol(),
        format_number(p.step())
    );
    let _ = writeln!(out, "Number of Terms (n): {}", p.term_count());
    let _ = writeln!(
        out,
        "Formula: {}",
        formula::nth_term_formula(kind, p.first_term(), p.step(), FormulaStyle::Plain)
    );
    out.push('\n');
    out.push_str("Sequence:\n");
    for (n, term) in seq.numbered() {
        let _ = writeln!(out, "a_{} = {}", n, format_number(term));
    }
    out.push('\n');
    let _ = writeln!(out, "Sum: {}", format_number(summary.sum));
    let _ = writeln!(out, "Last Term: {}", format_number(summary.last_term));
    let _ = writeln!(out, "Average: {}", format_number(summary.average));
    let _ = writeln!(out, "Range: {}", format_number(summary.range));
    out
}

/// `n,a_n` header then one row per term
pub fn to_csv(seq: &Sequence) -> String {
    let mut out = String::from("n,a_n\n");
    for (n, term) in seq.numbered() {
        let _ = writeln!(out, "{},{}", n, format_number(term));
    }
    out
}

#[derive(Serialize)]
struct JsonExport<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    first_term: f64,
    /// `common_difference` or `common_ratio`
    #[serde(flatten)]
    step: BTreeMap<&'static str, f64>,
    num_terms: usize,
    formula: String,
    sequence: &'a [f64],
    summary: SequenceSummary,
}

/// Parameters, terms and summary as pretty-printed JSON
pub fn to_json(seq: &Sequence) -> Result<String, SeqError> {
    let p = seq.params();
    let kind = seq.kind();
    let doc = JsonExport {
        kind: kind.name(),
        first_term: p.first_term(),
        step: BTreeMap::from([(kind.step_field(), p.step())]),
        num_terms: p.term_count(),
        formula: formula::nth_term_formula(kind, p.first_term(), p.step(), FormulaStyle::Plain),
        sequence: seq.terms(),
        summary: seq.summary(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| SeqError::internal(e.to_string()))
}

pub(crate) fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
