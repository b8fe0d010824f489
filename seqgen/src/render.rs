//! Markdown renderer
//!
//! Renders a generated sequence as a markdown report: formula, parameters,
//! preview, full table, derived values and the worked sum formula.

use crate::export::title_case;
use seqgen_core::{Sequence, SequenceKind, SumCheck, MAX_TERMS};
use seqgen_sequence::formula::{self, format_number, FormulaStyle};
use std::fmt::Write;

/// Terms shown on each side of a long sequence preview
pub const DEFAULT_PREVIEW_TERMS: usize = 25;

/// Report renderer
pub struct Renderer {
    preview_terms: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            preview_terms: DEFAULT_PREVIEW_TERMS,
        }
    }

    /// Terms shown on each side of a long preview, clamped to `1..=MAX_TERMS`
    pub fn with_preview_terms(mut self, preview_terms: usize) -> Self {
        self.preview_terms = preview_terms.clamp(1, MAX_TERMS);
        self
    }

    /// Full report for `seq`
    pub fn render(&self, seq: &Sequence) -> String {
        let p = seq.params();
        let kind = seq.kind();
        let summary = seq.summary();
        let check = SumCheck::of(seq);
        let mut out = String::new();

        let _ = writeln!(out, "# {} Sequence\n", title_case(kind.name()));

        out.push_str("## Formula\n\n");
        let _ = writeln!(
            out,
            "$$\n{}\n$$\n",
            formula::nth_term_formula(kind, p.first_term(), p.step(), FormulaStyle::Latex)
        );

        out.push_str("## Sequence Information\n\n");
        out.push_str("| parameter | value |\n");
        out.push_str("|-----------|-------|\n");
        let _ = writeln!(out, "| First Term (a₁) | {} |", format_number(p.first_term()));
        let _ = writeln!(
            out,
            "| {} ({}) | {} |",
            kind.step_label(),
            kind.step_symbol(),
            format_number(p.step())
        );
        let _ = writeln!(out, "| Number of Terms (n) | {} |", p.term_count());
        out.push('\n');

        out.push_str("## Generated Sequence\n\n");
        out.push_str(&self.render_preview(seq.terms()));
        out.push('\n');

        out.push_str("## Detailed Table\n\n");
        out.push_str("| Term Number (n) | Term Value (aₙ) |\n");
        out.push_str("|-----------------|-----------------|\n");
        for (n, term) in seq.numbered() {
            let _ = writeln!(out, "| {} | {} |", n, format_number(term));
        }
        out.push('\n');

        out.push_str("## Additional Information\n\n");
        out.push_str("| name | value | note |\n");
        out.push_str("|------|-------|------|\n");
        let _ = writeln!(
            out,
            "| Sum of Sequence | {} | Sum of all terms in the sequence |",
            format_number(summary.sum)
        );
        let _ = writeln!(
            out,
            "| Last Term | {} | The {} term of the sequence |",
            format_number(summary.last_term),
            ordinal(summary.count)
        );
        let _ = writeln!(out, "| Average | {} | Sum divided by n |", format_number(summary.average));
        let _ = writeln!(out, "| Range | {} | Last term minus first term |", format_number(summary.range));
        out.push('\n');

        out.push_str("### Sum Formula\n\n");
        let _ = writeln!(out, "$$\n{}\n$$\n", formula::sum_formula(seq, FormulaStyle::Latex));
        if let Some(note) = drift_note(&check) {
            out.push_str(&note);
        }

        out.push_str(&Self::render_about(kind));
        out
    }

    /// All terms when short, otherwise the first and last `preview_terms`
    pub fn render_preview(&self, terms: &[f64]) -> String {
        let join = |slice: &[f64]| {
            slice
                .iter()
                .map(|t| format_number(*t))
                .collect::<Vec<_>>()
                .join(", ")
        };

        if terms.len() <= self.preview_terms.saturating_mul(2) {
            return format!("**Sequence:** {}\n", join(terms));
        }

        let head = &terms[..self.preview_terms];
        let tail = &terms[terms.len() - self.preview_terms..];
        format!(
            "**First {n} terms:** {}\n\n...\n\n**Last {n} terms:** {}\n",
            join(head),
            join(tail),
            n = self.preview_terms
        )
    }

    fn render_about(kind: SequenceKind) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "---\n\n### About {} Sequences\n", title_case(kind.name()));
        match kind {
            SequenceKind::Arithmetic => out.push_str(
                "An arithmetic sequence is a sequence of numbers where each term after the first \
                 is obtained by adding a constant value (common difference) to the previous term.\n\n",
            ),
            SequenceKind::Geometric => out.push_str(
                "A geometric sequence is a sequence of numbers where each term after the first \
                 is obtained by multiplying the previous term by a constant value (common ratio).\n\n",
            ),
        }
        let _ = writeln!(
            out,
            "- **Formula for nth term:** {}",
            formula::general_nth_term(kind, FormulaStyle::Plain)
        );
        let _ = writeln!(
            out,
            "- **Formula for sum:** {}",
            formula::general_sum(kind, FormulaStyle::Plain)
        );
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Note shown when the closed form and direct summation disagree
fn drift_note(check: &SumCheck) -> Option<String> {
    if check.consistent {
        return None;
    }
    Some(format!(
        "> Closed form gives {}; direct summation gives {} (floating-point drift).\n\n",
        format_number(check.closed_form),
        format_number(check.direct)
    ))
}

/// 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 13th, 21st
fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqgen_core::SequenceParameters;

    fn seq(kind: SequenceKind, a: f64, step: f64, n: i64) -> Sequence {
        SequenceParameters::new(a, step, n).unwrap().generate(kind)
    }

    #[test]
    fn test_short_preview_shows_everything() {
        let out = Renderer::new().render_preview(&[0.0, 1.0, 2.0]);
        assert_eq!(out, "**Sequence:** 0, 1, 2\n");
    }

    #[test]
    fn test_long_preview_is_split() {
        let terms: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        let out = Renderer::new().render_preview(&terms);
        assert!(out.starts_with("**First 25 terms:** 1, 2,"));
        assert!(out.contains("25\n\n...\n\n**Last 25 terms:** 36, 37,"));
        assert!(out.ends_with("60\n"));
    }

    #[test]
    fn test_preview_boundary_at_fifty() {
        let terms: Vec<f64> = (1..=50).map(|i| i as f64).collect();
        assert!(Renderer::new().render_preview(&terms).starts_with("**Sequence:**"));
    }

    #[test]
    fn test_report_sections() {
        let report = Renderer::new().render(&seq(SequenceKind::Arithmetic, 0.0, 1.0, 10));
        assert!(report.starts_with("# Arithmetic Sequence\n"));
        assert!(report.contains("a_n = 0 + (n-1) \\times 1"));
        assert!(report.contains("| Common Difference (d) | 1 |"));
        assert!(report.contains("| 10 | 9 |"));
        assert!(report.contains("| Sum of Sequence | 45 |"));
        assert!(report.contains("The 10th term of the sequence"));
        assert!(report.contains("\\frac{10(0 + 9)}{2} = 45"));
        assert!(report.contains("### About Arithmetic Sequences"));
    }

    #[test]
    fn test_geometric_report() {
        let report = Renderer::new().render(&seq(SequenceKind::Geometric, 1.0, 2.0, 5));
        assert!(report.contains("| Common Ratio (r) | 2 |"));
        assert!(report.contains("**Sequence:** 1, 2, 4, 8, 16"));
        assert!(report.contains("The 5th term"));
    }

    #[test]
    fn test_preview_terms_are_clamped() {
        let renderer = Renderer::new().with_preview_terms(usize::MAX);
        assert_eq!(renderer.render_preview(&[1.0, 2.0]), "**Sequence:** 1, 2\n");
        let terms: Vec<f64> = (1..=1000).map(|i| i as f64).collect();
        assert!(renderer.render_preview(&terms).starts_with("**Sequence:** 1, 2,"));
        assert_eq!(Renderer::new().with_preview_terms(0).preview_terms, 1);
    }

    #[test]
    fn test_drift_note() {
        let drifted = SumCheck {
            direct: 1000.0,
            closed_form: 1000.5,
            consistent: false,
        };
        assert_eq!(
            drift_note(&drifted).as_deref(),
            Some("> Closed form gives 1000.5; direct summation gives 1000 (floating-point drift).\n\n")
        );
        let agreed = SumCheck {
            direct: 45.0,
            closed_form: 45.0,
            consistent: true,
        };
        assert_eq!(drift_note(&agreed), None);
    }

    #[test]
    fn test_consistent_report_has_no_drift_note() {
        let report = Renderer::new().render(&seq(SequenceKind::Geometric, 0.1, 1.0, 10));
        assert!(!report.contains("floating-point drift"));
        assert!(report.contains("| Sum of Sequence | 1 |"));
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(112), "112th");
        assert_eq!(ordinal(1000), "1000th");
        assert_eq!(ordinal(21), "21st");
    }
}
