//! Formula text for nth terms and sums
//!
//! Plain text uses Unicode subscripts; LaTeX output is meant for a math
//! renderer on the client side.

use seqgen_core::{Sequence, SequenceKind};

/// Output flavor of a rendered formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaStyle {
    Plain,
    Latex,
}

impl FormulaStyle {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "plain" | "text" => Some(Self::Plain),
            "latex" | "tex" => Some(Self::Latex),
            _ => None,
        }
    }
}

/// Shortest faithful decimal text for a term
///
/// Very large or very small magnitudes switch to scientific notation; -0
/// prints as 0.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    if !n.is_finite() {
        return n.to_string();
    }
    let magnitude = n.abs();
    if magnitude >= 1e16 || magnitude < 1e-6 {
        format!("{:e}", n)
    } else {
        n.to_string()
    }
}

/// Wrap negatives in parentheses when substituted into a product or power
fn grouped(n: f64) -> String {
    let text = format_number(n);
    if n < 0.0 {
        format!("({})", text)
    } else {
        text
    }
}

/// General nth-term formula, without substituted values
pub fn general_nth_term(kind: SequenceKind, style: FormulaStyle) -> &'static str {
    match (kind, style) {
        (SequenceKind::Arithmetic, FormulaStyle::Plain) => "aₙ = a₁ + (n-1)d",
        (SequenceKind::Arithmetic, FormulaStyle::Latex) => "a_n = a_1 + (n-1)d",
        (SequenceKind::Geometric, FormulaStyle::Plain) => "aₙ = a₁ × r^(n-1)",
        (SequenceKind::Geometric, FormulaStyle::Latex) => "a_n = a_1 \\times r^{n-1}",
    }
}

/// General sum formulas, without substituted values
pub fn general_sum(kind: SequenceKind, style: FormulaStyle) -> &'static str {
    match (kind, style) {
        (SequenceKind::Arithmetic, FormulaStyle::Plain) => "Sₙ = n(a₁ + aₙ)/2 = n(2a₁ + (n-1)d)/2",
        (SequenceKind::Arithmetic, FormulaStyle::Latex) => {
            "S_n = \\frac{n(a_1 + a_n)}{2} = \\frac{n(2a_1 + (n-1)d)}{2}"
        }
        (SequenceKind::Geometric, FormulaStyle::Plain) => "Sₙ = a₁(1 - rⁿ)/(1 - r), r ≠ 1; Sₙ = n·a₁, r = 1",
        (SequenceKind::Geometric, FormulaStyle::Latex) => {
            "S_n = a_1 \\frac{1 - r^n}{1 - r} \\ (r \\neq 1), \\quad S_n = n a_1 \\ (r = 1)"
        }
    }
}

/// Nth-term formula with the first term and step substituted
pub fn nth_term_formula(kind: SequenceKind, first: f64, step: f64, style: FormulaStyle) -> String {
    let a = format_number(first);
    let s = grouped(step);
    match (kind, style) {
        (SequenceKind::Arithmetic, FormulaStyle::Plain) => format!("aₙ = {} + (n-1) × {}", a, s),
        (SequenceKind::Arithmetic, FormulaStyle::Latex) => format!("a_n = {} + (n-1) \\times {}", a, s),
        (SequenceKind::Geometric, FormulaStyle::Plain) => format!("aₙ = {} × {}^(n-1)", a, s),
        (SequenceKind::Geometric, FormulaStyle::Latex) => format!("a_n = {} \\times {}^{{n-1}}", a, s),
    }
}

/// Sum formula with this sequence's values substituted, ending in the sum
pub fn sum_formula(seq: &Sequence, style: FormulaStyle) -> String {
    let p = seq.params();
    let summary = seq.summary();
    let n = p.term_count();
    let a1 = format_number(p.first_term());
    let total = format_number(summary.sum);

    match (seq.kind(), style) {
        (SequenceKind::Arithmetic, FormulaStyle::Plain) => format!(
            "Sₙ = n(a₁ + aₙ)/2 = {}({} + {})/2 = {}",
            n,
            a1,
            grouped(summary.last_term),
            total
        ),
        (SequenceKind::Arithmetic, FormulaStyle::Latex) => format!(
            "S_n = \\frac{{n(a_1 + a_n)}}{{2}} = \\frac{{{}({} + {})}}{{2}} = {}",
            n,
            a1,
            grouped(summary.last_term),
            total
        ),
        (SequenceKind::Geometric, style) if p.step() == 1.0 => match style {
            FormulaStyle::Plain => format!("Sₙ = n·a₁ = {} × {} = {}", n, grouped(p.first_term()), total),
            FormulaStyle::Latex => {
                format!("S_n = n a_1 = {} \\times {} = {}", n, grouped(p.first_term()), total)
            }
        },
        (SequenceKind::Geometric, FormulaStyle::Plain) => {
            let r = grouped(p.step());
            format!("Sₙ = a₁(1 - rⁿ)/(1 - r) = {}(1 - {}^{})/(1 - {}) = {}", a1, r, n, r, total)
        }
        (SequenceKind::Geometric, FormulaStyle::Latex) => {
            let r = grouped(p.step());
            format!(
                "S_n = a_1 \\frac{{1 - r^n}}{{1 - r}} = {} \\cdot \\frac{{1 - {}^{{{}}}}}{{1 - {}}} = {}",
                a1, r, n, r, total
            )
        }
    }
}
