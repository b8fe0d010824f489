//! Derived values and closed-form sums

use crate::params::SequenceKind;
use crate::sequence::{signed_power, Sequence};
use serde::Serialize;

/// Relative tolerance used when comparing a closed form to direct summation
pub const SUM_TOLERANCE: f64 = 1e-9;

/// Values derived from a sequence, never stored on their own
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceSummary {
    pub count: usize,
    pub sum: f64,
    pub first_term: f64,
    pub last_term: f64,
    pub average: f64,
    /// last term minus first term
    pub range: f64,
}

impl SequenceSummary {
    pub fn of(seq: &Sequence) -> Self {
        let count = seq.len();
        let p = seq.params();
        // Constant geometric sequences sum to exactly n·a
        let sum = if seq.kind() == SequenceKind::Geometric && p.step() == 1.0 {
            count as f64 * p.first_term()
        } else {
            sum_terms(seq.terms())
        };
        let first_term = seq.first_term();
        let last_term = seq.last_term();
        // count >= 1 for every generated sequence
        let average = sum / count.max(1) as f64;
        Self {
            count,
            sum,
            first_term,
            last_term,
            average,
            range: last_term - first_term,
        }
    }
}

/// Left-to-right accumulation
pub fn sum_terms(terms: &[f64]) -> f64 {
    terms.iter().fold(0.0, |acc, t| acc + t)
}

/// S_n = n(a_1 + a_n)/2
pub fn arithmetic_sum_from_endpoints(n: usize, first: f64, last: f64) -> f64 {
    n as f64 * (first + last) / 2.0
}

/// S_n = n(2a_1 + (n-1)d)/2
pub fn arithmetic_sum(first: f64, diff: f64, n: usize) -> f64 {
    let n_f = n as f64;
    n_f * (2.0 * first + (n_f - 1.0) * diff) / 2.0
}

/// S_n = a(1 - r^n)/(1 - r), or n*a when r = 1
pub fn geometric_sum(first: f64, ratio: f64, n: usize) -> f64 {
    if ratio == 1.0 {
        return n as f64 * first;
    }
    first * (1.0 - signed_power(ratio, n)) / (1.0 - ratio)
}

/// Closed form for the sequence's kind
pub fn closed_form_sum(seq: &Sequence) -> f64 {
    let p = seq.params();
    match seq.kind() {
        SequenceKind::Arithmetic => arithmetic_sum(p.first_term(), p.step(), p.term_count()),
        SequenceKind::Geometric => geometric_sum(p.first_term(), p.step(), p.term_count()),
    }
}

/// `a` and `b` agree within `tol`, relative to the larger magnitude
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    within(a, b, a.abs().max(b.abs()), tol)
}

/// `|a - b| <= tol * scale`, exact equality always passing
fn within(a: f64, b: f64, scale: f64, tol: f64) -> bool {
    a == b || (a - b).abs() <= tol * scale
}

/// Sum of absolute term values, which bounds the rounding error of a running sum
fn magnitude(terms: &[f64]) -> f64 {
    terms.iter().fold(0.0, |acc, t| acc + t.abs())
}

/// Direct summation set against the closed form
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SumCheck {
    pub direct: f64,
    pub closed_form: f64,
    pub consistent: bool,
}

impl SumCheck {
    pub fn of(seq: &Sequence) -> Self {
        let direct = sum_terms(seq.terms());
        let closed_form = closed_form_sum(seq);
        // Scaled by term magnitude, not by the possibly cancelled total
        let scale = magnitude(seq.terms()).max(closed_form.abs());
        Self {
            direct,
            closed_form,
            consistent: within(direct, closed_form, scale, SUM_TOLERANCE),
        }
    }
}
