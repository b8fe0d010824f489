//! Arithmetic and geometric term generation
//!
//! Both generators are pure: same arguments, same terms. A count of zero is
//! a caller precondition violation and yields an empty vector.

use crate::params::{SequenceKind, SequenceParameters};
use crate::summary::SequenceSummary;
use serde::Serialize;

/// Terms `a + i*d` for `i` in `0..num_terms`
pub fn generate_arithmetic_sequence(
    first_term: f64,
    common_difference: f64,
    num_terms: usize,
) -> Vec<f64> {
    (0..num_terms)
        .map(|i| arithmetic_term(first_term, common_difference, i))
        .collect()
}

/// Terms `a * r^i` for `i` in `0..num_terms`
pub fn generate_geometric_sequence(first_term: f64, common_ratio: f64, num_terms: usize) -> Vec<f64> {
    (0..num_terms)
        .map(|i| geometric_term(first_term, common_ratio, i))
        .collect()
}

/// Term at 0-based `index` of an arithmetic sequence
pub fn arithmetic_term(first_term: f64, common_difference: f64, index: usize) -> f64 {
    first_term + (index as f64) * common_difference
}

/// Term at 0-based `index` of a geometric sequence
pub fn geometric_term(first_term: f64, common_ratio: f64, index: usize) -> f64 {
    first_term * signed_power(common_ratio, index)
}

/// `base^exponent` with 0^0 = 1 fixed here rather than delegated to `powi`.
///
/// Negative bases keep their sign through integer exponentiation.
pub fn signed_power(base: f64, exponent: usize) -> f64 {
    if exponent == 0 {
        return 1.0;
    }
    match i32::try_from(exponent) {
        Ok(e) => base.powi(e),
        Err(_) => base.powf(exponent as f64),
    }
}

/// A generated sequence, immutable once built
///
/// Only `SequenceParameters::generate` constructs one, so there is always at
/// least one term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sequence {
    kind: SequenceKind,
    params: SequenceParameters,
    terms: Vec<f64>,
}

impl Sequence {
    pub(crate) fn from_parts(kind: SequenceKind, params: SequenceParameters, terms: Vec<f64>) -> Self {
        Self { kind, params, terms }
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn params(&self) -> &SequenceParameters {
        &self.params
    }

    pub fn terms(&self) -> &[f64] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Always false for a generated sequence
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Term `n`, 1-based
    pub fn term(&self, n: usize) -> Option<f64> {
        n.checked_sub(1).and_then(|i| self.terms.get(i)).copied()
    }

    pub fn first_term(&self) -> f64 {
        self.terms.first().copied().unwrap_or(self.params.first_term())
    }

    pub fn last_term(&self) -> f64 {
        self.terms.last().copied().unwrap_or(self.params.first_term())
    }

    /// `(n, a_n)` pairs, 1-based; also the series a chart plots
    pub fn numbered(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.terms.iter().enumerate().map(|(i, t)| (i + 1, *t))
    }

    pub fn summary(&self) -> SequenceSummary {
        SequenceSummary::of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(a: f64, step: f64, n: i64) -> SequenceParameters {
        SequenceParameters::new(a, step, n).unwrap()
    }

    #[test]
    fn test_arithmetic_example() {
        assert_eq!(
            generate_arithmetic_sequence(0.0, 1.0, 10),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn test_arithmetic_term_identity() {
        let (a, d, n) = (2.5, -0.75, 200);
        let seq = generate_arithmetic_sequence(a, d, n);
        assert_eq!(seq.len(), n);
        for (i, term) in seq.iter().enumerate() {
            assert_eq!(*term, a + (i as f64) * d);
        }
    }

    #[test]
    fn test_geometric_examples() {
        assert_eq!(generate_geometric_sequence(1.0, 2.0, 5), vec![1.0, 2.0, 4.0, 8.0, 16.0]);
        assert_eq!(generate_geometric_sequence(5.0, 1.0, 4), vec![5.0, 5.0, 5.0, 5.0]);
        assert_eq!(generate_geometric_sequence(2.0, -1.0, 4), vec![2.0, -2.0, 2.0, -2.0]);
    }

    #[test]
    fn test_geometric_term_identity() {
        let (a, r, n) = (3.0, 1.5, 40);
        let seq = generate_geometric_sequence(a, r, n);
        for (i, term) in seq.iter().enumerate() {
            assert_eq!(*term, a * r.powi(i as i32));
        }
    }

    #[test]
    fn test_geometric_zero_ratio() {
        assert_eq!(generate_geometric_sequence(7.0, 0.0, 4), vec![7.0, 0.0, 0.0, 0.0]);
        assert_eq!(signed_power(0.0, 0), 1.0);
        assert_eq!(signed_power(0.0, 1), 0.0);
    }

    #[test]
    fn test_geometric_negative_ratio_keeps_sign() {
        let seq = generate_geometric_sequence(1.0, -3.0, 5);
        assert_eq!(seq, vec![1.0, -3.0, 9.0, -27.0, 81.0]);
    }

    #[test]
    fn test_single_term() {
        assert_eq!(generate_arithmetic_sequence(4.2, 9.0, 1), vec![4.2]);
        assert_eq!(generate_geometric_sequence(4.2, 9.0, 1), vec![4.2]);
    }

    #[test]
    fn test_zero_count_is_empty() {
        assert!(generate_arithmetic_sequence(1.0, 1.0, 0).is_empty());
        assert!(generate_geometric_sequence(1.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let p = params(1.1, 0.3, 500);
        assert_eq!(p.generate(SequenceKind::Arithmetic), p.generate(SequenceKind::Arithmetic));
        assert_eq!(p.generate(SequenceKind::Geometric), p.generate(SequenceKind::Geometric));
    }

    #[test]
    fn test_sequence_accessors() {
        let seq = params(0.0, 1.0, 10).generate(SequenceKind::Arithmetic);
        assert_eq!(seq.len(), 10);
        assert_eq!(seq.term(1), Some(0.0));
        assert_eq!(seq.term(10), Some(9.0));
        assert_eq!(seq.term(0), None);
        assert_eq!(seq.term(11), None);
        assert_eq!(seq.last_term(), 9.0);
        let numbered: Vec<_> = seq.numbered().take(2).collect();
        assert_eq!(numbered, vec![(1, 0.0), (2, 1.0)]);
    }
}
