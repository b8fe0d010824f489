//! Validated sequence parameters

use crate::sequence::{
    arithmetic_term, generate_arithmetic_sequence, generate_geometric_sequence, geometric_term,
    Sequence,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the number of terms a caller may request
pub const MAX_TERMS: usize = 1000;

/// Error type for parameter validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("Number of terms must be positive, got {0}")]
    NonPositiveCount(i64),

    #[error("Number of terms limited to {max}, got {got}")]
    TooManyTerms { got: i64, max: usize },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Which recurrence the step value drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequenceKind {
    /// a_n = a_1 + (n-1)d
    Arithmetic,
    /// a_n = a_1 × r^(n-1)
    Geometric,
}

impl SequenceKind {
    /// Parse a kind name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "arithmetic" | "arith" | "linear" => Some(Self::Arithmetic),
            "geometric" | "geom" | "exponential" => Some(Self::Geometric),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Arithmetic => "arithmetic",
            Self::Geometric => "geometric",
        }
    }

    /// Display label of the step value
    pub fn step_label(&self) -> &'static str {
        match self {
            Self::Arithmetic => "Common Difference",
            Self::Geometric => "Common Ratio",
        }
    }

    /// Conventional symbol of the step value
    pub fn step_symbol(&self) -> &'static str {
        match self {
            Self::Arithmetic => "d",
            Self::Geometric => "r",
        }
    }

    /// Term at 0-based `index`, computed directly
    pub fn term(&self, first_term: f64, step: f64, index: usize) -> f64 {
        match self {
            Self::Arithmetic => arithmetic_term(first_term, step, index),
            Self::Geometric => geometric_term(first_term, step, index),
        }
    }

    /// Field name of the step value in exported data
    pub fn step_field(&self) -> &'static str {
        match self {
            Self::Arithmetic => "common_difference",
            Self::Geometric => "common_ratio",
        }
    }
}

impl std::fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// User input, checked once at the boundary
///
/// Holding a `SequenceParameters` guarantees a finite first term, a finite
/// step and `1 <= term_count <= MAX_TERMS`, so the generators it feeds are
/// total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SequenceParameters {
    first_term: f64,
    step: f64,
    term_count: usize,
}

impl SequenceParameters {
    pub fn new(first_term: f64, step: f64, term_count: i64) -> Result<Self, ParamError> {
        Self::with_limit(first_term, step, term_count, MAX_TERMS)
    }

    /// Validate against a caller-chosen limit, itself capped at `MAX_TERMS`
    pub fn with_limit(
        first_term: f64,
        step: f64,
        term_count: i64,
        limit: usize,
    ) -> Result<Self, ParamError> {
        if !first_term.is_finite() {
            return Err(ParamError::NonFinite { field: "first_term" });
        }
        if !step.is_finite() {
            return Err(ParamError::NonFinite { field: "step" });
        }
        if term_count < 1 {
            return Err(ParamError::NonPositiveCount(term_count));
        }
        let max = limit.clamp(1, MAX_TERMS);
        if term_count as u64 > max as u64 {
            return Err(ParamError::TooManyTerms { got: term_count, max });
        }
        Ok(Self {
            first_term,
            step,
            term_count: term_count as usize,
        })
    }

    pub fn first_term(&self) -> f64 {
        self.first_term
    }

    /// Common difference or common ratio, depending on the kind
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn term_count(&self) -> usize {
        self.term_count
    }

    /// Run the generator for `kind`
    pub fn generate(&self, kind: SequenceKind) -> Sequence {
        let terms = match kind {
            SequenceKind::Arithmetic => {
                generate_arithmetic_sequence(self.first_term, self.step, self.term_count)
            }
            SequenceKind::Geometric => {
                generate_geometric_sequence(self.first_term, self.step, self.term_count)
            }
        };
        Sequence::from_parts(kind, *self, terms)
    }
}
