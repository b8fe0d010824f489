//! Seqgen Core - sequence generation
//!
//! This crate holds the pure computational core:
//! - `SequenceParameters`: validated user input
//! - `generate_arithmetic_sequence` / `generate_geometric_sequence`: term generators
//! - `SequenceSummary`: sum, last term, average and range
//! - `SeqError` and `Value`: what crosses the boundary to the presentation layer
//!
//! Nothing here renders, logs or keeps state between calls.

mod error;
mod params;
mod sequence;
mod summary;
mod value;

pub use error::{codes, SeqError, Severity};
pub use params::{ParamError, SequenceKind, SequenceParameters, MAX_TERMS};
pub use sequence::{
    arithmetic_term, generate_arithmetic_sequence, generate_geometric_sequence, geometric_term,
    signed_power, Sequence,
};
pub use summary::{
    approx_eq, arithmetic_sum, arithmetic_sum_from_endpoints, closed_form_sum, geometric_sum,
    sum_terms, SequenceSummary, SumCheck, SUM_TOLERANCE,
};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{Sequence, SequenceKind, SequenceParameters, SeqError, Severity, Value};
}

#[cfg(test)]
mod tests {
    use super::*;

    mod error_tests {
        use super::*;

        #[test]
        fn test_non_positive_count_message() {
            let err: SeqError = ParamError::NonPositiveCount(0).into();
            assert_eq!(err.code, codes::INVALID_COUNT);
            assert_eq!(err.message, "Please enter a positive number of terms.");
            assert_eq!(err.field.as_deref(), Some("num_terms"));
            assert_eq!(err.severity, Severity::Warning);
        }

        #[test]
        fn test_too_many_terms_message() {
            let err: SeqError = ParamError::TooManyTerms { got: 5000, max: 1000 }.into();
            assert_eq!(err.code, codes::TOO_MANY_TERMS);
            assert!(err.message.contains("1000"));
        }

        #[test]
        fn test_non_finite_names_field() {
            let err: SeqError = ParamError::NonFinite { field: "step" }.into();
            assert_eq!(err.code, codes::NON_FINITE);
            assert_eq!(err.field.as_deref(), Some("step"));
        }

        #[test]
        fn test_error_display() {
            let err = SeqError::arg_count("arithmetic", 3, 1);
            let shown = err.to_string();
            assert!(shown.starts_with("[ARG_COUNT]"));
            assert!(shown.contains("suggestion"));
        }

        #[test]
        fn test_error_serializes_without_empty_fields() {
            let err = SeqError::domain_error("bad");
            let json = serde_json::to_value(&err).unwrap();
            assert_eq!(json["code"], "DOMAIN_ERROR");
            assert_eq!(json["severity"], "error");
            assert!(json.get("suggestion").is_none());
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_accessors() {
            assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
            assert_eq!(Value::from("x").as_text(), Some("x"));
            assert!(Value::Null.as_number().is_none());
            assert!(Value::from(SeqError::domain_error("x")).is_error());
        }

        #[test]
        fn test_get_field() {
            let mut map = std::collections::BTreeMap::new();
            map.insert("sum".to_string(), Value::Number(45.0));
            let obj = Value::Object(map);
            assert_eq!(obj.get("sum").as_number(), Some(45.0));
            assert!(obj.get("missing").is_error());
            assert!(Value::Number(1.0).get("sum").is_error());
        }

        #[test]
        fn test_list_display() {
            assert_eq!(Value::number_list(&[1.0, 2.5]).to_string(), "[1, 2.5]");
            assert_eq!(Value::number_list(&[0.0; 8]).to_string(), "[8]");
        }
    }
}
