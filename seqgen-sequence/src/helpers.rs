//! Helper functions for extracting plugin inputs

use seqgen_core::{SeqError, SequenceKind, SequenceParameters, SequenceSummary, SumCheck, Value};
use seqgen_plugin::EvalContext;
use std::collections::BTreeMap;

/// Extract a list of numbers from a single argument
pub fn extract_list(arg: &Value) -> Result<Vec<f64>, SeqError> {
    match arg {
        Value::List(list) => {
            let mut numbers = Vec::with_capacity(list.len());
            for item in list {
                match item {
                    Value::Number(n) => numbers.push(*n),
                    Value::Error(e) => return Err(e.clone()),
                    other => return Err(SeqError::type_error("Number", other.type_name())),
                }
            }
            Ok(numbers)
        }
        Value::Error(e) => Err(e.clone()),
        other => Err(SeqError::type_error("List", other.type_name())),
    }
}

/// Extract a single number from argument
pub fn extract_number(arg: &Value, func: &str, name: &str) -> Result<f64, SeqError> {
    match arg {
        Value::Number(n) => Ok(*n),
        Value::Error(e) => Err(e.clone()),
        other => Err(SeqError::arg_type(func, name, "Number", other.type_name())),
    }
}

/// Extract a whole-number count; range checks happen in `SequenceParameters`
pub fn extract_count(arg: &Value, func: &str, name: &str) -> Result<i64, SeqError> {
    let n = extract_number(arg, func, name)?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(SeqError::domain_error(format!(
            "{}() requires a whole number for {}",
            func, name
        ))
        .with_field(name));
    }
    Ok(n as i64)
}

/// Extract a sequence kind from a text argument
pub fn extract_kind(arg: &Value, func: &str) -> Result<SequenceKind, SeqError> {
    match arg {
        Value::Text(s) => SequenceKind::parse(s).ok_or_else(|| SeqError::unknown_kind(s)),
        Value::Error(e) => Err(e.clone()),
        other => Err(SeqError::arg_type(func, "kind", "Text", other.type_name())),
    }
}

/// Validate `(first, step, count)` under the context's term cap
pub fn extract_params(
    first: &Value,
    step: &Value,
    count: &Value,
    func: &str,
    ctx: &EvalContext,
) -> Result<SequenceParameters, SeqError> {
    let first = extract_number(first, func, "first")?;
    let step = extract_number(step, func, "step")?;
    let count = extract_count(count, func, "count")?;
    SequenceParameters::with_limit(first, step, count, ctx.max_terms).map_err(SeqError::from)
}

/// Object form of a summary plus its closed-form check
pub fn summary_to_value(summary: &SequenceSummary, check: &SumCheck) -> Value {
    let mut obj = BTreeMap::new();
    obj.insert("count".to_string(), Value::Number(summary.count as f64));
    obj.insert("sum".to_string(), Value::Number(summary.sum));
    obj.insert("first_term".to_string(), Value::Number(summary.first_term));
    obj.insert("last_term".to_string(), Value::Number(summary.last_term));
    obj.insert("average".to_string(), Value::Number(summary.average));
    obj.insert("range".to_string(), Value::Number(summary.range));
    obj.insert("closed_form_sum".to_string(), Value::Number(check.closed_form));
    obj.insert("consistent".to_string(), Value::Bool(check.consistent));
    Value::Object(obj)
}
