//! Series operations
//!
//! sum_seq, sum_formula, summarize, nth_term_formula

use crate::formula::{self, FormulaStyle};
use crate::helpers::{extract_kind, extract_list, extract_number, extract_params, summary_to_value};
use seqgen_core::{arithmetic_sum, geometric_sum, sum_terms, SequenceParameters, SumCheck};
use seqgen_plugin::prelude::*;

// ============ SumSeq ============

pub struct SumSeq;

static SUM_SEQ_ARGS: [ArgMeta; 1] = [ArgMeta {
    name: "sequence",
    typ: "List<Number>",
    description: "Terms to add up",
    optional: false,
    default: None,
}];

static SUM_SEQ_EXAMPLES: [&str; 2] = [
    "sum_seq(arithmetic(0, 1, 10)) → 45",
    "sum_seq([1, 2, 4, 8, 16]) → 31",
];

static SUM_SEQ_RELATED: [&str; 2] = ["sum_formula", "summarize"];

impl FunctionPlugin for SumSeq {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sum_seq",
            description: "Sum all terms by direct accumulation",
            usage: "sum_seq(sequence)",
            args: &SUM_SEQ_ARGS,
            returns: "Number",
            examples: &SUM_SEQ_EXAMPLES,
            category: "sequence/series",
            related: &SUM_SEQ_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 1 {
            return Value::Error(SeqError::arg_count("sum_seq", 1, args.len()));
        }

        match extract_list(&args[0]) {
            Ok(terms) => Value::Number(sum_terms(&terms)),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ SumFormula ============

pub struct SumFormula;

static SUM_FORMULA_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("kind", "Text", "arithmetic or geometric"),
    ArgMeta::required("first", "Number", "First term"),
    ArgMeta::required("step", "Number", "Common difference or ratio"),
    ArgMeta::required("count", "Number", "Number of terms"),
];

static SUM_FORMULA_EXAMPLES: [&str; 3] = [
    "sum_formula(\"arithmetic\", 0, 1, 10) → 45",
    "sum_formula(\"geometric\", 1, 2, 5) → 31",
    "sum_formula(\"geometric\", 5, 1, 4) → 20",
];

static SUM_FORMULA_RELATED: [&str; 2] = ["sum_seq", "summarize"];

impl FunctionPlugin for SumFormula {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sum_formula",
            description: "Sum of the first n terms by closed form",
            usage: "sum_formula(kind, first, step, count)",
            args: &SUM_FORMULA_ARGS,
            returns: "Number",
            examples: &SUM_FORMULA_EXAMPLES,
            category: "sequence/series",
            related: &SUM_FORMULA_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 4 {
            return Value::Error(SeqError::arg_count("sum_formula", 4, args.len()));
        }

        let kind = match extract_kind(&args[0], "sum_formula") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        let params = match extract_params(&args[1], &args[2], &args[3], "sum_formula", ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        let (a, step, n) = (params.first_term(), params.step(), params.term_count());
        let sum = match kind {
            SequenceKind::Arithmetic => arithmetic_sum(a, step, n),
            SequenceKind::Geometric => geometric_sum(a, step, n),
        };
        Value::Number(sum)
    }
}

// ============ Summarize ============

pub struct Summarize;

static SUMMARIZE_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("kind", "Text", "arithmetic or geometric"),
    ArgMeta::required("first", "Number", "First term"),
    ArgMeta::required("step", "Number", "Common difference or ratio"),
    ArgMeta::required("count", "Number", "Number of terms"),
];

static SUMMARIZE_EXAMPLES: [&str; 1] = [
    "summarize(\"arithmetic\", 0, 1, 10) → {sum: 45, last_term: 9, average: 4.5, range: 9, ...}",
];

static SUMMARIZE_RELATED: [&str; 2] = ["sum_seq", "sum_formula"];

impl FunctionPlugin for Summarize {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "summarize",
            description: "Sum, last term, average and range, with the closed-form sum cross-check",
            usage: "summarize(kind, first, step, count)",
            args: &SUMMARIZE_ARGS,
            returns: "Object",
            examples: &SUMMARIZE_EXAMPLES,
            category: "sequence/series",
            related: &SUMMARIZE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 4 {
            return Value::Error(SeqError::arg_count("summarize", 4, args.len()));
        }

        let kind = match extract_kind(&args[0], "summarize") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        let params = match extract_params(&args[1], &args[2], &args[3], "summarize", ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        let seq = params.generate(kind);
        summary_to_value(&seq.summary(), &SumCheck::of(&seq))
    }
}

// ============ NthTermFormula ============

pub struct NthTermFormula;

static NTH_TERM_FORMULA_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("kind", "Text", "arithmetic or geometric"),
    ArgMeta::required("first", "Number", "First term"),
    ArgMeta::required("step", "Number", "Common difference or ratio"),
    ArgMeta::optional("style", "Text", "plain or latex", "plain"),
];

static NTH_TERM_FORMULA_EXAMPLES: [&str; 2] = [
    "nth_term_formula(\"arithmetic\", 0, 1) → \"aₙ = 0 + (n-1) × 1\"",
    "nth_term_formula(\"geometric\", 1, 2, \"latex\") → \"a_n = 1 \\times 2^{n-1}\"",
];

static NTH_TERM_FORMULA_RELATED: [&str; 1] = ["nth_term"];

impl FunctionPlugin for NthTermFormula {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "nth_term_formula",
            description: "Nth-term formula with the first term and step substituted",
            usage: "nth_term_formula(kind, first, step, [style])",
            args: &NTH_TERM_FORMULA_ARGS,
            returns: "Text",
            examples: &NTH_TERM_FORMULA_EXAMPLES,
            category: "sequence/formula",
            related: &NTH_TERM_FORMULA_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() < 3 || args.len() > 4 {
            return Value::Error(SeqError::arg_count("nth_term_formula", 3, args.len()));
        }

        let kind = match extract_kind(&args[0], "nth_term_formula") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        let first = match extract_number(&args[1], "nth_term_formula", "first") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let step = match extract_number(&args[2], "nth_term_formula", "step") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        // Same finiteness rule as generation; the count is irrelevant here
        if let Err(e) = SequenceParameters::new(first, step, 1) {
            return Value::Error(e.into());
        }

        let style = match args.get(3) {
            None | Some(Value::Null) => FormulaStyle::Plain,
            Some(Value::Text(s)) => match FormulaStyle::parse(s) {
                Some(style) => style,
                None => {
                    return Value::Error(SeqError::domain_error(format!(
                        "nth_term_formula() style must be plain or latex, got {}",
                        s
                    )))
                }
            },
            Some(other) => {
                return Value::Error(SeqError::arg_type(
                    "nth_term_formula",
                    "style",
                    "Text",
                    other.type_name(),
                ))
            }
        };

        Value::Text(formula::nth_term_formula(kind, first, step, style))
    }
}
