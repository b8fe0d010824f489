//! Sequence generators
//!
//! arithmetic, geometric, nth_term

use crate::helpers::{extract_count, extract_kind, extract_number, extract_params};
use seqgen_plugin::prelude::*;

// ============ Arithmetic ============

pub struct Arithmetic;

static ARITHMETIC_ARGS: [ArgMeta; 3] = [
    ArgMeta {
        name: "first",
        typ: "Number",
        description: "First term",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "diff",
        typ: "Number",
        description: "Common difference",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "count",
        typ: "Number",
        description: "Number of terms (1 to 1000)",
        optional: false,
        default: None,
    },
];

static ARITHMETIC_EXAMPLES: [&str; 2] = [
    "arithmetic(0, 1, 10) → [0, 1, 2, 3, 4, 5, 6, 7, 8, 9]",
    "arithmetic(5, 3, 6) → [5, 8, 11, 14, 17, 20]",
];

static ARITHMETIC_RELATED: [&str; 3] = ["geometric", "nth_term", "summarize"];

impl FunctionPlugin for Arithmetic {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "arithmetic",
            description: "Generate arithmetic sequence: a_n = first + (n-1) × diff",
            usage: "arithmetic(first, diff, count)",
            args: &ARITHMETIC_ARGS,
            returns: "List<Number>",
            examples: &ARITHMETIC_EXAMPLES,
            category: "sequence/generators",
            related: &ARITHMETIC_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 3 {
            return Value::Error(SeqError::arg_count("arithmetic", 3, args.len()));
        }

        let params = match extract_params(&args[0], &args[1], &args[2], "arithmetic", ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        Value::number_list(params.generate(SequenceKind::Arithmetic).terms())
    }
}

// ============ Geometric ============

pub struct Geometric;

static GEOMETRIC_ARGS: [ArgMeta; 3] = [
    ArgMeta {
        name: "first",
        typ: "Number",
        description: "First term",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "ratio",
        typ: "Number",
        description: "Common ratio",
        optional: false,
        default: None,
    },
    ArgMeta {
        name: "count",
        typ: "Number",
        description: "Number of terms (1 to 1000)",
        optional: false,
        default: None,
    },
];

static GEOMETRIC_EXAMPLES: [&str; 3] = [
    "geometric(1, 2, 5) → [1, 2, 4, 8, 16]",
    "geometric(2, -1, 4) → [2, -2, 2, -2]",
    "geometric(7, 0, 3) → [7, 0, 0]",
];

static GEOMETRIC_RELATED: [&str; 3] = ["arithmetic", "nth_term", "summarize"];

impl FunctionPlugin for Geometric {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "geometric",
            description: "Generate geometric sequence: a_n = first × ratio^(n-1)",
            usage: "geometric(first, ratio, count)",
            args: &GEOMETRIC_ARGS,
            returns: "List<Number>",
            examples: &GEOMETRIC_EXAMPLES,
            category: "sequence/generators",
            related: &GEOMETRIC_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        if args.len() != 3 {
            return Value::Error(SeqError::arg_count("geometric", 3, args.len()));
        }

        let params = match extract_params(&args[0], &args[1], &args[2], "geometric", ctx) {
            Ok(p) => p,
            Err(e) => return Value::Error(e),
        };

        Value::number_list(params.generate(SequenceKind::Geometric).terms())
    }
}

// ============ NthTerm ============

pub struct NthTerm;

static NTH_TERM_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("kind", "Text", "arithmetic or geometric"),
    ArgMeta::required("first", "Number", "First term"),
    ArgMeta::required("step", "Number", "Common difference or ratio"),
    ArgMeta::required("n", "Number", "Term position (1-based)"),
];

static NTH_TERM_EXAMPLES: [&str; 2] = [
    "nth_term(\"arithmetic\", 0, 1, 10) → 9",
    "nth_term(\"geometric\", 1, 2, 5) → 16",
];

static NTH_TERM_RELATED: [&str; 2] = ["arithmetic", "geometric"];

impl FunctionPlugin for NthTerm {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "nth_term",
            description: "Single term of an arithmetic or geometric sequence, without generating the rest",
            usage: "nth_term(kind, first, step, n)",
            args: &NTH_TERM_ARGS,
            returns: "Number",
            examples: &NTH_TERM_EXAMPLES,
            category: "sequence/generators",
            related: &NTH_TERM_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        if args.len() != 4 {
            return Value::Error(SeqError::arg_count("nth_term", 4, args.len()));
        }

        let kind = match extract_kind(&args[0], "nth_term") {
            Ok(k) => k,
            Err(e) => return Value::Error(e),
        };

        let first = match extract_number(&args[1], "nth_term", "first") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let step = match extract_number(&args[2], "nth_term", "step") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let n = match extract_count(&args[3], "nth_term", "n") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        if n < 1 {
            return Value::Error(SeqError::domain_error("nth_term() requires n >= 1").with_field("n"));
        }

        if !first.is_finite() || !step.is_finite() {
            return Value::Error(SeqError::domain_error("nth_term() requires finite first and step"));
        }

        Value::Number(kind.term(first, step, (n - 1) as usize))
    }
}
