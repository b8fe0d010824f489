//! MCP request handling
//!
//! Tools:
//! - generate: Arithmetic or geometric sequence as a report or export file
//! - call: Invoke any registered sequence function
//! - help: Documentation for a function, or general help
//! - list_functions: List available functions

use crate::config::{OutputFormat, ServerConfig};
use seqgen::{GenerateRequest, Seqgen};
use seqgen_core::{SeqError, SequenceKind, Value};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "seqgen";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTRUCTIONS: &str = "Seqgen generates arithmetic (a_n = a_1 + (n-1)d) and geometric \
(a_n = a_1 × r^(n-1)) sequences of 1 to 1000 terms. Use 'generate' for a full report with \
formulas, table, sum and last term, or request format text/csv/json for a downloadable file. \
Show the returned markdown to the user as received.";

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }
}

impl McpResponse {
    pub fn parse_error(message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: None,
            result: None,
            error: Some(McpError {
                code: -32700,
                message,
                data: None,
            }),
        }
    }
}

/// Engine configured from `config`
pub fn create_seqgen(config: &ServerConfig) -> Seqgen {
    Seqgen::with_sequence_library()
        .with_max_terms(config.max_terms)
        .with_preview_terms(config.preview_terms)
}

pub fn handle_request(seqgen: &Seqgen, config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(config),
        "tools/call" => handle_tool_call(seqgen, config, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => {
            warn!(method = %request.method, code = e.code, "{}", e.message);
            McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: None,
                error: Some(e),
            }
        }
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!("client connected: {} (protocol: {})", client_info, client_protocol);

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Arithmetic and geometric sequence generator"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": INSTRUCTIONS
    }))
}

fn handle_tools_list(config: &ServerConfig) -> Result<JsonValue, McpError> {
    Ok(json!({
        "tools": [
            {
                "name": "generate",
                "description": "Generate an arithmetic or geometric sequence. Returns formula, parameters, preview, full table, sum, last term, average and range, or a text/csv/json export.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "kind": {
                            "type": "string",
                            "enum": ["arithmetic", "geometric"],
                            "description": "Sequence type"
                        },
                        "first_term": {
                            "type": "number",
                            "description": "First term (a₁)",
                            "default": 0
                        },
                        "step": {
                            "type": "number",
                            "description": "Common difference (d) or common ratio (r)",
                            "default": 1
                        },
                        "num_terms": {
                            "type": "integer",
                            "description": format!("Number of terms (1 to {})", config.max_terms),
                            "minimum": 1,
                            "maximum": config.max_terms,
                            "default": 10
                        },
                        "format": {
                            "type": "string",
                            "enum": ["markdown", "text", "csv", "json"],
                            "description": "Output format (default: markdown report)"
                        }
                    },
                    "required": ["kind"]
                }
            },
            {
                "name": "call",
                "description": "Call a sequence function by name with positional arguments.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "function": {
                            "type": "string",
                            "description": "Function name, e.g. arithmetic, geometric, sum_formula"
                        },
                        "args": {
                            "type": "array",
                            "description": "Positional arguments"
                        }
                    },
                    "required": ["function"]
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a function, or general help.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for general help."
                        }
                    }
                }
            },
            {
                "name": "list_functions",
                "description": "List all available functions, optionally by category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Filter: generators, series, formula"
                        }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(
    seqgen: &Seqgen,
    config: &ServerConfig,
    params: &Option<JsonValue>,
) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));
    debug!(tool = name, "tool call");

    match name {
        "generate" => tool_generate(seqgen, config, args),
        "call" => tool_call(seqgen, args),
        "help" => tool_help(seqgen, args),
        "list_functions" => tool_list_functions(seqgen, args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

/// Tool result carrying a user-facing error
fn error_result(err: &SeqError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": format!("⚠️ {}", err.message) }],
        "error": err,
        "isError": true
    })
}

/// Numeric argument given as a JSON number or a numeric string
fn number_arg(args: &JsonValue, keys: &[&str], default: f64) -> Result<f64, SeqError> {
    let Some((key, raw)) = keys.iter().find_map(|k| args.get(*k).map(|v| (*k, v))) else {
        return Ok(default);
    };
    match raw {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| SeqError::arg_type("generate", key, "Number", "Number")),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| SeqError::arg_type("generate", key, "Number", "Text")),
        JsonValue::Null => Ok(default),
        _ => Err(SeqError::arg_type("generate", key, "Number", json_type_name(raw))),
    }
}

fn count_arg(args: &JsonValue) -> Result<i64, SeqError> {
    let n = number_arg(args, &["num_terms", "count", "n"], 10.0)?;
    if !n.is_finite() || n.fract() != 0.0 {
        return Err(SeqError::domain_error("num_terms must be a whole number").with_field("num_terms"));
    }
    Ok(n as i64)
}

fn json_type_name(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "Null",
        JsonValue::Bool(_) => "Bool",
        JsonValue::Number(_) => "Number",
        JsonValue::String(_) => "Text",
        JsonValue::Array(_) => "List",
        JsonValue::Object(_) => "Object",
    }
}

fn parse_request(kind: SequenceKind, args: &JsonValue) -> Result<GenerateRequest, SeqError> {
    let step_keys: &[&str] = match kind {
        SequenceKind::Arithmetic => &["step", "common_difference", "diff", "d"],
        SequenceKind::Geometric => &["step", "common_ratio", "ratio", "r"],
    };
    Ok(GenerateRequest {
        kind,
        first_term: number_arg(args, &["first_term", "first", "a"], 0.0)?,
        step: number_arg(args, step_keys, 1.0)?,
        num_terms: count_arg(args)?,
    })
}

fn tool_generate(seqgen: &Seqgen, config: &ServerConfig, args: JsonValue) -> Result<JsonValue, McpError> {
    let kind_name = args
        .get("kind")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing kind argument"))?;

    let kind = match SequenceKind::parse(kind_name) {
        Some(k) => k,
        None => return Ok(error_result(&SeqError::unknown_kind(kind_name))),
    };

    let format = match args.get("format").and_then(|v| v.as_str()) {
        Some(f) => match OutputFormat::parse(f) {
            Some(f) => f,
            None => {
                return Err(McpError::invalid_params(format!(
                    "Unknown format: {}. Expected markdown, text, csv or json",
                    f
                )))
            }
        },
        None => config.default_format,
    };

    let request = match parse_request(kind, &args) {
        Ok(r) => r,
        Err(e) => return Ok(error_result(&e)),
    };

    let generated = match seqgen.generate(&request) {
        Ok(g) => g,
        Err(e) => {
            info!(code = %e.code, "rejected generate request: {}", e.message);
            return Ok(error_result(&e));
        }
    };

    info!(
        kind = %kind,
        num_terms = request.num_terms,
        "generated sequence"
    );

    match format {
        OutputFormat::Markdown => Ok(json!({
            "content": [{ "type": "text", "text": seqgen.render(&generated) }],
            "sequence": generated.sequence.terms(),
            "summary": generated.summary,
            "check": generated.check,
            "isError": false
        })),
        OutputFormat::Export(export_format) => {
            let export = match seqgen.export_generated(&generated, export_format) {
                Ok(e) => e,
                Err(e) => return Ok(error_result(&e)),
            };
            Ok(json!({
                "content": [{ "type": "text", "text": export.content }],
                "file_name": export.file_name,
                "mime_type": export.mime_type,
                "summary": generated.summary,
                "check": generated.check,
                "isError": false
            }))
        }
    }
}

fn tool_call(seqgen: &Seqgen, args: JsonValue) -> Result<JsonValue, McpError> {
    let function = args
        .get("function")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing function argument"))?;

    let call_args: Vec<Value> = args
        .get("args")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().map(json_to_value).collect())
        .unwrap_or_default();

    let result = seqgen.call(function, &call_args);
    if let Value::Error(e) = &result {
        return Ok(error_result(e));
    }

    Ok(json!({
        "content": [{ "type": "text", "text": result.to_string() }],
        "data": value_to_json(&result),
        "isError": false
    }))
}

fn tool_help(seqgen: &Seqgen, args: JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|v| v.as_str());
    let help = seqgen.help(name);

    Ok(json!({
        "content": [{ "type": "text", "text": format_help(&help) }],
        "data": value_to_json(&help),
        "isError": help.is_error()
    }))
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            if let Some(Value::List(examples)) = map.get("examples") {
                for e in examples {
                    out.push_str(&format!("- `{}`\n", e));
                }
            }
            if let Some(Value::Object(categories)) = map.get("functions") {
                for (category, names) in categories {
                    out.push_str(&format!("**{}:** {}\n", category, names_list(names)));
                }
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

fn names_list(names: &Value) -> String {
    match names {
        Value::List(items) => items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn tool_list_functions(seqgen: &Seqgen, args: JsonValue) -> Result<JsonValue, McpError> {
    let category = args.get("category").and_then(|v| v.as_str());
    let functions = seqgen.list_functions(category);
    let count = functions.as_list().map_or(0, |l| l.len());
    Ok(json!({
        "content": [{ "type": "text", "text": format!("{} functions listed", count) }],
        "data": value_to_json(&functions)
    }))
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
        JsonValue::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(s.clone()),
        },
        JsonValue::Array(arr) => Value::List(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), json_to_value(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => json!(n),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(l) => JsonValue::Array(l.iter().map(value_to_json).collect()),
        Value::Object(o) => JsonValue::Object(o.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect()),
        Value::Error(e) => json!({"_error": {"code": e.code, "message": e.message}}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: JsonValue) -> McpRequest {
        McpRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    fn call_tool(config: &ServerConfig, name: &str, arguments: JsonValue) -> JsonValue {
        let seqgen = create_seqgen(config);
        let response = handle_request(
            &seqgen,
            config,
            &request("tools/call", json!({ "name": name, "arguments": arguments })),
        );
        assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
        response.result.unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let config = ServerConfig::default();
        let seqgen = create_seqgen(&config);
        let response = handle_request(
            &seqgen,
            &config,
            &request("initialize", json!({ "protocolVersion": "2024-11-05" })),
        );
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
    }

    #[test]
    fn test_unknown_method() {
        let config = ServerConfig::default();
        let seqgen = create_seqgen(&config);
        let response = handle_request(&seqgen, &config, &request("resources/list", json!({})));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_tools_list_reflects_cap() {
        let config = ServerConfig {
            max_terms: 100,
            ..ServerConfig::default()
        };
        let seqgen = create_seqgen(&config);
        let response = handle_request(&seqgen, &config, &request("tools/list", json!({})));
        let tools = response.result.unwrap();
        assert_eq!(tools["tools"][0]["name"], "generate");
        assert_eq!(
            tools["tools"][0]["inputSchema"]["properties"]["num_terms"]["maximum"],
            100
        );
    }

    #[test]
    fn test_generate_markdown() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "arithmetic", "first_term": 0, "step": 1, "num_terms": 10 }),
        );
        assert_eq!(result["isError"], false);
        assert_eq!(result["sequence"], json!([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]));
        assert_eq!(result["summary"]["sum"], 45.0);
        assert_eq!(result["summary"]["last_term"], 9.0);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("# Arithmetic Sequence"));
    }

    #[test]
    fn test_generate_geometric_with_aliases() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "geometric", "first": "1", "common_ratio": 2, "count": 5 }),
        );
        assert_eq!(result["sequence"], json!([1.0, 2.0, 4.0, 8.0, 16.0]));
        assert_eq!(result["summary"]["sum"], 31.0);
    }

    #[test]
    fn test_generate_unit_ratio_sum_is_exact() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "geometric", "first_term": 0.1, "step": 1, "num_terms": 10 }),
        );
        assert_eq!(result["summary"]["sum"], 1.0);
        assert_eq!(result["summary"]["count"], 10);
        assert_eq!(result["check"]["consistent"], true);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("S_n = n a_1 = 10 \\times 0.1 = 1"));
    }

    #[test]
    fn test_huge_preview_setting_does_not_panic() {
        let config = ServerConfig {
            preview_terms: usize::MAX,
            ..ServerConfig::default()
        };
        let result = call_tool(&config, "generate", json!({ "kind": "arithmetic", "num_terms": 60 }));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("**Sequence:** 0, 1, 2,"));
    }

    #[test]
    fn test_generate_csv_export() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "geometric", "first_term": 5, "step": 1, "num_terms": 4, "format": "csv" }),
        );
        assert_eq!(result["file_name"], "geometric_sequence.csv");
        assert_eq!(result["content"][0]["text"], "n,a_n\n1,5\n2,5\n3,5\n4,5\n");
    }

    #[test]
    fn test_default_format_from_config() {
        let config = ServerConfig {
            default_format: OutputFormat::Export(seqgen::ExportFormat::Json),
            ..ServerConfig::default()
        };
        let result = call_tool(&config, "generate", json!({ "kind": "arithmetic", "num_terms": 3 }));
        assert_eq!(result["file_name"], "arithmetic_sequence.json");
    }

    #[test]
    fn test_generate_rejects_zero_terms() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "arithmetic", "num_terms": 0 }),
        );
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "INVALID_COUNT");
        assert_eq!(result["error"]["severity"], "warning");
    }

    #[test]
    fn test_generate_rejects_fractional_terms() {
        let result = call_tool(
            &ServerConfig::default(),
            "generate",
            json!({ "kind": "arithmetic", "num_terms": 2.5 }),
        );
        assert_eq!(result["isError"], true);
    }

    #[test]
    fn test_generate_respects_configured_cap() {
        let config = ServerConfig {
            max_terms: 20,
            ..ServerConfig::default()
        };
        let result = call_tool(&config, "generate", json!({ "kind": "geometric", "num_terms": 21 }));
        assert_eq!(result["error"]["code"], "TOO_MANY_TERMS");
    }

    #[test]
    fn test_generate_missing_kind_is_protocol_error() {
        let config = ServerConfig::default();
        let seqgen = create_seqgen(&config);
        let response = handle_request(
            &seqgen,
            &config,
            &request("tools/call", json!({ "name": "generate", "arguments": {} })),
        );
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_call_function() {
        let result = call_tool(
            &ServerConfig::default(),
            "call",
            json!({ "function": "sum_formula", "args": ["geometric", 2, -1, 4] }),
        );
        assert_eq!(result["data"], 0.0);
    }

    #[test]
    fn test_call_unknown_function() {
        let result = call_tool(
            &ServerConfig::default(),
            "call",
            json!({ "function": "fibonacci", "args": [] }),
        );
        assert_eq!(result["isError"], true);
        assert_eq!(result["error"]["code"], "UNDEFINED_FUNC");
    }

    #[test]
    fn test_help() {
        let result = call_tool(&ServerConfig::default(), "help", json!({ "name": "arithmetic" }));
        let text = result["content"][0]["text"].as_str().unwrap();
        assert!(text.starts_with("# arithmetic"));
        assert!(text.contains("**Usage:** `arithmetic(first, diff, count)`"));

        let general = call_tool(&ServerConfig::default(), "help", json!({}));
        let text = general["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("sequence/generators"));
    }

    #[test]
    fn test_list_functions() {
        let result = call_tool(&ServerConfig::default(), "list_functions", json!({ "category": "series" }));
        assert_eq!(result["data"].as_array().map(|a| a.len()), Some(3));
    }
}
