//! Server configuration from environment variables
//!
//! - `SEQGEN_MAX_TERMS`: lower cap on term count (clamped to 1..=1000)
//! - `SEQGEN_PREVIEW_TERMS`: terms shown on each side of a long preview (at most 1000)
//! - `SEQGEN_DEFAULT_FORMAT`: `markdown`, `text`, `csv` or `json`
//!
//! Unparseable values are logged and replaced by the default.

use seqgen::{ExportFormat, DEFAULT_PREVIEW_TERMS};
use seqgen_core::MAX_TERMS;
use std::env;
use tracing::warn;

/// Output of the `generate` tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Export(ExportFormat),
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "markdown" | "md" | "report" => Some(Self::Markdown),
            other => ExportFormat::parse(other).map(Self::Export),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub max_terms: usize,
    pub preview_terms: usize,
    pub default_format: OutputFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_terms: MAX_TERMS,
            preview_terms: DEFAULT_PREVIEW_TERMS,
            default_format: OutputFormat::Markdown,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; the environment in production, a map in tests
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let max_terms = match lookup("SEQGEN_MAX_TERMS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) => n.clamp(1, MAX_TERMS),
                Err(_) => {
                    warn!("ignoring SEQGEN_MAX_TERMS={raw:?}: not a positive integer");
                    defaults.max_terms
                }
            },
            None => defaults.max_terms,
        };

        let preview_terms = match lookup("SEQGEN_PREVIEW_TERMS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n.min(MAX_TERMS),
                _ => {
                    warn!("ignoring SEQGEN_PREVIEW_TERMS={raw:?}: not a positive integer");
                    defaults.preview_terms
                }
            },
            None => defaults.preview_terms,
        };

        let default_format = match lookup("SEQGEN_DEFAULT_FORMAT") {
            Some(raw) => OutputFormat::parse(&raw).unwrap_or_else(|| {
                warn!("ignoring SEQGEN_DEFAULT_FORMAT={raw:?}: expected markdown, text, csv or json");
                defaults.default_format
            }),
            None => defaults.default_format,
        };

        Self {
            max_terms,
            preview_terms,
            default_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(config(&[]), ServerConfig::default());
        assert_eq!(ServerConfig::default().max_terms, 1000);
        assert_eq!(ServerConfig::default().preview_terms, 25);
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("SEQGEN_MAX_TERMS", "200"),
            ("SEQGEN_PREVIEW_TERMS", "5"),
            ("SEQGEN_DEFAULT_FORMAT", "CSV"),
        ]);
        assert_eq!(cfg.max_terms, 200);
        assert_eq!(cfg.preview_terms, 5);
        assert_eq!(cfg.default_format, OutputFormat::Export(ExportFormat::Csv));
    }

    #[test]
    fn test_max_terms_is_clamped() {
        assert_eq!(config(&[("SEQGEN_MAX_TERMS", "50000")]).max_terms, 1000);
        assert_eq!(config(&[("SEQGEN_MAX_TERMS", "0")]).max_terms, 1);
    }

    #[test]
    fn test_preview_terms_are_capped() {
        let cfg = config(&[("SEQGEN_PREVIEW_TERMS", "18446744073709551615")]);
        assert_eq!(cfg.preview_terms, MAX_TERMS);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let cfg = config(&[
            ("SEQGEN_MAX_TERMS", "lots"),
            ("SEQGEN_PREVIEW_TERMS", "0"),
            ("SEQGEN_DEFAULT_FORMAT", "pdf"),
        ]);
        assert_eq!(cfg, ServerConfig::default());
    }
}
