use anyhow::Context as _;
use thiserror::Error;

/// Errors raised while configuring the baseline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BaselineError {
    #[error("invalid {kind} damping {value}: damping must be finite and non-negative")]
    InvalidDamping { kind: &'static str, value: f64 },
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to cache errors
pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}

/// Wrap result with cache context
pub fn with_cache_context<T, E>(result: Result<T, E>, operation: &str, key: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(cache_context(operation, key))
}
