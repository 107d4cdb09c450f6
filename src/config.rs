//! Chunking configuration
//!
//! The memory budget and optional strip-height override controlling when
//! and how the out-of-core split loop chunks its input. Values come from
//! an optional TOML file and can be overridden per invocation by CLI
//! flags.

use log::info;
use std::fs;

use crate::errors::{BandError, BandResult};
use crate::split::DEFAULT_MEMORY_BUDGET;
use crate::utils::parse_utils;

/// Chunk-size policy for the split pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Bytes one in-flight strip may occupy across all stack values
    pub memory_budget: u64,
    /// Explicit strip height in rows, overriding the budget when set
    pub chunk_rows: Option<u32>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        ChunkingConfig {
            memory_budget: DEFAULT_MEMORY_BUDGET,
            chunk_rows: None,
        }
    }
}

impl ChunkingConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> BandResult<Self> {
        info!("Loading configuration from {}", path);
        let content = fs::read_to_string(path)?;
        ChunkingConfig::from_toml(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// Recognized section:
    ///
    /// ```toml
    /// [chunking]
    /// memory_budget = "256M"   # or a plain byte count
    /// chunk_rows = 64
    /// ```
    pub fn from_toml(content: &str) -> BandResult<Self> {
        let table: toml::Table = content
            .parse()
            .map_err(|e: toml::de::Error| BandError::InvalidFormat(format!("Bad config: {}", e)))?;

        let mut config = ChunkingConfig::default();
        let Some(chunking) = table.get("chunking").and_then(|v| v.as_table()) else {
            return Ok(config);
        };

        match chunking.get("memory_budget") {
            Some(toml::Value::String(s)) => {
                config.memory_budget = parse_utils::parse_memory_size(s)?;
            }
            Some(toml::Value::Integer(bytes)) if *bytes > 0 => {
                config.memory_budget = *bytes as u64;
            }
            Some(other) => {
                return Err(BandError::InvalidFormat(format!(
                    "memory_budget must be a size string or positive byte count, got {}",
                    other
                )));
            }
            None => {}
        }

        if let Some(rows) = chunking.get("chunk_rows") {
            let rows = rows.as_integer().filter(|r| *r > 0).ok_or_else(|| {
                BandError::InvalidFormat(format!("chunk_rows must be a positive integer, got {}", rows))
            })?;
            config.chunk_rows = Some(rows as u32);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_section_missing() {
        let config = ChunkingConfig::from_toml("").unwrap();
        assert_eq!(config, ChunkingConfig::default());
    }

    #[test]
    fn test_parses_size_string_and_rows() {
        let config = ChunkingConfig::from_toml(
            "[chunking]\nmemory_budget = \"64M\"\nchunk_rows = 32\n",
        )
        .unwrap();
        assert_eq!(config.memory_budget, 64 * 1024 * 1024);
        assert_eq!(config.chunk_rows, Some(32));
    }

    #[test]
    fn test_rejects_bad_rows() {
        let result = ChunkingConfig::from_toml("[chunking]\nchunk_rows = -3\n");
        assert!(matches!(result, Err(BandError::InvalidFormat(_))));
    }
}
