//! Parsing helpers for CLI argument values
//!
//! Small parsers for the string-valued arguments the commands accept:
//! memory sizes like "256M", channel mappings like "r=B4,g=B3,b=B2" and
//! scale breaks like "0,4000".

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{BandError, BandResult};

lazy_static! {
    static ref MEMORY_SIZE_RE: Regex = Regex::new(r"(?i)^\s*(\d+)\s*([kmg]?)b?\s*$")
        .expect("invalid memory size regex");
    static ref CHANNELS_RE: Regex = Regex::new(
        r"(?i)^\s*r\s*=\s*([^,]+?)\s*,\s*g\s*=\s*([^,]+?)\s*,\s*b\s*=\s*([^,]+?)\s*$"
    )
    .expect("invalid channel mapping regex");
}

/// Parse a memory size like "256M", "4g" or "1048576" into bytes
pub fn parse_memory_size(value: &str) -> BandResult<u64> {
    let caps = MEMORY_SIZE_RE.captures(value).ok_or_else(|| {
        BandError::InvalidFormat(format!(
            "Invalid memory size '{}', expected e.g. 256M or 1G",
            value
        ))
    })?;

    let number = caps[1]
        .parse::<u64>()
        .map_err(|_| BandError::InvalidFormat(format!("Memory size too large: {}", value)))?;
    let multiplier: u64 = match caps[2].to_lowercase().as_str() {
        "k" => 1024,
        "m" => 1024 * 1024,
        "g" => 1024 * 1024 * 1024,
        _ => 1,
    };

    let bytes = number.checked_mul(multiplier).ok_or_else(|| {
        BandError::InvalidFormat(format!("Memory size too large: {}", value))
    })?;
    if bytes == 0 {
        return Err(BandError::InvalidFormat(
            "Memory size must be at least one byte".to_string(),
        ));
    }
    Ok(bytes)
}

/// Parse a channel mapping "r=<band>,g=<band>,b=<band>"
pub fn parse_channel_mapping(value: &str) -> BandResult<(String, String, String)> {
    let caps = CHANNELS_RE.captures(value).ok_or_else(|| {
        BandError::InvalidFormat(format!(
            "Invalid channel mapping '{}', expected r=<band>,g=<band>,b=<band>",
            value
        ))
    })?;
    Ok((
        caps[1].to_string(),
        caps[2].to_string(),
        caps[3].to_string(),
    ))
}

/// Parse scale breaks "low,high" with low strictly below high
pub fn parse_breaks(value: &str) -> BandResult<(f64, f64)> {
    let parts: Vec<&str> = value.split(',').collect();
    if parts.len() != 2 {
        return Err(BandError::InvalidFormat(format!(
            "Invalid breaks '{}', expected 'low,high'",
            value
        )));
    }
    let low = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| BandError::InvalidFormat(format!("Invalid low break: {}", parts[0])))?;
    let high = parts[1]
        .trim()
        .parse::<f64>()
        .map_err(|_| BandError::InvalidFormat(format!("Invalid high break: {}", parts[1])))?;
    if !(low < high) {
        return Err(BandError::InvalidFormat(format!(
            "Breaks must satisfy low < high, got {} and {}",
            low, high
        )));
    }
    Ok((low, high))
}
