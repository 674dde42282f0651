//! # Domain Invariants
//!
//! Semantic checks run before any state mutation.

use super::errors::ValidationError;
use super::packet::IbcPostPacketData;
use crate::config::BlogConfig;

/// Invariant: Required field is present.
///
/// Whitespace-only values count as empty.
pub fn invariant_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// Invariant: Field fits its byte limit.
pub fn invariant_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.len() > max {
        return Err(ValidationError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// Validate a post payload against the configured limits.
///
/// Checks run in field order and stop at the first failure.
pub fn validate_packet_data(
    data: &IbcPostPacketData,
    config: &BlogConfig,
) -> Result<(), ValidationError> {
    invariant_non_empty("title", &data.title)?;
    invariant_max_len("title", &data.title, config.max_title_len)?;
    invariant_non_empty("content", &data.content)?;
    invariant_max_len("content", &data.content, config.max_content_len)?;
    invariant_non_empty("creator", &data.creator)?;
    invariant_max_len("creator", &data.creator, config.max_creator_len)?;
    Ok(())
}
