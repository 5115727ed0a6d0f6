//! Error types for wire-format parsing
//!
//! Merging and querying never fail: malformed records are dropped and
//! counted, duplicates are absorbed, unknown traits yield empty
//! results. Errors only arise when decoding fragment payloads.

use thiserror::Error;

/// Errors produced while decoding a fragment or sidebar payload.
#[derive(Error, Debug)]
pub enum WireError {
    /// Payload framing did not match the expected self-executing unit
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Underlying JSON decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for wire-format operations
pub type Result<T> = std::result::Result<T, WireError>;
