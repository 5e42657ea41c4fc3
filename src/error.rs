//! Error types for the zonetext library.

use std::io;
use thiserror::Error;

/// Result type alias for zonetext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading profiles or driving extraction.
///
/// The reflow core itself is total: classification, splitting, and reflow
/// accept any string input and never fail. Errors arise only at the edges,
/// in profile I/O and zone lookups.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error decoding a zone profile from JSON.
    #[error("Profile parsing error: {0}")]
    ProfileParse(#[from] serde_json::Error),

    /// No zone with the requested label exists in the profile.
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    /// Two zones in one profile share a label.
    #[error("Duplicate zone label: {0}")]
    DuplicateZone(String),

    /// Error obtaining text from the page-text provider.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
