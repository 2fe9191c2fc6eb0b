//! Error types for subsearch.

use thiserror::Error;

/// Error type for the I/O and notification layers around the classifier.
///
/// The registry and the engine never return this type: bad configuration
/// entries and bad input addresses are reported as [`Diagnostic`]s or as
/// unmatched results instead.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV read or write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Requested CSV column is not in the header row
    #[error("column '{0}' not found in the CSV file")]
    MissingColumn(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email could not be built or delivered
    #[error("email error: {0}")]
    Email(String),

    /// Geolocation API returned an unsuccessful status
    #[error("geolocation error: {0}")]
    Geolocation(String),

    /// Telegram API rejected the message
    #[error("telegram error: {0}")]
    Telegram(String),
}

/// Result type alias for subsearch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable problem found while parsing subnet configuration text.
///
/// Diagnostics never abort a parse; the offending entry or CIDR is dropped
/// and parsing continues with the rest of the text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Entry has no `name:cidrs` separator
    #[error("invalid subnet entry '{0}': expected format 'name:cidr1;cidr2;...'")]
    MissingDelimiter(String),

    /// Entry has more than one `:` separator
    #[error("invalid subnet entry '{0}': more than one ':' separator")]
    ExtraDelimiter(String),

    /// Entry name is blank
    #[error("invalid subnet entry '{0}': group name is empty")]
    EmptyName(String),

    /// A single CIDR in an entry failed to parse
    #[error("invalid CIDR '{cidr}' in group '{group}'")]
    InvalidCidr { group: String, cidr: String },

    /// Every CIDR in an entry failed to parse
    #[error("group '{0}' has no valid CIDR ranges, dropped")]
    EmptyGroup(String),

    /// Group name already defined earlier in the text
    #[error("group '{0}' is defined more than once, last definition kept")]
    DuplicateGroup(String),
}
