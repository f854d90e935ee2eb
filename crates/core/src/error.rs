//! Error types for entry reading operations.
//!
//! This module defines the main error type [`ScpError`] which represents
//! all possible errors that can occur while fetching, extracting and
//! archiving entries.
//!
//! # Example
//!
//! ```rust
//! use scp_reader_core::{ScpError, Result};
//!
//! fn read_entry(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(ScpError::NoContent);
//!     }
//!     // ... extraction logic
//!     # Ok(String::new())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for entry reading operations.
///
/// # Example
///
/// ```rust
/// use scp_reader_core::{Reader, ScpError};
///
/// match Reader::new().parse("<html>...</html>") {
///     Ok(entry) => println!("{}", entry.text()),
///     Err(ScpError::MissingPage) => println!("No such entry"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScpError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// The wiki answered 404 for the requested page.
    #[error("Page not found: {url}")]
    NotFound { url: String },

    /// The wiki answered with an unexpected status code.
    #[error("Failed to fetch content from {url}: {status}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Entry number outside the range the wiki publishes.
    #[error("Entry number {number} is outside 1-{max}")]
    InvalidNumber { number: u32, max: u32 },

    /// The page exists on the wiki but is the "This page doesn't exist." stub.
    #[error("Page has no contents")]
    MissingPage,

    /// No content could be extracted from the document.
    ///
    /// Returned when the page lacks a `#page-content` node or when
    /// extraction produced no fragments.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// Extracted text carries no `SCP-<digits>` identifier to name a file after.
    #[error("Couldn't get SCP number from output text")]
    NoEntryNumber,

    /// No saved copy exists for the requested entry.
    #[error("No saved copy of entry {0}")]
    NotArchived(String),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors when producing JSON output.
    #[error("Failed to serialize entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for ScpError.
pub type Result<T> = std::result::Result<T, ScpError>;
