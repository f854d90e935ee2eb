//! Main entry reading API.
//!
//! The [`Reader`] ties the pipeline together: page markup in, [`Entry`] out,
//! plus the layout step that turns an entry's text into terminal output.
//!
//! # Example
//!
//! ```rust
//! use scp_reader_core::Reader;
//!
//! let html = r#"<div id="page-content"><p><strong>Item #:</strong> SCP-173</p></div>"#;
//! let reader = Reader::new();
//! let entry = reader.parse(html).unwrap();
//!
//! assert_eq!(entry.number.map(|n| n.get()), Some(173));
//! assert_eq!(reader.layout(entry.text()), "\nItem #: SCP-173\n");
//! ```

use crate::entry::Entry;
use crate::entry_number::{DEFAULT_BASE_URL, EntryNumber};
use crate::extract::{ExtractConfig, extract_content};
#[cfg(feature = "fetch")]
use crate::fetch::fetch_url;
use crate::fetch::FetchConfig;
use crate::formatters::{TextConfig, wrap_lines};
use crate::parse::Document;
use crate::Result;

/// Configuration for reading entries.
///
/// # Example
///
/// ```rust
/// use scp_reader_core::ReaderConfig;
///
/// let config = ReaderConfig::builder()
///     .line_width(100)
///     .centered(false)
///     .indentation(4)
///     .build();
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Terminal layout (default: 90 columns, centered).
    pub text: TextConfig,

    /// Quotation framing (default: 84 columns, padding 2).
    pub extract: ExtractConfig,

    /// HTTP settings.
    pub fetch: FetchConfig,

    /// Root URL entry pages live under (default: `https://scp-wiki.wikidot.com`).
    pub base_url: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            text: TextConfig::default(),
            extract: ExtractConfig::default(),
            fetch: FetchConfig::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ReaderConfig {
    /// Creates a new builder for ReaderConfig.
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::new()
    }
}

/// Builder for ReaderConfig.
#[derive(Debug, Default)]
pub struct ReaderConfigBuilder {
    config: ReaderConfig,
}

impl ReaderConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ReaderConfig::default() }
    }

    /// Sets the output wrap width.
    pub fn line_width(mut self, value: usize) -> Self {
        self.config.text.line_width = value;
        self
    }

    /// Sets whether output is centered in the terminal.
    pub fn centered(mut self, value: bool) -> Self {
        self.config.text.centered = value;
        self
    }

    /// Sets the fixed left margin used when not centering.
    pub fn indentation(mut self, value: usize) -> Self {
        self.config.text.indentation = value;
        self
    }

    /// Sets the wrap width of quotation text.
    pub fn quote_width(mut self, value: usize) -> Self {
        self.config.extract.quote_width = value;
        self
    }

    /// Sets the padding inside quotation frames.
    pub fn frame_padding(mut self, value: usize) -> Self {
        self.config.extract.frame_padding = value;
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, value: u64) -> Self {
        self.config.fetch.timeout = value;
        self
    }

    /// Sets the HTTP User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the root URL of entry pages.
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.config.base_url = value.into();
        self
    }

    /// Builds the ReaderConfig.
    pub fn build(self) -> ReaderConfig {
        self.config
    }
}

/// Reads entry pages into plain-text documents.
#[derive(Debug, Clone, Default)]
pub struct Reader {
    config: ReaderConfig,
}

impl Reader {
    /// Creates a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Wiki URL of an entry.
    pub fn url_for(&self, number: EntryNumber) -> String {
        number.url(&self.config.base_url)
    }

    /// Extracts an entry from page markup.
    pub fn parse(&self, html: &str) -> Result<Entry> {
        self.parse_page(html, None)
    }

    /// Extracts an entry from page markup fetched from `url`.
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Entry> {
        self.parse_page(html, Some(url.to_string()))
    }

    fn parse_page(&self, html: &str, source_url: Option<String>) -> Result<Entry> {
        let doc = Document::parse(html);
        let fragments = extract_content(&doc, &self.config.extract)?;
        Ok(Entry::new(fragments, doc.title(), source_url))
    }

    /// Fetches and extracts an entry from the wiki.
    #[cfg(feature = "fetch")]
    pub async fn fetch(&self, number: EntryNumber) -> Result<Entry> {
        let url = self.url_for(number);
        let html = fetch_url(&url, &self.config.fetch).await?;
        self.parse_with_url(&html, &url)
    }

    /// Wraps a document to the configured width.
    pub fn layout(&self, text: &str) -> String {
        wrap_lines(text, self.config.text.line_width)
    }

    /// Wraps and indents a document for a terminal `terminal_width` columns wide.
    pub fn display(&self, text: &str, terminal_width: Option<usize>) -> String {
        self.config.text.display(&self.layout(text), terminal_width)
    }

    /// A `=` rule as wide as the text, indented like it.
    pub fn separator(&self, terminal_width: Option<usize>) -> String {
        self.config.text.display(&"=".repeat(self.config.text.line_width), terminal_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScpError;

    #[test]
    fn test_builder() {
        let config = ReaderConfig::builder()
            .line_width(60)
            .centered(false)
            .indentation(2)
            .quote_width(50)
            .frame_padding(1)
            .timeout(5)
            .user_agent("test-agent")
            .base_url("http://localhost:9000")
            .build();

        assert_eq!(config.text.line_width, 60);
        assert!(!config.text.centered);
        assert_eq!(config.text.indentation, 2);
        assert_eq!(config.extract.quote_width, 50);
        assert_eq!(config.extract.frame_padding, 1);
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_defaults() {
        let config = ReaderConfig::default();
        assert_eq!(config.text.line_width, 90);
        assert!(config.text.centered);
        assert_eq!(config.extract.quote_width, 84);
        assert_eq!(config.base_url, "https://scp-wiki.wikidot.com");
    }

    #[test]
    fn test_url_for() {
        let reader = Reader::new();
        assert_eq!(reader.url_for(EntryNumber::new(5).unwrap()), "https://scp-wiki.wikidot.com/scp-005");
    }

    #[test]
    fn test_parse_with_url() {
        let html = r#"<html><head><title>SCP-096</title></head><body><div id="page-content"><p>Item #: SCP-096</p></div></body></html>"#;
        let entry = Reader::new().parse_with_url(html, "https://scp-wiki.wikidot.com/scp-096").unwrap();
        assert_eq!(entry.source_url.as_deref(), Some("https://scp-wiki.wikidot.com/scp-096"));
        assert_eq!(entry.title.as_deref(), Some("SCP-096"));
        assert_eq!(entry.number.map(EntryNumber::get), Some(96));
    }

    #[test]
    fn test_parse_missing_page() {
        let html = r#"<div id="page-content"><p>The page <em>scp-7998</em> does not exist.</p><span>This page doesn't exist.</span></div>"#;
        assert!(matches!(Reader::new().parse(html), Err(ScpError::MissingPage)));
    }

    #[test]
    fn test_display_and_separator() {
        let reader = Reader::with_config(ReaderConfig::builder().line_width(10).build());
        assert_eq!(reader.display("one two three", Some(20)), "     one two\n     three\n");
        assert_eq!(reader.separator(Some(20)), "     ==========");
        assert_eq!(reader.separator(None), "==========");
    }
}
