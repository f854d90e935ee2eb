//! Entry output type.
//!
//! An [`Entry`] is the ordered list of [`Fragment`]s extracted from one page
//! together with the plain-text document they render to.

use serde::Serialize;

use crate::Result;
use crate::entry_number::EntryNumber;

/// One `(id, text)` pair of a footnote section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footnote {
    pub id: String,
    pub text: String,
}

/// A unit of extracted output text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fragment {
    /// Normalized block text.
    Paragraph { text: String },
    /// A quotation group, already framed.
    QuoteBlock { text: String },
    /// An inline image reference.
    ImagePlaceholder { alt: String, src: String },
    /// The page's footnote list.
    FootnoteSection { entries: Vec<Footnote> },
    /// The object-class / risk banner.
    RawSeparator { text: String },
}

impl Fragment {
    /// Text this fragment contributes to the document.
    pub fn render(&self) -> String {
        match self {
            Fragment::Paragraph { text } | Fragment::QuoteBlock { text } | Fragment::RawSeparator { text } => {
                format!("\n{}\n", text)
            }
            Fragment::ImagePlaceholder { alt, src } => format!("\nIMAGE: ![{}]({})\n", alt, src),
            Fragment::FootnoteSection { entries } => {
                let mut out = String::from("\n**Footnotes**\n");
                for footnote in entries {
                    out.push('\n');
                    out.push_str(&footnote.text);
                    out.push('\n');
                }
                out
            }
        }
    }
}

/// Joins fragments in document order.
pub fn render_fragments(fragments: &[Fragment]) -> String {
    fragments.iter().map(Fragment::render).collect()
}

/// The complete result of reading an entry page.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// Identifier found in the extracted text.
    pub number: Option<EntryNumber>,

    /// Page `<title>`, if any.
    pub title: Option<String>,

    /// Source URL if known.
    pub source_url: Option<String>,

    /// Extracted fragments in document order.
    pub fragments: Vec<Fragment>,

    /// Unwrapped plain-text document.
    pub text: String,
}

impl Entry {
    /// Builds an entry, rendering the fragments and reading the identifier from the text.
    pub fn new(fragments: Vec<Fragment>, title: Option<String>, source_url: Option<String>) -> Self {
        let text = render_fragments(&fragments);
        let number = EntryNumber::find_in(&text);
        Self { number, title, source_url, fragments, text }
    }

    /// Wraps an already rendered document, such as a saved copy.
    pub fn from_text(text: String, number: Option<EntryNumber>) -> Self {
        let number = number.or_else(|| EntryNumber::find_in(&text));
        Self { number, title: None, source_url: None, fragments: Vec::new(), text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Word count of the plain-text document.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Gets the entry as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
