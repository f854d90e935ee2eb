//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! an entry page and walking the parts of its tree the extractor cares about.
//!
//! # Example
//!
//! ```rust
//! use scp_reader_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div id="page-content"><p>Item #: SCP-173</p></div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert!(doc.page_content().is_some());
//! assert!(!doc.is_missing_page());
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{Result, ScpError};

/// Text the wiki renders in place of an entry that has not been written.
pub const MISSING_PAGE_TEXT: &str = "This page doesn't exist.";

/// Represents a parsed entry page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML page.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the raw HTML representation.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ScpError::InvalidSelector`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(Element::new).collect())
    }

    /// Gets the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    /// Whether the wiki served its "page doesn't exist" stub.
    pub fn is_missing_page(&self) -> bool {
        let Ok(spans) = self.select("span") else {
            return false;
        };
        spans.iter().any(|span| span.text().trim() == MISSING_PAGE_TEXT)
    }

    /// The entry body, `div#page-content`.
    pub fn page_content(&'_ self) -> Option<Element<'_>> {
        self.select("div#page-content").ok()?.into_iter().next()
    }
}

/// A wrapper around scraper's ElementRef for class-aware navigation.
///
/// # Example
///
/// ```rust
/// use scp_reader_core::parse::Document;
///
/// let html = r#"<div id="page-content"><img class="image fillwidth" src="a.jpg" alt="A"></div>"#;
/// let doc = Document::parse(html);
/// let images = doc.select("img").unwrap();
/// let img = &images[0];
///
/// assert!(img.has_class("image"));
/// assert_eq!(img.attr("src"), Some("a.jpg"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The underlying scraper handle.
    pub fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the outer HTML of this element.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenated text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text nodes of this element joined by `separator`.
    pub fn text_with_separator(&self, separator: &str) -> String {
        self.element.text().collect::<Vec<_>>().join(separator)
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    pub fn is(&self, tag: &str) -> bool {
        self.element.value().name().eq_ignore_ascii_case(tag)
    }

    /// Iterates the whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.element.value().classes()
    }

    /// Whether the `class` attribute carries exactly this token.
    pub fn has_class(&self, token: &str) -> bool {
        self.classes().any(|c| c == token)
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.element.children().filter_map(ElementRef::wrap).map(Element::new)
    }

    /// Descendant elements in document order, excluding this element.
    pub fn descendant_elements(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.element.descendants().skip(1).filter_map(ElementRef::wrap).map(Element::new)
    }

    /// Ancestor elements from the parent outwards.
    pub fn ancestor_elements(&self) -> impl Iterator<Item = Element<'a>> + 'a {
        self.element.ancestors().filter_map(ElementRef::wrap).map(Element::new)
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`ScpError::InvalidSelector`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(Element::new).collect())
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScpError::InvalidSelector(format!("{}: {}", selector, e)))
}
