//! Block classification for entry bodies.
//!
//! Only four tags matter to the extractor: `blockquote`, `p`, `img` and
//! `div`. Each visited element maps to one [`BlockKind`]; elements inside
//! page furniture are reported as excluded before classification.

use serde::Serialize;

use crate::parse::Element;

/// Tags the extractor visits, in any nesting.
pub const VISITED_TAGS: [&str; 4] = ["blockquote", "p", "img", "div"];

/// A region of page furniture whose contents never reach the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExcludedRegion {
    pub tag: &'static str,
    /// Every token must be present on the ancestor's `class` attribute.
    pub classes: &'static [&'static str],
}

/// Licensing box, rating widget, author credit and user avatar hover cards.
pub const EXCLUDED_REGIONS: [ExcludedRegion; 4] = [
    ExcludedRegion { tag: "div", classes: &["licensebox"] },
    ExcludedRegion { tag: "div", classes: &["page-rate-widget-box"] },
    ExcludedRegion { tag: "div", classes: &["authorlink-wrapper"] },
    ExcludedRegion { tag: "span", classes: &["printuser", "avatarhover"] },
];

impl ExcludedRegion {
    pub fn matches(&self, element: &Element<'_>) -> bool {
        element.is(self.tag) && self.classes.iter().all(|token| element.has_class(token))
    }
}

/// What a visited element contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// `blockquote`
    Quote,
    /// `img` carrying the `image` class
    Image,
    /// `div` with a class token containing `anom-bar`
    AnomalyBar,
    /// `div.footnotes-footer`
    FootnoteFooter,
    /// Any other `div`; its paragraphs are visited on their own
    GenericContainer,
    /// `p`, or an `img` without the `image` class
    TextBlock,
}

/// Capability check for "is this node inside page furniture".
pub trait RegionExt {
    /// Whether any ancestor matches one of [`EXCLUDED_REGIONS`].
    fn in_excluded_region(&self) -> bool;
}

impl RegionExt for Element<'_> {
    fn in_excluded_region(&self) -> bool {
        self.ancestor_elements()
            .any(|ancestor| EXCLUDED_REGIONS.iter().any(|region| region.matches(&ancestor)))
    }
}

/// Whether the extractor visits this element at all.
pub fn is_visited(element: &Element<'_>) -> bool {
    VISITED_TAGS.iter().any(|tag| element.is(tag))
}

/// Classify a visited element.
pub fn classify(element: &Element<'_>) -> BlockKind {
    if element.is("blockquote") {
        BlockKind::Quote
    } else if element.is("img") && element.has_class("image") {
        BlockKind::Image
    } else if element.is("div") {
        if element.classes().any(|c| c.contains("anom-bar")) {
            BlockKind::AnomalyBar
        } else if element.has_class("footnotes-footer") {
            BlockKind::FootnoteFooter
        } else {
            BlockKind::GenericContainer
        }
    } else {
        BlockKind::TextBlock
    }
}
