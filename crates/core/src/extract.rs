//! Block classification and extraction of an entry body.
//!
//! The body's `blockquote`, `p`, `img` and `div` elements are visited in
//! document order. Each one is classified (see [`crate::classify`]) and
//! turned into zero or one [`Fragment`]. Identical paragraphs are emitted
//! once, since the wiki often repeats a block inside both a styled container
//! and plain layout.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::classify::{BlockKind, RegionExt, classify, is_visited};
use crate::entry::{Footnote, Fragment};
use crate::formatters::{DEFAULT_PADDING, create_frame, wrap_lines};
use crate::normalize::visible_text;
use crate::parse::{Document, Element};
use crate::{Result, ScpError};

/// Wrap width for quotation content, leaving room for the frame
pub const DEFAULT_QUOTE_WIDTH: usize = 84;

/// Configuration for content extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Column width quotation text is wrapped to before framing
    pub quote_width: usize,
    /// Spaces between a quotation frame and its text
    pub frame_padding: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { quote_width: DEFAULT_QUOTE_WIDTH, frame_padding: DEFAULT_PADDING }
    }
}

/// Pairing state of quotation blocks.
///
/// The first quote of a pair opens a group, the second one closes it and
/// the group is framed as a single block. Blocks between the two are emitted
/// as usual and do not close the group.
#[derive(Debug, Default)]
enum QuoteState {
    #[default]
    Idle,
    Collecting(Vec<String>),
}

struct Extractor<'c> {
    config: &'c ExtractConfig,
    fragments: Vec<Fragment>,
    seen: HashSet<String>,
    pending: QuoteState,
}

impl<'c> Extractor<'c> {
    fn new(config: &'c ExtractConfig) -> Self {
        Self { config, fragments: Vec::new(), seen: HashSet::new(), pending: QuoteState::Idle }
    }

    fn visit(&mut self, element: &Element<'_>) {
        if element.in_excluded_region() {
            trace!(tag = %element.tag_name(), "skipping block in excluded region");
            return;
        }

        let kind = classify(element);
        trace!(?kind, "classified block");

        match kind {
            BlockKind::Quote => self.quote(element),
            BlockKind::Image => self.image(element),
            BlockKind::AnomalyBar => self.anomaly_bar(element),
            BlockKind::FootnoteFooter => self.footnotes(element),
            BlockKind::GenericContainer => {}
            BlockKind::TextBlock => self.text_block(element),
        }
    }

    /// Emit a fragment; an open quotation group stays open until its closing quote
    fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Record `key`, returning false when it was already emitted
    fn first_sighting(&mut self, key: &str) -> bool {
        self.seen.insert(key.to_string())
    }

    fn quote(&mut self, element: &Element<'_>) {
        let mut lines = Vec::new();
        for paragraph in element.descendant_elements().filter(|el| el.is("p")) {
            if let Some(text) = visible_text(&paragraph.outer_html())
                && self.first_sighting(text.trim())
            {
                lines.push(format!("\n{}\n", text));
            }
        }

        match std::mem::take(&mut self.pending) {
            QuoteState::Idle => self.pending = QuoteState::Collecting(lines),
            QuoteState::Collecting(mut pending) => {
                pending.extend(lines);
                self.pending = QuoteState::Collecting(pending);
                self.flush_quote();
            }
        }
    }

    fn flush_quote(&mut self) {
        let QuoteState::Collecting(lines) = std::mem::take(&mut self.pending) else {
            return;
        };
        if lines.is_empty() {
            debug!("dropping quotation group without text");
            return;
        }

        let wrapped = wrap_lines(&lines.join("\n"), self.config.quote_width);
        let framed = create_frame(&wrapped, self.config.frame_padding);
        if !framed.is_empty() && self.first_sighting(&framed) {
            self.fragments.push(Fragment::QuoteBlock { text: framed });
        }
    }

    fn image(&mut self, element: &Element<'_>) {
        let Some(src) = element.attr("src").filter(|src| !src.is_empty()) else {
            return;
        };
        let fragment = Fragment::ImagePlaceholder {
            alt: element.attr("alt").unwrap_or_default().to_string(),
            src: src.to_string(),
        };
        if self.first_sighting(&fragment.render()) {
            self.push(fragment);
        }
    }

    fn anomaly_bar(&mut self, element: &Element<'_>) {
        let parts: Vec<String> = element
            .child_elements()
            .map(|child| child.text_with_separator(" ").trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        let text = collapse_whitespace(&parts.join(" "));
        if !text.is_empty() && self.first_sighting(&text) {
            self.push(Fragment::RawSeparator { text });
        }
    }

    fn footnotes(&mut self, element: &Element<'_>) {
        let entries = element
            .descendant_elements()
            .filter(|el| el.is("div") && el.has_class("footnote-footer"))
            .enumerate()
            .filter_map(|(index, footnote)| {
                let text = visible_text(&footnote.outer_html())?;
                let id = footnote
                    .attr("id")
                    .map(|id| id.strip_prefix("footnote-").unwrap_or(id).to_string())
                    .unwrap_or_else(|| (index + 1).to_string());
                Some(Footnote { id, text })
            })
            .collect();

        self.push(Fragment::FootnoteSection { entries });
    }

    fn text_block(&mut self, element: &Element<'_>) {
        if let Some(text) = visible_text(&element.outer_html())
            && self.first_sighting(text.trim())
        {
            self.push(Fragment::Paragraph { text });
        }
    }

    fn finish(mut self) -> Vec<Fragment> {
        self.flush_quote();
        self.fragments
    }
}

fn collapse_whitespace(text: &str) -> String {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    let runs = RUNS.get_or_init(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));
    runs.replace_all(text, " ").trim().to_string()
}

/// Extract fragments from an entry body (normally `div#page-content`).
///
/// This is a pure function of the tree: extracting twice yields the same fragments.
pub fn extract_fragments(root: &Element<'_>, config: &ExtractConfig) -> Vec<Fragment> {
    let mut extractor = Extractor::new(config);

    for element in root.descendant_elements().filter(is_visited) {
        extractor.visit(&element);
    }

    let fragments = extractor.finish();
    debug!(count = fragments.len(), "extracted fragments");
    fragments
}

/// Extract the fragments of a parsed entry page.
///
/// Fails with [`ScpError::MissingPage`] for the wiki's "page doesn't exist"
/// stub and with [`ScpError::NoContent`] when there is no body or nothing in it.
pub fn extract_content(doc: &Document, config: &ExtractConfig) -> Result<Vec<Fragment>> {
    if doc.is_missing_page() {
        return Err(ScpError::MissingPage);
    }

    let root = doc.page_content().ok_or(ScpError::NoContent)?;
    let fragments = extract_fragments(&root, config);

    if fragments.is_empty() { Err(ScpError::NoContent) } else { Ok(fragments) }
}
