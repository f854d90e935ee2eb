//! Inline markup normalization for a single block.
//!
//! A block's serialized markup is rewritten before its text is taken:
//! emphasis becomes `*...*`, typographic glyphs become ASCII and footnote
//! references become `^[<label>]`.

use lol_html::html_content::ContentType;
use scraper::{ElementRef, Html};

/// Glyph substitutions applied to serialized markup.
const REPLACEMENTS: [(&str, &str); 4] = [("&nbsp;", " "), ("\u{a0}", " "), ("¦", "|"), ("—", "--")];

/// Normalizes one block and returns `"\n{text}\n"`, or an empty string when
/// the block has no visible text.
///
/// ```rust
/// use scp_reader_core::normalize_block;
///
/// assert_eq!(normalize_block("<p>Hello<em>world</em></p>"), "\nHello*world*\n");
/// assert_eq!(normalize_block("<p>   </p>"), "");
/// ```
pub fn normalize_block(html: &str) -> String {
    match visible_text(html) {
        Some(text) => format!("\n{}\n", text),
        None => String::new(),
    }
}

/// Normalized visible text of a block, `None` when it is blank.
pub fn visible_text(html: &str) -> Option<String> {
    let cleaned = substitute_glyphs(&rewrite_emphasis(html));
    let fragment = Html::parse_fragment(&cleaned);

    let mut text = String::new();
    collect_text(fragment.root_element(), None, &mut text);

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Replace `<em>` start and end tags with asterisks, keeping their content
fn rewrite_emphasis(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("em", |el| {
                el.before("*", ContentType::Text);
                el.after("*", ContentType::Text);
                el.remove_and_keep_content();
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    match rewriter.write(html.as_bytes()) {
        Ok(_) => {}
        Err(_) => return html.replace("<em>", "*").replace("</em>", "*"),
    }

    match rewriter.end() {
        Ok(_) => {}
        Err(_) => return html.replace("<em>", "*").replace("</em>", "*"),
    }

    if output.is_empty() { html.to_string() } else { output }
}

fn substitute_glyphs(html: &str) -> String {
    REPLACEMENTS
        .iter()
        .fold(html.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Concatenate text nodes, writing `^[label]` in place of the footnote anchor
fn collect_text<'a>(element: ElementRef<'a>, anchor: Option<ElementRef<'a>>, out: &mut String) {
    if anchor == Some(element) {
        let label: String = element.text().collect();
        out.push_str(&format!("^[{}]", label));
        return;
    }

    let anchor = if is_footnote_ref(element) { first_link(element) } else { anchor };

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, anchor, out);
        }
    }
}

fn is_footnote_ref(element: ElementRef<'_>) -> bool {
    let value = element.value();
    value.name() == "sup" && value.classes().any(|c| c == "footnoteref")
}

fn first_link(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}
