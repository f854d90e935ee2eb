//! Library API integration tests
use scp_reader_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_parse_api() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).expect("should parse");

    assert_eq!(entry.title.as_deref(), Some("SCP-173 - SCP Foundation"));
    assert_eq!(entry.number.map(EntryNumber::get), Some(173));
    assert!(!entry.is_empty());
    assert!(entry.source_url.is_none());
}

#[test]
fn test_parse_with_url() {
    let entry = Reader::new()
        .parse_with_url(&read_fixture("scp-173.html"), "https://scp-wiki.wikidot.com/scp-173")
        .expect("should parse");

    assert_eq!(entry.source_url.unwrap(), "https://scp-wiki.wikidot.com/scp-173");
}

#[test]
fn test_fragment_order() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();
    let kinds: Vec<&str> = entry
        .fragments
        .iter()
        .map(|fragment| match fragment {
            Fragment::Paragraph { .. } => "paragraph",
            Fragment::QuoteBlock { .. } => "quote",
            Fragment::ImagePlaceholder { .. } => "image",
            Fragment::FootnoteSection { .. } => "footnotes",
            Fragment::RawSeparator { .. } => "separator",
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            "separator",
            "image",
            "paragraph",
            "paragraph",
            "paragraph",
            "paragraph",
            "paragraph",
            "quote",
            "paragraph",
            "footnotes"
        ]
    );
}

#[test]
fn test_entry_text() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();
    let text = entry.text();

    assert!(text.starts_with("\nItem#: 173\n"));
    assert!(text.contains("\nIMAGE: ![SCP-173](https://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg)\n"));
    assert!(text.contains("\nObject Class: *Euclid*\n"));
    assert!(text.contains("at all times -- three personnel"));
    assert!(text.contains("It is extremely hostile.^[1]"));
    assert!(text.contains("\n**Footnotes**\n\n1. Contact with the object has been limited since 1995.\n"));
    assert_eq!(text.matches("Item #: SCP-173").count(), 1);
}

#[test]
fn test_page_furniture_is_dropped() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();
    let text = entry.text();

    for furniture in ["Main Site Navigation", "Rate this page", "+5000", "Cite this page", "Author page"] {
        assert!(!text.contains(furniture), "unexpected {:?} in output", furniture);
    }
}

#[test]
fn test_consecutive_quotes_share_a_frame() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();
    let quotes: Vec<&String> = entry
        .fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::QuoteBlock { text } => Some(text),
            _ => None,
        })
        .collect();

    assert_eq!(quotes.len(), 1);
    let frame = quotes[0];
    assert!(frame.starts_with("+-"));
    assert!(frame.ends_with("-+"));
    assert!(frame.contains("Note from Dr. Gears"));
    assert!(frame.contains("Addendum: The reddish brown substance"));
    assert_eq!(entry.text().matches("Note from Dr. Gears").count(), 1);
}

#[test]
fn test_layout_respects_width() {
    let reader = Reader::new();
    let entry = reader.parse(&read_fixture("scp-173.html")).unwrap();
    let laid_out = reader.layout(entry.text());

    assert!(laid_out.lines().all(|line| line.chars().count() <= 90));
    assert!(laid_out.ends_with('\n'));
}

#[test]
fn test_narrow_layout() {
    let reader = Reader::with_config(ReaderConfig::builder().line_width(40).quote_width(34).build());
    let entry = reader.parse(&read_fixture("scp-173.html")).unwrap();

    assert!(reader.layout(entry.text()).lines().all(|line| line.chars().count() <= 40));
}

#[test]
fn test_missing_page() {
    let result = Reader::new().parse(&read_fixture("missing.html"));
    assert!(matches!(result, Err(ScpError::MissingPage)));
}

#[test]
fn test_empty_content() {
    let result = Reader::new().parse(&read_fixture("empty_content.html"));
    assert!(matches!(result, Err(ScpError::NoContent)));
}

#[test]
fn test_extraction_is_deterministic() {
    let html = read_fixture("scp-173.html");
    let doc = Document::parse(&html);
    let config = ExtractConfig::default();

    let first = extract_content(&doc, &config).unwrap();
    let second = extract_content(&doc, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_entry_json() {
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();
    let json = entry.to_json().unwrap();

    assert!(json.is_object());
    assert_eq!(json["number"], 173);
    assert_eq!(json["fragments"][0]["kind"], "raw_separator");
    assert!(json["text"].as_str().unwrap().contains("Object Class"));
}

#[test]
fn test_archive_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = Archive::new(tmp.path().join("SCP"));
    let entry = Reader::new().parse(&read_fixture("scp-173.html")).unwrap();

    let path = archive.save(entry.text()).unwrap();
    assert!(path.ends_with("SCP-173.txt"));

    let number = EntryNumber::new(173).unwrap();
    assert!(archive.contains(number).unwrap());
    assert_eq!(archive.load(number).unwrap(), entry.text());
    assert_eq!(archive.saved_numbers().unwrap().into_iter().collect::<Vec<_>>(), vec![173]);
}

#[test]
fn test_fetch_file() {
    let html = fetch_file(&get_fixture_path("scp-173.html")).unwrap();
    assert!(html.contains("page-content"));
    assert!(matches!(fetch_file("nonexistent.html"), Err(ScpError::FileNotFound(_))));
}
