use criterion::{Criterion, black_box, criterion_group, criterion_main};
use scp_reader_core::{Document, ExtractConfig, Reader, extract_content, normalize_block, wrap_lines};

fn fixture() -> String {
    std::fs::read_to_string("../../tests/fixtures/scp-173.html").unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let html = fixture();

    c.bench_function("parse", |b| b.iter(|| Document::parse(black_box(&html))));
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture();
    let reader = Reader::new();

    c.bench_function("full_extraction", |b| b.iter(|| reader.parse(black_box(&html))));
}

fn bench_block_extraction(c: &mut Criterion) {
    let html = fixture();
    let doc = Document::parse(&html);
    let config = ExtractConfig::default();

    c.bench_function("block_extraction", |b| {
        b.iter(|| extract_content(black_box(&doc), black_box(&config)))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let block = r#"<p><strong>Description:</strong> It is <em>extremely</em> hostile&nbsp;— see note.<sup class="footnoteref"><a class="footnoteref">1</a></sup></p>"#;

    c.bench_function("normalize_block", |b| b.iter(|| normalize_block(black_box(block))));
}

fn bench_wrap(c: &mut Criterion) {
    let reader = Reader::new();
    let text = reader.parse(&fixture()).unwrap().text;

    c.bench_function("wrap_lines", |b| b.iter(|| wrap_lines(black_box(&text), 90)));
}

criterion_group!(
    benches,
    bench_parse,
    bench_full_extraction,
    bench_block_extraction,
    bench_normalize,
    bench_wrap
);
criterion_main!(benches);
