//! Golden snapshot of a decoded prompt document
//!
//! Run with: `cargo test --test snapshot_tests`
//! Review changes: `cargo insta review`

use promptkit::{ParseOptions, parse_document};

fn listing(source: &str) -> String {
    let document = parse_document(source, &ParseOptions::default()).expect("decoding failed");
    document
        .summaries(32)
        .iter()
        .map(|summary| format!("{} {} {:?}", summary.range, summary.kind, summary.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_document_listing() {
    let listing = listing("---\nmode: ask\n---\nSee [docs](./a.md) #file:b.md @ws\n");
    insta::assert_snapshot!("document_listing", listing);
}
