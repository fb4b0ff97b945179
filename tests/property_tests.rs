//! Property-based tests for the decoders
//!
//! These tests use proptest to check invariants across many randomly generated inputs, with an alphabet biased
//! towards the symbols the grammars react to.

use promptkit::front_matter;
use promptkit::simple_codec::{SimpleDecoder, tokenize};
use promptkit::tokens::render;
use promptkit::{BaseToken, ParseOptions, PromptStream, SimpleToken, parse_document};
use proptest::prelude::*;

/// Text dense in markers, brackets, quotes, triggers and line breaks.
fn prompt_text() -> impl Strategy<Value = String> {
    "[-#@/${}\\[\\]()<>!:,'\" \t\r\nabcTRUEfals.é]{0,120}"
}

fn front_matter_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z-]{1,6}[ \t]{0,2}:[ \t]{0,2}[\\[\\]'\", a-zA-Z\t-]{0,16}", 0..6).prop_map(|lines| {
        lines.join("\n")
    })
}

fn is_placeholder(token: &SimpleToken) -> bool {
    token.text().is_empty()
}

proptest! {
    /// Property: the simple codec is lossless.
    #[test]
    fn tokenize_round_trips(text in prompt_text()) {
        prop_assert_eq!(render(&tokenize(&text), ""), text);
    }

    /// Property: splitting the input into two chunks does not change the tokens.
    #[test]
    fn tokenize_is_chunk_independent(text in prompt_text(), split in 0usize..=120) {
        let split = text.char_indices().map(|(i, _)| i).nth(split).unwrap_or(text.len());
        let mut decoder = SimpleDecoder::new();
        let mut tokens = decoder.write(&text[..split]);
        tokens.extend(decoder.write(&text[split..]));
        tokens.extend(decoder.end());
        prop_assert_eq!(tokens, tokenize(&text));
    }

    /// Property: decoding never fails on user input and renders back to the source.
    #[test]
    fn document_round_trips(text in prompt_text()) {
        let document = parse_document(&text, &ParseOptions::default()).unwrap();
        prop_assert_eq!(document.render(), text.clone());
        prop_assert_eq!(document.leaves(), tokenize(&text));
    }

    /// Property: front-matter records keep every source token.
    #[test]
    fn front_matter_round_trips(text in front_matter_text()) {
        let tokens = front_matter::decode(tokenize(&text)).unwrap();
        prop_assert_eq!(render(&tokens, ""), text.clone());
        let leaves: Vec<SimpleToken> = tokens
            .iter()
            .flat_map(BaseToken::leaves)
            .filter(|leaf| !is_placeholder(leaf))
            .collect();
        prop_assert_eq!(leaves, tokenize(&text));
    }

    /// Property: streaming in chunks yields the same tokens as decoding at once.
    #[test]
    fn stream_matches_whole_document(text in prompt_text(), size in 1usize..8) {
        let options = ParseOptions::default();
        let whole = parse_document(&text, &options).unwrap().into_tokens();
        let mut stream = PromptStream::new(&options);
        let mut tokens = Vec::new();
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(size) {
            tokens.extend(stream.write(&chunk.iter().collect::<String>()).unwrap());
        }
        tokens.extend(stream.finish().unwrap());
        prop_assert_eq!(tokens, whole);
    }
}

#[test]
fn empty_input_has_no_tokens() {
    let document = parse_document("", &ParseOptions::default()).unwrap();
    assert!(document.tokens().is_empty());
    assert!(tokenize("").is_empty());
}
