#![forbid(unsafe_code)]
//! promptkit: incremental decoding of prompt files.
//!
//! A prompt file is markdown with an optional YAML-like front-matter header and chat-prompt references
//! (`#file:…`, `@agent`, `/command`, `${input}`). This crate is the command-line facade; the decoders live in
//! `promptkit_syntax` and the shared vocabulary in `promptkit_core`.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//! - **True invariants**: Registry lookups that cannot fail use `.expect("INVARIANT: reason")`.

pub mod cli;

pub use promptkit_core::lang;
pub use promptkit_syntax::{
    BaseToken, ParseOptions, PromptDocument, PromptStream, Range, SimpleToken, SyntaxError, SyntaxResult, Token,
    TokenSummary, parse_document,
};
pub use promptkit_syntax::{front_matter, markdown, markdown_extensions, metadata, prompt, simple_codec, tokens};
