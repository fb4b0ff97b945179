//! Syntax frontend for prompt files: token model, simple codec, and the incremental decoders that reduce a flat
//! token stream into front-matter records, markdown links/comments and chat-prompt references.
//!
//! The decoders are resumable: each in-progress grammar production is a small partial parser that accepts one
//! token at a time, so the same state machines work for a streaming (chunked) source and for a whole document.
//!
//! ## Notes
//! - Malformed user input never errors: rejected productions are replayed as plain tokens.
//! - [`diagnostics::SyntaxError`] is reserved for contract violations (impossible ranges, non-boolean booleans,
//!   a grammar that stops consuming input). These indicate a bug, not a bad document.
//! - Vocabulary (symbols, literals, triggers) comes from `promptkit_core::lang` registries.
//!
//! ## Examples
//! ```rust,no_run
//! use promptkit_syntax::{ParseOptions, parse_document};
//!
//! let text = "---\ndescription: 'Explain code'\n---\nExplain #file:./main.rs to @workspace\n";
//! let document = parse_document(text, &ParseOptions::default()).unwrap();
//! assert!(document.header().is_some());
//! assert_eq!(document.render(), text);
//! ```

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod front_matter;
pub mod markdown;
pub mod markdown_extensions;
pub mod metadata;
pub mod parser_base;
pub mod prompt;
pub mod simple_codec;
pub mod tokens;

pub use config::ParseOptions;
pub use diagnostics::{SyntaxError, SyntaxResult};
pub use document::{PromptDocument, PromptStream, TokenSummary, parse_document};
pub use tokens::{BaseToken, Range, SimpleToken, Token};
