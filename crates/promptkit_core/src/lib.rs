//! Provide the canonical vocabulary shared by the promptkit tokenizer, decoders and tooling.
//!
//! This crate is intentionally small and dependency-free. It contains the registries that both:
//! - the simple codec uses to classify characters into tokens, and
//! - the front-matter, markdown and chat-prompt grammars use to decide which symbols start, stop or invalidate a
//!   production.
//!
//! ## Notes
//!
//! - This is a "vocabulary core" crate: **no IO**, no global state, and no token types.
//! - Grammars enforce syntax; registries only answer "what is this character/word".

pub mod lang;
