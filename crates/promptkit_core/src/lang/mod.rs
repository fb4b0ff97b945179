//! promptkit vocabulary registries.
//!
//! This module is the "front door" for the fixed alphabet the decoders consume: single-character symbols,
//! front-matter literals, chat-prompt reference triggers and the known prompt header fields.
//!
//! The design goal is to avoid stringly-typed checks scattered across the grammars. Callers work with
//! **stable IDs** (e.g. `SymbolId`, `ReferenceKind`) and look up spellings/metadata via registry tables.
//!
//! ## Examples
//! ```rust
//! use promptkit_core::lang::symbols::{self, SymbolId};
//!
//! assert_eq!(symbols::from_char(':'), Some(SymbolId::Colon));
//! assert_eq!(symbols::as_char(SymbolId::Dash), '-');
//! assert_eq!(symbols::from_char('a'), None);
//! ```

pub mod front_matter;
pub mod header_fields;
pub mod prompt;
pub mod registry;
pub mod symbols;
