//! Simple codec: raw text to a flat stream of [`SimpleToken`]s.
//!
//! Every character listed in the `promptkit_core::lang::symbols` registry becomes its own one-column token; runs
//! of any other characters become `Word` tokens. The codec is streaming: text can arrive in arbitrary chunks and a
//! word split across a chunk boundary still comes out as one token.
//!
//! ## Notes
//! - `\n` ends the line: the next token starts on the following line at column 1.
//! - `\r` is an ordinary `CarriageReturn` token and does not advance the line, so `\r\n` is two tokens on one line.
//! - Columns count Unicode scalar values, not bytes.

use promptkit_core::lang::symbols::{self, SymbolId};

use crate::tokens::{Range, SimpleToken};

/// Streaming tokenizer state.
#[derive(Debug, Clone)]
pub struct SimpleDecoder {
    line: usize,
    column: usize,
    word: String,
    word_start: usize,
}

impl Default for SimpleDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleDecoder {
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            word: String::new(),
            word_start: 1,
        }
    }

    /// Feed a chunk of text, returning every token it completes.
    ///
    /// A trailing word is held back until the next symbol (or [`SimpleDecoder::end`]) because the next chunk may
    /// continue it.
    pub fn write(&mut self, chunk: &str) -> Vec<SimpleToken> {
        let mut out = Vec::new();
        for c in chunk.chars() {
            match symbols::from_char(c) {
                Some(id) => {
                    self.flush_word(&mut out);
                    out.push(SimpleToken::symbol(
                        id,
                        Range::new(self.line, self.column, self.line, self.column + 1),
                    ));
                    if id == SymbolId::NewLine {
                        self.line += 1;
                        self.column = 1;
                    } else {
                        self.column += 1;
                    }
                }
                None => {
                    if self.word.is_empty() {
                        self.word_start = self.column;
                    }
                    self.word.push(c);
                    self.column += 1;
                }
            }
        }
        out
    }

    /// Flush the pending word at end of input.
    pub fn end(&mut self) -> Vec<SimpleToken> {
        let mut out = Vec::new();
        self.flush_word(&mut out);
        out
    }

    fn flush_word(&mut self, out: &mut Vec<SimpleToken>) {
        if self.word.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.word);
        out.push(SimpleToken::word(
            text,
            Range::new(self.line, self.word_start, self.line, self.column),
        ));
    }
}

/// Tokenize a whole document.
#[tracing::instrument(skip_all, fields(len = text.len()))]
pub fn tokenize(text: &str) -> Vec<SimpleToken> {
    let mut decoder = SimpleDecoder::new();
    let mut tokens = decoder.write(text);
    tokens.extend(decoder.end());
    tracing::trace!(count = tokens.len(), "tokenized");
    tokens
}
