//! Resumable parser contract and the decoder harness that drives it.
//!
//! A grammar production in progress is a *partial parser*: a small value that accepts one [`SimpleToken`] at a
//! time and answers with a [`ParseResult`]. The answer says whether the production continues (possibly as a
//! different parser), completed, or was rejected, and whether the offered token was consumed.
//!
//! [`GrammarDecoder`] owns at most one active partial parser and implements the stream rules shared by every
//! grammar:
//! - a token that was not consumed is offered again, to the next parser or back to the grammar;
//! - a rejected production is replayed downstream as plain simple tokens;
//! - a non-simple (already reduced) token or the end of the stream finalizes the active parser.
//!
//! ## Notes
//! - [`PartialParser::accept`] and [`PartialParser::finish`] take `self` by value. A parser that returned a token
//!   or a failure has been moved into that result, so it cannot be used again:
//!
//! ```rust,compile_fail
//! use promptkit_syntax::SimpleToken;
//! use promptkit_syntax::parser_base::PartialParser;
//!
//! fn reuse<P: PartialParser>(parser: P, token: &SimpleToken) {
//!     let _ = parser.accept(token);
//!     let _ = parser.accept(token);
//! }
//! ```

use crate::diagnostics::{SyntaxError, SyntaxResult};
use crate::tokens::{BaseToken, SimpleToken, Token};

/// How many times one token may be handed back without being consumed before the decoder gives up.
pub const MAX_REOFFERS: usize = 64;

/// Answer of a partial parser to one offered token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<P, T> {
    /// The production is still open. `parser` is the same production or the one it turned into.
    Continue { parser: P, consumed: bool },
    /// The production completed.
    Done { token: T, consumed: bool },
    /// The production was rejected; `tokens` are everything it had accumulated. The offered token is never part of
    /// a failure and must be offered again by the caller.
    Failure { tokens: Vec<SimpleToken> },
}

impl<P, T> ParseResult<P, T> {
    pub fn map_parser<Q>(self, f: impl FnOnce(P) -> Q) -> ParseResult<Q, T> {
        match self {
            ParseResult::Continue { parser, consumed } => ParseResult::Continue {
                parser: f(parser),
                consumed,
            },
            ParseResult::Done { token, consumed } => ParseResult::Done { token, consumed },
            ParseResult::Failure { tokens } => ParseResult::Failure { tokens },
        }
    }

    pub fn map_token<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<P, U> {
        match self {
            ParseResult::Continue { parser, consumed } => ParseResult::Continue { parser, consumed },
            ParseResult::Done { token, consumed } => ParseResult::Done {
                token: f(token),
                consumed,
            },
            ParseResult::Failure { tokens } => ParseResult::Failure { tokens },
        }
    }
}

/// What an open production turns into at the end of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finished<T> {
    Token(T),
    /// Not a complete production: emit these verbatim.
    Plain(Vec<SimpleToken>),
}

impl<T> Finished<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Finished<U> {
        match self {
            Finished::Token(token) => Finished::Token(f(token)),
            Finished::Plain(tokens) => Finished::Plain(tokens),
        }
    }
}

/// A resumable grammar production.
pub trait PartialParser: Sized {
    type Output;

    /// Offer the next token.
    ///
    /// ## Errors
    /// - A [`SyntaxError`] when assembling a finished token breaks a token-model contract. Malformed input is a
    ///   [`ParseResult::Failure`], never an error.
    fn accept(self, token: &SimpleToken) -> SyntaxResult<ParseResult<Self, Self::Output>>;

    /// Finalize at the end of the stream (or before a token the grammar cannot see).
    ///
    /// ## Errors
    /// - Same as [`PartialParser::accept`].
    fn finish(self) -> SyntaxResult<Finished<Self::Output>>;
}

/// Stream facts available when deciding whether a token opens a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartContext {
    /// `true` at stream start or right after an emitted token whose text ends in whitespace.
    pub at_boundary: bool,
}

/// A grammar: decides which tokens open a production.
pub trait Grammar {
    type Output: Into<Token>;
    type Parser: PartialParser<Output = Self::Output>;

    /// Open a production seeded with `token` (which then counts as consumed), or return `None` to pass the token
    /// through as plain text.
    fn start(&mut self, token: &SimpleToken, ctx: &StartContext) -> Option<Self::Parser>;
}

/// One stage of a token pipeline.
pub trait Decoder {
    /// Feed one token, appending whatever it completes to `out`.
    ///
    /// ## Errors
    /// - Propagates contract violations from the grammar.
    fn push(&mut self, token: Token, out: &mut Vec<Token>) -> SyntaxResult<()>;

    /// Signal the end of the stream, appending the remaining output to `out`.
    ///
    /// ## Errors
    /// - Same as [`Decoder::push`].
    fn end(&mut self, out: &mut Vec<Token>) -> SyntaxResult<()>;

    /// Decode a whole token sequence.
    ///
    /// ## Errors
    /// - Same as [`Decoder::push`].
    fn decode_all<I>(mut self, tokens: I) -> SyntaxResult<Vec<Token>>
    where
        Self: Sized,
        I: IntoIterator<Item = Token>,
    {
        let mut out = Vec::new();
        for token in tokens {
            self.push(token, &mut out)?;
        }
        self.end(&mut out)?;
        Ok(out)
    }
}

/// Decoder harness driving a [`Grammar`] over a token stream.
pub struct GrammarDecoder<G: Grammar> {
    grammar: G,
    active: Option<G::Parser>,
    at_boundary: bool,
}

impl<G: Grammar> GrammarDecoder<G> {
    pub fn new(grammar: G) -> Self {
        Self {
            grammar,
            active: None,
            at_boundary: true,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    fn offer(&mut self, token: SimpleToken, out: &mut Vec<Token>) -> SyntaxResult<()> {
        for _ in 0..MAX_REOFFERS {
            let Some(parser) = self.active.take() else {
                let ctx = StartContext {
                    at_boundary: self.at_boundary,
                };
                match self.grammar.start(&token, &ctx) {
                    Some(parser) => self.active = Some(parser),
                    None => self.emit(token.into(), out),
                }
                return Ok(());
            };

            match parser.accept(&token)? {
                ParseResult::Continue { parser, consumed } => {
                    self.active = Some(parser);
                    if consumed {
                        return Ok(());
                    }
                }
                ParseResult::Done { token: done, consumed } => {
                    self.emit(done.into(), out);
                    if consumed {
                        return Ok(());
                    }
                }
                ParseResult::Failure { tokens } => {
                    tracing::trace!(count = tokens.len(), at = %token.range(), "replaying rejected tokens");
                    self.replay(tokens, out);
                }
            }
        }
        Err(SyntaxError::Stalled {
            text: token.text(),
            range: token.range(),
            attempts: MAX_REOFFERS,
        })
    }

    fn finish_active(&mut self, out: &mut Vec<Token>) -> SyntaxResult<()> {
        let Some(parser) = self.active.take() else {
            return Ok(());
        };
        match parser.finish()? {
            Finished::Token(token) => self.emit(token.into(), out),
            Finished::Plain(tokens) => self.replay(tokens, out),
        }
        Ok(())
    }

    fn replay(&mut self, tokens: Vec<SimpleToken>, out: &mut Vec<Token>) {
        for token in tokens {
            self.emit(token.into(), out);
        }
    }

    fn emit(&mut self, token: Token, out: &mut Vec<Token>) {
        self.at_boundary = ends_with_whitespace(&token);
        out.push(token);
    }
}

impl<G: Grammar + Default> Default for GrammarDecoder<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}

fn ends_with_whitespace(token: &Token) -> bool {
    match token {
        Token::Simple(simple) => simple.is_whitespace(),
        other => other.text().chars().next_back().is_some_and(char::is_whitespace),
    }
}

impl<G: Grammar> Decoder for GrammarDecoder<G> {
    fn push(&mut self, token: Token, out: &mut Vec<Token>) -> SyntaxResult<()> {
        match token {
            Token::Simple(simple) => self.offer(simple, out),
            other => {
                self.finish_active(out)?;
                self.emit(other, out);
                Ok(())
            }
        }
    }

    fn end(&mut self, out: &mut Vec<Token>) -> SyntaxResult<()> {
        self.finish_active(out)
    }
}

/// Decoders chained so that each stage consumes the previous stage's output.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Decoder>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stage(mut self, stage: impl Decoder + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    fn feed(&mut self, from: usize, tokens: Vec<Token>, out: &mut Vec<Token>) -> SyntaxResult<()> {
        let mut current = tokens;
        for stage in &mut self.stages[from..] {
            let mut next = Vec::with_capacity(current.len());
            for token in current {
                stage.push(token, &mut next)?;
            }
            current = next;
        }
        out.extend(current);
        Ok(())
    }
}

impl Decoder for Pipeline {
    fn push(&mut self, token: Token, out: &mut Vec<Token>) -> SyntaxResult<()> {
        self.feed(0, vec![token], out)
    }

    fn end(&mut self, out: &mut Vec<Token>) -> SyntaxResult<()> {
        for index in 0..self.stages.len() {
            let mut flushed = Vec::new();
            self.stages[index].end(&mut flushed)?;
            self.feed(index + 1, flushed, out)?;
        }
        Ok(())
    }
}
