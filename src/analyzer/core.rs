//! # Core Parser Definitions
//!
//! This module defines the parser contract every combinator and leaf parser
//! implements. A parser receives the shared [`ParseContext`] and the remaining
//! token slice, and reports how many input tokens it consumed together with
//! the tokens it produced.

use std::fmt;
use std::rc::Rc;

use super::context::ParseContext;
use crate::error::ParseError;
use crate::token::Token;

/// Result type for parsing operations.
///
/// On success, returns the number of consumed input tokens and the newly
/// produced tokens. On failure, returns a ParseError.
pub type ParseResult<V> = Result<(usize, Vec<Token<V>>), ParseError>;

/// Bounds required of a grammar's token value type.
///
/// `Debug` renders values into the trace log, `PartialEq` drives the
/// transformation-safety check and `Default` fills raw input tokens.
pub trait TokenValue: Clone + fmt::Debug + PartialEq + Default + 'static {}

impl<T> TokenValue for T where T: Clone + fmt::Debug + PartialEq + Default + 'static {}

/// Parser trait defines the core parsing interface.
///
/// # Type Parameters
///
/// * `V` - The value type carried by tokens
pub trait Parser<V> {
    /// Attempts to parse the given tokens.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The context shared by every parser of one evaluation
    /// * `tokens` - The tokens left to parse, possibly empty
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V>;

    /// Erases the parser type so it can be shared inside a grammar.
    fn boxed(self) -> BoxedParser<V>
    where
        Self: Sized + 'static,
    {
        BoxedParser(Rc::new(self))
    }
}

impl<V, F> Parser<V> for F
where
    F: Fn(&mut ParseContext<V>, &[Token<V>]) -> ParseResult<V>,
{
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        self(ctx, tokens)
    }
}

/// A type-erased, cheaply clonable parser handle.
pub struct BoxedParser<V>(Rc<dyn Parser<V>>);

impl<V> Clone for BoxedParser<V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<V> Parser<V> for BoxedParser<V> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        self.0.parse(ctx, tokens)
    }

    fn boxed(self) -> BoxedParser<V> {
        self
    }
}

impl<V> fmt::Debug for BoxedParser<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedParser")
    }
}
