//! # Zero-Consumption Combinators
//!
//! Parsers that inspect the input ahead without consuming it.

use super::context::ParseContext;
use super::core::{ParseResult, Parser, TokenValue};
use crate::error::ParseError;
use crate::token::{first_pos, Token};

/// Lookahead: Succeeds without consuming iff the wrapped parser succeeds
///
/// Failures of the wrapped parser are returned unchanged.
#[derive(Clone)]
pub struct Lookahead<P> {
    parser: P,
}

impl<P> Lookahead<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Lookahead<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("lookahead", tokens, |ctx| {
            self.parser.parse(ctx, tokens)?;
            Ok((0, Vec::new()))
        })
    }
}

/// NotFollowedBy: Succeeds without consuming iff the wrapped parser fails
///
/// Any failure counts, unrecoverable ones included. A match is reported as
/// `NotMatch`.
#[derive(Clone)]
pub struct NotFollowedBy<P> {
    parser: P,
}

impl<P> NotFollowedBy<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for NotFollowedBy<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("not-followed-by", tokens, |ctx| match self.parser.parse(ctx, tokens) {
            Ok(_) => Err(ParseError::not_match(
                "not followed by",
                "matched",
                first_pos(tokens),
            )),
            Err(_) => Ok((0, Vec::new())),
        })
    }
}

/// Peek: Returns what the wrapped parser produces without consuming anything
#[derive(Clone)]
pub struct Peek<P> {
    parser: P,
}

impl<P> Peek<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Peek<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("peek", tokens, |ctx| {
            let (_, produced) = self.parser.parse(ctx, tokens)?;
            Ok((0, produced))
        })
    }
}
