//! # Error Handling for Parser Combinators
//!
//! Combinators that shape what a failed parse reports: statement-level
//! recovery that logs an error and resynchronizes, user-facing labels, and
//! parsers that always fail with a chosen message.

use std::marker::PhantomData;

use super::context::ParseContext;
use super::core::{ParseResult, Parser, TokenValue};
use crate::error::ParseError;
use crate::token::{first_pos, Token};

/// Recover: Logs a failed unit and skips past it
///
/// `search` is a precondition checked without consuming; when it fails the
/// failure is returned so an enclosing alternation can try something else.
/// Otherwise `body` runs. A failed `body` is appended to the context's error
/// log and `skip_until` is tried at each following position; the parser then
/// reports everything up to the end of the first `skip_until` match as
/// consumed, or the whole input if nothing matched, and produces no tokens.
#[derive(Clone)]
pub struct Recover<S, B, K> {
    search: S,
    body: B,
    skip_until: K,
}

impl<S, B, K> Recover<S, B, K> {
    pub fn new(search: S, body: B, skip_until: K) -> Self {
        Self {
            search,
            body,
            skip_until,
        }
    }
}

impl<V, S, B, K> Parser<V> for Recover<S, B, K>
where
    V: TokenValue,
    S: Parser<V>,
    B: Parser<V>,
    K: Parser<V>,
{
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("recover", tokens, |ctx| {
            ctx.traced("precondition-check", tokens, |ctx| {
                self.search.parse(ctx, tokens)
            })?;

            let err = match ctx.traced("process", tokens, |ctx| self.body.parse(ctx, tokens)) {
                Ok(result) => return Ok(result),
                Err(err) => err,
            };
            tracing::debug!("recover: resynchronizing after {}", err);
            ctx.append_error(err, first_pos(tokens));

            ctx.traced("healing", tokens, |ctx| {
                for i in 0..tokens.len() {
                    if let Ok((consumed, _)) = self.skip_until.parse(ctx, &tokens[i..]) {
                        return Ok((i + consumed, Vec::new()));
                    }
                }
                Ok((tokens.len(), Vec::new()))
            })
        })
    }
}

/// Label: Reports any failure as `NotMatch` of a readable name
///
/// Matching is unaffected. The underlying error is replaced whatever its
/// kind, so a labelled rule never aborts an enclosing alternation.
#[derive(Clone)]
pub struct Label<P> {
    label: String,
    parser: P,
}

impl<P> Label<P> {
    pub fn new(label: impl Into<String>, parser: P) -> Self {
        Self {
            label: label.into(),
            parser,
        }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Label<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        self.parser
            .parse(ctx, tokens)
            .map_err(|_| ParseError::not_match(&self.label, "not matched", first_pos(tokens)))
    }
}

/// Expected: Always fails with a `NotMatch` carrying the message
#[derive(Clone)]
pub struct Expected<V> {
    message: String,
    _phantom: PhantomData<V>,
}

impl<V> Expected<V> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            _phantom: PhantomData,
        }
    }
}

impl<V> Parser<V> for Expected<V> {
    fn parse(&self, _ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        Err(ParseError::not_match(
            &self.message,
            "found something else",
            first_pos(tokens),
        ))
    }
}

/// Fail: Always fails with a `Critical` error, aborting enclosing
/// alternations
#[derive(Clone)]
pub struct Fail<V> {
    message: String,
    _phantom: PhantomData<V>,
}

impl<V> Fail<V> {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            _phantom: PhantomData,
        }
    }
}

impl<V> Parser<V> for Fail<V> {
    fn parse(&self, _ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        Err(ParseError::critical(&self.message, first_pos(tokens)))
    }
}
