//! # Parser Combinators
//!
//! This module implements the core combinators that build larger parsers out
//! of smaller ones. Every combinator speaks the same token-in, token-out
//! contract, so results of one are valid input for the next.
//!
//! ## Combinator Types
//!
//! * **Tracing**: `Trace` wraps any parser with the depth guard and trace log
//! * **Sequential Combinators**: `Seq`
//! * **Alternative Combinators**: `Or`, with the policy chosen by [`OrMode`]
//! * **Repetition Combinators**: `Repeat`, `Optional`
//! * **Transformation Combinators**: `Trans`
//! * **Utility Parsers**: `Before`, `Empty`, `Eos`

use std::marker::PhantomData;
use std::panic::Location;

use super::context::ParseContext;
use super::core::{BoxedParser, ParseResult, Parser, TokenValue};
use super::safety::reproduces_itself;
use super::trace::Diagnostic;
use crate::config::OrMode;
use crate::error::{ErrorKind, ParseError};
use crate::token::{end_pos, first_pos, Token};

/// Trace: Runs a parser under the depth guard and records it in the trace
/// log under `label`.
#[derive(Clone)]
pub struct Trace<P> {
    label: String,
    parser: P,
}

impl<P> Trace<P> {
    pub fn new(label: impl Into<String>, parser: P) -> Self {
        Self {
            label: label.into(),
            parser,
        }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Trace<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced(&self.label, tokens, |ctx| self.parser.parse(ctx, tokens))
    }
}

/// Seq: Applies parsers one after another
///
/// Each parser sees the tokens left by its predecessors, possibly none, so
/// zero-width parsers still run at the end of input. The first error aborts
/// the sequence. An error raised at the end of input without a position is
/// placed just past the last token; the tokens produced before it are kept in
/// the context as partial results.
#[derive(Clone)]
pub struct Seq<V> {
    label: String,
    parsers: Vec<BoxedParser<V>>,
}

impl<V> Seq<V> {
    pub fn new(parsers: Vec<BoxedParser<V>>) -> Self {
        Self::with_label("seq", parsers)
    }

    pub fn with_label(label: impl Into<String>, parsers: Vec<BoxedParser<V>>) -> Self {
        Self {
            label: label.into(),
            parsers,
        }
    }
}

impl<V: TokenValue> Parser<V> for Seq<V> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced(&self.label, tokens, |ctx| {
            let mut produced = Vec::with_capacity(self.parsers.len());
            let mut offset = 0;
            for parser in &self.parsers {
                let rest = &tokens[offset.min(tokens.len())..];
                ctx.partial_results.clear();
                match parser.parse(ctx, rest) {
                    Ok((consumed, new_tokens)) => {
                        produced.extend(new_tokens);
                        offset += consumed;
                    }
                    Err(mut err) => {
                        if err.pos.is_none() && rest.is_empty() {
                            err.pos = end_pos(tokens);
                        }
                        produced.append(&mut ctx.partial_results);
                        ctx.partial_results = produced;
                        return Err(err);
                    }
                }
            }
            Ok((offset, produced))
        })
    }
}

/// Or: Tries every alternative against the same input
///
/// Recoverable failures move on to the next alternative; an unrecoverable one
/// aborts the whole alternation. Which match wins depends on the mode: the
/// instance's own mode if one was given, else the context's.
#[derive(Clone)]
pub struct Or<V> {
    parsers: Vec<BoxedParser<V>>,
    mode: Option<OrMode>,
    location: &'static Location<'static>,
}

struct Candidate<V> {
    index: usize,
    consumed: usize,
    produced: Vec<Token<V>>,
}

impl<V> Or<V> {
    #[track_caller]
    pub fn new(parsers: Vec<BoxedParser<V>>) -> Self {
        Self {
            parsers,
            mode: None,
            location: Location::caller(),
        }
    }

    #[track_caller]
    pub fn with_mode(mode: OrMode, parsers: Vec<BoxedParser<V>>) -> Self {
        Self {
            parsers,
            mode: Some(mode),
            location: Location::caller(),
        }
    }
}

impl<V: TokenValue> Or<V> {
    fn parse_safe(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let mut errors = Vec::new();
        let mut best: Option<Candidate<V>> = None;
        for (index, parser) in self.parsers.iter().enumerate() {
            match parser.parse(ctx, tokens) {
                Ok((consumed, produced)) => {
                    if best.as_ref().map_or(true, |b| consumed > b.consumed) {
                        best = Some(Candidate {
                            index,
                            consumed,
                            produced,
                        });
                    }
                }
                Err(err) if err.is_recoverable() => errors.push(err),
                Err(err) => return Err(err),
            }
        }
        match best {
            Some(best) => Ok((best.consumed, best.produced)),
            None => Err(ParseError::join(errors, first_pos(tokens))),
        }
    }

    fn parse_fast(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let mut errors = Vec::new();
        for parser in &self.parsers {
            match parser.parse(ctx, tokens) {
                Ok(result) => return Ok(result),
                Err(err) if err.is_recoverable() => errors.push(err),
                Err(err) => return Err(err),
            }
        }
        Err(ParseError::join(errors, first_pos(tokens)))
    }

    fn parse_try_fast(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let mut errors = Vec::new();
        let mut first: Option<Candidate<V>> = None;
        let mut longest: Option<(usize, usize)> = None;
        for (index, parser) in self.parsers.iter().enumerate() {
            match parser.parse(ctx, tokens) {
                Ok((consumed, produced)) => {
                    if longest.map_or(true, |(_, c)| consumed > c) {
                        longest = Some((index, consumed));
                    }
                    if first.is_none() {
                        first = Some(Candidate {
                            index,
                            consumed,
                            produced,
                        });
                    }
                }
                Err(err) if err.is_recoverable() => errors.push(err),
                Err(err) => return Err(err),
            }
        }

        let Some(first) = first else {
            return Err(ParseError::join(errors, first_pos(tokens)));
        };
        if let Some((index, consumed)) = longest {
            if index != first.index || consumed != first.consumed {
                ctx.report(Diagnostic::OrReorder {
                    location: self.location.to_string(),
                    pos: first_pos(tokens),
                    chosen: first.index + 1,
                    chosen_consumed: first.consumed,
                    longest: index + 1,
                    longest_consumed: consumed,
                });
            }
        }
        Ok((first.consumed, first.produced))
    }
}

impl<V: TokenValue> Parser<V> for Or<V> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("or", tokens, |ctx| {
            match self.mode.unwrap_or(ctx.config.or_mode) {
                OrMode::Safe => self.parse_safe(ctx, tokens),
                OrMode::Fast => self.parse_fast(ctx, tokens),
                OrMode::TryFast => self.parse_try_fast(ctx, tokens),
            }
        })
    }
}

/// Repeat: Applies a parser between `min` and `max` times
///
/// Stops on `NotMatch`, at `max` matches, at the end of input, or after a
/// match that consumed nothing. Other errors propagate. Fewer than `min`
/// matches fail with `RepeatCount`.
#[derive(Clone)]
pub struct Repeat<P> {
    label: String,
    min: usize,
    /// None means unbounded
    max: Option<usize>,
    parser: P,
}

impl<P> Repeat<P> {
    pub fn new(label: impl Into<String>, min: usize, max: Option<usize>, parser: P) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            parser,
        }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Repeat<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced(&self.label, tokens, |ctx| {
            let mut produced = Vec::new();
            let mut offset = 0;
            let mut count = 0;
            while self.max.map_or(true, |max| count < max) && offset < tokens.len() {
                match self.parser.parse(ctx, &tokens[offset..]) {
                    Ok((consumed, new_tokens)) => {
                        produced.extend(new_tokens);
                        offset += consumed;
                        count += 1;
                        if consumed == 0 {
                            break;
                        }
                    }
                    Err(err) if err.is(ErrorKind::NotMatch) => break,
                    Err(err) => return Err(err),
                }
            }
            if count < self.min {
                return Err(ParseError::repeat_count(
                    &self.label,
                    self.min,
                    count,
                    first_pos(tokens),
                ));
            }
            Ok((offset, produced))
        })
    }
}

/// Optional: Runs a parser once, turning a recoverable failure into an empty
/// match
#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<V: TokenValue, P: Parser<V>> Parser<V> for Optional<P> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("optional", tokens, |ctx| match self.parser.parse(ctx, tokens) {
            Err(err) if err.is_recoverable() => Ok((0, Vec::new())),
            result => result,
        })
    }
}

/// Trans: Replaces the tokens a parser produced
///
/// The consumed count is kept. Transformed tokens should carry a type the
/// inner parser does not accept, otherwise re-parsing them can loop; the
/// optional safety check warns about the obvious cases.
#[derive(Clone)]
pub struct Trans<P, F> {
    parser: P,
    transform: F,
    location: &'static Location<'static>,
}

impl<P, F> Trans<P, F> {
    #[track_caller]
    pub fn new(parser: P, transform: F) -> Self {
        Self {
            parser,
            transform,
            location: Location::caller(),
        }
    }
}

impl<V, P, F> Parser<V> for Trans<P, F>
where
    V: TokenValue,
    P: Parser<V>,
    F: Fn(&mut ParseContext<V>, &[Token<V>]) -> Result<Vec<Token<V>>, ParseError>,
{
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let (consumed, produced) = self.parser.parse(ctx, tokens)?;
        let converted = (self.transform)(ctx, &produced)?;

        if ctx.config.or_mode == OrMode::Safe
            && ctx.config.check_transform_safety
            && reproduces_itself(&ctx.config, &self.parser, &converted)
        {
            ctx.report(Diagnostic::TransformLoop {
                pos: first_pos(&converted),
                message: format!(
                    "potential infinite loop in transformation at {} - parser produces same result when applied to transformed tokens",
                    self.location
                ),
            });
        }
        Ok((consumed, converted))
    }
}

/// Before: Consumes every token up to the first one satisfying the predicate
#[derive(Clone)]
pub struct Before<F, V> {
    predicate: F,
    _phantom: PhantomData<V>,
}

impl<F, V> Before<F, V> {
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            _phantom: PhantomData,
        }
    }
}

impl<F, V> Parser<V> for Before<F, V>
where
    V: TokenValue,
    F: Fn(&Token<V>) -> bool,
{
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("before", tokens, |_| {
            let end = tokens
                .iter()
                .position(|t| (self.predicate)(t))
                .unwrap_or(tokens.len());
            Ok((end, tokens[..end].to_vec()))
        })
    }
}

/// Empty: Always succeeds without consuming or producing anything
#[derive(Clone, Default)]
pub struct Empty {
    label: Option<String>,
}

impl Empty {
    pub fn new(label: Option<String>) -> Self {
        Self { label }
    }
}

impl<V: TokenValue> Parser<V> for Empty {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        match &self.label {
            Some(label) => ctx.traced(label, tokens, |_| Ok((0, Vec::new()))),
            None => Ok((0, Vec::new())),
        }
    }
}

/// Eos: Succeeds only when no tokens remain
#[derive(Clone, Default)]
pub struct Eos;

impl<V: TokenValue> Parser<V> for Eos {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("eos", tokens, |_| match tokens.first() {
            None => Ok((0, Vec::new())),
            Some(t) => Err(ParseError::not_match(
                "end of stream",
                format!("'{}'", t.raw),
                t.pos,
            )),
        })
    }
}
