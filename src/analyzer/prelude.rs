//! Everything needed to write a grammar: constructor functions for each
//! combinator, the `seq!`/`or!` macros, and the entry points.

use super::combinators::*;
use super::error_handling::{Expected, Fail, Label, Recover};
use super::lookahead::{Lookahead, NotFollowedBy, Peek};
use super::recursion::Lazy;

pub use super::context::ParseContext;
pub use super::core::{BoxedParser, ParseResult, Parser};
pub use crate::config::{OrMode, ParseConfig};
pub use crate::error::{ErrorKind, ParseError};
pub use crate::token::Token;
pub use super::context::{evaluate, evaluate_with_raw_tokens};
pub use super::recursion::alias;
pub use super::search::{find, find_iter, split, split_n};
pub use crate::{or, seq};

pub fn trace<P>(label: impl Into<String>, parser: P) -> Trace<P> {
    Trace::new(label, parser)
}

pub fn seq_with_label<V>(label: impl Into<String>, parsers: Vec<BoxedParser<V>>) -> Seq<V> {
    Seq::with_label(label, parsers)
}

#[track_caller]
pub fn or_with_mode<V>(mode: OrMode, parsers: Vec<BoxedParser<V>>) -> Or<V> {
    Or::with_mode(mode, parsers)
}

#[track_caller]
pub fn safe_or<V>(parsers: Vec<BoxedParser<V>>) -> Or<V> {
    Or::with_mode(OrMode::Safe, parsers)
}

#[track_caller]
pub fn fast_or<V>(parsers: Vec<BoxedParser<V>>) -> Or<V> {
    Or::with_mode(OrMode::Fast, parsers)
}

#[track_caller]
pub fn try_fast_or<V>(parsers: Vec<BoxedParser<V>>) -> Or<V> {
    Or::with_mode(OrMode::TryFast, parsers)
}

/// `max` of `None` repeats without bound.
pub fn repeat<P>(label: impl Into<String>, min: usize, max: Option<usize>, parser: P) -> Repeat<P> {
    Repeat::new(label, min, max, parser)
}

pub fn zero_or_more<P>(label: impl Into<String>, parser: P) -> Repeat<P> {
    Repeat::new(label, 0, None, parser)
}

pub fn one_or_more<P>(label: impl Into<String>, parser: P) -> Repeat<P> {
    Repeat::new(label, 1, None, parser)
}

pub fn optional<P>(parser: P) -> Optional<P> {
    Optional::new(parser)
}

#[track_caller]
pub fn trans<V, P, F>(parser: P, transform: F) -> Trans<P, F>
where
    P: Parser<V>,
    F: Fn(&mut ParseContext<V>, &[Token<V>]) -> Result<Vec<Token<V>>, ParseError>,
{
    Trans::new(parser, transform)
}

pub fn before<V, F>(predicate: F) -> Before<F, V>
where
    F: Fn(&Token<V>) -> bool,
{
    Before::new(predicate)
}

pub fn none() -> Empty {
    Empty::new(None)
}

/// Like [`none`], but recorded in the trace under `label`.
pub fn none_with_label(label: impl Into<String>) -> Empty {
    Empty::new(Some(label.into()))
}

pub fn eos() -> Eos {
    Eos
}

pub fn recover<S, B, K>(search: S, body: B, skip_until: K) -> Recover<S, B, K> {
    Recover::new(search, body, skip_until)
}

pub fn lookahead<P>(parser: P) -> Lookahead<P> {
    Lookahead::new(parser)
}

pub fn followed_by<P>(parser: P) -> Lookahead<P> {
    Lookahead::new(parser)
}

pub fn not_followed_by<P>(parser: P) -> NotFollowedBy<P> {
    NotFollowedBy::new(parser)
}

pub fn peek<P>(parser: P) -> Peek<P> {
    Peek::new(parser)
}

pub fn label<P>(label: impl Into<String>, parser: P) -> Label<P> {
    Label::new(label, parser)
}

pub fn expected<V>(message: impl Into<String>) -> Expected<V> {
    Expected::new(message)
}

pub fn fail<V>(message: impl Into<String>) -> Fail<V> {
    Fail::new(message)
}

pub fn lazy<F>(factory: F) -> Lazy<F> {
    Lazy::new(factory)
}
