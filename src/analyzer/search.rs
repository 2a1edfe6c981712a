//! # Search Utilities
//!
//! Helpers for staged parsing: locate a parser's first match in a token
//! stream, or cut the stream into segments at every match of a separator.
//! Everything here runs through the ordinary parser contract, so the context's
//! trace and depth guard apply.

use std::fmt;

use super::context::ParseContext;
use super::core::{Parser, TokenValue};
use crate::token::Token;

/// First match found by [`find`].
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a, V> {
    /// Tokens before the match
    pub skipped: &'a [Token<V>],
    /// Tokens produced by the parser
    pub matched: Vec<Token<V>>,
    /// Input tokens consumed by the match
    pub consumed: usize,
    /// Tokens after the match
    pub remained: &'a [Token<V>],
}

/// Tries `parser` at each position from the left and returns the first match.
pub fn find<'a, V, P>(
    ctx: &mut ParseContext<V>,
    parser: &P,
    tokens: &'a [Token<V>],
) -> Option<Match<'a, V>>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    find_from(ctx, parser, tokens, false)
}

/// With `progress` set, a match that consumes nothing at the very start is
/// passed over so that repeated searches always advance.
fn find_from<'a, V, P>(
    ctx: &mut ParseContext<V>,
    parser: &P,
    tokens: &'a [Token<V>],
    progress: bool,
) -> Option<Match<'a, V>>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    for i in 0..tokens.len() {
        if let Ok((consumed, matched)) = parser.parse(ctx, &tokens[i..]) {
            if progress && i + consumed == 0 {
                continue;
            }
            let end = (i + consumed).min(tokens.len());
            return Some(Match {
                skipped: &tokens[..i],
                matched,
                consumed,
                remained: &tokens[end..],
            });
        }
    }
    None
}

/// One piece of a split token stream.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment<'a, V> {
    /// Tokens before the separator
    pub skipped: &'a [Token<V>],
    /// What the separator produced; `None` for the final segment
    pub separator: Option<Vec<Token<V>>>,
    pub last: bool,
}

/// Lazily yields the segments of a token stream, see [`find_iter`].
pub struct FindIter<'a, 'c, V, P: ?Sized> {
    ctx: &'c mut ParseContext<V>,
    separator: &'c P,
    rest: &'a [Token<V>],
    /// Segments left before the remainder is folded into a final one
    limit: Option<usize>,
    started: bool,
    done: bool,
}

impl<'a, 'c, V, P> Iterator for FindIter<'a, 'c, V, P>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    type Item = Segment<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || (!self.started && self.rest.is_empty()) {
            self.done = true;
            return None;
        }
        self.started = true;

        let fold = self.limit == Some(1) || self.rest.is_empty();
        let found = if fold {
            None
        } else {
            find_from(self.ctx, self.separator, self.rest, true)
        };

        match found {
            Some(m) => {
                self.rest = m.remained;
                self.limit = self.limit.map(|n| n - 1);
                Some(Segment {
                    skipped: m.skipped,
                    separator: Some(m.matched),
                    last: false,
                })
            }
            None => {
                self.done = true;
                Some(Segment {
                    skipped: self.rest,
                    separator: None,
                    last: true,
                })
            }
        }
    }
}

impl<V, P: ?Sized> fmt::Debug for FindIter<'_, '_, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindIter")
            .field("remaining", &self.rest.len())
            .field("done", &self.done)
            .finish()
    }
}

/// Iterates over the segments [`split`] would return, searching only as far
/// as the caller consumes.
pub fn find_iter<'a, 'c, V, P>(
    ctx: &'c mut ParseContext<V>,
    separator: &'c P,
    tokens: &'a [Token<V>],
) -> FindIter<'a, 'c, V, P>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    FindIter {
        ctx,
        separator,
        rest: tokens,
        limit: None,
        started: false,
        done: false,
    }
}

/// Splits `tokens` at every match of `separator`.
///
/// Input ending on a separator yields a trailing empty segment; empty input
/// yields no segments. Only the final segment has `last` set.
pub fn split<'a, V, P>(
    ctx: &mut ParseContext<V>,
    separator: &P,
    tokens: &'a [Token<V>],
) -> Vec<Segment<'a, V>>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    find_iter(ctx, separator, tokens).collect()
}

/// Like [`split`], but returns at most `n` segments, the last one holding
/// whatever remains. `n == 0` means no limit.
pub fn split_n<'a, V, P>(
    ctx: &mut ParseContext<V>,
    separator: &P,
    tokens: &'a [Token<V>],
    n: usize,
) -> Vec<Segment<'a, V>>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    let mut iter = find_iter(ctx, separator, tokens);
    iter.limit = (n > 0).then_some(n);
    iter.collect()
}
