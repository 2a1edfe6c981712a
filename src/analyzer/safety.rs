//! Heuristic check for transformations that feed themselves.
//!
//! A transformer whose output the same parser accepts again, producing the
//! same output, is a likely source of infinite loops once that parser sits
//! inside a repetition or a recursive rule.

use super::context::ParseContext;
use super::core::{Parser, TokenValue};
use crate::config::ParseConfig;
use crate::token::Token;

/// Re-runs `parser` over `transformed` in a scratch context and reports
/// whether it consumed all of it and reproduced it unchanged.
///
/// The scratch context keeps the depth limit and alternation mode but never
/// traces nor re-checks, so the caller's logs are untouched.
pub(crate) fn reproduces_itself<V, P>(
    config: &ParseConfig,
    parser: &P,
    transformed: &[Token<V>],
) -> bool
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    if transformed.is_empty() {
        return false;
    }

    let mut scratch = ParseContext::with_config(ParseConfig {
        trace_enable: false,
        check_transform_safety: false,
        ..config.clone()
    });
    match parser.parse(&mut scratch, transformed) {
        Ok((consumed, reparsed)) => consumed == transformed.len() && reparsed == transformed,
        Err(_) => false,
    }
}
