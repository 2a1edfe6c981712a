#![allow(dead_code)]

use tokweave::analyzer::prelude::*;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Integer literal; accepts raw text or an already parsed digit token.
pub fn digit(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("digit", src, |_| {
        let Some(t) = src.first() else {
            return Err(ParseError::not_match("digit", "EOF", None));
        };
        match t.kind.as_str() {
            "raw" => match t.raw.parse::<i64>() {
                Ok(n) => Ok((1, vec![Token::new("digit", n).with_pos(t.pos)])),
                Err(_) => Err(ParseError::not_match(
                    "integer",
                    format!("'{}'", t.raw),
                    t.pos,
                )),
            },
            "digit" => Ok((1, vec![t.clone()])),
            kind => Err(ParseError::not_match("raw or digit type", kind, t.pos)),
        }
    })
}

/// Any raw token, kept as a `string` token.
pub fn string(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("string", src, |_| {
        let Some(t) = src.first() else {
            return Err(ParseError::not_match("string", "EOF", None));
        };
        match t.kind.as_str() {
            "raw" => Ok((
                1,
                vec![Token::new("string", 0).with_pos(t.pos).with_raw(&t.raw)],
            )),
            "string" => Ok((1, vec![t.clone()])),
            kind => Err(ParseError::not_match("string", kind, t.pos)),
        }
    })
}

pub fn operator(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("operator", src, |_| {
        let Some(t) = src.first() else {
            return Err(ParseError::not_match("operator", "EOF", None));
        };
        match (t.kind.as_str(), t.raw.as_str()) {
            ("raw", "+" | "-" | "*" | "/") => Ok((
                1,
                vec![Token::new("operator", 0).with_pos(t.pos).with_raw(&t.raw)],
            )),
            ("raw", raw) => Err(ParseError::not_match(
                "operator",
                format!("'{}'", raw),
                t.pos,
            )),
            ("operator", _) => Ok((1, vec![t.clone()])),
            (kind, _) => Err(ParseError::not_match("operator", kind, t.pos)),
        }
    })
}

/// Statement terminator `;`, producing nothing.
pub fn eol(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("eol", src, |_| match src.first() {
        Some(t) if t.is("raw") && t.raw == ";" => Ok((1, Vec::new())),
        Some(t) => Err(ParseError::not_match("EOL(;)", format!("'{}'", t.raw), t.pos)),
        None => Err(ParseError::not_match("EOL(;)", "EOF", None)),
    })
}

pub fn apply(op: &str, lhs: i64, rhs: i64) -> i64 {
    match op {
        "+" => lhs + rhs,
        "-" => lhs - rhs,
        "*" => lhs * rhs,
        "/" => lhs / rhs,
        _ => unreachable!("unsupported operator {}", op),
    }
}

/// digit operator digit, folded into one digit token
pub fn expression() -> impl Parser<i64> {
    trace(
        "expression",
        trans(
            seq![digit, operator, digit],
            |_: &mut ParseContext<i64>, src: &[Token<i64>]| {
                let value = apply(&src[1].raw, src[0].val, src[2].val);
                Ok(vec![Token::new("digit", value).with_pos(src[0].pos)])
            },
        ),
    )
}

/// digit digit `;`, folded into their sum
pub fn sum() -> impl Parser<i64> {
    trace(
        "add",
        trans(
            seq![digit, digit, eol],
            |_: &mut ParseContext<i64>, src: &[Token<i64>]| {
                Ok(vec![
                    Token::new("digit", src[0].val + src[1].val).with_pos(src[0].pos)
                ])
            },
        ),
    )
}

pub fn gen_not_match(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("err-not-match", src, |_| {
        Err(ParseError::not_match("expected", "want", None))
    })
}

pub fn gen_repeat_count(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("err-repeat-count", src, |_| {
        Err(ParseError::repeat_count("repeat count", 2, 1, None))
    })
}

pub fn gen_critical(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("err-critical", src, |_| Err(ParseError::critical("dummy", None)))
}

pub fn raw_tokens(src: &[&str]) -> Vec<Token<i64>> {
    src.iter()
        .enumerate()
        .map(|(i, s)| Token::raw(*s, i))
        .collect()
}
