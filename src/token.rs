//! # Token Model
//!
//! Tokens are the only currency exchanged between parsers. A tokenizer outside
//! this crate produces them; raw strings can be wrapped as degenerate `"raw"`
//! tokens with [`Token::raw`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag given to tokens wrapped from raw input strings.
pub const RAW: &str = "raw";

/// Source location of a token.
///
/// A zero line and column means only the absolute index is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub col: usize,
    pub index: usize,
    pub length: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            ..Default::default()
        }
    }

    pub fn at_index(index: usize) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Renders an optional position; an unknown location renders as `1:1`.
    pub fn format(pos: Option<&Position>) -> String {
        match pos {
            Some(p) => p.to_string(),
            None => "1:1".to_string(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 && self.col == 0 {
            write!(f, "{}", self.index)
        } else {
            write!(f, "{}:{}", self.line, self.col)
        }
    }
}

/// A tagged token carrying a parsed value of the grammar's value type `V`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token<V> {
    /// Type tag that leaf parsers dispatch on
    pub kind: String,
    pub pos: Option<Position>,
    /// Original source text, empty for synthesized tokens
    pub raw: String,
    pub val: V,
}

impl<V> Token<V> {
    pub fn new(kind: impl Into<String>, val: V) -> Self {
        Self {
            kind: kind.into(),
            pos: None,
            raw: String::new(),
            val,
        }
    }

    pub fn with_pos(mut self, pos: Option<Position>) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl<V: Default> Token<V> {
    /// Wraps an untokenized string found at `index` of the input.
    pub fn raw(text: impl Into<String>, index: usize) -> Self {
        Self {
            kind: RAW.to_string(),
            pos: Some(Position::at_index(index)),
            raw: text.into(),
            val: V::default(),
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} at {}", self.kind, Position::format(self.pos.as_ref()))?;
        if !self.raw.is_empty() {
            write!(f, " raw='{}'", self.raw)?;
        }
        write!(f, " val: {:?}}}", self.val)
    }
}

/// Position of the first token, if any.
pub fn first_pos<V>(tokens: &[Token<V>]) -> Option<Position> {
    tokens.first().and_then(|t| t.pos)
}

/// Position just past the last token, if that token has a position.
pub fn end_pos<V>(tokens: &[Token<V>]) -> Option<Position> {
    let last = tokens.last().and_then(|t| t.pos)?;
    let index = last.index + last.length.max(1);
    if last.line == 0 && last.col == 0 {
        Some(Position::at_index(index))
    } else {
        Some(Position {
            line: last.line,
            col: last.col + last.length.max(1),
            index,
            length: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_format() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
        assert_eq!(Position::at_index(12).to_string(), "12");
        assert_eq!(Position::format(None), "1:1");
        assert_eq!(Position::format(Some(&Position::new(1, 2))), "1:2");
    }

    #[test]
    fn test_raw_token() {
        let token: Token<i64> = Token::raw("100", 4);
        assert!(token.is(RAW));
        assert_eq!(token.raw, "100");
        assert_eq!(token.val, 0);
        assert_eq!(token.pos, Some(Position::at_index(4)));
    }

    #[test]
    fn test_token_display() {
        let token = Token::new("digit", 42).with_pos(Some(Position::new(1, 5)));
        assert_eq!(token.to_string(), "{digit at 1:5 val: 42}");

        let token: Token<i64> = Token::raw("+", 1);
        assert_eq!(token.to_string(), "{raw at 1 raw='+' val: 0}");
    }

    #[test]
    fn test_end_pos() {
        let tokens: Vec<Token<i64>> = vec![Token::raw("10", 0), Token::raw("+", 1)];
        assert_eq!(end_pos(&tokens), Some(Position::at_index(2)));

        let spanned = Token::new("ident", 0).with_pos(Some(Position {
            line: 2,
            col: 5,
            index: 14,
            length: 3,
        }));
        let end = end_pos(&[spanned]).unwrap();
        assert_eq!((end.line, end.col, end.index), (2, 8, 17));

        assert_eq!(end_pos::<i64>(&[]), None);
        assert_eq!(end_pos(&[Token::new("digit", 1)]), None);
    }
}
