//! # tokweave
//!
//! A parser-combinator engine over pre-tokenized input. Parsers consume a
//! slice of [`Token`]s and produce new tokens, so a grammar is built by nesting
//! small parsers with [`seq!`], [`or!`] and the constructors in
//! [`analyzer::prelude`], then run with [`evaluate`].
//!
//! ```
//! use tokweave::analyzer::prelude::*;
//!
//! fn digit(_: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
//!     match src.first().map(|t| (t, t.raw.parse::<i64>())) {
//!         Some((t, Ok(n))) => Ok((1, vec![Token::new("digit", n).with_pos(t.pos)])),
//!         Some((t, Err(_))) => Err(ParseError::not_match("digit", t.raw.clone(), t.pos)),
//!         None => Err(ParseError::not_match("digit", "", None)),
//!     }
//! }
//!
//! let mut ctx = ParseContext::new();
//! let digits = one_or_more("digits", digit);
//! assert_eq!(evaluate_with_raw_tokens(&mut ctx, &["1", "2"], &digits).unwrap(), vec![1, 2]);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
mod macros;
pub mod token;

// Re-exports
pub use analyzer::{evaluate, evaluate_with_raw_tokens, BoxedParser, ParseContext, ParseResult, Parser};
pub use config::{OrMode, ParseConfig};
pub use error::{ConfigError, ErrorCause, ErrorKind, ParseError};
pub use token::{Position, Token};
