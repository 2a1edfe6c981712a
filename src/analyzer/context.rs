//! # Parse Context
//!
//! Mutable state shared by every parser of one top-level evaluation: the
//! input, the result, the trace and error logs, and the recursion-depth guard.
//! A context is passed by `&mut` through the whole combinator tree and must
//! not be shared by two evaluations at once.

use std::io;
use std::ops::{Deref, DerefMut};

use tracing::debug;

use super::core::{ParseResult, Parser, TokenValue};
use super::trace::{self, Diagnostic, TraceInfo, TraceType};
use crate::config::{OrMode, ParseConfig};
use crate::error::ParseError;
use crate::token::{first_pos, Position, Token};

#[derive(Debug, Clone, Default)]
pub struct ParseContext<V> {
    pub config: ParseConfig,
    /// Input of the last evaluation
    pub tokens: Vec<Token<V>>,
    /// Number of input tokens consumed by the last evaluation
    pub pos: usize,
    pub remained_tokens: Vec<Token<V>>,
    pub results: Vec<Token<V>>,
    pub traces: Vec<TraceInfo>,
    pub errors: Vec<ParseError>,
    pub diagnostics: Vec<Diagnostic>,
    pub depth: usize,
    /// Tokens produced by a sequence before it failed
    pub(crate) partial_results: Vec<Token<V>>,
}

impl<V> ParseContext<V> {
    pub fn new() -> Self {
        Self::with_config(ParseConfig::default())
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self {
            config,
            tokens: Vec::new(),
            pos: 0,
            remained_tokens: Vec::new(),
            results: Vec::new(),
            traces: Vec::new(),
            errors: Vec::new(),
            diagnostics: Vec::new(),
            depth: 0,
            partial_results: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn with_trace(mut self, enable: bool) -> Self {
        self.config.trace_enable = enable;
        self
    }

    pub fn with_or_mode(mut self, mode: OrMode) -> Self {
        self.config.or_mode = mode;
        self
    }

    pub fn with_transform_safety(mut self, enable: bool) -> Self {
        self.config.check_transform_safety = enable;
        self
    }

    /// Clears everything a previous evaluation left behind. Configuration is
    /// kept.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.pos = 0;
        self.remained_tokens.clear();
        self.results.clear();
        self.traces.clear();
        self.errors.clear();
        self.diagnostics.clear();
        self.depth = 0;
        self.partial_results.clear();
    }

    /// Records an error without aborting the parse.
    pub fn append_error(&mut self, mut err: ParseError, pos: Option<Position>) {
        if err.pos.is_none() {
            err.pos = pos;
        }
        self.errors.push(err);
    }

    /// All logged errors joined into one, if any were logged.
    pub fn error(&self) -> Option<ParseError> {
        if self.errors.is_empty() {
            None
        } else {
            Some(ParseError::join(self.errors.clone(), None))
        }
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Increments the live depth, failing once the configured maximum is
    /// reached.
    pub fn check_depth_and_increment(&mut self, pos: Option<Position>) -> Result<(), ParseError> {
        if self.config.max_depth > 0 && self.depth >= self.config.max_depth {
            return Err(ParseError::stack_overflow(
                self.depth,
                self.config.max_depth,
                pos,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn decrement_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn dump_trace(&self) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        // a closed stdout only loses debug output
        let _ = trace::write_traces(&self.traces, &mut lock);
    }

    pub fn dump_trace_to<W: io::Write>(&self, w: &mut W) -> io::Result<()> {
        trace::write_traces(&self.traces, w)
    }

    pub fn dump_trace_as_text(&self) -> String {
        trace::traces_as_text(&self.traces)
    }
}

impl<V: TokenValue> ParseContext<V> {
    /// Runs `f` under the depth guard, recording enter and exit trace records
    /// when tracing is enabled. The depth is restored on every outcome.
    pub fn traced<F>(&mut self, name: &str, tokens: &[Token<V>], f: F) -> ParseResult<V>
    where
        F: FnOnce(&mut Self) -> ParseResult<V>,
    {
        let pos = first_pos(tokens);
        self.check_depth_and_increment(pos)?;
        let mut guard = DepthGuard(self);
        let ctx = &mut *guard;

        if ctx.config.trace_enable {
            let depth = ctx.depth - 1;
            ctx.traces.push(TraceInfo {
                trace_type: TraceType::Enter,
                depth,
                name: name.to_string(),
                pos,
                result: String::new(),
            });
        }
        let trace_index = ctx.traces.len();

        let result = f(ctx);

        if ctx.config.trace_enable {
            let rendered = match &result {
                Ok((_, produced)) => render_values(produced),
                Err(err) => err.to_string(),
            };
            let matched = result.is_ok();
            let collapse = ctx.traces.len() == trace_index;
            let depth = ctx.depth - 1;
            match ctx.traces.last_mut() {
                Some(last) if collapse => {
                    last.trace_type = if matched {
                        TraceType::EnterMatch
                    } else {
                        TraceType::EnterNotMatch
                    };
                    last.result = rendered;
                }
                _ => ctx.traces.push(TraceInfo {
                    trace_type: if matched {
                        TraceType::Match
                    } else {
                        TraceType::NotMatch
                    },
                    depth,
                    name: name.to_string(),
                    pos,
                    result: rendered,
                }),
            }
        }

        result
    }
}

/// Gives back one level of depth when dropped, also while unwinding.
struct DepthGuard<'a, V>(&'a mut ParseContext<V>);

impl<V> Deref for DepthGuard<'_, V> {
    type Target = ParseContext<V>;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<V> DerefMut for DepthGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0
    }
}

impl<V> Drop for DepthGuard<'_, V> {
    fn drop(&mut self) {
        self.0.decrement_depth();
    }
}

fn render_values<V: std::fmt::Debug>(tokens: &[Token<V>]) -> String {
    let values: Vec<String> = tokens.iter().map(|t| format!("{:?}", t.val)).collect();
    format!("[{}]", values.join(", "))
}

/// Runs `parser` once over `tokens` after resetting the context.
///
/// Returns the produced values, or every logged error joined into one. The
/// context keeps the produced tokens and the unconsumed remainder either way;
/// after a failure the results are whatever the failing sequence produced
/// before it stopped.
pub fn evaluate<V, P>(
    ctx: &mut ParseContext<V>,
    tokens: Vec<Token<V>>,
    parser: &P,
) -> Result<Vec<V>, ParseError>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
{
    ctx.reset();
    debug!("evaluate: {} tokens, or_mode: {}", tokens.len(), ctx.config.or_mode);

    let (consumed, produced) = match parser.parse(ctx, &tokens) {
        Ok(result) => result,
        Err(err) => {
            ctx.append_error(err, None);
            (0, std::mem::take(&mut ctx.partial_results))
        }
    };
    let consumed = consumed.min(tokens.len());
    ctx.pos = consumed;
    ctx.remained_tokens = tokens[consumed..].to_vec();
    ctx.tokens = tokens;
    ctx.results = produced;

    if let Some(err) = ctx.error() {
        debug!("evaluate: failed with {} error(s)", ctx.errors.len());
        return Err(err);
    }
    debug!("evaluate: consumed {}, produced {}", consumed, ctx.results.len());
    Ok(ctx.results.iter().map(|t| t.val.clone()).collect())
}

/// Wraps each input string as a `"raw"` token before evaluating.
pub fn evaluate_with_raw_tokens<V, P, S>(
    ctx: &mut ParseContext<V>,
    src: &[S],
    parser: &P,
) -> Result<Vec<V>, ParseError>
where
    V: TokenValue,
    P: Parser<V> + ?Sized,
    S: AsRef<str>,
{
    let tokens = src
        .iter()
        .enumerate()
        .map(|(i, s)| Token::raw(s.as_ref(), i))
        .collect();
    evaluate(ctx, tokens, parser)
}
