//! # Recursive Grammars
//!
//! A combinator tree is built eagerly, so a rule cannot mention itself while
//! it is being constructed. [`alias`] hands out a placeholder before the rule
//! exists and closes the cycle once the rule is bound; [`Lazy`] defers
//! building a parser until it is invoked.
//!
//! Neither helps with left recursion: a rule that calls itself before
//! consuming input recurses until the depth guard reports `StackOverflow`.
//! Express such rules with repetition instead.

use std::cell::OnceCell;
use std::rc::Rc;

use super::context::ParseContext;
use super::core::{BoxedParser, ParseResult, Parser, TokenValue};
use crate::error::ParseError;
use crate::token::{first_pos, Token};

type Slot<V> = Rc<OnceCell<BoxedParser<V>>>;

/// Creates a named forward declaration.
///
/// Returns the binder, consumed exactly once with the finished rule, and a
/// placeholder that can be used anywhere in the grammar before that happens.
///
/// A bound rule that refers to its own placeholder forms a reference cycle;
/// grammars are expected to live as long as the program that built them.
pub fn alias<V>(name: impl Into<String>) -> (AliasBinder<V>, Alias<V>) {
    let name = name.into();
    let slot: Slot<V> = Rc::new(OnceCell::new());
    (
        AliasBinder {
            name: name.clone(),
            slot: Rc::clone(&slot),
        },
        Alias { name, slot },
    )
}

/// Placeholder for a rule bound later through its [`AliasBinder`].
pub struct Alias<V> {
    name: String,
    slot: Slot<V>,
}

impl<V> Clone for Alias<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<V: TokenValue> Parser<V> for Alias<V> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let label = format!("{}-alias", self.name);
        ctx.traced(&label, tokens, |ctx| match self.slot.get() {
            Some(body) => body.parse(ctx, tokens),
            None => Err(ParseError::critical(
                format!("alias '{}' used before its body was bound", self.name),
                first_pos(tokens),
            )),
        })
    }
}

pub struct AliasBinder<V> {
    name: String,
    slot: Slot<V>,
}

impl<V: TokenValue> AliasBinder<V> {
    /// Installs the rule behind every placeholder of this alias and returns
    /// the rule itself, traced as `<name>-instance`.
    pub fn bind<P>(self, parser: P) -> AliasInstance<V>
    where
        P: Parser<V> + 'static,
    {
        let body = parser.boxed();
        // the binder is consumed here, so the slot is always empty
        let _ = self.slot.set(body.clone());
        AliasInstance {
            name: self.name,
            body,
        }
    }
}

/// A bound alias rule.
pub struct AliasInstance<V> {
    name: String,
    body: BoxedParser<V>,
}

impl<V> Clone for AliasInstance<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            body: self.body.clone(),
        }
    }
}

impl<V: TokenValue> Parser<V> for AliasInstance<V> {
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        let label = format!("{}-instance", self.name);
        ctx.traced(&label, tokens, |ctx| self.body.parse(ctx, tokens))
    }
}

/// Lazy: Builds the wrapped parser on every invocation
///
/// Suited to a single self-recursive rule written as a function that returns
/// its own parser.
#[derive(Clone)]
pub struct Lazy<F> {
    f: F,
}

impl<F> Lazy<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<V, F, P> Parser<V> for Lazy<F>
where
    V: TokenValue,
    F: Fn() -> P,
    P: Parser<V>,
{
    fn parse(&self, ctx: &mut ParseContext<V>, tokens: &[Token<V>]) -> ParseResult<V> {
        ctx.traced("lazy", tokens, |ctx| (self.f)().parse(ctx, tokens))
    }
}
