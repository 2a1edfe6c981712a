pub mod combinators;
pub mod context;
pub mod core;
pub mod error_handling;
pub mod lookahead;
pub mod prelude;
pub mod recursion;
mod safety;
pub mod search;
pub mod trace;

pub use combinators::{Before, Empty, Eos, Optional, Or, Repeat, Seq, Trace, Trans};
pub use context::{evaluate, evaluate_with_raw_tokens, ParseContext};
pub use core::{BoxedParser, ParseResult, Parser, TokenValue};
pub use error_handling::{Expected, Fail, Label, Recover};
pub use lookahead::{Lookahead, NotFollowedBy, Peek};
pub use recursion::{alias, Alias, AliasBinder, AliasInstance, Lazy};
pub use search::{find, find_iter, split, split_n, FindIter, Match, Segment};
pub use trace::{detect_left_recursion, Diagnostic, TraceInfo, TraceType};
