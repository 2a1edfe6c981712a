//! # Trace Log and Diagnostics
//!
//! Records written by the tracing wrapper while a parse runs, the text dump
//! used while debugging grammars, and the non-fatal diagnostics the engine
//! reports about a grammar.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io;

use crate::token::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum TraceType {
    #[strum(serialize = ">")]
    Enter,
    #[strum(serialize = "<")]
    Match,
    /// Enter and match of a parser with no nested records
    #[strum(serialize = "=")]
    EnterMatch,
    #[strum(serialize = "!")]
    NotMatch,
    #[strum(serialize = "!")]
    EnterNotMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceInfo {
    pub trace_type: TraceType,
    pub depth: usize,
    pub name: String,
    pub pos: Option<Position>,
    /// Rendered values on match, the error message otherwise
    pub result: String,
}

impl fmt::Display for TraceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = "  ".repeat(self.depth);
        let pos = Position::format(self.pos.as_ref());
        match self.trace_type {
            TraceType::Enter => write!(f, "{}{} {} at {}", indent, self.trace_type, self.name, pos),
            TraceType::EnterMatch | TraceType::EnterNotMatch => write!(
                f,
                "{}{} {} at {} -> {}",
                indent, self.trace_type, self.name, pos, self.result
            ),
            TraceType::Match | TraceType::NotMatch => write!(
                f,
                "{}{} {} => {:?}",
                indent, self.trace_type, self.name, self.result
            ),
        }
    }
}

/// Writes one line per trace record.
pub fn write_traces<W: io::Write>(traces: &[TraceInfo], w: &mut W) -> io::Result<()> {
    for trace in traces {
        writeln!(w, "{}", trace)?;
    }
    Ok(())
}

pub fn traces_as_text(traces: &[TraceInfo]) -> String {
    traces.iter().map(|t| format!("{}\n", t)).collect()
}

/// Scans a trace log for a parser entered three times in a row at the same
/// position, the usual symptom of left recursion.
pub fn detect_left_recursion(traces: &[TraceInfo]) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut calls: HashMap<String, Vec<&str>> = HashMap::new();

    for trace in traces.iter().filter(|t| t.trace_type == TraceType::Enter) {
        let key = Position::format(trace.pos.as_ref());
        let names = calls.entry(key.clone()).or_default();
        names.push(&trace.name);
        if names.len() > 3 {
            let last = &names[names.len() - 3..];
            if last[0] == last[1] && last[1] == last[2] {
                warnings.push(format!(
                    "Potential left recursion detected: '{}' called repeatedly at {}",
                    last[0], key
                ));
            }
        }
    }
    warnings
}

/// A non-fatal finding about the grammar, reported while parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// First-match alternation picked a different option than longest-match
    /// would have. Option numbers are 1-based.
    OrReorder {
        location: String,
        pos: Option<Position>,
        chosen: usize,
        chosen_consumed: usize,
        longest: usize,
        longest_consumed: usize,
    },
    /// Re-running a parser on its transformed output reproduced that output.
    TransformLoop {
        pos: Option<Position>,
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OrReorder {
                location,
                pos,
                chosen,
                chosen_consumed,
                longest,
                longest_consumed,
            } => write!(
                f,
                "Or parser optimization suggestion at {} (parser position {}): \
                 Fast mode chose option {} (consumed {} tokens), but longest match would choose option {} (consumed {} tokens). \
                 For Fast mode compatibility, consider moving option {} before option {}.",
                location,
                Position::format(pos.as_ref()),
                chosen,
                chosen_consumed,
                longest,
                longest_consumed,
                longest,
                chosen
            ),
            Diagnostic::TransformLoop { pos, message } => write!(
                f,
                "Transformation safety check failed at {}: {}",
                Position::format(pos.as_ref()),
                message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(trace_type: TraceType, depth: usize, name: &str, index: usize) -> TraceInfo {
        TraceInfo {
            trace_type,
            depth,
            name: name.to_string(),
            pos: Some(Position::at_index(index)),
            result: String::new(),
        }
    }

    #[test]
    fn test_trace_lines() {
        let mut enter_match = record(TraceType::EnterMatch, 1, "digit", 0);
        enter_match.result = "[100]".to_string();
        let mut exit = record(TraceType::Match, 0, "seq", 0);
        exit.result = "[100]".to_string();

        let text = traces_as_text(&[record(TraceType::Enter, 0, "seq", 0), enter_match, exit]);
        assert_eq!(text, "> seq at 0\n  = digit at 0 -> [100]\n< seq => \"[100]\"\n");
    }

    #[test]
    fn test_detect_left_recursion() {
        let traces: Vec<_> = (0..5)
            .map(|depth| record(TraceType::Enter, depth, "expression-alias", 0))
            .collect();
        let warnings = detect_left_recursion(&traces);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("'expression-alias' called repeatedly at 0"));

        let traces = vec![
            record(TraceType::Enter, 0, "a", 0),
            record(TraceType::Enter, 1, "b", 0),
            record(TraceType::Enter, 2, "a", 0),
            record(TraceType::Enter, 3, "b", 0),
        ];
        assert!(detect_left_recursion(&traces).is_empty());
    }
}
