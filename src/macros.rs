/// Runs the given parsers in order, see [`Seq`](crate::analyzer::Seq).
#[macro_export]
macro_rules! seq {
    ($($parser:expr),+ $(,)?) => {
        $crate::analyzer::Seq::new(vec![$($crate::analyzer::Parser::boxed($parser)),+])
    };
}

/// Alternation following the context's [`OrMode`](crate::OrMode).
#[macro_export]
macro_rules! or {
    ($($parser:expr),+ $(,)?) => {
        $crate::analyzer::Or::new(vec![$($crate::analyzer::Parser::boxed($parser)),+])
    };
}
