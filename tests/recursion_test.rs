mod common;

use common::*;
use tokweave::analyzer::prelude::*;
use tokweave::analyzer::{detect_left_recursion, AliasInstance};

/// Prefix calculator: expression := digit | operator expression expression
fn prefix_calculator() -> AliasInstance<i64> {
    let (bind, expression) = alias::<i64>("expression");
    bind.bind(or![
        digit,
        trans(
            seq![operator, expression.clone(), expression],
            |_: &mut ParseContext<i64>, src: &[Token<i64>]| {
                let value = apply(&src[0].raw, src[1].val, src[2].val);
                Ok(vec![Token::new("digit", value).with_pos(src[0].pos)])
            },
        ),
    ])
}

#[test]
fn test_alias() {
    let parser = prefix_calculator();
    let cases = [
        (&["100"][..], 100),
        (&["+", "100", "200"][..], 300),
        (&["+", "100", "-", "200", "100"][..], 200),
    ];
    for (src, want) in cases {
        let mut ctx = ParseContext::new().with_trace(true);
        let result = evaluate_with_raw_tokens(&mut ctx, src, &parser).unwrap();
        assert_eq!(result[0], want);
    }
}

#[test]
fn test_mutual_recursion() {
    // list := "(" items ")" ; items := (digit | list)*
    let (bind_list, list_ref) = alias::<i64>("list");
    let (bind_items, items_ref) = alias::<i64>("items");
    let open = |ctx: &mut ParseContext<i64>, src: &[Token<i64>]| -> ParseResult<i64> {
        ctx.traced("open", src, |_| match src.first() {
            Some(t) if t.raw == "(" => Ok((1, vec![])),
            _ => Err(ParseError::not_match("(", "", None)),
        })
    };
    let close = |ctx: &mut ParseContext<i64>, src: &[Token<i64>]| -> ParseResult<i64> {
        ctx.traced("close", src, |_| match src.first() {
            Some(t) if t.raw == ")" => Ok((1, vec![])),
            _ => Err(ParseError::not_match(")", "", None)),
        })
    };
    let list = bind_list.bind(trans(
        seq![open, items_ref, close],
        |_: &mut ParseContext<i64>, src: &[Token<i64>]| {
            Ok(vec![Token::new("sum", src.iter().map(|t| t.val).sum())])
        },
    ));
    bind_items.bind(zero_or_more("items", or![digit, list_ref]));

    let mut ctx = ParseContext::new();
    let result = evaluate_with_raw_tokens(&mut ctx, &["(", "1", "(", "2", "3", ")", "4", ")"], &list)
        .unwrap();
    assert_eq!(result, vec![10]);
}

#[test]
fn test_left_recursion_hits_depth_limit() {
    for max_depth in [3, 5] {
        let (bind, expression) = alias::<i64>("expression");
        let parser = bind.bind(or![
            trans(
                seq![expression, operator, digit],
                |_: &mut ParseContext<i64>, src: &[Token<i64>]| {
                    Ok(vec![Token::new("digit", 0).with_pos(src[0].pos)])
                },
            ),
            digit,
        ]);

        let mut ctx = ParseContext::new().with_max_depth(max_depth);
        let err = evaluate_with_raw_tokens(&mut ctx, &["+"], &parser).unwrap_err();
        assert!(err.is(ErrorKind::StackOverflow), "max_depth {}: {}", max_depth, err);
        assert_eq!(ctx.depth, 0);
    }
}

#[test]
fn test_simple_parsing_within_limits() {
    let mut ctx = ParseContext::new().with_max_depth(100);
    assert!(evaluate_with_raw_tokens(&mut ctx, &["100"], &digit).is_ok());
}

fn infinite(ctx: &mut ParseContext<i64>, src: &[Token<i64>]) -> ParseResult<i64> {
    ctx.traced("infinite", src, |ctx| infinite(ctx, src))
}

#[test]
fn test_stack_overflow_with_simple_recursion() {
    let mut ctx = ParseContext::new().with_max_depth(10).with_trace(true);
    let err = evaluate_with_raw_tokens(&mut ctx, &["test"], &infinite).unwrap_err();
    assert!(err.is(ErrorKind::StackOverflow));
    assert!(err.to_string().contains("recursion depth"));

    let warnings = detect_left_recursion(&ctx.traces);
    assert!(!warnings.is_empty());
    assert!(warnings[0].contains("'infinite' called repeatedly at 0"));
}

#[test]
fn test_lazy() {
    fn nested() -> BoxedParser<i64> {
        or![seq![operator, lazy(nested)], digit].boxed()
    }

    let mut ctx = ParseContext::new();
    let result = evaluate_with_raw_tokens(&mut ctx, &["-", "+", "7"], &nested()).unwrap();
    assert_eq!(result, vec![0, 0, 7]);
}
