//! Stack-driven parser for the S-expression grammar
//!
//! A single left-to-right pass over the token stream maintains a stack of
//! in-progress list collectors, seeded with one implicit outer collector.
//! `(` pushes a fresh collector; `)` pops the current collector and appends
//! it to its parent as a completed list; atoms and strings append to the
//! current collector. Both directions of imbalance are fatal: a `)` that
//! would pop the implicit outer collector, and a `(` still open at
//! end-of-input.

use crate::error::ParseError;
use crate::parser::ast::Node;
use crate::parser::lexer::{lex, Span, Token};

/// Parse source text into a single tree.
///
/// The result is the first top-level expression. Trailing sibling
/// expressions after the first are tolerated and ignored, matching how
/// schematic files are consumed (one document per file).
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];
    // Spans of the `(` tokens whose lists are still open, for diagnostics
    let mut open_spans: Vec<Span> = Vec::new();

    for (token, span) in lex(source) {
        match token {
            Token::ParenOpen => {
                stack.push(Vec::new());
                open_spans.push(span);
            }
            Token::ParenClose => {
                if stack.len() > 1 {
                    let completed = pop(&mut stack);
                    open_spans.pop();
                    current(&mut stack).push(Node::List(completed));
                } else {
                    return Err(ParseError::Unbalanced {
                        span,
                        message: "unmatched ')'".to_string(),
                    });
                }
            }
            Token::Str(text) => current(&mut stack).push(Node::Str(text)),
            Token::Atom(text) => current(&mut stack).push(Node::Atom(text)),
        }
    }

    if stack.len() > 1 {
        let span = open_spans
            .pop()
            .expect("one open span per unclosed collector");
        return Err(ParseError::Unbalanced {
            span,
            message: "'(' still open at end of input".to_string(),
        });
    }

    let mut top_level = pop(&mut stack);
    if top_level.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    Ok(top_level.remove(0))
}

fn current(stack: &mut [Vec<Node>]) -> &mut Vec<Node> {
    stack
        .last_mut()
        .expect("stack is seeded with the outer collector")
}

fn pop(stack: &mut Vec<Vec<Node>>) -> Vec<Node> {
    stack
        .pop()
        .expect("stack is seeded with the outer collector")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_nested_lists() {
        let node = parse("(kicad_sch (version 20230121) (uuid abc))").unwrap();
        let items = node.as_list().unwrap();
        assert_eq!(items[0].as_atom(), Some("kicad_sch"));
        assert_eq!(items[1].head(), Some("version"));
        assert_eq!(items[2].head(), Some("uuid"));
    }

    #[test]
    fn test_parse_strings_are_decoded() {
        let node = parse(r#"(text_box "line \"two\"")"#).unwrap();
        let items = node.as_list().unwrap();
        assert_eq!(items[1].as_str(), Some(r#"line "two""#));
    }

    #[test]
    fn test_parse_paren_inside_string_does_not_nest() {
        let node = parse(r#"(label "deep (not really)")"#).unwrap();
        assert_eq!(node.as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_extra_close_is_structural_error() {
        let err = parse("(a b))").unwrap_err();
        assert!(matches!(err, ParseError::Unbalanced { .. }));
    }

    #[test]
    fn test_missing_close_is_structural_error() {
        let err = parse("(a (b c)").unwrap_err();
        assert!(matches!(err, ParseError::Unbalanced { .. }));
    }

    #[test]
    fn test_unbalanced_span_points_at_offender() {
        match parse("(a) )").unwrap_err() {
            ParseError::Unbalanced { span, .. } => assert_eq!(span, 4..5),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_its_own_error() {
        assert!(matches!(parse("   \n"), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_first_top_level_expression_wins() {
        let node = parse("(first) (second)").unwrap();
        assert_eq!(node.head(), Some("first"));
    }

    #[test]
    fn test_structural_round_trip() {
        let source = r#"(kicad_sch (text_box "label (x)" (at 10 10) (size 4 2)))"#;
        let once = parse(source).unwrap();
        let again = parse(&once.to_string()).unwrap();
        assert_eq!(once, again);
    }
}
