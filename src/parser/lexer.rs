//! Lexer for the schematic S-expression grammar using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    /// Double-quoted string with backslash escapes, decoded on the spot
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    Str(String),

    /// Maximal run of characters that is not whitespace, a paren, or a quote
    #[regex(r#"[^ \t\n\r()"][^ \t\n\r()]*"#, |lex| lex.slice().to_string())]
    Atom(String),
}

/// Decode a quoted string slice: strip the surrounding quotes and resolve
/// backslash escapes. `\"` and `\\` become `"` and `\`; any other `\c`
/// passes `c` through without the backslash.
fn unescape(slice: &str) -> String {
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parens_and_atoms() {
        let tokens: Vec<_> = lex("(kicad_sch (version 20230121))")
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::ParenOpen,
                Token::Atom("kicad_sch".to_string()),
                Token::ParenOpen,
                Token::Atom("version".to_string()),
                Token::Atom("20230121".to_string()),
                Token::ParenClose,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_string_with_escaped_quote() {
        let tokens: Vec<_> = lex(r#""say \"hi\"""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Str(r#"say "hi""#.to_string())]);
    }

    #[test]
    fn test_string_with_escaped_backslash() {
        let tokens: Vec<_> = lex(r#""a\\b""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Str(r"a\b".to_string())]);
    }

    #[test]
    fn test_unknown_escape_passes_through() {
        let tokens: Vec<_> = lex(r#""a\nb""#).map(|(t, _)| t).collect();
        assert_eq!(tokens, vec![Token::Str("anb".to_string())]);
    }

    #[test]
    fn test_string_with_parens_is_one_token() {
        let tokens: Vec<_> = lex(r#"(label "has (a) paren")"#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::ParenOpen,
                Token::Atom("label".to_string()),
                Token::Str("has (a) paren".to_string()),
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_atoms_split_on_parens() {
        let tokens: Vec<_> = lex("a(b").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Atom("a".to_string()),
                Token::ParenOpen,
                Token::Atom("b".to_string()),
            ]
        );
    }

    #[test]
    fn test_numeric_atoms_stay_textual() {
        let tokens: Vec<_> = lex("-12.7 0 3.14").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                Token::Atom("-12.7".to_string()),
                Token::Atom("0".to_string()),
                Token::Atom("3.14".to_string()),
            ]
        );
    }

    #[test]
    fn test_spans_cover_source() {
        let spans: Vec<_> = lex("(at 10 10)").map(|(_, s)| s).collect();
        assert_eq!(spans, vec![0..1, 1..3, 4..6, 7..9, 9..10]);
    }
}
