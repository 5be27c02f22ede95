//! String-aware removal of whole constructs from raw schematic text
//!
//! Works on the source text rather than the parsed tree so that everything
//! outside the removed constructs survives byte-for-byte, formatting
//! included. Balance tracking mirrors the lexer's string rules: an unescaped
//! `"` toggles string state, `\` inside a string escapes the next character,
//! and parentheses inside strings never count toward nesting depth.

/// Remove every occurrence of `(construct ...)` from `text`, at any nesting
/// depth, leaving all other text untouched.
///
/// The opening `(construct` only matches outside string literals, so a
/// label elsewhere in the document that happens to contain the sequence is
/// copied through untouched. If a matched construct is still open when the
/// input ends, the remainder of the input is consumed with it.
pub fn elide(text: &str, construct: &str) -> String {
    let needle = format!("({construct}");
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut in_string = false;
    let mut escape = false;

    while i < text.len() {
        if !in_string && text[i..].starts_with(&needle) {
            i = skip_construct(bytes, i + 1);
            continue;
        }
        let ch = text[i..].chars().next().expect("i is on a char boundary");
        if in_string {
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        }
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}

/// Consume from just past a construct's opening `(` until its matching `)`,
/// returning the index one past that `)` (or the end of input).
fn skip_construct(bytes: &[u8], start: usize) -> usize {
    let mut balance = 1u32;
    let mut in_string = false;
    let mut escape = false;
    let mut j = start;

    while j < bytes.len() && balance > 0 {
        let byte = bytes[j];
        if in_string {
            if escape {
                escape = false;
            } else if byte == b'\\' {
                escape = true;
            } else if byte == b'"' {
                in_string = false;
            }
        } else {
            match byte {
                b'"' => in_string = true,
                b'(' => balance += 1,
                b')' => balance -= 1,
                _ => {}
            }
        }
        j += 1;
    }
    j
}
