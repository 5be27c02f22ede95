//! Parsed S-expression tree
//!
//! A document parses into a single rooted tree of [`Node`]s. The tree is
//! generic: it knows nothing about schematic semantics, which live in
//! [`crate::schematic`].

use std::fmt;

/// One parsed tree node: an untyped atom, a de-escaped string literal, or an
/// ordered list of children (document order preserved).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Atom(String),
    Str(String),
    List(Vec<Node>),
}

impl Node {
    /// The raw text of an atom node
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Node::Atom(text) => Some(text),
            _ => None,
        }
    }

    /// The decoded text of a string node
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(text) => Some(text),
            _ => None,
        }
    }

    /// The children of a list node
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// The atom naming a list node, i.e. its first child
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.first()?.as_atom()
    }

    /// Find the first child list named `name`, returning its children
    pub fn child(&self, name: &str) -> Option<&[Node]> {
        self.as_list()?
            .iter()
            .find(|item| item.head() == Some(name))
            .and_then(Node::as_list)
    }

    /// Interpret an atom as a number
    pub fn as_number(&self) -> Option<f64> {
        self.as_atom()?.parse().ok()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(text) => f.write_str(text),
            Node::Str(text) => {
                write!(f, "\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
            }
            Node::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> Node {
        Node::Atom(s.to_string())
    }

    #[test]
    fn test_head_of_named_list() {
        let node = Node::List(vec![atom("at"), atom("10"), atom("20")]);
        assert_eq!(node.head(), Some("at"));
    }

    #[test]
    fn test_head_of_string_led_list_is_none() {
        let node = Node::List(vec![Node::Str("at".to_string())]);
        assert_eq!(node.head(), None);
    }

    #[test]
    fn test_child_lookup_finds_first_match() {
        let node = Node::List(vec![
            atom("text_box"),
            Node::List(vec![atom("at"), atom("1"), atom("2")]),
            Node::List(vec![atom("at"), atom("9"), atom("9")]),
        ]);
        let at = node.child("at").unwrap();
        assert_eq!(at[1].as_number(), Some(1.0));
    }

    #[test]
    fn test_child_lookup_missing() {
        let node = Node::List(vec![atom("text_box")]);
        assert_eq!(node.child("size"), None);
    }

    #[test]
    fn test_display_escapes_strings() {
        let node = Node::List(vec![
            atom("label"),
            Node::Str(r#"say "hi" \ bye"#.to_string()),
        ]);
        assert_eq!(node.to_string(), r#"(label "say \"hi\" \\ bye")"#);
    }
}
