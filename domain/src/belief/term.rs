//! Positional proposition arguments

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single positional argument of a [`Proposition`](super::Proposition)
///
/// Terms are hashable so that propositions can be compared structurally
/// and stored in the active-survey set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// Bare symbolic constant, rendered as-is (e.g. `alice`)
    Atom(String),
    Integer(i64),
    /// Quoted string literal
    Text(String),
    Bool(bool),
    List(Vec<Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Term::Text(value.into())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{}", name),
            Term::Integer(n) => write!(f, "{}", n),
            Term::Text(s) => write!(f, "{:?}", s),
            Term::Bool(b) => write!(f, "{}", b),
            Term::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Integer(n)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Bool(b)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Atom(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Term::atom("alice").to_string(), "alice");
        assert_eq!(Term::Integer(-3).to_string(), "-3");
        assert_eq!(Term::text("hi \"there\"").to_string(), "\"hi \\\"there\\\"\"");
        assert_eq!(
            Term::List(vec![Term::from(1), Term::from("b")]).to_string(),
            "[1, b]"
        );
    }

    #[test]
    fn test_serde_is_tagged() {
        let json = serde_json::to_string(&Term::atom("x")).unwrap();
        assert_eq!(json, r#"{"kind":"atom","value":"x"}"#);

        // Atom and Text stay distinguishable after a round trip
        let back: Term = serde_json::from_str(r#"{"kind":"text","value":"x"}"#).unwrap();
        assert_eq!(back, Term::text("x"));
    }
}
