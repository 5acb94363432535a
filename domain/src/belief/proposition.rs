//! Proposition value object

use super::term::Term;
use crate::core::error::DomainError;
use crate::core::identity::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

const PLACEHOLDER: &str = "{}";

/// A logical statement put to the members of a group (Value Object)
///
/// The statement is a template whose `{}` placeholders are filled
/// positionally by `args`. Equality and hashing are structural over
/// the statement and its arguments only: the `source` tag is ignored, so a
/// response quoting any copy of the same proposition correlates with it.
///
/// # Example
///
/// ```
/// use poll_domain::{Proposition, Term};
///
/// let p = Proposition::format("likes({}, {})", vec![Term::atom("alice"), Term::atom("tea")]).unwrap();
/// assert_eq!(p.rendered(), "likes(alice, tea)");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposition {
    statement: String,
    args: Vec<Term>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<Address>,
}

impl Proposition {
    /// Create a proposition with no arguments
    pub fn new(statement: impl Into<String>) -> Result<Self, DomainError> {
        Self::format(statement, Vec::new())
    }

    /// Create a proposition from a `{}` template and positional arguments
    pub fn format(statement: impl Into<String>, args: Vec<Term>) -> Result<Self, DomainError> {
        let statement = statement.into();
        if statement.trim().is_empty() {
            return Err(DomainError::InvalidProposition(
                "statement cannot be empty".to_string(),
            ));
        }

        let expected = statement.matches(PLACEHOLDER).count();
        if expected != args.len() {
            return Err(DomainError::ArgumentMismatch {
                expected,
                actual: args.len(),
            });
        }

        Ok(Self {
            statement,
            args,
            source: None,
        })
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    /// Address of whoever issued this proposition, once sent
    pub fn source(&self) -> Option<&Address> {
        self.source.as_ref()
    }

    /// Copy of this proposition tagged with the issuing address
    pub fn with_source(mut self, source: Address) -> Self {
        self.source = Some(source);
        self
    }

    /// Statement with every placeholder substituted by its argument
    pub fn rendered(&self) -> String {
        let mut out = String::with_capacity(self.statement.len());
        let mut args = self.args.iter();
        let mut rest = self.statement.as_str();

        while let Some(pos) = rest.find(PLACEHOLDER) {
            out.push_str(&rest[..pos]);
            if let Some(arg) = args.next() {
                out.push_str(&arg.to_string());
            }
            rest = &rest[pos + PLACEHOLDER.len()..];
        }
        out.push_str(rest);
        out
    }
}

impl PartialEq for Proposition {
    fn eq(&self, other: &Self) -> bool {
        self.statement == other.statement && self.args == other.args
    }
}

impl Eq for Proposition {}

impl Hash for Proposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.statement.hash(state);
        self.args.hash(state);
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rendered())
    }
}
