//! Set-of-facts knowledge base.
//!
//! Facts are ground propositions stored in their rendered form, so
//! `likes(alice, tea)` matches `Proposition::format("likes({}, {})", ..)`
//! with the same arguments.

use poll_application::ports::knowledge::KnowledgeBase;
use poll_domain::Proposition;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryKnowledgeBase {
    facts: RwLock<HashSet<String>>,
}

impl InMemoryKnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Knowledge base seeded with already-rendered facts
    pub fn with_facts<I, S>(facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            facts: RwLock::new(facts.into_iter().map(|f| normalise(&f.into())).collect()),
        }
    }

    /// Start believing `proposition`; `true` if it was not believed before
    pub fn adopt(&self, proposition: &Proposition) -> bool {
        self.facts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(normalise(&proposition.rendered()))
    }

    /// Stop believing `proposition`; `true` if it was believed
    pub fn renounce(&self, proposition: &Proposition) -> bool {
        self.facts
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&normalise(&proposition.rendered()))
    }

    pub fn believes(&self, proposition: &Proposition) -> bool {
        self.facts
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&normalise(&proposition.rendered()))
    }

    pub fn len(&self) -> usize {
        self.facts.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KnowledgeBase for InMemoryKnowledgeBase {
    fn prove(&self, proposition: &Proposition) -> bool {
        self.believes(proposition)
    }
}

/// Drop whitespace so `likes(a, b)` and `likes(a,b)` are the same fact
fn normalise(fact: &str) -> String {
    fact.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_domain::Term;

    #[test]
    fn test_adopt_and_renounce() {
        let kb = InMemoryKnowledgeBase::new();
        let raining = Proposition::new("raining").unwrap();

        assert!(!kb.prove(&raining));
        assert!(kb.adopt(&raining));
        assert!(!kb.adopt(&raining));
        assert!(kb.prove(&raining));
        assert!(kb.renounce(&raining));
        assert!(!kb.prove(&raining));
        assert!(kb.is_empty());
    }

    #[test]
    fn test_formatted_propositions_match_rendered_facts() {
        let kb = InMemoryKnowledgeBase::with_facts(["likes(alice,tea)"]);
        let likes = |who: &str, what: &str| {
            Proposition::format("likes({}, {})", vec![Term::from(who), Term::from(what)]).unwrap()
        };

        assert!(kb.prove(&likes("alice", "tea")));
        assert!(!kb.prove(&likes("alice", "coffee")));
        assert_eq!(kb.len(), 1);
    }
}
