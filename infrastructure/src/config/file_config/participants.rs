//! Simulated participants from TOML (`[[participants]]` array)
//!
//! ```toml
//! [[participants]]
//! name = "alice"
//! facts = ["raining", "likes(alice,tea)"]
//! ```

use serde::{Deserialize, Serialize};

/// A local participant and the facts it believes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParticipantConfig {
    pub name: String,
    pub facts: Vec<String>,
}

impl FileParticipantConfig {
    pub fn new(name: impl Into<String>, facts: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            facts: facts.into_iter().map(Into::into).collect(),
        }
    }
}
