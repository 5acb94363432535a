//! Group configuration from TOML (`[group]` section)
//!
//! ```toml
//! [group]
//! name = "council"
//! restricted = true
//! credential = "s3cret"
//! ```

use super::ConfigError;
use poll_domain::{Credential, GroupId};
use serde::{Deserialize, Serialize};

/// Raw group configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroupConfig {
    pub name: String,
    /// Require a credential to join
    pub restricted: bool,
    /// Credential shared by the local participants and polls
    pub credential: Option<String>,
}

impl Default for FileGroupConfig {
    fn default() -> Self {
        Self {
            name: "council".to_string(),
            restricted: false,
            credential: None,
        }
    }
}

impl FileGroupConfig {
    pub fn group_id(&self) -> Result<GroupId, ConfigError> {
        Ok(GroupId::new(self.name.clone())?)
    }

    /// Credential to present, required when the group is restricted
    pub fn credential(&self) -> Result<Option<Credential>, ConfigError> {
        match (&self.credential, self.restricted) {
            (Some(secret), _) => Ok(Some(Credential::new(secret.clone()))),
            (None, true) => Err(ConfigError::MissingCredential(self.name.clone())),
            (None, false) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_group_is_open() {
        let config = FileGroupConfig::default();
        assert_eq!(config.group_id().unwrap().as_str(), "council");
        assert!(config.credential().unwrap().is_none());
    }

    #[test]
    fn test_restricted_group_needs_credential() {
        let config = FileGroupConfig {
            restricted: true,
            ..Default::default()
        };
        assert!(matches!(
            config.credential(),
            Err(ConfigError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let config = FileGroupConfig {
            name: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.group_id(), Err(ConfigError::InvalidGroup(_))));
    }
}
