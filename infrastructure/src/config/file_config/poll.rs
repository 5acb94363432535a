//! Poll configuration from TOML (`[poll]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [poll]
//! rule = "any"              # "all", "any", "none", "contest", "contest:N"
//! timeout_ms = 1500         # omit for the default, 0 is rejected
//! unbounded = false         # true waits until the poll is decided
//! conclude_when_exhausted = true
//! ```

use super::ConfigError;
use poll_application::PollParams;
use poll_domain::PollRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw poll configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePollConfig {
    /// Strategy name, parsed into [`PollRule`]
    pub rule: String,
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Ignore `timeout_ms` and never time out
    pub unbounded: bool,
    /// For `any`: stop once every participant said no
    pub conclude_when_exhausted: bool,
}

impl Default for FilePollConfig {
    fn default() -> Self {
        Self {
            rule: "all".to_string(),
            timeout_ms: 2000,
            unbounded: false,
            conclude_when_exhausted: false,
        }
    }
}

impl FilePollConfig {
    pub fn parse_rule(&self) -> Result<PollRule, ConfigError> {
        self.rule
            .parse()
            .map_err(|reason| ConfigError::InvalidRule(self.rule.clone(), reason))
    }

    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        if self.unbounded {
            return Ok(None);
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(Some(Duration::from_millis(self.timeout_ms)))
    }

    pub fn to_poll_params(&self) -> Result<PollParams, ConfigError> {
        Ok(PollParams::default()
            .with_rule(self.parse_rule()?)
            .with_timeout(self.timeout()?)
            .with_conclude_when_exhausted(self.conclude_when_exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_config_default() {
        let config = FilePollConfig::default();
        let params = config.to_poll_params().unwrap();
        assert_eq!(params.rule, PollRule::BelievedByAll);
        assert_eq!(params.timeout, Some(Duration::from_millis(2000)));
    }

    #[test]
    fn test_poll_config_deserialize() {
        let toml_str = r#"
[poll]
rule = "contest:2"
timeout_ms = 500
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.poll.parse_rule().unwrap(), PollRule::Contest { winners: 2 });
        assert_eq!(config.poll.timeout().unwrap(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn test_unbounded_ignores_timeout() {
        let config = FilePollConfig {
            unbounded: true,
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout().unwrap(), None);
    }

    #[test]
    fn test_invalid_values() {
        let config = FilePollConfig {
            rule: "majority".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.parse_rule(), Err(ConfigError::InvalidRule(rule, _)) if rule == "majority"));

        let config = FilePollConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.timeout(), Err(ConfigError::InvalidTimeout)));
    }
}
