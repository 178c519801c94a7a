use std::time::Duration;

use thiserror::Error;

use crate::quiz::tutor::Persona;

const DEFAULT_DB_PATH: &str = "db.sqlite";
const DEFAULT_TUTOR_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("TUTOR_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
    #[error("unknown TUTOR_PERSONA {0:?} (expected professor or coach)")]
    UnknownPersona(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: String,
    /// The tutor is disabled when no key is set.
    pub chatgpt_api_key: Option<String>,
    pub persona: Persona,
    pub tutor_timeout: Duration,
}

impl Config {
    /// Reads the process environment. Call after `dotenv()`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let persona = match value("TUTOR_PERSONA") {
            Some(name) => Persona::from_name(&name).ok_or(ConfigError::UnknownPersona(name))?,
            None => Persona::default(),
        };
        let timeout = match value("TUTOR_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_TUTOR_TIMEOUT_SECS,
        };

        Ok(Self {
            db_path: value("QUIZ_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            chatgpt_api_key: value("CHATGPT_API_KEY"),
            persona,
            tutor_timeout: Duration::from_secs(timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, "db.sqlite");
        assert_eq!(config.chatgpt_api_key, None);
        assert_eq!(config.persona, Persona::Professor);
        assert_eq!(config.tutor_timeout, Duration::from_secs(15));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("QUIZ_DB_PATH", "/var/lib/quiz.sqlite"),
            ("CHATGPT_API_KEY", "sk-test"),
            ("TUTOR_PERSONA", "coach"),
            ("TUTOR_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, "/var/lib/quiz.sqlite");
        assert_eq!(config.chatgpt_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.persona, Persona::Coach);
        assert_eq!(config.tutor_timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_key_disables_the_tutor() {
        let config = Config::from_lookup(lookup(&[("CHATGPT_API_KEY", "  ")])).unwrap();
        assert!(config.chatgpt_api_key.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("TUTOR_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidTimeout("soon".to_string()))
        );
        assert_eq!(
            Config::from_lookup(lookup(&[("TUTOR_PERSONA", "pirate")])),
            Err(ConfigError::UnknownPersona("pirate".to_string()))
        );
    }
}
