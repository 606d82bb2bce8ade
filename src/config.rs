use std::time::Duration;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_VERSES_PATH: &str = "verses.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub verses_path: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_timeout(&raw)?),
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self {
            gemini_api_key: lookup("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: lookup("GEMINI_MODEL").unwrap_or(DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or(DEFAULT_GEMINI_BASE_URL.to_string()),
            verses_path: lookup("VERSES_PATH").unwrap_or(DEFAULT_VERSES_PATH.to_string()),
            request_timeout,
        })
    }

    /// One-line description for the log view. Never includes the key itself.
    pub fn summary(&self) -> String {
        let key_state = if self.gemini_api_key.trim().is_empty() {
            "missing"
        } else {
            "set"
        };

        format!(
            "model={} corpus={} timeout={}s api_key={key_state}",
            self.gemini_model,
            self.verses_path,
            self.request_timeout.as_secs()
        )
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        name: "REQUEST_TIMEOUT_SECS",
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;

    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }

    Ok(secs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.gemini_api_key, "");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.gemini_base_url, DEFAULT_GEMINI_BASE_URL);
        assert_eq!(config.verses_path, DEFAULT_VERSES_PATH);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
            ("VERSES_PATH", "/data/verses.json"),
            ("REQUEST_TIMEOUT_SECS", " 5 "),
        ])
        .unwrap();

        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.verses_path, "/data/verses.json");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn summary_hides_key() {
        let config = config_from(&[("GEMINI_API_KEY", "secret")]).unwrap();
        let summary = config.summary();

        assert!(summary.contains("api_key=set"));
        assert!(!summary.contains("secret"));
    }
}
