use crate::error::{Error, Result};

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use std::fs;
use std::path::Path;
use std::time::Duration;

/// Production endpoint of the Dark Sky API.
pub const DEFAULT_BASE_URL: &str = "https://api.darksky.net";

/// Settings needed to talk to the API.
///
/// A config file is a JSON object:
///
/// ```json
/// { "api_key": "0123456789abcdef", "base_url": "https://api.darksky.net", "timeout_secs": 10 }
/// ```
///
/// Only `api_key` is required.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub api_key: SecretString,
    #[serde(default)]
    pub base_url: String,
    #[serde(default, rename = "timeout_secs", deserialize_with = "de_timeout_secs")]
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        ClientConfig {
            api_key: SecretString::new(api_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deadline handed to the default HTTP transport for each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conf_str = fs::read_to_string(path).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            source: err.into(),
        })?;
        let conf: ClientConfig = serde_json::from_str(&conf_str).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            source: err.into(),
        })?;
        Ok(conf)
    }

    /// Base URL with the default filled in and any trailing slash removed.
    pub(crate) fn resolved_base_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            base.to_string()
        }
    }
}

fn de_timeout_secs<'de, D>(deserializer: D) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    use std::io::Write;

    #[test]
    fn new_uses_production_endpoint() {
        let conf = ClientConfig::new("KEY");
        assert_eq!(conf.base_url, DEFAULT_BASE_URL);
        assert_eq!(conf.api_key.expose_secret(), "KEY");
        assert_eq!(conf.timeout, None);
    }

    #[test]
    fn empty_base_url_resolves_to_default() {
        let conf = ClientConfig::new("KEY").with_base_url("");
        assert_eq!(conf.resolved_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let conf = ClientConfig::new("KEY").with_base_url("http://127.0.0.1:8080/");
        assert_eq!(conf.resolved_base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn debug_output_hides_key() {
        let conf = ClientConfig::new("super-secret");
        assert!(!format!("{conf:?}").contains("super-secret"));
    }

    #[test]
    fn from_file_reads_json() {
        let name = format!("darksky-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"api_key": "FILE_KEY", "base_url": "http://localhost:1234", "timeout_secs": 7}}"#
        )
        .unwrap();

        let conf = ClientConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(conf.api_key.expose_secret(), "FILE_KEY");
        assert_eq!(conf.base_url, "http://localhost:1234");
        assert_eq!(conf.timeout, Some(Duration::from_secs(7)));
    }

    #[test]
    fn from_file_optional_fields_default() {
        let conf: ClientConfig = serde_json::from_str(r#"{"api_key": "K"}"#).unwrap();
        assert_eq!(conf.base_url, "");
        assert_eq!(conf.resolved_base_url(), DEFAULT_BASE_URL);
        assert_eq!(conf.timeout, None);
    }

    #[test]
    fn from_file_missing_file_is_config_error() {
        let err = ClientConfig::from_file("/nonexistent/darksky.json").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
