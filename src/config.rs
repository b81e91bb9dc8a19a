use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Port to listen on; the PORT environment variable takes precedence
    #[serde(default = "default_port")]
    pub port: u16,
    /// URL of the RSS feed rendered by the front page
    #[serde(default = "default_feed_url")]
    pub feed_url: String,
    /// Upstream fetch timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_port() -> u16 {
    3000
}

fn default_feed_url() -> String {
    "https://mashable.com/feeds/rss/all".to_string()
}

fn default_fetch_timeout() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            feed_url: default_feed_url(),
            fetch_timeout_secs: default_fetch_timeout(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse config from a TOML string (useful for testing)
    pub fn from_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from a config file if one exists, otherwise use defaults.
    /// A PORT environment variable overrides the configured port either way.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default()
        };

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("PORT must be a port number, got '{}'", port))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.feed_url, "https://mashable.com/feeds/rss/all");
        assert_eq!(config.fetch_timeout_secs, 15);
    }

    #[test]
    fn test_load_valid_config() {
        let content = r#"
            port = 8080
            feed_url = "https://example.com/rss.xml"
            fetch_timeout_secs = 5
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.feed_url, "https://example.com/rss.xml");
        assert_eq!(config.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.feed_url, "https://mashable.com/feeds/rss/all");
        assert_eq!(config.fetch_timeout_secs, 15);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_str("port = 4000").unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.feed_url, "https://mashable.com/feeds/rss/all");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = Config::load("/nonexistent/path/config.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let content = "this is not valid toml {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_invalid_port_type() {
        let result = Config::from_str("port = \"not a number\"");
        assert!(result.is_err());
    }

    // Single test for the PORT override so parallel tests never race on the
    // process environment.
    #[test]
    fn test_load_or_default_and_port_override() {
        std::env::remove_var("PORT");
        let config = Config::load_or_default("/nonexistent/nexus.toml").unwrap();
        assert_eq!(config.port, 3000);

        std::env::set_var("PORT", "9000");
        let config = Config::load_or_default("/nonexistent/nexus.toml").unwrap();
        assert_eq!(config.port, 9000);

        std::env::set_var("PORT", "not-a-port");
        let result = Config::load_or_default("/nonexistent/nexus.toml");
        assert!(result.is_err());

        std::env::remove_var("PORT");
    }
}
