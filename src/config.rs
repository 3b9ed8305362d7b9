use std::num::NonZeroUsize;
use std::time::Duration;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as URL: {source}")]
    ParseUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base origin of the blog REST API.
    pub api_url: Url,
    pub request_timeout: Duration,

    // Browsing
    pub authors_per_page: NonZeroUsize,
    pub posts_per_page: NonZeroUsize,
    pub suggestion_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_env_url("BLOG_API_URL")?,
            request_timeout: Duration::from_secs(parse_env_u64("REQUEST_TIMEOUT_SECS", 30)?),
            authors_per_page: parse_env_page_size("AUTHORS_PER_PAGE", 12)?,
            posts_per_page: parse_env_page_size("POSTS_PER_PAGE", 5)?,
            suggestion_limit: parse_env_usize("SUGGESTION_LIMIT", 5)?,
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                name: "BLOG_API_URL".to_string(),
                message: format!("unsupported scheme '{}'", self.api_url.scheme()),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "REQUEST_TIMEOUT_SECS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration pointing at a local API with the stock page sizes.
    /// Test scaffolding; not read from the environment.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_url: Url::parse("http://localhost:3001").expect("literal URL"),
            request_timeout: Duration::from_secs(5),
            authors_per_page: NonZeroUsize::new(12).expect("non-zero literal"),
            posts_per_page: NonZeroUsize::new(5).expect("non-zero literal"),
            suggestion_limit: 5,
        }
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_env_url(name: &str) -> Result<Url, ConfigError> {
    let raw = required_env(name)?;
    Url::parse(&raw).map_err(|e| ConfigError::ParseUrl {
        name: name.to_string(),
        source: e,
    })
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_page_size(name: &str, default: usize) -> Result<NonZeroUsize, ConfigError> {
    let value = parse_env_usize(name, default)?;
    NonZeroUsize::new(value).ok_or_else(|| ConfigError::InvalidValue {
        name: name.to_string(),
        message: "must be at least 1".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_missing_required_url() {
        assert!(matches!(
            parse_env_url("BLOG_BROWSER_NONEXISTENT_VAR"),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }

    #[test]
    fn test_defaults_apply_when_unset() {
        assert_eq!(parse_env_u64("BLOG_BROWSER_NONEXISTENT_VAR", 30).unwrap(), 30);
        assert_eq!(
            parse_env_page_size("BLOG_BROWSER_NONEXISTENT_VAR", 12)
                .unwrap()
                .get(),
            12
        );
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        std::env::set_var("BLOG_API_URL", "http://blog.example.com/api");
        std::env::set_var("POSTS_PER_PAGE", "7");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_url.as_str(), "http://blog.example.com/api");
        assert_eq!(config.posts_per_page.get(), 7);
        assert_eq!(config.authors_per_page.get(), 12);
        config.validate().unwrap();

        std::env::remove_var("BLOG_API_URL");
        std::env::remove_var("POSTS_PER_PAGE");
    }

    #[test]
    #[serial]
    fn test_zero_page_size_rejected() {
        std::env::set_var("POSTS_PER_PAGE", "0");
        std::env::set_var("BLOG_API_URL", "http://localhost:3001");

        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidValue { .. })
        ));

        std::env::remove_var("POSTS_PER_PAGE");
        std::env::remove_var("BLOG_API_URL");
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = Config {
            api_url: Url::parse("ftp://example.com").unwrap(),
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}
