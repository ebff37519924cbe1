use std::time::Duration;

use anyhow::Context;

/// Resource attribute that distinguishes multiple hosts' data passing through
/// a single collector (in a chained scenario).
pub const ATTRIBUTE_INSTANA_HOST_ID: &str = "instana.host.id";

pub const HEADER_KEY: &str = "x-instana-key";
pub const HEADER_HOST: &str = "x-instana-host";
pub const HEADER_TIME: &str = "x-instana-time";

/// Configuration for the Instana exporter.
///
/// Loading (files, environment) is the host's concern; the exporter only
/// validates what it is given.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Instana agent, e.g. `http://localhost:42699`.
    pub endpoint: String,
    /// Agent key sent in the `x-instana-key` header.
    pub agent_key: String,
    /// Availability zone reported with every non-empty bundle.
    pub custom_zone: String,
    /// Per-request timeout for the HTTP dispatch.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            agent_key: String::new(),
            custom_zone: String::new(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Checks that the exporter configuration is usable.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            anyhow::bail!("no Instana agent endpoint set");
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("endpoint must start with http:// or https://");
        }
        url::Url::parse(&self.endpoint).context("endpoint must be a valid URL")?;
        if self.agent_key.is_empty() {
            anyhow::bail!("no Instana agent key set");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            endpoint: "http://localhost:42699".to_string(),
            agent_key: "key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn rejects_missing_endpoint() {
        let cfg = Config {
            endpoint: String::new(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let cfg = Config {
            endpoint: "ftp://agent".to_string(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let cfg = Config {
            endpoint: "http://".to_string(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_missing_agent_key() {
        let cfg = Config {
            agent_key: String::new(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }
}
