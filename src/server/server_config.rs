use std::{fs, path::Path, net::SocketAddr};
use serde::{Serialize, Deserialize};

use anyhow::Context;

use crate::core::{account::demo_accounts, AccountSeed};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    pub host: String,
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        BindConfig { host: "0.0.0.0".to_owned(), port: 8000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allow any origin, method and header, credentials included.
    pub permissive: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig { permissive: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind: BindConfig,
    pub cors: CorsConfig,
    /// Accounts the ledger is seeded with at startup.
    pub accounts: Vec<AccountSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: BindConfig::default(),
            cors: CorsConfig::default(),
            accounts: demo_accounts(),
        }
    }
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let filepath = filepath.as_ref();
        let file_content = fs::read_to_string(filepath)
            .with_context(|| format!("failed to read config file {}", filepath.display()))?;
        Self::parse(&file_content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind.host, self.bind.port);
        addr.parse()
            .with_context(|| format!("invalid bind address {}", addr))
    }
}


#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::core::AccountSeed;

    use rstest::rstest;

    #[rstest]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8000");
        assert!(config.cors.permissive);
        assert_eq!(config.accounts.len(), 3);
    }

    #[rstest]
    fn full_file() {
        let config = AppConfig::parse(r#"
            [bind]
            host = "127.0.0.1"
            port = 9001

            [cors]
            permissive = false

            [[accounts]]
            username = "Bilbo"
            pin = "0000"
            balance = 12.5
        "#).unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9001");
        assert!(!config.cors.permissive);
        assert_eq!(config.accounts, vec![AccountSeed::new("Bilbo", "0000", 12.5)]);
    }

    #[rstest]
    fn partial_bind_section_keeps_default_host() {
        let config = AppConfig::parse("[bind]\nport = 8080\n").unwrap();
        assert_eq!(config.bind.host, "0.0.0.0");
        assert_eq!(config.bind.port, 8080);
    }

    #[rstest]
    #[case("[bind]\nport = \"eighty\"\n")]
    #[case("accounts = 3")]
    fn malformed_file_is_an_error(#[case] content: &str) {
        assert!(AppConfig::parse(content).is_err());
    }

    #[rstest]
    fn bad_host_is_an_error() {
        let mut config = AppConfig::default();
        config.bind.host = "not a host".to_owned();
        assert!(config.socket_addr().is_err());
    }

    #[rstest]
    fn missing_file_is_an_error() {
        assert!(AppConfig::read("/nonexistent/minibank.toml").is_err());
    }

    #[rstest]
    fn shipped_config_matches_defaults() {
        let config = AppConfig::read(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/server.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
