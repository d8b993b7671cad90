//! Client configuration.
//!
//! Every field except `host` and `nickname` has a default, so a minimal TOML
//! file looks like:
//!
//! ```toml
//! host = "irc.example.com"
//! nickname = "ferris"
//! ```

use crate::dispatch::LineOrder;
use crate::error::{Error, Result};
use crate::normalize::StripPolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_PORT: u16 = 6667;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub nickname: String,
    #[serde(default)]
    pub fullname: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    /// 0 silent, 1 normal, 2 info, 3 debug.
    #[serde(default = "default_verbosity")]
    pub verbosity: u8,
    /// Echo every inbound chunk under the `ircflow::raw` log target.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub line_order: LineOrder,
    #[serde(default)]
    pub strip: StripPolicy,
    /// Hold back a trailing partial line until the rest of it arrives.
    #[serde(default)]
    pub reassemble: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_verbosity() -> u8 {
    1
}

impl Config {
    pub fn new<H: Into<String>, N: Into<String>>(host: H, port: u16, nickname: N) -> Self {
        Config {
            host: host.into(),
            port,
            nickname: nickname.into(),
            fullname: None,
            password: None,
            proxy: None,
            verbosity: default_verbosity(),
            debug: false,
            dispatch: DispatchConfig::default(),
        }
    }

    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Config = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(Error::Config("port must not be 0".into()));
        }
        if self.nickname.is_empty() {
            return Err(Error::Config("nickname must not be empty".into()));
        }
        if self.verbosity > 3 {
            return Err(Error::Config(format!(
                "verbosity must be between 0 and 3, got {}",
                self.verbosity
            )));
        }
        if let Some(proxy) = &self.proxy {
            if proxy.host.is_empty() || proxy.port == 0 {
                return Err(Error::Config("proxy needs both a host and a port".into()));
            }
        }
        Ok(())
    }

    /// The realname sent with USER; falls back to the nickname.
    pub fn fullname(&self) -> &str {
        self.fullname.as_deref().unwrap_or(&self.nickname)
    }

    /// Maps the verbosity level onto the `log` crate's filter, for the
    /// application to hand to whatever logger it installs.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = Config::from_toml_str("host = \"irc.example.com\"\nnickname = \"ferris\"\n").unwrap();
        assert_eq!(config, Config::new("irc.example.com", DEFAULT_PORT, "ferris"));
        assert_eq!(config.fullname(), "ferris");
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert!(!config.dispatch.reassemble);
    }

    #[test]
    fn full_toml() {
        let config = Config::from_toml_str(
            r#"
            host = "irc.example.com"
            port = 7000
            nickname = "ferris"
            fullname = "Ferris the Crab"
            password = "hunter2"
            verbosity = 3
            debug = true

            [proxy]
            host = "127.0.0.1"
            port = 1080

            [dispatch]
            line_order = "forward"
            strip = "if_matches"
            reassemble = true
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.fullname(), "Ferris the Crab");
        assert_eq!(config.password.as_deref(), Some("hunter2"));
        assert_eq!(
            config.proxy,
            Some(ProxyConfig {
                host: "127.0.0.1".into(),
                port: 1080
            })
        );
        assert_eq!(config.log_level(), LevelFilter::Trace);
        assert_eq!(
            config.dispatch,
            DispatchConfig {
                line_order: LineOrder::Forward,
                strip: StripPolicy::IfMatches,
                reassemble: true,
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::new("irc.example.com", 6667, "ferris");
        config.verbosity = 4;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let mut config = Config::new("irc.example.com", 0, "ferris");
        assert!(config.validate().is_err());
        config.port = 6667;
        config.nickname.clear();
        assert!(config.validate().is_err());

        let mut config = Config::new("irc.example.com", 6667, "ferris");
        config.proxy = Some(ProxyConfig {
            host: String::new(),
            port: 1080,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml_str("host = "),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn verbosity_levels() {
        let mut config = Config::new("h", 1, "n");
        config.verbosity = 0;
        assert_eq!(config.log_level(), LevelFilter::Off);
        config.verbosity = 2;
        assert_eq!(config.log_level(), LevelFilter::Debug);
    }
}
