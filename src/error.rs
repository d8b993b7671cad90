use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The SOCKS proxy refused the handshake or the CONNECT request.
    #[error("proxy error: {0}")]
    Proxy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
