//! Opening the byte stream to the server, directly or through a SOCKS5 proxy.

use crate::config::ProxyConfig;
use crate::error::{Error, Result};
use crate::stream::Stream;
use std::io::{Read, Write};
use std::net::TcpStream;

const SOCKS_VERSION: u8 = 0x05;
const NO_AUTHENTICATION: u8 = 0x00;
const CMD_CONNECT: u8 = 0x01;
const ATYP_IPV4: u8 = 0x01;
const ATYP_DOMAIN: u8 = 0x03;
const ATYP_IPV6: u8 = 0x04;

pub trait Connector {
    type Stream: Stream;

    fn connect(&self, host: &str, port: u16) -> Result<Self::Stream>;
}

pub struct Direct;

impl Connector for Direct {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16) -> Result<TcpStream> {
        Ok(TcpStream::connect((host, port))?)
    }
}

pub struct Socks5 {
    pub proxy: ProxyConfig,
}

impl Connector for Socks5 {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16) -> Result<TcpStream> {
        let mut stream = TcpStream::connect((self.proxy.host.as_str(), self.proxy.port))?;
        debug!("Connected to proxy {}:{}", self.proxy.host, self.proxy.port);
        socks5_handshake(&mut stream, host, port)?;
        Ok(stream)
    }
}

/// Asks the proxy on the other end of `stream` to connect to `host:port`.
/// The host is always sent as a domain name, so resolution happens on the
/// proxy.
pub fn socks5_handshake<T: Read + Write>(stream: &mut T, host: &str, port: u16) -> Result<()> {
    if host.is_empty() || host.len() > 255 {
        return Err(Error::Proxy(format!("cannot send host name {:?} to proxy", host)));
    }

    stream.write_all(&[SOCKS_VERSION, 1, NO_AUTHENTICATION])?;
    let mut choice = [0u8; 2];
    stream.read_exact(&mut choice)?;
    if choice != [SOCKS_VERSION, NO_AUTHENTICATION] {
        return Err(Error::Proxy(format!(
            "proxy refused unauthenticated access (reply {:02x?})",
            choice
        )));
    }

    let mut request = Vec::with_capacity(7 + host.len());
    request.extend_from_slice(&[SOCKS_VERSION, CMD_CONNECT, 0x00, ATYP_DOMAIN, host.len() as u8]);
    request.extend_from_slice(host.as_bytes());
    request.extend_from_slice(&port.to_be_bytes());
    stream.write_all(&request)?;
    stream.flush()?;

    let mut reply = [0u8; 4];
    stream.read_exact(&mut reply)?;
    if reply[0] != SOCKS_VERSION {
        return Err(Error::Proxy(format!("unexpected SOCKS version {}", reply[0])));
    }
    if reply[1] != 0x00 {
        return Err(Error::Proxy(format!(
            "proxy could not connect to {}:{} ({})",
            host,
            port,
            reply_message(reply[1])
        )));
    }

    // The bound address is of no use to us, but it has to be consumed.
    let address_len = match reply[3] {
        ATYP_IPV4 => 4,
        ATYP_IPV6 => 16,
        ATYP_DOMAIN => {
            let mut len = [0u8; 1];
            stream.read_exact(&mut len)?;
            len[0] as usize
        }
        other => return Err(Error::Proxy(format!("unknown address type {}", other))),
    };
    let mut bound = vec![0u8; address_len + 2];
    stream.read_exact(&mut bound)?;

    Ok(())
}

fn reply_message(code: u8) -> &'static str {
    match code {
        0x01 => "general failure",
        0x02 => "connection not allowed by ruleset",
        0x03 => "network unreachable",
        0x04 => "host unreachable",
        0x05 => "connection refused",
        0x06 => "TTL expired",
        0x07 => "command not supported",
        0x08 => "address type not supported",
        _ => "unknown error",
    }
}
