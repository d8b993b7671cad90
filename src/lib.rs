//! IRC line parsing and synchronous event dispatch.
//!
//! ```no_run
//! use ircflow::{Client, Config, EventKind};
//!
//! let mut client = Client::connect(Config::new("irc.example.com", 6667, "ferris"))?;
//! client.on(EventKind::Ready, |_, outbox| outbox.push(ircflow::Command::Join("#rust".into())));
//! client.on(EventKind::ChanMsg, |event, outbox| {
//!     let msg = event.message().unwrap();
//!     if msg.message.as_deref().map_or(false, |m| m.starts_with("!hello")) {
//!         outbox.say(msg.target.clone().unwrap_or_default(), "hello!");
//!     }
//! });
//! client.run()?;
//! # Ok::<(), ircflow::Error>(())
//! ```

#[macro_use]
extern crate log;

pub mod bus;
pub mod client;
pub mod command;
pub mod config;
pub mod dispatch;
mod error;
pub mod event;
pub mod normalize;
pub mod parser;
pub mod stream;
pub mod transport;

pub use crate::bus::{EventBus, HandlerId};
pub use crate::client::Client;
pub use crate::command::{Command, Outbox};
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::event::{Event, EventKind, MessageEvent};
