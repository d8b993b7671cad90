//! Routing of inbound chunks to the ping responder, the registration
//! detector or the parser and normalizer, and from there onto the bus.

use crate::bus::EventBus;
use crate::command::{Command, Outbox};
use crate::config::DispatchConfig;
use crate::event::Event;
use crate::normalize::{normalize, StripPolicy};
use crate::parser::parse_line;
use serde::{Deserialize, Serialize};

/// Numerics that mark the end of registration: RPL_MYINFO and RPL_ENDOFMOTD.
const REGISTRATION_CODES: &[&str] = &["004", "376"];

/// The order in which the lines of one chunk are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOrder {
    /// Last line first. Existing bots depend on this order.
    Reverse,
    Forward,
}

impl Default for LineOrder {
    fn default() -> Self {
        LineOrder::Reverse
    }
}

impl LineOrder {
    pub fn arrange(self, chunk: &str) -> Vec<&str> {
        let mut lines: Vec<&str> = chunk.split('\n').collect();
        if self == LineOrder::Reverse {
            lines.reverse();
        }
        lines
    }
}

pub fn is_registration(command: &str) -> bool {
    REGISTRATION_CODES.contains(&command)
}

/// Builds the reply to a chunk starting with `PING`. The payload is the
/// second space separated token, cut at the first line ending.
pub fn pong_for(chunk: &str) -> Option<Command> {
    let payload = chunk.split(' ').nth(1)?;
    let payload = payload.split(|c: char| c == '\r' || c == '\n').next()?;
    if payload.is_empty() {
        return None;
    }
    Some(Command::Pong(payload.to_string()))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    order: LineOrder,
    strip: StripPolicy,
}

impl Dispatcher {
    pub fn new(order: LineOrder, strip: StripPolicy) -> Self {
        Dispatcher { order, strip }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(config.line_order, config.strip)
    }

    /// Publishes `RawReceive` for the chunk, then answers it if it is a PING
    /// or publishes the events of each of its lines. Replies end up in
    /// `outbox`.
    pub fn dispatch(&self, chunk: &str, bus: &mut EventBus, outbox: &mut Outbox) {
        bus.emit(&Event::RawReceive(chunk.to_string()), outbox);

        if chunk.starts_with("PING") {
            match pong_for(chunk) {
                Some(pong) => {
                    debug!("{}", chunk.trim_end());
                    debug!("{}", pong);
                    outbox.push(pong);
                }
                None => warn!("PING without a payload, not answering"),
            }
            return;
        }

        for line in self.order.arrange(chunk) {
            self.dispatch_line(line, bus, outbox);
        }
    }

    fn dispatch_line(&self, line: &str, bus: &mut EventBus, outbox: &mut Outbox) {
        let msg = parse_line(line);

        if is_registration(msg.command) {
            info!("Registered with server ({})", msg.command);
            bus.emit(&Event::Ready, outbox);
            return;
        }

        match normalize(&msg, self.strip) {
            Some(event) => bus.emit(&event, outbox),
            None => trace!("no event for {:?}", line),
        }
    }
}
