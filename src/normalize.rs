//! Per-command transforms from a tokenized line to a typed event.
//!
//! The transforms trim delimiter characters (the `:` introducing a trailing
//! parameter, the `\r` left over from line splitting) by position. How that
//! trimming is done is a [`StripPolicy`], so every transform goes through the
//! three named steps below and never slices strings itself.

use crate::event::{Event, MessageEvent, ParsedMessage};
use serde::{Deserialize, Serialize};

const LEADING_DELIMITERS: &[char] = &[':'];
const TRAILING_DELIMITERS: &[char] = &['\r', ';'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripPolicy {
    /// Drop the character whatever it is. Compatible with existing servers and
    /// bots, but eats a real character when the delimiter is absent.
    Unconditional,
    /// Drop the character only if it is a known delimiter.
    IfMatches,
}

impl Default for StripPolicy {
    fn default() -> Self {
        StripPolicy::Unconditional
    }
}

impl StripPolicy {
    pub fn strip_leading(self, s: &str) -> &str {
        match self {
            StripPolicy::Unconditional => {
                let mut chars = s.chars();
                chars.next();
                chars.as_str()
            }
            StripPolicy::IfMatches => s.strip_prefix(LEADING_DELIMITERS).unwrap_or(s),
        }
    }

    pub fn strip_trailing(self, s: &str) -> &str {
        match self {
            StripPolicy::Unconditional => {
                let mut chars = s.chars();
                chars.next_back();
                chars.as_str()
            }
            StripPolicy::IfMatches => s.strip_suffix(TRAILING_DELIMITERS).unwrap_or(s),
        }
    }

    /// Under `Unconditional` a single character is returned as is, the way
    /// existing clients treat `x` in `NICK x`.
    pub fn strip_both(self, s: &str) -> &str {
        if self == StripPolicy::Unconditional && s.chars().count() == 1 {
            return s;
        }
        self.strip_trailing(self.strip_leading(s))
    }
}

/// Turns a parsed line into its event, or `None` for commands without one.
pub fn normalize(msg: &ParsedMessage, strip: StripPolicy) -> Option<Event> {
    let mut event = MessageEvent::from(msg);

    match msg.command {
        "PRIVMSG" => {
            event.message = Some(strip.strip_leading(&msg.params.join(" ")).to_string());
            if msg.target.map_or(false, |t| t.starts_with('#')) {
                Some(Event::ChanMsg(event))
            } else {
                Some(Event::PrivMsg(event))
            }
        }
        "JOIN" => {
            event.target = msg.target.map(|t| strip.strip_trailing(t).to_string());
            Some(Event::Join(event))
        }
        "PART" => {
            event.target = msg.target.map(|t| strip.strip_trailing(t).to_string());
            Some(Event::Part(event))
        }
        "INVITE" => {
            event.message = msg.params.first().map(|p| strip.strip_both(p).to_string());
            Some(Event::Invite(event))
        }
        "TOPIC" => {
            event.message = Some(strip.strip_leading(&msg.params.join(" ")).to_string());
            Some(Event::Topic(event))
        }
        "KICK" => {
            let reason = msg.params.get(1..).unwrap_or_default().join(" ");
            event.message = Some(strip.strip_both(&reason).to_string());
            Some(Event::Kick(event))
        }
        "QUIT" => {
            event.target = Some(String::new());
            Some(Event::Quit(event))
        }
        "NICK" => {
            event.target = msg.target.map(|t| strip.strip_both(t).to_string());
            Some(Event::Nick(event))
        }
        _ => None,
    }
}
