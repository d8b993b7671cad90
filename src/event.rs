use std::fmt;

/// Sender information taken from a line's leading `:nick!user@host` token.
/// Either field is `None` when its delimiter is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prefix<'a> {
    pub nick: Option<&'a str>,
    pub host: Option<&'a str>,
}

/// One tokenized line, before any command-specific normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage<'a> {
    pub command: &'a str,
    pub target: Option<&'a str>,
    pub sender: Option<&'a str>,
    pub sender_host: Option<&'a str>,
    pub params: Vec<&'a str>,
}

/// Payload shared by every message-derived event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageEvent {
    pub sender: Option<String>,
    pub shost: Option<String>,
    pub target: Option<String>,
    pub message: Option<String>,
    /// Tokens after the target, as they appeared on the line.
    pub params: Vec<String>,
}

impl<'a> From<&ParsedMessage<'a>> for MessageEvent {
    fn from(msg: &ParsedMessage<'a>) -> Self {
        MessageEvent {
            sender: msg.sender.map(str::to_string),
            shost: msg.sender_host.map(str::to_string),
            target: msg.target.map(str::to_string),
            message: None,
            params: msg.params.iter().map(|&p| p.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The transport connected and the registration lines were sent.
    Connected,
    /// The transport closed. Nothing is dispatched after this.
    Disconnected,
    /// An inbound chunk, exactly as read.
    RawReceive(String),
    /// The server sent 004 or 376.
    Ready,
    ChanMsg(MessageEvent),
    PrivMsg(MessageEvent),
    Join(MessageEvent),
    Part(MessageEvent),
    Quit(MessageEvent),
    Nick(MessageEvent),
    Kick(MessageEvent),
    Invite(MessageEvent),
    Topic(MessageEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connected,
    Disconnected,
    RawReceive,
    Ready,
    ChanMsg,
    PrivMsg,
    Join,
    Part,
    Quit,
    Nick,
    Kick,
    Invite,
    Topic,
}

impl EventKind {
    pub const ALL: [EventKind; 13] = [
        EventKind::Connected,
        EventKind::Disconnected,
        EventKind::RawReceive,
        EventKind::Ready,
        EventKind::ChanMsg,
        EventKind::PrivMsg,
        EventKind::Join,
        EventKind::Part,
        EventKind::Quit,
        EventKind::Nick,
        EventKind::Kick,
        EventKind::Invite,
        EventKind::Topic,
    ];
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Connected => EventKind::Connected,
            Event::Disconnected => EventKind::Disconnected,
            Event::RawReceive(_) => EventKind::RawReceive,
            Event::Ready => EventKind::Ready,
            Event::ChanMsg(_) => EventKind::ChanMsg,
            Event::PrivMsg(_) => EventKind::PrivMsg,
            Event::Join(_) => EventKind::Join,
            Event::Part(_) => EventKind::Part,
            Event::Quit(_) => EventKind::Quit,
            Event::Nick(_) => EventKind::Nick,
            Event::Kick(_) => EventKind::Kick,
            Event::Invite(_) => EventKind::Invite,
            Event::Topic(_) => EventKind::Topic,
        }
    }

    /// The message payload, for the variants derived from a protocol line.
    pub fn message(&self) -> Option<&MessageEvent> {
        match self {
            Event::ChanMsg(m)
            | Event::PrivMsg(m)
            | Event::Join(m)
            | Event::Part(m)
            | Event::Quit(m)
            | Event::Nick(m)
            | Event::Kick(m)
            | Event::Invite(m)
            | Event::Topic(m) => Some(m),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EventKind::Connected => "connected",
            EventKind::Disconnected => "disconnected",
            EventKind::RawReceive => "rawReceive",
            EventKind::Ready => "ready",
            EventKind::ChanMsg => "CHANMSG",
            EventKind::PrivMsg => "PRIVMSG",
            EventKind::Join => "JOIN",
            EventKind::Part => "PART",
            EventKind::Quit => "QUIT",
            EventKind::Nick => "NICK",
            EventKind::Kick => "KICK",
            EventKind::Invite => "INVITE",
            EventKind::Topic => "TOPIC",
        };
        f.write_str(name)
    }
}
