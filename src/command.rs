use std::fmt;

/// An outbound protocol line. `Display` renders it without the CRLF, which
/// the line writer adds.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pass(String),
    Nick(String),
    User { nick: String, fullname: String },
    Join(String),
    Part(String),
    Quit(String),
    Privmsg { target: String, message: String },
    Notice { target: String, message: String },
    Mode { channel: String, mode: String, nick: String },
    Kick { channel: String, nick: String, reason: String },
    Pong(String),
    Raw(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Command::Pass(password) => write!(f, "PASS {}", password),
            Command::Nick(nick) => write!(f, "NICK {}", nick),
            Command::User { nick, fullname } => write!(f, "USER {} 0 * :{}", nick, fullname),
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Part(channel) => write!(f, "PART {}", channel),
            Command::Quit(message) => write!(f, "QUIT :Quit: {}", message),
            Command::Privmsg { target, message } => write!(f, "PRIVMSG {} :{}", target, message),
            Command::Notice { target, message } => write!(f, "NOTICE {} :{}", target, message),
            Command::Mode { channel, mode, nick } => write!(f, "MODE {} {} {}", channel, mode, nick),
            Command::Kick {
                channel,
                nick,
                reason,
            } => write!(f, "KICK {} {} :{}", channel, nick, reason),
            Command::Pong(payload) => write!(f, "PONG {}", payload),
            Command::Raw(line) => f.write_str(line),
        }
    }
}

/// Commands queued during one dispatch, written once it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outbox {
    commands: Vec<Command>,
}

impl Outbox {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn say<T: Into<String>, M: Into<String>>(&mut self, target: T, message: M) {
        self.push(Command::Privmsg {
            target: target.into(),
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(Command::to_string).collect()
    }

    pub fn drain(&mut self) -> std::vec::Drain<Command> {
        self.commands.drain(..)
    }
}
