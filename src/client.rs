use crate::bus::{EventBus, HandlerId};
use crate::command::{Command, Outbox};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::event::{Event, EventKind};
use crate::stream::{write_line, ChunkReader, Stream};
use crate::transport::{Connector, Direct, Socks5};
use std::net::TcpStream;

/// A connection to one server. Register handlers with [`Client::on`], then
/// call [`Client::run`], which blocks until the server closes the connection.
pub struct Client<T: Stream = TcpStream> {
    stream: T,
    config: Config,
    reader: ChunkReader,
    dispatcher: Dispatcher,
    bus: EventBus,
}

impl Client<TcpStream> {
    pub fn connect(config: Config) -> Result<Self> {
        config.validate()?;

        let stream = match &config.proxy {
            Some(proxy) => Socks5 {
                proxy: proxy.clone(),
            }
            .connect(&config.host, config.port)?,
            None => Direct.connect(&config.host, config.port)?,
        };

        Ok(Client::with_stream(stream, config))
    }
}

impl<T: Stream> Client<T> {
    pub fn with_stream(stream: T, config: Config) -> Self {
        Client {
            stream,
            reader: ChunkReader::new(config.dispatch.reassemble),
            dispatcher: Dispatcher::from_config(&config.dispatch),
            bus: EventBus::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> HandlerId
    where
        F: FnMut(&Event, &mut Outbox) + 'static,
    {
        self.bus.on(kind, handler)
    }

    pub fn off(&mut self, id: HandlerId) -> bool {
        self.bus.off(id)
    }

    /// Sends PASS (if configured), NICK and USER, then publishes `Connected`.
    pub fn register(&mut self) -> Result<()> {
        if let Some(password) = self.config.password.clone() {
            self.write(&Command::Pass(password))?;
        }
        let nick = self.config.nickname.clone();
        self.write(&Command::Nick(nick.clone()))?;
        self.write(&Command::User {
            nick,
            fullname: self.config.fullname().to_string(),
        })?;
        info!("Client connected");

        let mut outbox = Outbox::default();
        self.bus.emit(&Event::Connected, &mut outbox);
        self.flush(outbox)
    }

    /// Registers, then dispatches everything the server sends until it
    /// closes the connection. `Disconnected` is published on the way out,
    /// whether the connection closed cleanly or with an error.
    pub fn run(&mut self) -> Result<()> {
        let result = self.register().and_then(|_| self.read_loop());
        info!("Disconnected from server");

        let mut outbox = Outbox::default();
        self.bus.emit(&Event::Disconnected, &mut outbox);
        if !outbox.is_empty() {
            warn!("Dropping {} command(s) queued after disconnect", outbox.len());
        }

        result
    }

    fn read_loop(&mut self) -> Result<()> {
        while let Some(chunk) = self.reader.read_chunk(&mut self.stream)? {
            self.handle_chunk(&chunk)?;
        }
        Ok(())
    }

    /// Dispatches one inbound chunk and writes the replies it produced.
    pub fn handle_chunk(&mut self, chunk: &str) -> Result<()> {
        if self.config.debug {
            info!(target: "ircflow::raw", "{}", chunk);
        }

        let mut outbox = Outbox::default();
        self.dispatcher.dispatch(chunk, &mut self.bus, &mut outbox);
        self.flush(outbox)
    }

    fn flush(&mut self, mut outbox: Outbox) -> Result<()> {
        for command in outbox.drain() {
            self.write(&command)?;
        }
        Ok(())
    }

    fn write(&mut self, command: &Command) -> Result<()> {
        trace!("-> {}", command);
        write_line(&mut self.stream, &command.to_string())?;
        Ok(())
    }

    pub fn send(&mut self, command: Command) -> Result<()> {
        debug!("{}", command);
        self.write(&command)
    }

    pub fn join(&mut self, channel: &str) -> Result<()> {
        info!("JOIN {}", channel);
        self.write(&Command::Join(channel.to_string()))
    }

    pub fn part(&mut self, channel: &str) -> Result<()> {
        self.send(Command::Part(channel.to_string()))
    }

    pub fn quit(&mut self, message: &str) -> Result<()> {
        self.send(Command::Quit(message.to_string()))
    }

    pub fn say(&mut self, target: &str, message: &str) -> Result<()> {
        self.send(Command::Privmsg {
            target: target.to_string(),
            message: message.to_string(),
        })
    }

    pub fn notice(&mut self, target: &str, message: &str) -> Result<()> {
        self.send(Command::Notice {
            target: target.to_string(),
            message: message.to_string(),
        })
    }

    pub fn nick(&mut self, nick: &str) -> Result<()> {
        self.send(Command::Nick(nick.to_string()))
    }

    pub fn mode(&mut self, channel: &str, mode: &str, nick: &str) -> Result<()> {
        self.send(Command::Mode {
            channel: channel.to_string(),
            mode: mode.to_string(),
            nick: nick.to_string(),
        })
    }

    pub fn kick(&mut self, channel: &str, nick: &str, reason: &str) -> Result<()> {
        self.send(Command::Kick {
            channel: channel.to_string(),
            nick: nick.to_string(),
            reason: reason.to_string(),
        })
    }

    pub fn raw_write(&mut self, line: &str) -> Result<()> {
        self.send(Command::Raw(line.to_string()))
    }

    pub fn into_stream(self) -> T {
        self.stream
    }
}
