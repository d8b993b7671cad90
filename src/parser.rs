use crate::event::{ParsedMessage, Prefix};
use nom::bytes::complete::{take_till, take_until};
use nom::character::complete::char;
use nom::combinator::rest;
use nom::multi::separated_list0;
use nom::sequence::{pair, preceded};
use nom::IResult;

const SPACE: char = ' ';
const COLON: char = ':';
const AT: char = '@';

fn nick_parser(input: &str) -> IResult<&str, &str> {
    preceded(char(COLON), take_until("!"))(input)
}

fn host_parser(input: &str) -> IResult<&str, &str> {
    preceded(pair(take_until("@"), char(AT)), rest)(input)
}

// Single spaces only: consecutive spaces yield empty tokens.
fn tokens_parser(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(SPACE), take_till(|c: char| c == SPACE))(input)
}

/// Extracts sender nick and host from the first token of a line. Never fails;
/// a field that cannot be derived is `None`.
pub fn parse_prefix(token: &str) -> Prefix {
    let nick = nick_parser(token).ok().map(|(_, nick)| nick);
    let host = host_parser(token).ok().map(|(_, host)| host);

    Prefix { nick, host }
}

/// Splits a line into `[prefix, command, target, rest...]`. Always returns at
/// least one token.
pub fn tokenize(line: &str) -> Vec<&str> {
    match tokens_parser(line) {
        Ok((_, tokens)) if !tokens.is_empty() => tokens,
        _ => vec![line],
    }
}

pub fn parse_line(line: &str) -> ParsedMessage {
    let tokens = tokenize(line);
    let prefix = parse_prefix(tokens[0]);

    ParsedMessage {
        command: tokens.get(1).copied().unwrap_or(""),
        target: tokens.get(2).copied(),
        sender: prefix.nick,
        sender_host: prefix.host,
        params: tokens.get(3..).map(|rest| rest.to_vec()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_test() {
        assert_eq!(
            parse_prefix(":alice!a@host.com"),
            Prefix {
                nick: Some("alice"),
                host: Some("host.com")
            }
        );
        assert_eq!(
            parse_prefix(":irc.example.com"),
            Prefix {
                nick: None,
                host: None
            }
        );
        assert_eq!(
            parse_prefix(":nick@example.com"),
            Prefix {
                nick: None,
                host: Some("example.com")
            }
        );
        assert_eq!(
            parse_prefix(":nick!user"),
            Prefix {
                nick: Some("nick"),
                host: None
            }
        );
    }

    #[test]
    fn prefix_needs_leading_colon_for_nick() {
        assert_eq!(parse_prefix("nick!user@host").nick, None);
        assert_eq!(parse_prefix("nick!user@host").host, Some("host"));
        assert_eq!(parse_prefix("PING"), Prefix::default());
        assert_eq!(parse_prefix(""), Prefix::default());
    }

    #[test]
    fn prefix_splits_on_first_delimiters() {
        assert_eq!(
            parse_prefix(":a!b!c@d@e"),
            Prefix {
                nick: Some("a"),
                host: Some("d@e")
            }
        );
        assert_eq!(parse_prefix(":!x@y").nick, Some(""));
    }

    #[test]
    fn tokenize_test() {
        assert_eq!(
            tokenize(":Angel!wings@irc.org PRIVMSG Wiz :Are you receiving?"),
            vec![":Angel!wings@irc.org", "PRIVMSG", "Wiz", ":Are", "you", "receiving?"]
        );
        assert_eq!(tokenize("a  b "), vec!["a", "", "b", ""]);
        assert_eq!(tokenize(""), vec![""]);
    }

    #[test]
    fn parse_line_test() {
        assert_eq!(
            parse_line(":alice!a@host.com PRIVMSG #chan :hello world"),
            ParsedMessage {
                command: "PRIVMSG",
                target: Some("#chan"),
                sender: Some("alice"),
                sender_host: Some("host.com"),
                params: vec![":hello", "world"],
            }
        );
        assert_eq!(
            parse_line(":server 004 nick :Welcome"),
            ParsedMessage {
                command: "004",
                target: Some("nick"),
                sender: None,
                sender_host: None,
                params: vec![":Welcome"],
            }
        );
    }

    #[test]
    fn short_lines_degrade() {
        let msg = parse_line(":bob!b@h");
        assert_eq!(msg.command, "");
        assert_eq!(msg.target, None);
        assert!(msg.params.is_empty());

        let msg = parse_line(":bob!b@h QUIT");
        assert_eq!(msg.command, "QUIT");
        assert_eq!(msg.target, None);
    }
}
