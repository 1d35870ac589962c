//! Operator commands typed at the terminal.

use std::str::FromStr;

use ride_queue_core::queue::UnknownFilter;
use ride_queue_core::{Filter, RideId};
use thiserror::Error;

pub const HELP: &str = "commands: list | refresh | filter <both|on_campus|off_campus> | \
delete <id> | finish <id> | notify <id> | gps <id> | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Refresh,
    Filter(Filter),
    Delete(RideId),
    Finish(RideId),
    Notify(RideId),
    Gps(RideId),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid ride id {0:?}")]
    BadId(String),

    #[error(transparent)]
    BadFilter(#[from] UnknownFilter),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Command::List);
        };
        let arg = words.next();
        let id = |name: &'static str| -> Result<RideId, CommandError> {
            let raw = arg.ok_or(CommandError::MissingArgument(name))?;
            raw.parse().map_err(|_| CommandError::BadId(raw.to_string()))
        };

        match verb {
            "list" | "ls" => Ok(Command::List),
            "refresh" => Ok(Command::Refresh),
            "filter" => Ok(Command::Filter(
                arg.ok_or(CommandError::MissingArgument("filter"))?.parse()?,
            )),
            "delete" => Ok(Command::Delete(id("delete")?)),
            "finish" => Ok(Command::Finish(id("finish")?)),
            "notify" => Ok(Command::Notify(id("notify")?)),
            "gps" => Ok(Command::Gps(id("gps")?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ride_actions() {
        assert_eq!("delete 3".parse::<Command>().unwrap(), Command::Delete(3));
        assert_eq!("finish 4".parse::<Command>().unwrap(), Command::Finish(4));
        assert_eq!(" notify  5 ".parse::<Command>().unwrap(), Command::Notify(5));
        assert_eq!("gps 6".parse::<Command>().unwrap(), Command::Gps(6));
    }

    #[test]
    fn parses_filter() {
        assert_eq!(
            "filter off_campus".parse::<Command>().unwrap(),
            Command::Filter(Filter::OffCampus)
        );
        assert!(matches!(
            "filter nowhere".parse::<Command>(),
            Err(CommandError::BadFilter(_))
        ));
    }

    #[test]
    fn blank_line_lists() {
        assert_eq!("".parse::<Command>().unwrap(), Command::List);
    }

    #[test]
    fn argument_errors() {
        assert_eq!(
            "delete".parse::<Command>(),
            Err(CommandError::MissingArgument("delete"))
        );
        assert_eq!(
            "delete seven".parse::<Command>(),
            Err(CommandError::BadId("seven".to_string()))
        );
        assert_eq!(
            "launch".parse::<Command>(),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }
}
