//! Text commands

use satchel_core::{Coord, ItemId, ItemKind};
use thiserror::Error;

/// Command parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    Arity {
        command: String,
        expected: &'static str,
    },
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// One line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Spawn(ItemKind),
    Place(ItemId, Coord),
    Check(ItemId, Coord),
    Remove(ItemId),
    Pickup(ItemId),
    Pool,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  spawn <kind>          create an item in the pool
  place <id> <x> <y>    place or move an item
  check <id> <x> <y>    explain whether a placement is legal
  remove <id>           send an item on the grid or in hand to the pool
  pickup <id>           take an item off the grid into your hand
  pool                  list unplaced and held items
  show                  print the board
  help                  this text
  quit                  exit";

fn number<T: std::str::FromStr>(word: &str) -> Result<T, CommandError> {
    word.parse().map_err(|_| CommandError::NotANumber(word.to_string()))
}

fn expect<'a, const N: usize>(
    command: &str,
    expected: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args).map_err(|_| CommandError::Arity {
        command: command.to_string(),
        expected,
    })
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let (name, args) = (words[0], &words[1..]);

        let name = name.to_lowercase();
        let command = match name.as_str() {
            "spawn" => {
                let [kind] = expect("spawn", "<kind>", args)?;
                Self::Spawn(ItemKind(number(kind)?))
            }
            "place" | "check" => {
                let [id, x, y] = expect(&name, "<id> <x> <y>", args)?;
                let id = ItemId(number(id)?);
                let at = Coord::new(number(x)?, number(y)?);
                if name == "place" {
                    Self::Place(id, at)
                } else {
                    Self::Check(id, at)
                }
            }
            "remove" => {
                let [id] = expect("remove", "<id>", args)?;
                Self::Remove(ItemId(number(id)?))
            }
            "pickup" => {
                let [id] = expect("pickup", "<id>", args)?;
                Self::Pickup(ItemId(number(id)?))
            }
            "pool" => Self::Pool,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("spawn 3"), Ok(Some(Command::Spawn(ItemKind(3)))));
        assert_eq!(
            Command::parse("  PLACE 7 2 -1 "),
            Ok(Some(Command::Place(ItemId(7), Coord::new(2, -1))))
        );
        assert_eq!(Command::parse("check 1 0 0"), Ok(Some(Command::Check(ItemId(1), Coord::ZERO))));
        assert_eq!(Command::parse("# note"), Ok(None));
        assert_eq!(Command::parse(""), Ok(None));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert!(matches!(Command::parse("place 1 2"), Err(CommandError::Arity { .. })));
        assert_eq!(Command::parse("remove x"), Err(CommandError::NotANumber("x".into())));
    }
}
