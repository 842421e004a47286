use std::fmt;

use postlist_core::{QueryParams, Sort};

/// Rows moved by `scroll`/`up` without a count.
pub const DEFAULT_SCROLL_STEP: usize = 3;

pub const HELP: &str = "\
commands:
  type <text>          edit the search box (empty text clears it after the delay)
  clear                clear the search box immediately
  sort <newest|oldest> change the sort order
  scroll [n]           scroll down n rows
  up [n]               scroll up n rows
  more                 load the next page now
  edit <row>           open the post in that row for editing
  delete <row>         ask to delete the post in that row
  yes | no             answer the delete confirmation
  retry                reload after an error
  dismiss              hide notifications
  open <query>         follow a link, e.g. `open q=cat&sort=oldest`
  reload               leave and re-enter the list
  help                 show this text
  quit                 exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),
    Clear,
    Sort(Sort),
    Scroll(usize),
    Up(usize),
    More,
    /// One-based row number as shown on screen.
    Edit(usize),
    /// One-based row number as shown on screen.
    Delete(usize),
    Yes,
    No,
    Retry,
    Dismiss,
    Open(QueryParams),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    MissingArgument(&'static str),
    InvalidArgument { command: &'static str, value: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => write!(f, "type `help` for a list of commands"),
            CommandError::Unknown(word) => write!(f, "unknown command `{word}`; try `help`"),
            CommandError::MissingArgument(command) => write!(f, "`{command}` needs an argument"),
            CommandError::InvalidArgument { command, value } => {
                write!(f, "`{command}` does not understand `{value}`")
            }
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']).trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        // The rest of the line is kept verbatim, inner spaces included.
        "type" => Ok(Command::Type(rest.to_string())),
        "clear" => Ok(Command::Clear),
        "sort" => {
            let value = required(rest, "sort")?;
            value
                .parse::<Sort>()
                .map(Command::Sort)
                .map_err(|_| invalid("sort", value))
        }
        "scroll" | "down" => count(rest, "scroll").map(Command::Scroll),
        "up" => count(rest, "up").map(Command::Up),
        "more" => Ok(Command::More),
        "edit" => row(rest, "edit").map(Command::Edit),
        "delete" | "del" => row(rest, "delete").map(Command::Delete),
        "yes" | "y" => Ok(Command::Yes),
        "no" | "n" => Ok(Command::No),
        "retry" => Ok(Command::Retry),
        "dismiss" => Ok(Command::Dismiss),
        "open" => Ok(Command::Open(QueryParams::parse(rest.trim()))),
        "reload" => Ok(Command::Reload),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

fn required<'a>(rest: &'a str, command: &'static str) -> Result<&'a str, CommandError> {
    match rest.trim() {
        "" => Err(CommandError::MissingArgument(command)),
        value => Ok(value),
    }
}

fn row(rest: &str, command: &'static str) -> Result<usize, CommandError> {
    let value = required(rest, command)?;
    match value.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(invalid(command, value)),
    }
}

fn count(rest: &str, command: &'static str) -> Result<usize, CommandError> {
    match rest.trim() {
        "" => Ok(DEFAULT_SCROLL_STEP),
        value => value.parse().map_err(|_| invalid(command, value)),
    }
}

fn invalid(command: &'static str, value: &str) -> CommandError {
    CommandError::InvalidArgument {
        command,
        value: value.to_string(),
    }
}
