use std::fmt;

use super::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the next fixture plus `additional` more.
    Prediction { additional: u32 },
    Ping,
    Help,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Prediction { .. } => "prediction",
            Command::Ping => "ping",
            Command::Help => "help",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a chat message into a command.
///
/// Returns `None` for messages that are not addressed to the bot (no prefix,
/// or a bare prefix). The prediction count defaults to 0 when missing or not
/// a non-negative integer; extra arguments are ignored.
pub fn parse_command(content: &str, prefix: &str) -> Option<Result<Command, CommandError>> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let name = words.next()?;

    let command = match name {
        "prediction" => {
            let additional = words
                .next()
                .and_then(|arg| arg.parse::<u32>().ok())
                .unwrap_or(0);
            Command::Prediction { additional }
        }
        "ping" => Command::Ping,
        "help" => Command::Help,
        other => return Some(Err(CommandError::UnknownCommand(other.to_string()))),
    };
    Some(Ok(command))
}
