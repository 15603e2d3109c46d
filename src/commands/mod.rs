pub mod handler;
pub mod parser;

use async_trait::async_trait;

use crate::errors::DiscordError;
use crate::models::Embed;

pub use handler::CommandHandler;
pub use parser::{parse_command, Command};

/// Where a command's replies go. One sink per inbound message.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<(), DiscordError>;

    async fn send_embed(&self, embed: &Embed) -> Result<(), DiscordError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("command not found: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Reply(#[from] DiscordError),

    #[error("{0}")]
    Panicked(String),
}

impl CommandError {
    /// Text shown to the user in place of the command's normal reply.
    pub fn user_message(&self, prefix: &str) -> String {
        match self {
            CommandError::UnknownCommand(_) => format!(
                "❗ Error: Command not found. Use `{prefix}help` to see available commands."
            ),
            other => format!("❗ An unexpected error occurred: {other}"),
        }
    }
}
