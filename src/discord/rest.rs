use async_trait::async_trait;
use reqwest::Client;

use super::types::CreateMessage;
use crate::commands::ReplySink;
use crate::errors::DiscordError;
use crate::models::Embed;

pub const DISCORD_API_BASE: &str = "https://discord.com/api/v10";

/// Minimal Discord REST client: the bot only ever posts messages.
#[derive(Debug, Clone)]
pub struct DiscordRest {
    http: Client,
    base_url: String,
    token: String,
}

impl DiscordRest {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Post a message to a channel.
    pub async fn create_message(
        &self,
        channel_id: &str,
        body: &CreateMessage<'_>,
    ) -> Result<(), DiscordError> {
        let url = format!("{}/channels/{}/messages", self.base_url, channel_id);
        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bot {}", self.token))
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DiscordError::Api { status, body });
        }
        Ok(())
    }

    /// Reply sink bound to the channel a command arrived on.
    pub fn channel(&self, channel_id: impl Into<String>) -> ChannelReply {
        ChannelReply {
            rest: self.clone(),
            channel_id: channel_id.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChannelReply {
    rest: DiscordRest,
    channel_id: String,
}

#[async_trait]
impl ReplySink for ChannelReply {
    async fn send_text(&self, text: &str) -> Result<(), DiscordError> {
        let body = CreateMessage {
            content: Some(text),
            embeds: &[],
        };
        self.rest.create_message(&self.channel_id, &body).await
    }

    async fn send_embed(&self, embed: &Embed) -> Result<(), DiscordError> {
        let body = CreateMessage {
            content: None,
            embeds: std::slice::from_ref(embed),
        };
        self.rest.create_message(&self.channel_id, &body).await
    }
}
