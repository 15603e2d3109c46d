use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{SinkExt, StreamExt};
use tokio::time::{interval, sleep, Interval, MissedTickBehavior};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::latency::GatewayStatus;
use super::rest::DiscordRest;
use super::types::{
    self, GatewayPayload, Hello, MessageCreate, Ready, OP_DISPATCH, OP_HEARTBEAT,
    OP_HEARTBEAT_ACK, OP_HELLO, OP_INVALID_SESSION, OP_RECONNECT,
};
use crate::commands::CommandHandler;
use crate::errors::DiscordError;
use crate::football::FootballApi;

pub const DISCORD_GATEWAY_URL: &str = "wss://gateway.discord.gg/?v=10&encoding=json";

const BASE_RECONNECT_DELAY: Duration = Duration::from_secs(2);
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(60);

/// Close codes after which reconnecting with the same token cannot succeed.
const FATAL_CLOSE_CODES: [u16; 5] = [4004, 4010, 4011, 4013, 4014];

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub token: String,
    /// Shown as the bot's "Playing ..." status.
    pub activity: String,
}

enum SessionEnd {
    Reconnect,
    Fatal(String),
}

/// Run the gateway connection until a fatal close (bad token, disallowed
/// intents). Transient failures reconnect with exponential backoff.
pub async fn run_gateway<A>(
    config: GatewayConfig,
    handler: Arc<CommandHandler<A>>,
    rest: DiscordRest,
    status: GatewayStatus,
) -> Result<(), DiscordError>
where
    A: FootballApi + 'static,
{
    let mut attempt: u32 = 0;

    loop {
        tracing::info!("Connecting to Discord gateway...");

        let mut ready = false;
        let end = run_session(&config, &handler, &rest, &status, &mut ready).await;
        status.set_connected(false);

        match end {
            Ok(SessionEnd::Fatal(reason)) => {
                tracing::error!(%reason, "Discord gateway closed the session permanently");
                return Err(DiscordError::Protocol(reason));
            }
            Ok(SessionEnd::Reconnect) => {
                tracing::warn!("Discord gateway session ended");
            }
            Err(e) => {
                tracing::error!(error = %e, "Discord gateway session failed");
            }
        }

        if ready {
            attempt = 0;
        }

        // Exponential backoff with cap
        let delay = BASE_RECONNECT_DELAY * 2u32.saturating_pow(attempt);
        let delay = delay.min(MAX_RECONNECT_DELAY);
        attempt = attempt.saturating_add(1);
        tracing::info!(delay_secs = delay.as_secs(), attempt, "Reconnecting...");
        sleep(delay).await;
    }
}

/// Ticks missed while the loop is busy are delayed, never fired back to back.
fn new_heartbeat_timer(interval_ms: u64) -> Interval {
    let mut timer = interval(Duration::from_millis(interval_ms.max(1)));
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn run_session<A>(
    config: &GatewayConfig,
    handler: &Arc<CommandHandler<A>>,
    rest: &DiscordRest,
    status: &GatewayStatus,
    ready: &mut bool,
) -> Result<SessionEnd, DiscordError>
where
    A: FootballApi + 'static,
{
    let (ws_stream, _response) = connect_async(config.url.as_str()).await?;
    let (mut write, mut read) = ws_stream.split();

    // The first frame is always Hello.
    let hello = match read.next().await {
        Some(Ok(Message::Text(text))) => {
            let text: &str = text.as_ref();
            let frame: GatewayPayload = serde_json::from_str(text)?;
            if frame.op != OP_HELLO {
                return Err(DiscordError::Protocol(format!(
                    "expected Hello, got opcode {}",
                    frame.op
                )));
            }
            serde_json::from_value::<Hello>(frame.d)?
        }
        Some(Ok(other)) => {
            return Err(DiscordError::Protocol(format!("unexpected first frame: {other:?}")))
        }
        Some(Err(e)) => return Err(e.into()),
        None => return Ok(SessionEnd::Reconnect),
    };

    let identify = types::identify(&config.token, &config.activity);
    write.send(Message::Text(identify.to_string().into())).await?;

    let mut heartbeat_timer = new_heartbeat_timer(hello.heartbeat_interval);
    heartbeat_timer.tick().await; // consume the first immediate tick

    let mut sequence: Option<u64> = None;
    let mut heartbeat_sent: Option<Instant> = None;

    loop {
        tokio::select! {
            msg = read.next() => {
                let text = match msg {
                    Some(Ok(Message::Text(text))) => text,
                    Some(Ok(Message::Ping(data))) => {
                        write.send(Message::Pong(data)).await?;
                        continue;
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let code = frame.as_ref().map(|f| u16::from(f.code));
                        tracing::warn!(?code, "Gateway sent close frame");
                        return Ok(match code {
                            Some(code) if FATAL_CLOSE_CODES.contains(&code) => {
                                SessionEnd::Fatal(format!("close code {code}"))
                            }
                            _ => SessionEnd::Reconnect,
                        });
                    }
                    Some(Ok(_)) => continue, // Binary, Pong, Frame — ignore
                    Some(Err(e)) => return Err(e.into()),
                    None => {
                        tracing::warn!("Gateway stream ended");
                        return Ok(SessionEnd::Reconnect);
                    }
                };

                let text: &str = text.as_ref();
                let frame: GatewayPayload = match serde_json::from_str(text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::debug!(error = %e, raw = %text, "Unparseable gateway frame");
                        continue;
                    }
                };

                match frame.op {
                    OP_DISPATCH => {
                        if frame.s.is_some() {
                            sequence = frame.s;
                        }
                        handle_dispatch(frame, handler, rest, status, ready);
                    }
                    OP_HEARTBEAT => {
                        write.send(Message::Text(types::heartbeat(sequence).to_string().into())).await?;
                        heartbeat_sent = Some(Instant::now());
                    }
                    OP_HEARTBEAT_ACK => {
                        if let Some(sent) = heartbeat_sent.take() {
                            status.record_latency(sent.elapsed());
                        }
                    }
                    OP_RECONNECT => {
                        tracing::info!("Gateway requested reconnect");
                        return Ok(SessionEnd::Reconnect);
                    }
                    OP_INVALID_SESSION => {
                        tracing::warn!("Gateway invalidated the session");
                        return Ok(SessionEnd::Reconnect);
                    }
                    op => tracing::trace!(op, "Ignoring gateway opcode"),
                }
            }
            _ = heartbeat_timer.tick() => {
                if heartbeat_sent.is_some() {
                    tracing::warn!("Heartbeat not acknowledged, connection is stale");
                    return Ok(SessionEnd::Reconnect);
                }
                write.send(Message::Text(types::heartbeat(sequence).to_string().into())).await?;
                heartbeat_sent = Some(Instant::now());
            }
        }
    }
}

fn handle_dispatch<A>(
    frame: GatewayPayload,
    handler: &Arc<CommandHandler<A>>,
    rest: &DiscordRest,
    status: &GatewayStatus,
    ready: &mut bool,
) where
    A: FootballApi + 'static,
{
    match frame.t.as_deref() {
        Some("READY") => {
            *ready = true;
            status.set_connected(true);
            match serde_json::from_value::<Ready>(frame.d) {
                Ok(r) => tracing::info!(user = %r.user.username, id = %r.user.id, "Bot is ready"),
                Err(e) => tracing::warn!(error = %e, "Bot is ready (unparseable READY payload)"),
            }
        }
        Some("MESSAGE_CREATE") => {
            let message: MessageCreate = match serde_json::from_value(frame.d) {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping malformed MESSAGE_CREATE");
                    return;
                }
            };
            if message.author.bot || !message.content.trim_start().starts_with(handler.prefix()) {
                return;
            }

            tracing::debug!(
                channel = %message.channel_id,
                author = %message.author.username,
                content = %message.content,
                "Command message received"
            );

            let handler = Arc::clone(handler);
            let sink = rest.channel(message.channel_id);
            let content = message.content;
            tokio::spawn(async move {
                handler.handle_message(&content, &sink).await;
            });
        }
        _ => {}
    }
}
