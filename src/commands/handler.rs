use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use futures_util::FutureExt;
use metrics::{counter, histogram};

use super::{parse_command, Command, CommandError, ReplySink};
use crate::discord::GatewayStatus;
use crate::football::FootballApi;
use crate::services::fixture_search::{find_upcoming_fixtures, LOOKAHEAD_DAYS};
use crate::services::formatter::{build_help_embed, build_prediction_embed};

/// Routes parsed chat commands to their implementations and turns every
/// failure into a user-facing reply.
pub struct CommandHandler<A> {
    api: A,
    status: GatewayStatus,
    prefix: String,
    max_additional: u32,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "command panicked".to_string()
    }
}

impl<A: FootballApi> CommandHandler<A> {
    pub fn new(api: A, status: GatewayStatus, prefix: impl Into<String>, max_additional: u32) -> Self {
        Self {
            api,
            status,
            prefix: prefix.into(),
            max_additional,
            today: local_today,
        }
    }

    /// Override the calendar used as the search start day.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Handle one inbound chat message. Non-command messages are ignored;
    /// errors are reported through `sink` and never returned. A panic inside
    /// a command is caught here and reported like any other failure.
    pub async fn handle_message<S>(&self, content: &str, sink: &S)
    where
        S: ReplySink + ?Sized,
    {
        let Some(parsed) = parse_command(content, &self.prefix) else {
            return;
        };

        let started = Instant::now();
        let result = match parsed {
            Ok(command) => {
                counter!("commands_total", "command" => command.name()).increment(1);
                tracing::info!(%command, "Handling command");
                match AssertUnwindSafe(self.execute(command, sink)).catch_unwind().await {
                    Ok(result) => result,
                    Err(payload) => Err(CommandError::Panicked(panic_message(&*payload))),
                }
            }
            Err(e) => Err(e),
        };
        histogram!("command_latency_seconds").record(started.elapsed().as_secs_f64());

        if let Err(e) = result {
            self.report_error(&e, sink).await;
        }
    }

    pub async fn execute<S>(&self, command: Command, sink: &S) -> Result<(), CommandError>
    where
        S: ReplySink + ?Sized,
    {
        match command {
            Command::Prediction { additional } => self.prediction(additional, sink).await,
            Command::Ping => self.ping(sink).await,
            Command::Help => {
                sink.send_embed(&build_help_embed(&self.prefix)).await?;
                Ok(())
            }
        }
    }

    async fn prediction<S>(&self, additional: u32, sink: &S) -> Result<(), CommandError>
    where
        S: ReplySink + ?Sized,
    {
        if additional > self.max_additional {
            tracing::info!(
                requested = additional,
                max = self.max_additional,
                "Clamping additional prediction count"
            );
        }
        let required = 1 + additional.min(self.max_additional) as usize;

        let outcome = find_upcoming_fixtures(&self.api, required, (self.today)()).await;
        histogram!("fixture_search_days").record(f64::from(outcome.days_examined));
        if outcome.fixtures.is_empty() {
            sink.send_text(&format!(
                "🚫 No fixtures found for the next {LOOKAHEAD_DAYS} days."
            ))
            .await?;
            return Ok(());
        }

        // Each fixture gets its own reply; one failed send does not stop the rest.
        let mut last_error = None;
        for fixture in &outcome.fixtures {
            let predictions = match fixture.id() {
                Some(id) => self.api.predictions_for(id).await,
                None => Vec::new(),
            };
            let embed = build_prediction_embed(fixture, &predictions);

            match sink.send_embed(&embed).await {
                Ok(()) => counter!("replies_sent_total").increment(1),
                Err(e) => {
                    tracing::warn!(error = %e, fixture_id = ?fixture.id(), "Failed to send prediction");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    async fn ping<S>(&self, sink: &S) -> Result<(), CommandError>
    where
        S: ReplySink + ?Sized,
    {
        let latency = match self.status.latency() {
            Some(rtt) => format!("{:.2}ms", rtt.as_micros() as f64 / 1000.0),
            None => "unknown".to_string(),
        };
        sink.send_text(&format!("🏓 Pong! Latency: {latency}")).await?;
        Ok(())
    }

    async fn report_error<S>(&self, error: &CommandError, sink: &S)
    where
        S: ReplySink + ?Sized,
    {
        match error {
            CommandError::UnknownCommand(name) => {
                tracing::debug!(command = %name, "Unknown command");
            }
            other => tracing::error!(error = %other, "Command failed"),
        }

        if let Err(e) = sink.send_text(&error.user_message(&self.prefix)).await {
            tracing::error!(error = %e, "Failed to report command error");
        }
    }
}
