mod common;

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use common::{make_fixture, make_fixtures, winner_prediction, RecordingSink, Reply, StubFootballApi};
use predictbot::commands::CommandHandler;
use predictbot::discord::GatewayStatus;
use predictbot::football::{Fixture, FootballApi, Prediction};
use predictbot::models::EmbedColor;

fn match_day() -> NaiveDate {
    common::date(2024, 8, 16)
}

fn handler(api: StubFootballApi) -> CommandHandler<StubFootballApi> {
    CommandHandler::new(api, GatewayStatus::new(), "!", 10).with_clock(match_day)
}

#[tokio::test]
async fn test_prediction_without_argument_sends_one_embed() {
    let api = StubFootballApi::default().with_day(match_day(), make_fixtures(5, 1));
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction", &sink).await;

    assert_eq!(sink.embeds().len(), 1);
    assert!(sink.texts().is_empty());
}

#[tokio::test]
async fn test_prediction_zero_sends_one_embed() {
    let api = StubFootballApi::default().with_day(match_day(), make_fixtures(5, 1));
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction 0", &sink).await;

    assert_eq!(sink.embeds().len(), 1);
}

#[tokio::test]
async fn test_prediction_two_sends_three_embeds_across_days() {
    let api = StubFootballApi::default()
        .with_day(match_day(), make_fixtures(1, 10))
        .with_day(common::date(2024, 8, 19), make_fixtures(4, 20));
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction 2", &sink).await;

    let embeds = sink.embeds();
    assert_eq!(embeds.len(), 3);
    assert!(embeds[0].description.contains("**Fixture ID:** 10"));
    assert!(embeds[1].description.contains("**Fixture ID:** 20"));
    assert!(embeds[2].description.contains("**Fixture ID:** 21"));
}

#[tokio::test]
async fn test_each_fixture_gets_its_own_prediction() {
    let api = StubFootballApi::default()
        .with_day(
            match_day(),
            vec![
                make_fixture(1, "Real Madrid", "Barcelona"),
                make_fixture(2, "Ajax", "PSV"),
            ],
        )
        .with_prediction(1, winner_prediction("Real Madrid"));
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction 1", &sink).await;

    let embeds = sink.embeds();
    assert_eq!(embeds.len(), 2);
    // First fixture has a prediction, the second falls back to placeholders.
    assert_eq!(embeds[0].color, EmbedColor::Green.value());
    assert_eq!(embeds[1].color, EmbedColor::Blue.value());
    assert!(embeds[1].fields[0].value.contains("Data not available"));
}

#[tokio::test]
async fn test_no_fixtures_sends_text_notice() {
    let handler = handler(StubFootballApi::default());
    let sink = RecordingSink::default();

    handler.handle_message("!prediction 3", &sink).await;

    assert_eq!(
        sink.replies(),
        vec![Reply::Text("🚫 No fixtures found for the next 7 days.".into())]
    );
}

#[tokio::test]
async fn test_additional_count_is_clamped() {
    let api = StubFootballApi::default().with_day(match_day(), make_fixtures(30, 1));
    let handler = CommandHandler::new(api, GatewayStatus::new(), "!", 2).with_clock(match_day);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction 25", &sink).await;

    assert_eq!(sink.embeds().len(), 3);
}

#[tokio::test]
async fn test_send_failure_is_reported_as_text() {
    let api = StubFootballApi::default().with_day(match_day(), make_fixtures(2, 1));
    let handler = handler(api);
    let sink = RecordingSink::failing_embeds();

    handler.handle_message("!prediction 1", &sink).await;

    let texts = sink.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("❗ An unexpected error occurred:"));
    assert!(texts[0].contains("Missing Permissions"));
}

#[tokio::test]
async fn test_ping_reports_gateway_latency() {
    let status = GatewayStatus::new();
    status.record_latency(Duration::from_micros(42_130));
    let handler = CommandHandler::new(StubFootballApi::default(), status, "!", 10);
    let sink = RecordingSink::default();

    handler.handle_message("!ping", &sink).await;

    assert_eq!(sink.texts(), vec!["🏓 Pong! Latency: 42.13ms".to_string()]);
}

#[tokio::test]
async fn test_ping_before_first_heartbeat() {
    let handler = handler(StubFootballApi::default());
    let sink = RecordingSink::default();

    handler.handle_message("!ping", &sink).await;

    assert_eq!(sink.texts(), vec!["🏓 Pong! Latency: unknown".to_string()]);
}

#[tokio::test]
async fn test_help_sends_help_embed() {
    let handler = handler(StubFootballApi::default());
    let sink = RecordingSink::default();

    handler.handle_message("!help", &sink).await;

    let embeds = sink.embeds();
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].title, "🤖 Bot Help");
    assert_eq!(embeds[0].fields.len(), 3);
}

#[tokio::test]
async fn test_unknown_command_reports_error_text() {
    let api = StubFootballApi::default();
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("!standings", &sink).await;

    assert_eq!(
        sink.texts(),
        vec!["❗ Error: Command not found. Use `!help` to see available commands.".to_string()]
    );
}

#[tokio::test]
async fn test_plain_chat_is_ignored() {
    let api = StubFootballApi::default().with_day(match_day(), make_fixtures(1, 1));
    let handler = handler(api);
    let sink = RecordingSink::default();

    handler.handle_message("who wins tonight?", &sink).await;

    assert!(sink.replies().is_empty());
}

/// Upstream stand-in whose fixture feed blows up mid-command.
struct PanickingApi;

#[async_trait]
impl FootballApi for PanickingApi {
    async fn fixtures_on(&self, _date: NaiveDate) -> Vec<Fixture> {
        panic!("fixture feed exploded");
    }

    async fn predictions_for(&self, _fixture_id: i64) -> Vec<Prediction> {
        Vec::new()
    }
}

#[tokio::test]
async fn test_panicking_command_reports_generic_error() {
    let handler = CommandHandler::new(PanickingApi, GatewayStatus::new(), "!", 10).with_clock(match_day);
    let sink = RecordingSink::default();

    handler.handle_message("!prediction", &sink).await;

    assert_eq!(
        sink.texts(),
        vec!["❗ An unexpected error occurred: fixture feed exploded".to_string()]
    );

    // The handler keeps serving after the panic.
    handler.handle_message("!ping", &sink).await;
    assert_eq!(sink.texts().len(), 2);
    assert!(sink.texts()[1].starts_with("🏓 Pong!"));
}
