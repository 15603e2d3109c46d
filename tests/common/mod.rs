use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use predictbot::commands::ReplySink;
use predictbot::errors::DiscordError;
use predictbot::football::types::{FixtureInfo, PredictionDetail, Team, Teams, Winner};
use predictbot::football::{Fixture, FootballApi, Prediction};
use predictbot::models::Embed;

/// In-memory API-Football stand-in. Records every lookup it serves.
#[derive(Default)]
pub struct StubFootballApi {
    pub fixtures: HashMap<NaiveDate, Vec<Fixture>>,
    pub predictions: HashMap<i64, Vec<Prediction>>,
    pub dates_requested: Mutex<Vec<NaiveDate>>,
    pub predictions_requested: Mutex<Vec<i64>>,
}

#[allow(dead_code)]
impl StubFootballApi {
    pub fn with_day(mut self, date: NaiveDate, fixtures: Vec<Fixture>) -> Self {
        self.fixtures.insert(date, fixtures);
        self
    }

    pub fn with_prediction(mut self, fixture_id: i64, prediction: Prediction) -> Self {
        self.predictions.insert(fixture_id, vec![prediction]);
        self
    }

    pub fn days_requested(&self) -> usize {
        self.dates_requested.lock().unwrap().len()
    }
}

#[async_trait]
impl FootballApi for StubFootballApi {
    async fn fixtures_on(&self, date: NaiveDate) -> Vec<Fixture> {
        self.dates_requested.lock().unwrap().push(date);
        self.fixtures.get(&date).cloned().unwrap_or_default()
    }

    async fn predictions_for(&self, fixture_id: i64) -> Vec<Prediction> {
        self.predictions_requested.lock().unwrap().push(fixture_id);
        self.predictions.get(&fixture_id).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Embed(Embed),
}

/// Reply sink that keeps everything it is asked to send.
#[derive(Default)]
pub struct RecordingSink {
    pub replies: Mutex<Vec<Reply>>,
    /// When set, embed sends fail with a Discord API error.
    pub fail_embeds: bool,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn failing_embeds() -> Self {
        Self {
            fail_embeds: true,
            ..Default::default()
        }
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }

    pub fn embeds(&self) -> Vec<Embed> {
        self.replies()
            .into_iter()
            .filter_map(|r| match r {
                Reply::Embed(e) => Some(e),
                Reply::Text(_) => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.replies()
            .into_iter()
            .filter_map(|r| match r {
                Reply::Text(t) => Some(t),
                Reply::Embed(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(&self, text: &str) -> Result<(), DiscordError> {
        self.replies.lock().unwrap().push(Reply::Text(text.to_string()));
        Ok(())
    }

    async fn send_embed(&self, embed: &Embed) -> Result<(), DiscordError> {
        if self.fail_embeds {
            return Err(DiscordError::Api {
                status: reqwest::StatusCode::FORBIDDEN,
                body: r#"{"message": "Missing Permissions", "code": 50013}"#.into(),
            });
        }
        self.replies.lock().unwrap().push(Reply::Embed(embed.clone()));
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn make_fixture(id: i64, home: &str, away: &str) -> Fixture {
    Fixture {
        fixture: FixtureInfo {
            id: Some(id),
            date: Some("2024-08-16T19:00:00+00:00".into()),
        },
        teams: Teams {
            home: Team {
                name: Some(home.into()),
                logo: None,
            },
            away: Team {
                name: Some(away.into()),
                logo: None,
            },
        },
    }
}

#[allow(dead_code)]
pub fn make_fixtures(count: i64, first_id: i64) -> Vec<Fixture> {
    (0..count)
        .map(|i| make_fixture(first_id + i, &format!("Home {i}"), &format!("Away {i}")))
        .collect()
}

#[allow(dead_code)]
pub fn winner_prediction(name: &str) -> Prediction {
    Prediction {
        predictions: PredictionDetail {
            winner: Some(Winner {
                id: None,
                name: Some(name.into()),
                comment: None,
            }),
            ..Default::default()
        },
    }
}
