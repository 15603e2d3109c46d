use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Every API-Football endpoint wraps its payload the same way:
/// `{"errors": [] | {...}, "results": n, "response": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub errors: serde_json::Value,
    #[serde(default = "Vec::new")]
    pub response: Vec<T>,
}

impl<T> ApiEnvelope<T> {
    /// The upstream reports auth and quota problems through `errors` with a 200 status.
    /// Returns the error text when the envelope carries any.
    pub fn upstream_error(&self) -> Option<String> {
        match &self.errors {
            serde_json::Value::Null => None,
            serde_json::Value::Array(items) if items.is_empty() => None,
            serde_json::Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// A loosely typed upstream value. Goal estimates arrive as `"-2.5"` or `1.5`,
/// `win_or_draw` as `true` or `"true"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Fixture {
    #[serde(default)]
    pub fixture: FixtureInfo,
    #[serde(default)]
    pub teams: Teams,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FixtureInfo {
    #[serde(default)]
    pub id: Option<i64>,
    /// Kickoff, e.g. `2024-08-16T19:00:00+00:00`. Passed through untouched.
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Teams {
    #[serde(default)]
    pub home: Team,
    #[serde(default)]
    pub away: Team,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Team {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl Fixture {
    pub fn id(&self) -> Option<i64> {
        self.fixture.id
    }
}

// ---------------------------------------------------------------------------
// Predictions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    #[serde(default)]
    pub predictions: PredictionDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PredictionDetail {
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub win_or_draw: Option<Scalar>,
    #[serde(default)]
    pub under_over: Option<Scalar>,
    #[serde(default)]
    pub goals: Option<GoalsEstimate>,
    #[serde(default)]
    pub advice: Option<String>,
    #[serde(default)]
    pub percent: Option<PercentBreakdown>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Winner {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GoalsEstimate {
    #[serde(default)]
    pub home: Option<Scalar>,
    #[serde(default)]
    pub away: Option<Scalar>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PercentBreakdown {
    #[serde(default)]
    pub home: Option<String>,
    #[serde(default)]
    pub draw: Option<String>,
    #[serde(default)]
    pub away: Option<String>,
}
