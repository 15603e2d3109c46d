use crate::football::types::{GoalsEstimate, PercentBreakdown, PredictionDetail, Winner};
use crate::football::{Fixture, Prediction};
use crate::models::{Embed, EmbedColor};

pub const NOT_AVAILABLE: &str = "Data not available";
pub const NO_ADVICE: &str = "No advice available";
pub const MISSING_FIELD: &str = "N/A";
pub const FOOTER: &str = "Data provided by API-Football";

/// The six prediction lines, already rendered or set to their placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionLines {
    pub winner: String,
    pub win_or_draw: String,
    pub under_over: String,
    pub goals: String,
    pub advice: String,
    pub percent: String,
}

impl Default for PredictionLines {
    fn default() -> Self {
        Self {
            winner: NOT_AVAILABLE.into(),
            win_or_draw: NOT_AVAILABLE.into(),
            under_over: NOT_AVAILABLE.into(),
            goals: NOT_AVAILABLE.into(),
            advice: NO_ADVICE.into(),
            percent: NOT_AVAILABLE.into(),
        }
    }
}

impl PredictionLines {
    /// Render lines from the first prediction; `None` keeps every placeholder.
    pub fn from_prediction(prediction: Option<&PredictionDetail>) -> Self {
        let Some(p) = prediction else {
            return Self::default();
        };

        let defaults = Self::default();
        Self {
            winner: p.winner.as_ref().and_then(format_winner).unwrap_or(defaults.winner),
            win_or_draw: p
                .win_or_draw
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or(defaults.win_or_draw),
            under_over: p
                .under_over
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or(defaults.under_over),
            goals: p.goals.as_ref().and_then(format_goals).unwrap_or(defaults.goals),
            advice: non_empty(p.advice.as_deref())
                .map(str::to_string)
                .unwrap_or(defaults.advice),
            percent: p.percent.as_ref().and_then(format_percent).unwrap_or(defaults.percent),
        }
    }

    /// Markdown block for the grouped embed field, in display order.
    pub fn render(&self) -> String {
        [
            ("🏆", "Winner", &self.winner),
            ("🤝", "Win/Draw", &self.win_or_draw),
            ("📏", "Under/Over", &self.under_over),
            ("⚽", "Goals", &self.goals),
            ("💡", "Advice", &self.advice),
            ("📊", "Percent", &self.percent),
        ]
        .iter()
        .map(|(icon, label, value)| format!("__**{icon} {label}:**__ {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// `name (comment)`, or just `name`. No name means no line.
pub fn format_winner(winner: &Winner) -> Option<String> {
    let name = non_empty(winner.name.as_deref())?;
    match non_empty(winner.comment.as_deref()) {
        Some(comment) => Some(format!("{name} ({comment})")),
        None => Some(name.to_string()),
    }
}

/// Only rendered when both sides have an estimate.
pub fn format_goals(goals: &GoalsEstimate) -> Option<String> {
    match (&goals.home, &goals.away) {
        (Some(home), Some(away)) => Some(format!("Home: {home}, Away: {away}")),
        _ => None,
    }
}

/// Only rendered when home, draw and away are all present.
pub fn format_percent(percent: &PercentBreakdown) -> Option<String> {
    let home = non_empty(percent.home.as_deref())?;
    let draw = non_empty(percent.draw.as_deref())?;
    let away = non_empty(percent.away.as_deref())?;
    Some(format!("Home: {home}, Draw: {draw}, Away: {away}"))
}

/// Pick the accent colour from the winner line.
///
/// Home team match beats away team match beats the word "draw".
pub fn select_color(winner_line: &str, home_team: &str, away_team: &str) -> EmbedColor {
    if winner_line == NOT_AVAILABLE {
        return EmbedColor::Blue;
    }

    let winner = winner_line.to_lowercase();
    if winner.contains(&home_team.to_lowercase()) {
        EmbedColor::Green
    } else if winner.contains(&away_team.to_lowercase()) {
        EmbedColor::Red
    } else if winner.contains("draw") {
        EmbedColor::Gold
    } else {
        EmbedColor::Blue
    }
}

/// Build the reply embed for one fixture and its prediction lookup result.
pub fn build_prediction_embed(fixture: &Fixture, predictions: &[Prediction]) -> Embed {
    let home = &fixture.teams.home;
    let away = &fixture.teams.away;

    let fixture_id = fixture
        .fixture
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| MISSING_FIELD.to_string());
    let fixture_date = fixture.fixture.date.as_deref().unwrap_or(MISSING_FIELD);
    let home_name = home.name.as_deref().unwrap_or(MISSING_FIELD);
    let away_name = away.name.as_deref().unwrap_or(MISSING_FIELD);

    let lines = PredictionLines::from_prediction(predictions.first().map(|p| &p.predictions));
    let color = select_color(&lines.winner, home_name, away_name);

    let mut embed = Embed::new(
        format!("⚽ {home_name} vs {away_name}"),
        format!("**Fixture ID:** {fixture_id}\n**Date:** {fixture_date}"),
        color,
    )
    .field("🔮 Predictions", lines.render())
    .footer(FOOTER);

    let logo = non_empty(home.logo.as_deref()).or_else(|| non_empty(away.logo.as_deref()));
    if let Some(url) = logo {
        embed = embed.thumbnail(url);
    }

    embed
}

/// Static usage embed for the help command.
pub fn build_help_embed(prefix: &str) -> Embed {
    Embed::new("🤖 Bot Help", "Here are the available commands:", EmbedColor::Purple)
        .field(
            format!("{prefix}prediction [number]"),
            format!(
                "⚽ **Prediction:** Gets match predictions.\n\
                 • `{prefix}prediction` - shows one prediction.\n\
                 • `{prefix}prediction 2` - shows that match plus 2 additional predictions \
                 (searched up to 7 days ahead if needed)."
            ),
        )
        .field(format!("{prefix}ping"), "🏓 **Ping:** Displays the bot's latency.")
        .field(format!("{prefix}help"), "ℹ️ **Help:** Displays this help message.")
        .footer(FOOTER)
}
