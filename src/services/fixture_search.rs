use chrono::{Days, NaiveDate};

use crate::football::{Fixture, FootballApi};

/// Consecutive days examined before giving up, the start day included.
pub const LOOKAHEAD_DAYS: u32 = 7;
/// Fixtures requested when the caller does not ask for more.
pub const DEFAULT_REQUIRED: usize = 1;

#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    /// At most `required` fixtures, in upstream order day by day.
    pub fixtures: Vec<Fixture>,
    pub days_examined: u32,
}

/// Walk forward from `start` one day at a time until `required` fixtures
/// have been collected or the lookahead horizon is exhausted.
pub async fn find_upcoming_fixtures<A>(api: &A, required: usize, start: NaiveDate) -> SearchOutcome
where
    A: FootballApi + ?Sized,
{
    let required = required.max(DEFAULT_REQUIRED);
    let mut fixtures: Vec<Fixture> = Vec::new();
    let mut days_examined: u32 = 0;
    let mut date = start;

    while fixtures.len() < required && days_examined < LOOKAHEAD_DAYS {
        let day = api.fixtures_on(date).await;
        tracing::debug!(%date, found = day.len(), "Fixture search examined day");
        fixtures.extend(day);
        days_examined += 1;

        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    fixtures.truncate(required);
    tracing::info!(
        required,
        found = fixtures.len(),
        days_examined,
        "Fixture search finished"
    );

    SearchOutcome {
        fixtures,
        days_examined,
    }
}
