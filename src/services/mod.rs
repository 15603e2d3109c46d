pub mod fixture_search;
pub mod formatter;

pub use fixture_search::{find_upcoming_fixtures, SearchOutcome};
pub use formatter::{build_help_embed, build_prediction_embed};
