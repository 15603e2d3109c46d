pub mod client;
pub mod types;

pub use client::{FootballApi, FootballClient, FootballClientError};
pub use types::{Fixture, Prediction};
