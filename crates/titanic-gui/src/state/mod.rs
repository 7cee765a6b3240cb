//! Application state management

mod app_state;

pub use app_state::{AppState, PredictionOutcome, random_passenger_id};
