//! Titanic survival predictor - GUI library
//!
//! Exposes state and settings for testing.

pub mod settings;
pub mod state;
pub mod theme;
