//! ATS scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;
pub mod sample;

pub use error::{AtsError, Result};
pub use config::Config;
pub use processing::{score_resume, AtsEngine, ScoreResult, ScoringProfile};
