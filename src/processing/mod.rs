//! Text analysis and scoring pipeline

pub mod vocabulary;
pub mod normalizer;
pub mod sections;
pub mod keywords;
pub mod experience;
pub mod content;
pub mod profile;
pub mod scorer;
pub mod job_analysis;
pub mod competitiveness;
pub mod optimizer;
pub mod analyzer;
pub mod cache;

pub use analyzer::{score_resume, AtsEngine, MatchAnalysis};
pub use cache::ScoreCache;
pub use competitiveness::{Competitiveness, Industry};
pub use profile::ScoringProfile;
pub use scorer::{ComponentScores, ScoreResult};
