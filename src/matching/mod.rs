//! Skill matching and scoring

pub mod matcher;
pub mod scorer;

pub use matcher::{SkillMatchResult, SkillMatcher};
pub use scorer::{ScoreAggregator, ScoreLevel, SkillScore, SkillScorer};
