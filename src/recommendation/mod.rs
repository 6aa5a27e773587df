//! Recommendations built on top of a skill match

pub mod engine;
pub mod learning_path;

pub use engine::{
    ComprehensiveRecommendation, GapAnalysis, RecommendationEngine, SkillRecommendation,
};
pub use learning_path::{LearningPath, LearningPathBuilder, RoleSuggestion, StepProgress};
