//! Skill scoring: pluggable strategies summed into one score and level
//!
//! Each strategy implements [`SkillScorer`] and reports which component of
//! the score it contributes to. [`ScoreAggregator`] only iterates its list of
//! strategies, so adding one does not touch the aggregation code.

use crate::config::{LevelThresholds, ScoringConfig};
use crate::matching::matcher::{SkillMatchResult, SkillMatcher};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreLevel {
    /// Map a total score onto the configured, non-overlapping level bands
    pub fn from_score(score: f64, thresholds: &LevelThresholds) -> Self {
        if score >= thresholds.excellent {
            ScoreLevel::Excellent
        } else if score >= thresholds.good {
            ScoreLevel::Good
        } else if score >= thresholds.fair {
            ScoreLevel::Fair
        } else {
            ScoreLevel::Poor
        }
    }
}

impl std::fmt::Display for ScoreLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ScoreLevel::Excellent => write!(f, "Excellent"),
            ScoreLevel::Good => write!(f, "Good"),
            ScoreLevel::Fair => write!(f, "Fair"),
            ScoreLevel::Poor => write!(f, "Poor"),
        }
    }
}

/// Which part of [`SkillScore`] a strategy feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreComponent {
    Base,
    Bonus,
}

pub trait SkillScorer: Send + Sync {
    fn component(&self) -> ScoreComponent;

    /// Points contributed for one candidate/job comparison
    fn calculate(&self, result: &SkillMatchResult) -> f64;
}

/// `matched / required * 100`
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseScoreScorer;

impl SkillScorer for BaseScoreScorer {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::Base
    }

    fn calculate(&self, result: &SkillMatchResult) -> f64 {
        if result.candidate_count() == 0 || result.total_required == 0 {
            return 0.0;
        }
        result.match_count as f64 / result.total_required as f64 * 100.0
    }
}

/// Rewards skills beyond the requirements: `min(extra * weight * 10, cap)`
#[derive(Debug, Clone, Copy)]
pub struct BonusScoreScorer {
    weight: f64,
    cap: f64,
}

impl BonusScoreScorer {
    pub fn new(weight: f64, cap: f64) -> Self {
        Self { weight, cap }
    }
}

impl SkillScorer for BonusScoreScorer {
    fn component(&self) -> ScoreComponent {
        ScoreComponent::Bonus
    }

    fn calculate(&self, result: &SkillMatchResult) -> f64 {
        if result.candidate_count() == 0 {
            return 0.0;
        }
        (result.extra_count() as f64 * self.weight * 10.0).min(self.cap)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub base_score: f64,
    pub bonus_score: f64,
    /// `base_score + bonus_score`, not re-capped
    pub total_score: f64,
    pub exact_matches: usize,
    pub total_required: usize,
    pub extra_skill_count: usize,
    pub level: ScoreLevel,
}

pub struct ScoreAggregator {
    matcher: SkillMatcher,
    scorers: Vec<Box<dyn SkillScorer>>,
    thresholds: LevelThresholds,
}

impl ScoreAggregator {
    /// Aggregator without strategies; add them with [`ScoreAggregator::with_scorer`]
    pub fn new(thresholds: LevelThresholds) -> Self {
        Self {
            matcher: SkillMatcher::new(),
            scorers: Vec::new(),
            thresholds,
        }
    }

    /// Base and bonus strategies with the configured weight, cap and levels
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.levels)
            .with_scorer(Box::new(BaseScoreScorer))
            .with_scorer(Box::new(BonusScoreScorer::new(config.bonus_weight, config.bonus_cap)))
    }

    pub fn with_scorer(mut self, scorer: Box<dyn SkillScorer>) -> Self {
        self.scorers.push(scorer);
        self
    }

    pub fn score(&self, result: &SkillMatchResult) -> SkillScore {
        let mut base_score = 0.0;
        let mut bonus_score = 0.0;

        for scorer in &self.scorers {
            let points = scorer.calculate(result);
            match scorer.component() {
                ScoreComponent::Base => base_score += points,
                ScoreComponent::Bonus => bonus_score += points,
            }
        }

        let total_score = base_score + bonus_score;

        SkillScore {
            base_score,
            bonus_score,
            total_score,
            exact_matches: result.match_count,
            total_required: result.total_required,
            extra_skill_count: result.extra_count(),
            level: ScoreLevel::from_score(total_score, &self.thresholds),
        }
    }

    /// Compare and score in one step
    pub fn score_skills<C, R>(&self, candidate_skills: &[C], required_skills: &[R]) -> SkillScore
    where
        C: AsRef<str>,
        R: AsRef<str>,
    {
        self.score(&self.matcher.match_skills(candidate_skills, required_skills))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregator() -> ScoreAggregator {
        ScoreAggregator::from_config(&ScoringConfig::default())
    }

    fn extra_skills(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("extra-{}", i)).collect()
    }

    #[test]
    fn test_total_is_base_plus_bonus() {
        let candidate = ["java", "sql", "git", "linux"];
        let score = aggregator().score_skills(&candidate, &["java", "sql", "docker"]);

        assert!((score.base_score - 66.666).abs() < 0.01);
        assert!((score.bonus_score - 4.0).abs() < 1e-9);
        assert_eq!(score.total_score, score.base_score + score.bonus_score);
        assert_eq!(score.exact_matches, 2);
        assert_eq!(score.total_required, 3);
        assert_eq!(score.extra_skill_count, 2);
        assert_eq!(score.level, ScoreLevel::Good);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        let score = aggregator().score_skills(&[] as &[&str], &["java", "docker"]);
        assert_eq!(score.base_score, 0.0);
        assert_eq!(score.bonus_score, 0.0);
        assert_eq!(score.total_score, 0.0);
        assert_eq!(score.level, ScoreLevel::Poor);
    }

    #[test]
    fn test_empty_requirements_give_bonus_only() {
        let score = aggregator().score_skills(&["java", "sql"], &[] as &[&str]);
        assert_eq!(score.base_score, 0.0);
        assert!((score.bonus_score - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_monotonic_and_capped() {
        let scorer = BonusScoreScorer::new(0.2, 20.0);
        let matcher = SkillMatcher::new();
        let mut previous = 0.0;

        for n in 0..25 {
            let result = matcher.match_skills(&extra_skills(n), &["required"]);
            let bonus = scorer.calculate(&result);
            assert!(bonus >= previous, "bonus decreased at {} extras", n);
            assert!(bonus <= 20.0);
            previous = bonus;
        }
        assert_eq!(previous, 20.0);
    }

    #[test]
    fn test_total_can_exceed_100() {
        let mut candidate = extra_skills(12);
        candidate.push("java".to_string());
        let score = aggregator().score_skills(&candidate, &["java"]);

        assert_eq!(score.base_score, 100.0);
        assert_eq!(score.bonus_score, 20.0);
        assert_eq!(score.total_score, 120.0);
        assert_eq!(score.level, ScoreLevel::Excellent);
    }

    #[test]
    fn test_level_partition_boundaries() {
        let t = LevelThresholds::default();
        assert_eq!(ScoreLevel::from_score(80.0, &t), ScoreLevel::Excellent);
        assert_eq!(ScoreLevel::from_score(79.99, &t), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(60.0, &t), ScoreLevel::Good);
        assert_eq!(ScoreLevel::from_score(40.0, &t), ScoreLevel::Fair);
        assert_eq!(ScoreLevel::from_score(39.99, &t), ScoreLevel::Poor);
        assert_eq!(ScoreLevel::from_score(0.0, &t), ScoreLevel::Poor);
    }

    struct FlatScorer;

    impl SkillScorer for FlatScorer {
        fn component(&self) -> ScoreComponent {
            ScoreComponent::Bonus
        }

        fn calculate(&self, _result: &SkillMatchResult) -> f64 {
            5.0
        }
    }

    #[test]
    fn test_additional_strategy_plugs_in() {
        let aggregator = ScoreAggregator::from_config(&ScoringConfig::default())
            .with_scorer(Box::new(FlatScorer));
        let score = aggregator.score_skills(&["java"], &["java"]);
        assert_eq!(score.bonus_score, 5.0);
        assert_eq!(score.total_score, 105.0);
    }
}
