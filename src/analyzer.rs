//! Analysis engine: runs one CV through extraction, matching, scoring and
//! recommendations

use crate::config::Config;
use crate::error::Result;
use crate::extraction::{
    ContactExtractor, ContactInfo, ExperienceExtractor, ExperienceInfo, SkillExtractor,
};
use crate::matching::{ScoreAggregator, SkillMatchResult, SkillMatcher, SkillScore};
use crate::normalize::{normalize_unique, SkillSet};
use crate::recommendation::{ComprehensiveRecommendation, RecommendationEngine};
use crate::reference::ReferenceData;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Plain text already extracted from the CV document
    pub cv_text: String,
    pub required_skills: Vec<String>,
    pub target_role: Option<String>,
}

impl AnalysisRequest {
    pub fn new(cv_text: impl Into<String>) -> Self {
        Self {
            cv_text: cv_text.into(),
            ..Self::default()
        }
    }

    pub fn with_required_skills<S: AsRef<str>>(mut self, skills: &[S]) -> Self {
        self.required_skills = skills.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    pub fn with_target_role(mut self, role: impl Into<String>) -> Self {
        self.target_role = Some(role.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvAnalysisResult {
    pub contact: ContactInfo,
    pub experience: ExperienceInfo,
    /// Canonical skills found in the CV
    pub skills: Vec<String>,
    pub skills_by_category: SkillSet,
    pub skill_match: SkillMatchResult,
    pub score: SkillScore,
    pub recommendations: ComprehensiveRecommendation,
    pub raw_text: String,
    pub word_count: usize,
    pub processing_time_ms: u64,
    pub analyzed_at: DateTime<Utc>,
}

/// Wires the extractors, matcher, scorer and recommendation engine together.
///
/// Holds only read-only state, so one analyzer can serve concurrent
/// analyses from several threads.
pub struct CvAnalyzer {
    reference: Arc<ReferenceData>,
    contact_extractor: ContactExtractor,
    experience_extractor: ExperienceExtractor,
    skill_extractor: SkillExtractor,
    matcher: SkillMatcher,
    scorer: ScoreAggregator,
    recommender: RecommendationEngine,
}

impl CvAnalyzer {
    pub fn new(config: &Config, reference: ReferenceData) -> Result<Self> {
        config.validate()?;
        let reference = Arc::new(reference);

        Ok(Self {
            contact_extractor: ContactExtractor::new(),
            experience_extractor: ExperienceExtractor::from_config(&config.extraction),
            skill_extractor: SkillExtractor::new(&reference.taxonomy)?,
            matcher: SkillMatcher::new(),
            scorer: ScoreAggregator::from_config(&config.scoring),
            recommender: RecommendationEngine::from_config(&config.recommendation),
            reference,
        })
    }

    /// Reference tables from the configuration (built-in unless overridden)
    pub fn from_config(config: &Config) -> Result<Self> {
        let reference = ReferenceData::load(&config.reference)?;
        Self::new(config, reference)
    }

    /// Skills named in a job description, for use as required skills
    pub fn required_skills_from_text(&self, job_text: &str) -> Vec<String> {
        self.skill_extractor.extract(job_text)
    }

    /// Required skills under their canonical names. Aliases map to the skill
    /// they name; skills outside the taxonomy are kept as written.
    fn canonical_required_skills(&self, skills: &[String]) -> Vec<String> {
        let taxonomy = &self.reference.taxonomy;
        let canonical: Vec<String> = normalize_unique(skills)
            .into_iter()
            .map(|skill| match taxonomy.canonical_name(&skill) {
                Some(name) => name.to_string(),
                None => skill,
            })
            .collect();
        normalize_unique(&canonical)
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> Result<CvAnalysisResult> {
        let start_time = Instant::now();
        let target_role = request
            .target_role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        // Unknown roles are a configuration problem; report before doing any work
        if let Some(role) = target_role {
            self.reference.curricula.get(role)?;
        }

        let text = request.cv_text.as_str();
        let contact = self.contact_extractor.extract(text);
        let experience = self.experience_extractor.extract(text);
        let extracted = self.skill_extractor.extract_all(text);
        debug!(
            "Extracted {} skills, {} years, {} companies",
            extracted.skills.len(),
            experience.total_years,
            experience.companies.len()
        );

        let required = self.canonical_required_skills(&request.required_skills);
        let unknown: Vec<&str> = required
            .iter()
            .map(String::as_str)
            .filter(|skill| !self.reference.taxonomy.contains(skill))
            .collect();
        if !unknown.is_empty() {
            warn!(
                "Required skills missing from the taxonomy will never match: {}",
                unknown.join(", ")
            );
        }

        let skill_match = self.matcher.match_skills(&extracted.skills, &required);
        let score = self.scorer.score(&skill_match);
        debug!(
            "Match {:.1}% ({} of {}), total score {:.1}",
            skill_match.match_percentage,
            skill_match.match_count,
            skill_match.total_required,
            score.total_score
        );

        let recommendations =
            self.recommender
                .recommend(&self.reference, &extracted.skills, &skill_match, target_role)?;

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "CV analysis completed in {}ms: {} skills, score {:.1} ({})",
            processing_time_ms,
            extracted.skills.len(),
            score.total_score,
            score.level
        );

        Ok(CvAnalysisResult {
            contact,
            experience,
            skills: extracted.skills,
            skills_by_category: extracted.by_category,
            skill_match,
            score,
            recommendations,
            word_count: text.unicode_words().count(),
            raw_text: request.cv_text.clone(),
            processing_time_ms,
            analyzed_at: Utc::now(),
        })
    }
}
