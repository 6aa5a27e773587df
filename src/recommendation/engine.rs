//! Gap-skill and related-skill recommendations, gap analysis, and the
//! combined recommendation for one analysis

use crate::config::RecommendationConfig;
use crate::error::Result;
use crate::matching::matcher::SkillMatchResult;
use crate::normalize::normalize_unique;
use crate::recommendation::learning_path::{LearningPath, LearningPathBuilder, RoleSuggestion};
use crate::reference::relations::SkillRelations;
use crate::reference::ReferenceData;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

const MAX_PRIORITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecommendation {
    pub skill_name: String,
    pub reason: String,
    /// 1 (low) – 10 (high)
    pub priority: u8,
    /// Candidate skills that triggered the suggestion
    pub related_to: Vec<String>,
}

/// How often a skill was suggested and by which candidate skills
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillFrequency {
    pub count: usize,
    pub triggered_by: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub match_percentage: f64,
    pub completed_skills: Vec<String>,
    pub remaining_skills: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveRecommendation {
    pub gap_skills: Vec<SkillRecommendation>,
    pub related_skills: Vec<SkillRecommendation>,
    pub gap_analysis: GapAnalysis,
    pub learning_path: Option<LearningPath>,
    pub role_suggestions: Vec<RoleSuggestion>,
}

pub struct RecommendationEngine {
    gap_priority: u8,
    gap_reason: String,
    path_builder: LearningPathBuilder,
}

impl RecommendationEngine {
    pub fn new(
        gap_priority: u8,
        gap_reason: impl Into<String>,
        path_builder: LearningPathBuilder,
    ) -> Self {
        Self {
            gap_priority: gap_priority.clamp(1, MAX_PRIORITY as u8),
            gap_reason: gap_reason.into(),
            path_builder,
        }
    }

    pub fn from_config(config: &RecommendationConfig) -> Self {
        Self::new(
            config.gap_priority,
            config.gap_reason.clone(),
            LearningPathBuilder::new(config.weeks_per_step),
        )
    }

    /// One recommendation per missing skill, in the order the skills are missing
    pub fn gap_recommendations(&self, result: &SkillMatchResult) -> Vec<SkillRecommendation> {
        result
            .missing
            .iter()
            .map(|skill| SkillRecommendation {
                skill_name: skill.clone(),
                reason: self.gap_reason.clone(),
                priority: self.gap_priority,
                related_to: Vec::new(),
            })
            .collect()
    }

    /// Skills commonly paired with what the candidate already knows.
    ///
    /// The more candidate skills point at a suggestion, the higher its
    /// priority. Output is sorted by priority; equal priorities keep
    /// discovery order.
    pub fn related_recommendations<S: AsRef<str>>(
        &self,
        relations: &SkillRelations,
        candidate_skills: &[S],
    ) -> Vec<SkillRecommendation> {
        let candidate = normalize_unique(candidate_skills);
        let known: HashSet<&str> = candidate.iter().map(String::as_str).collect();

        let mut order: Vec<String> = Vec::new();
        let mut frequencies: HashMap<String, SkillFrequency> = HashMap::new();

        for skill in &candidate {
            for related in relations.related_to(skill) {
                if known.contains(related.as_str()) {
                    continue;
                }

                let freq = frequencies.entry(related.clone()).or_insert_with(|| {
                    order.push(related.clone());
                    SkillFrequency::default()
                });
                freq.count += 1;
                freq.triggered_by.push(skill.clone());
            }
        }

        let mut recommendations: Vec<SkillRecommendation> = order
            .into_iter()
            .filter_map(|name| {
                let freq = frequencies.remove(&name)?;
                Some(SkillRecommendation {
                    reason: generate_reason(&freq.triggered_by),
                    priority: related_priority(freq.count),
                    related_to: freq.triggered_by,
                    skill_name: name,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
        recommendations
    }

    pub fn gap_analysis(&self, result: &SkillMatchResult) -> GapAnalysis {
        let summary = if result.total_required == 0 {
            "No required skills were provided for this position.".to_string()
        } else if result.missing.is_empty() {
            format!("All {} required skills are covered.", result.total_required)
        } else {
            format!(
                "{} of {} required skills covered ({:.1}%). Still to learn: {}.",
                result.match_count,
                result.total_required,
                result.match_percentage,
                result.missing.join(", ")
            )
        };

        GapAnalysis {
            match_percentage: result.match_percentage,
            completed_skills: result.matched.clone(),
            remaining_skills: result.missing.clone(),
            summary,
        }
    }

    /// Build every recommendation for one analysis.
    ///
    /// Fails with `UnknownRole` when `target_role` has no curriculum.
    pub fn recommend<S: AsRef<str>>(
        &self,
        reference: &ReferenceData,
        candidate_skills: &[S],
        result: &SkillMatchResult,
        target_role: Option<&str>,
    ) -> Result<ComprehensiveRecommendation> {
        let learning_path = match target_role {
            Some(role) => {
                let curriculum = reference.curricula.get(role)?;
                Some(self.path_builder.build(curriculum, candidate_skills))
            }
            None => None,
        };

        let gap_skills = self.gap_recommendations(result);
        let related_skills = self.related_recommendations(&reference.relations, candidate_skills);
        let role_suggestions = self
            .path_builder
            .suggest_roles(&reference.curricula, candidate_skills);

        debug!(
            "Recommendations: {} gap skills, {} related skills, {} role suggestions",
            gap_skills.len(),
            related_skills.len(),
            role_suggestions.len()
        );

        Ok(ComprehensiveRecommendation {
            gap_skills,
            related_skills,
            gap_analysis: self.gap_analysis(result),
            learning_path,
            role_suggestions,
        })
    }
}

fn related_priority(count: usize) -> u8 {
    (count.saturating_mul(2).saturating_add(3)).min(MAX_PRIORITY) as u8
}

/// Human-readable reason listing the candidate skills behind a suggestion
pub fn generate_reason(triggered_by: &[String]) -> String {
    match triggered_by {
        [] => "Commonly paired with your current skills".to_string(),
        [only] => format!("Commonly paired with {}", only),
        [first, second] => format!("Commonly paired with {} and {}", first, second),
        [first, second, rest @ ..] => {
            let others = rest.len();
            format!(
                "Commonly paired with {}, {}, and {} other{}",
                first,
                second,
                others,
                if others == 1 { "" } else { "s" }
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::matcher::SkillMatcher;
    use std::collections::BTreeMap;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::from_config(&RecommendationConfig::default())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn relations() -> SkillRelations {
        let mut entries = BTreeMap::new();
        entries.insert("java".to_string(), strings(&["spring boot", "maven", "sql"]));
        entries.insert("kotlin".to_string(), strings(&["spring boot", "gradle"]));
        entries.insert("sql".to_string(), strings(&["postgresql"]));
        entries.insert("docker".to_string(), strings(&["kubernetes", "spring boot"]));
        SkillRelations::new(entries)
    }

    #[test]
    fn test_gap_recommendation_for_missing_skill() {
        let result = SkillMatcher::new().match_skills(&["java", "sql"], &["java", "sql", "docker"]);
        let recs = engine().gap_recommendations(&result);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].skill_name, "docker");
        assert_eq!(recs[0].priority, 7);
        assert_eq!(recs[0].reason, "Required by the target position");
    }

    #[test]
    fn test_related_skills_counted_and_sorted() {
        let recs =
            engine().related_recommendations(&relations(), &["java", "kotlin", "sql", "docker"]);
        let names: Vec<&str> = recs.iter().map(|r| r.skill_name.as_str()).collect();

        // spring boot is triggered three times, the rest once; sql is already known
        assert_eq!(names, vec!["spring boot", "maven", "gradle", "postgresql", "kubernetes"]);
        assert_eq!(recs[0].priority, 9);
        assert_eq!(recs[0].related_to, strings(&["java", "kotlin", "docker"]));
        assert_eq!(recs[0].reason, "Commonly paired with java, kotlin, and 1 other");
        assert_eq!(recs[1].priority, 5);
        assert_eq!(recs[1].reason, "Commonly paired with java");
    }

    #[test]
    fn test_related_priority_capped_at_ten() {
        assert_eq!(related_priority(1), 5);
        assert_eq!(related_priority(3), 9);
        assert_eq!(related_priority(4), 10);
        assert_eq!(related_priority(50), 10);
    }

    #[test]
    fn test_generate_reason_variants() {
        assert_eq!(generate_reason(&strings(&["java"])), "Commonly paired with java");
        assert_eq!(
            generate_reason(&strings(&["java", "kotlin"])),
            "Commonly paired with java and kotlin"
        );
        assert_eq!(
            generate_reason(&strings(&["java", "kotlin", "docker"])),
            "Commonly paired with java, kotlin, and 1 other"
        );
        assert_eq!(
            generate_reason(&strings(&["java", "kotlin", "docker", "sql", "git"])),
            "Commonly paired with java, kotlin, and 3 others"
        );
    }

    #[test]
    fn test_gap_analysis_summary() {
        let result = SkillMatcher::new().match_skills(&["java"], &["java", "docker"]);
        let analysis = engine().gap_analysis(&result);

        assert_eq!(analysis.completed_skills, strings(&["java"]));
        assert_eq!(analysis.remaining_skills, strings(&["docker"]));
        assert_eq!(analysis.match_percentage, 50.0);
        assert!(analysis.summary.contains("docker"));
    }

    #[test]
    fn test_recommend_fails_fast_for_unknown_role() {
        let reference = ReferenceData::builtin().unwrap();
        let result = SkillMatcher::new().match_skills(&["java"], &["java"]);

        let err = engine()
            .recommend(&reference, &["java"], &result, Some("Astronaut"))
            .unwrap_err();
        assert!(err.to_string().contains("Astronaut"));
    }

    #[test]
    fn test_recommend_without_role_has_no_path() {
        let reference = ReferenceData::builtin().unwrap();
        let result = SkillMatcher::new().match_skills(&["java", "sql"], &["java", "sql", "docker"]);

        let rec = engine().recommend(&reference, &["java", "sql"], &result, None).unwrap();
        assert!(rec.learning_path.is_none());
        assert_eq!(rec.gap_skills.len(), 1);
        assert_eq!(rec.role_suggestions.len(), reference.curricula.len());
    }
}
