//! Learning paths against a role curriculum, and role-fit ranking across roles

use crate::normalize::{normalize_skill, normalize_unique, percentage};
use crate::reference::curriculum::{CurriculumTable, LearningStep, RoleCurriculum};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A curriculum step annotated with the candidate's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepProgress {
    #[serde(flatten)]
    pub step: LearningStep,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPath {
    pub target_role: String,
    pub steps: Vec<StepProgress>,
    /// First incomplete step in sequence order
    pub next_step: Option<LearningStep>,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub progress_percentage: f64,
    pub estimated_weeks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSuggestion {
    pub role_name: String,
    pub match_percentage: f64,
    pub matched_skills_count: usize,
    pub total_required_skills: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct LearningPathBuilder {
    weeks_per_step: u32,
}

impl LearningPathBuilder {
    pub fn new(weeks_per_step: u32) -> Self {
        Self { weeks_per_step }
    }

    pub fn build<S: AsRef<str>>(
        &self,
        curriculum: &RoleCurriculum,
        candidate_skills: &[S],
    ) -> LearningPath {
        let owned = normalize_unique(candidate_skills);
        let candidate: HashSet<&str> = owned.iter().map(String::as_str).collect();

        let steps: Vec<StepProgress> = curriculum
            .steps()
            .iter()
            .map(|step| StepProgress {
                is_completed: candidate.contains(normalize_skill(&step.skill_name).as_str()),
                step: step.clone(),
            })
            .collect();

        let total_steps = steps.len();
        let completed_steps = steps.iter().filter(|s| s.is_completed).count();
        let next_step = steps.iter().find(|s| !s.is_completed).map(|s| s.step.clone());
        let remaining = (total_steps - completed_steps) as u32;

        LearningPath {
            target_role: curriculum.name().to_string(),
            steps,
            next_step,
            total_steps,
            completed_steps,
            progress_percentage: percentage(completed_steps, total_steps),
            estimated_weeks: remaining.saturating_mul(self.weeks_per_step),
        }
    }

    /// Fit of the candidate against every known role, best first.
    /// Ties are broken by role name so the ranking is deterministic.
    pub fn suggest_roles<S: AsRef<str>>(
        &self,
        curricula: &CurriculumTable,
        candidate_skills: &[S],
    ) -> Vec<RoleSuggestion> {
        let mut suggestions: Vec<RoleSuggestion> = curricula
            .roles()
            .map(|curriculum| {
                let path = self.build(curriculum, candidate_skills);
                RoleSuggestion {
                    role_name: path.target_role,
                    match_percentage: path.progress_percentage,
                    matched_skills_count: path.completed_steps,
                    total_required_skills: path.total_steps,
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            b.match_percentage
                .total_cmp(&a.match_percentage)
                .then_with(|| a.role_name.cmp(&b.role_name))
        });

        suggestions
    }
}
