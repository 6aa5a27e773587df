//! Set comparison of candidate skills against a job's required skills

use crate::normalize::{normalize_unique, percentage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of comparing candidate skills with required skills.
///
/// All skill lists are normalized and duplicate-free. `matched` and `missing`
/// follow the order of the required list, `extra` the order of the candidate
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    pub match_count: usize,
    pub total_required: usize,
    /// 0.0 – 100.0
    pub match_percentage: f64,
}

impl SkillMatchResult {
    /// Number of distinct skills the candidate brought
    pub fn candidate_count(&self) -> usize {
        self.matched.len() + self.extra.len()
    }

    pub fn extra_count(&self) -> usize {
        self.extra.len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SkillMatcher;

impl SkillMatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn match_skills<C, R>(
        &self,
        candidate_skills: &[C],
        required_skills: &[R],
    ) -> SkillMatchResult
    where
        C: AsRef<str>,
        R: AsRef<str>,
    {
        let candidate = normalize_unique(candidate_skills);
        let required = normalize_unique(required_skills);

        let candidate_set: HashSet<&str> = candidate.iter().map(String::as_str).collect();
        let required_set: HashSet<&str> = required.iter().map(String::as_str).collect();

        let (matched, missing): (Vec<String>, Vec<String>) = required
            .iter()
            .cloned()
            .partition(|skill| candidate_set.contains(skill.as_str()));

        let extra: Vec<String> = candidate
            .iter()
            .filter(|skill| !required_set.contains(skill.as_str()))
            .cloned()
            .collect();

        let match_count = matched.len();
        let total_required = required.len();

        SkillMatchResult {
            match_percentage: percentage(match_count, total_required),
            matched,
            missing,
            extra,
            match_count,
            total_required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_match_scenario() {
        let result = SkillMatcher::new().match_skills(&["java", "sql"], &["java", "sql", "docker"]);

        assert_eq!(result.match_count, 2);
        assert_eq!(result.total_required, 3);
        assert!((result.match_percentage - 66.666).abs() < 0.01);
        assert_eq!(result.missing, vec!["docker"]);
        assert!(result.extra.is_empty());
    }

    #[test]
    fn test_set_semantics_after_normalization() {
        let candidate = ["Java", " SQL", "Rust", "rust", "Git"];
        let required = ["sql", "Docker", "JAVA", "kubernetes"];
        let result = SkillMatcher::new().match_skills(&candidate, &required);

        assert_eq!(result.matched, vec!["sql", "java"]);
        assert_eq!(result.missing, vec!["docker", "kubernetes"]);
        assert_eq!(result.extra, vec!["rust", "git"]);
        assert_eq!(result.match_count, result.matched.len());
        assert_eq!(result.candidate_count(), 4);
    }

    #[test]
    fn test_empty_required_gives_zero_percentage() {
        let result = SkillMatcher::new().match_skills(&["java", "sql"], &[] as &[&str]);

        assert_eq!(result.match_percentage, 0.0);
        assert!(result.matched.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.extra, vec!["java", "sql"]);
        assert_eq!(result.total_required, 0);
    }

    #[test]
    fn test_empty_candidate_misses_everything() {
        let result =
            SkillMatcher::new().match_skills(&[] as &[String], &["java", "Java", "docker"]);

        assert!(result.matched.is_empty());
        assert!(result.extra.is_empty());
        assert_eq!(result.missing, vec!["java", "docker"]);
        assert_eq!(result.match_percentage, 0.0);
    }

    #[test]
    fn test_full_match() {
        let result = SkillMatcher::new().match_skills(&["docker", "java"], &["java", "docker"]);
        assert_eq!(result.match_percentage, 100.0);
        assert!(result.missing.is_empty());
    }
}
