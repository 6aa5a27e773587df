//! Skill-string normalization shared by extraction, matching and learning paths

use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Skills grouped by taxonomy category
pub type SkillSet = BTreeMap<String, BTreeSet<String>>;

/// Case-fold and trim a skill name so that comparisons are spelling-insensitive
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Normalize a list of skills, dropping blanks and duplicates.
/// Order of first appearance is preserved.
pub fn normalize_unique<S: AsRef<str>>(skills: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| normalize_skill(s.as_ref()))
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Percentage helper that yields 0 instead of dividing by zero
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_skill_trims_and_lowercases() {
        assert_eq!(normalize_skill("  Spring Boot "), "spring boot");
        assert_eq!(normalize_skill("C#"), "c#");
    }

    #[test]
    fn test_normalize_unique_collapses_duplicates_in_order() {
        let skills = ["Java", "sql", " JAVA", "", "Docker", "SQL "];
        assert_eq!(normalize_unique(&skills), vec!["java", "sql", "docker"]);
    }

    #[test]
    fn test_percentage_guards_zero() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }
}
