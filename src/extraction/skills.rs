//! Dictionary-based skill extraction

use crate::error::{CvAnalyzerError, Result};
use crate::normalize::SkillSet;
use crate::reference::taxonomy::SkillTaxonomy;
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Skills found in one text, flat and grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSkills {
    /// Canonical names in taxonomy order
    pub skills: Vec<String>,
    pub by_category: SkillSet,
}

struct KnownSkill {
    name: String,
    category: String,
}

/// Matches canonical skill names and aliases against text.
///
/// A pattern counts when it occurs as a whole token: the characters on
/// either side must not be letters or digits. This keeps `java` from firing
/// inside `javascript` without any stemming or fuzzy logic.
pub struct SkillExtractor {
    matcher: AhoCorasick,
    /// Pattern id -> index into `skills`
    pattern_targets: Vec<usize>,
    skills: Vec<KnownSkill>,
}

impl SkillExtractor {
    pub fn new(taxonomy: &SkillTaxonomy) -> Result<Self> {
        let mut patterns = Vec::new();
        let mut pattern_targets = Vec::new();
        let mut skills = Vec::new();

        for category in taxonomy.categories() {
            for entry in &category.skills {
                let skill_idx = skills.len();
                skills.push(KnownSkill {
                    name: entry.name.clone(),
                    category: category.name.clone(),
                });

                for pattern in std::iter::once(&entry.name).chain(entry.aliases.iter()) {
                    patterns.push(pattern.clone());
                    pattern_targets.push(skill_idx);
                }
            }
        }

        // Haystacks are lowercased before searching and the taxonomy is
        // already normalized, so the automaton itself stays case-sensitive.
        let matcher = AhoCorasick::new(&patterns).map_err(|e| {
            CvAnalyzerError::Matcher(format!("Failed to build skill matcher: {}", e))
        })?;

        Ok(Self {
            matcher,
            pattern_targets,
            skills,
        })
    }

    /// Flat, deduplicated skills found in `text`
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.matched_indices(text)
            .into_iter()
            .map(|idx| self.skills[idx].name.clone())
            .collect()
    }

    /// Found skills grouped by taxonomy category. Categories without hits are omitted.
    pub fn extract_by_category(&self, text: &str) -> SkillSet {
        self.extract_all(text).by_category
    }

    pub fn extract_all(&self, text: &str) -> ExtractedSkills {
        let mut extracted = ExtractedSkills::default();

        for idx in self.matched_indices(text) {
            let skill = &self.skills[idx];
            extracted.skills.push(skill.name.clone());
            extracted
                .by_category
                .entry(skill.category.clone())
                .or_default()
                .insert(skill.name.clone());
        }

        extracted
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    fn matched_indices(&self, text: &str) -> BTreeSet<usize> {
        let haystack = text.to_lowercase();

        self.matcher
            .find_overlapping_iter(&haystack)
            .filter(|m| is_token_boundary(&haystack, m.start(), m.end()))
            .map(|m| self.pattern_targets[m.pattern().as_usize()])
            .collect()
    }
}

fn is_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}
