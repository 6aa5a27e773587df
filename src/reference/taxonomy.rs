//! Skill taxonomy: categories of canonical skills with their aliases

use crate::error::{CvAnalyzerError, Result};
use crate::normalize::{normalize_skill, normalize_unique};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<SkillEntry>,
}

/// Read-only dictionary the skill extractor is built from.
///
/// Canonical names and aliases are stored normalized. A canonical name may
/// only live in one category, and every name or alias points at exactly one
/// skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillTaxonomy {
    categories: Vec<SkillCategory>,
    category_index: HashMap<String, usize>,
    /// Canonical name or alias -> canonical name
    canonical_index: HashMap<String, String>,
}

impl SkillTaxonomy {
    pub fn new(categories: Vec<SkillCategory>) -> Result<Self> {
        let mut category_index = HashMap::new();
        let mut canonical_index: HashMap<String, String> = HashMap::new();
        let mut normalized = Vec::with_capacity(categories.len());

        for (idx, category) in categories.into_iter().enumerate() {
            let mut skills = Vec::with_capacity(category.skills.len());

            for entry in category.skills {
                let name = normalize_skill(&entry.name);
                if name.is_empty() {
                    return Err(CvAnalyzerError::Configuration(format!(
                        "Empty skill name in category '{}'",
                        category.name
                    )));
                }

                if let Some(&existing) = category_index.get(&name) {
                    let existing_name = if existing == idx {
                        category.name.clone()
                    } else {
                        normalized_name(&normalized, existing)
                    };
                    return Err(CvAnalyzerError::Configuration(format!(
                        "Skill '{}' is listed in both '{}' and '{}'",
                        name, existing_name, category.name
                    )));
                }
                if let Some(owner) = canonical_index.get(&name) {
                    return Err(CvAnalyzerError::Configuration(format!(
                        "Skill '{}' is already an alias of '{}'",
                        name, owner
                    )));
                }
                category_index.insert(name.clone(), idx);
                canonical_index.insert(name.clone(), name.clone());

                let aliases: Vec<String> = normalize_unique(&entry.aliases)
                    .into_iter()
                    .filter(|a| *a != name)
                    .collect();

                for alias in &aliases {
                    if let Some(owner) = canonical_index.get(alias) {
                        return Err(CvAnalyzerError::Configuration(format!(
                            "Alias '{}' of '{}' already names the skill '{}'",
                            alias, name, owner
                        )));
                    }
                    canonical_index.insert(alias.clone(), name.clone());
                }

                skills.push(SkillEntry { name, aliases });
            }

            normalized.push(SkillCategory {
                name: category.name.trim().to_string(),
                skills,
            });
        }

        Ok(Self {
            categories: normalized,
            category_index,
            canonical_index,
        })
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn skill_count(&self) -> usize {
        self.category_index.len()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.category_index.contains_key(&normalize_skill(skill))
    }

    /// Canonical name for a skill written as its name or one of its aliases
    pub fn canonical_name(&self, skill: &str) -> Option<&str> {
        self.canonical_index
            .get(&normalize_skill(skill))
            .map(String::as_str)
    }

    /// Category a canonical skill belongs to
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.category_index
            .get(&normalize_skill(skill))
            .map(|&idx| self.categories[idx].name.as_str())
    }
}

fn normalized_name(categories: &[SkillCategory], idx: usize) -> String {
    categories
        .get(idx)
        .map(|c| c.name.clone())
        .unwrap_or_default()
}
