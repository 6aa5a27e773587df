//! Skill relationship table used for related-skill suggestions

use crate::normalize::{normalize_skill, normalize_unique};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillRelations {
    related: BTreeMap<String, Vec<String>>,
}

impl SkillRelations {
    /// Build the table from raw entries. Keys and values are normalized and a
    /// skill is never listed as related to itself.
    pub fn new(entries: BTreeMap<String, Vec<String>>) -> Self {
        let mut related: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (skill, others) in entries {
            let key = normalize_skill(&skill);
            if key.is_empty() {
                continue;
            }

            let bucket = related.entry(key.clone()).or_default();
            for other in normalize_unique(&others) {
                if other != key && !bucket.contains(&other) {
                    bucket.push(other);
                }
            }
        }

        Self { related }
    }

    /// Skills commonly paired with `skill`, in table order
    pub fn related_to(&self, skill: &str) -> &[String] {
        self.related
            .get(&normalize_skill(skill))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_lookup_is_normalized() {
        let mut entries = BTreeMap::new();
        entries.insert(
            "Java ".to_string(),
            vec!["Spring Boot".to_string(), "java".to_string(), "spring boot".to_string()],
        );
        let relations = SkillRelations::new(entries);

        assert_eq!(relations.related_to("JAVA"), ["spring boot".to_string()]);
        assert!(relations.related_to("cobol").is_empty());
        assert_eq!(relations.len(), 1);
    }
}
