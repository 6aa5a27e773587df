//! Role curricula: the ordered learning steps that define each target role

use crate::error::{CvAnalyzerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One step of a role's curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningStep {
    #[serde(alias = "order")]
    pub sequence_order: u32,
    #[serde(alias = "skill")]
    pub skill_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "core", default)]
    pub is_core: bool,
}

/// A role and the steps it exclusively owns, sorted by `sequence_order`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleCurriculum {
    name: String,
    steps: Vec<LearningStep>,
}

impl RoleCurriculum {
    pub fn new(name: impl Into<String>, mut steps: Vec<LearningStep>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(CvAnalyzerError::Configuration(
                "Curriculum role name must not be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for step in &steps {
            if !seen.insert(step.sequence_order) {
                return Err(CvAnalyzerError::InvalidCurriculum {
                    role: name,
                    reason: format!("duplicate sequence order {}", step.sequence_order),
                });
            }
            if step.skill_name.trim().is_empty() {
                return Err(CvAnalyzerError::InvalidCurriculum {
                    role: name,
                    reason: format!("step {} has no skill", step.sequence_order),
                });
            }
        }

        steps.sort_by_key(|s| s.sequence_order);
        Ok(Self { name, steps })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[LearningStep] {
        &self.steps
    }
}

/// Role name -> curriculum. Lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurriculumTable {
    roles: BTreeMap<String, RoleCurriculum>,
}

impl CurriculumTable {
    pub fn new(curricula: Vec<RoleCurriculum>) -> Result<Self> {
        let mut roles = BTreeMap::new();
        for curriculum in curricula {
            let key = curriculum.name.to_lowercase();
            if roles.contains_key(&key) {
                return Err(CvAnalyzerError::Configuration(format!(
                    "Role '{}' is defined more than once",
                    curriculum.name
                )));
            }
            roles.insert(key, curriculum);
        }
        Ok(Self { roles })
    }

    /// Curriculum of `role`, failing with `UnknownRole` when none is defined
    pub fn get(&self, role: &str) -> Result<&RoleCurriculum> {
        self.roles
            .get(&role.trim().to_lowercase())
            .ok_or_else(|| CvAnalyzerError::UnknownRole(role.trim().to_string()))
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleCurriculum> {
        self.roles.values()
    }

    pub fn role_names(&self) -> Vec<&str> {
        self.roles.values().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
