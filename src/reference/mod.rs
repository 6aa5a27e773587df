//! Read-only reference data: skill taxonomy, skill relations and role curricula
//!
//! The tables are loaded once and shared by every analysis. A default set is
//! compiled into the binary; `reference.data_path` swaps in a user file with
//! the same TOML layout.

pub mod curriculum;
pub mod relations;
pub mod taxonomy;

use crate::config::ReferenceConfig;
use crate::error::Result;
use curriculum::{CurriculumTable, LearningStep, RoleCurriculum};
use log::info;
use relations::SkillRelations;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use taxonomy::{SkillCategory, SkillTaxonomy};

const BUILTIN_REFERENCE: &str = include_str!("../../data/reference.toml");

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub taxonomy: SkillTaxonomy,
    pub relations: SkillRelations,
    pub curricula: CurriculumTable,
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(default)]
    categories: Vec<SkillCategory>,
    #[serde(default)]
    relations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    roles: Vec<RoleFile>,
}

#[derive(Debug, Deserialize)]
struct RoleFile {
    name: String,
    #[serde(default)]
    steps: Vec<LearningStep>,
}

impl ReferenceData {
    /// Tables shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_REFERENCE)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let data = Self::from_toml_str(&content)?;
        info!(
            "Loaded reference data from {}: {} skills, {} roles",
            path.display(),
            data.taxonomy.skill_count(),
            data.curricula.len()
        );
        Ok(data)
    }

    /// Built-in tables unless the configuration names a data file
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        match &config.data_path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ReferenceFile = toml::from_str(content)?;

        let taxonomy = SkillTaxonomy::new(file.categories)?;
        let relations = SkillRelations::new(file.relations);
        let curricula = file
            .roles
            .into_iter()
            .map(|role| RoleCurriculum::new(role.name, role.steps))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            taxonomy,
            relations,
            curricula: CurriculumTable::new(curricula)?,
        })
    }
}
