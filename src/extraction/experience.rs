//! Years of experience, employers and seniority level from raw CV text

use crate::config::ExtractionConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Junior,
    Middle,
    Senior,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "Junior"),
            ExperienceLevel::Middle => write!(f, "Middle"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceInfo {
    pub total_years: u32,
    pub companies: Vec<String>,
    pub level: ExperienceLevel,
}

/// Finds `<number> [+] years` / `<number> [+] năm` mentions
pub struct YearParser {
    pattern: Regex,
}

impl Default for YearParser {
    fn default() -> Self {
        Self::new()
    }
}

impl YearParser {
    pub fn new() -> Self {
        let pattern =
            Regex::new(r"(?i)(\d+)\s*\+?\s*(?:years?|năm)\b").expect("Invalid years regex");
        Self { pattern }
    }

    /// Largest number of years mentioned anywhere in the text, 0 when none.
    /// CVs usually restate the running total, so the maximum wins over the sum.
    pub fn parse(&self, text: &str) -> u32 {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1)?.as_str().parse::<u32>().ok())
            .max()
            .unwrap_or(0)
    }
}

/// Source of employer names found in a CV
pub trait CompanyExtractor: Send + Sync {
    /// Company names in order of first appearance, without duplicates
    fn extract_companies(&self, text: &str) -> Vec<String>;
}

/// Recognises `Company: X` lines and `... at X` / `... @ X` phrases
pub struct PatternCompanyExtractor {
    patterns: Vec<Regex>,
}

impl Default for PatternCompanyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternCompanyExtractor {
    pub fn new() -> Self {
        let patterns = vec![
            Regex::new(r"(?im)^[ \t]*(?:company|employer|công ty)[ \t]*[:\-–][ \t]*(\S.*?)[ \t]*$")
                .expect("Invalid company line regex"),
            Regex::new(r"(?:\bat|@)[ \t]+(\p{Lu}[\w&.\-]*(?:[ \t]+\p{Lu}[\w&.\-]*)*)")
                .expect("Invalid company phrase regex"),
        ];
        Self { patterns }
    }
}

impl CompanyExtractor for PatternCompanyExtractor {
    fn extract_companies(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, String)> = Vec::new();

        for pattern in &self.patterns {
            for cap in pattern.captures_iter(text) {
                if let Some(m) = cap.get(1) {
                    let name = m.as_str().trim().trim_end_matches(&[',', ';', '.'][..]).trim();
                    if !name.is_empty() {
                        found.push((m.start(), name.to_string()));
                    }
                }
            }
        }

        found.sort_by_key(|(pos, _)| *pos);

        let mut seen = HashSet::new();
        found
            .into_iter()
            .map(|(_, name)| name)
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

/// Rule table mapping keywords and years to a seniority level
#[derive(Debug, Clone)]
pub struct LevelDeterminer {
    senior_keywords: Vec<String>,
    junior_keywords: Vec<String>,
    senior_min_years: u32,
    junior_max_years: u32,
}

impl LevelDeterminer {
    pub fn new(
        senior_keywords: &[String],
        junior_keywords: &[String],
        senior_min_years: u32,
        junior_max_years: u32,
    ) -> Self {
        let lower = |keywords: &[String]| -> Vec<String> {
            keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect()
        };

        Self {
            senior_keywords: lower(senior_keywords),
            junior_keywords: lower(junior_keywords),
            senior_min_years,
            junior_max_years,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            &config.senior_keywords,
            &config.junior_keywords,
            config.senior_min_years,
            config.junior_max_years,
        )
    }

    /// Senior rules are checked first, so a CV with both senior and junior
    /// keywords is SENIOR.
    pub fn determine(&self, text: &str, years: u32) -> ExperienceLevel {
        let lower = text.to_lowercase();
        let mentions = |keywords: &[String]| keywords.iter().any(|k| lower.contains(k.as_str()));

        if mentions(self.senior_keywords.as_slice()) || years >= self.senior_min_years {
            ExperienceLevel::Senior
        } else if mentions(self.junior_keywords.as_slice()) || years <= self.junior_max_years {
            ExperienceLevel::Junior
        } else {
            ExperienceLevel::Middle
        }
    }
}

pub struct ExperienceExtractor {
    year_parser: YearParser,
    company_extractor: Box<dyn CompanyExtractor>,
    level_determiner: LevelDeterminer,
}

impl ExperienceExtractor {
    pub fn new(
        year_parser: YearParser,
        company_extractor: Box<dyn CompanyExtractor>,
        level_determiner: LevelDeterminer,
    ) -> Self {
        Self {
            year_parser,
            company_extractor,
            level_determiner,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(
            YearParser::new(),
            Box::new(PatternCompanyExtractor::new()),
            LevelDeterminer::from_config(config),
        )
    }

    pub fn extract(&self, text: &str) -> ExperienceInfo {
        let total_years = self.year_parser.parse(text);
        ExperienceInfo {
            total_years,
            companies: self.company_extractor.extract_companies(text),
            level: self.level_determiner.determine(text, total_years),
        }
    }
}
