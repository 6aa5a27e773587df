//! Report formatters: coloured console text, JSON and Markdown

use crate::analyzer::CvAnalysisResult;
use crate::config::{OutputConfig, OutputFormat};
use crate::error::{CvAnalyzerError, Result};
use crate::matching::ScoreLevel;
use crate::recommendation::{LearningPath, SkillRecommendation};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, result: &CvAnalysisResult) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_level_badge(&self, level: ScoreLevel) -> String {
        let color = match level {
            ScoreLevel::Excellent => Color::Green,
            ScoreLevel::Good => Color::BrightGreen,
            ScoreLevel::Fair => Color::Yellow,
            ScoreLevel::Poor => Color::Red,
        };
        let badge = level.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_recommendation(&self, rec: &SkillRecommendation) -> String {
        let marker = match rec.priority {
            8..=10 => "[!]",
            6..=7 => "[*]",
            4..=5 => "[-]",
            _ => "[+]",
        };
        format!(
            "  {} {} (priority {}) - {}\n",
            marker,
            self.colorize(&rec.skill_name, Color::Cyan),
            rec.priority,
            rec.reason
        )
    }

    fn format_learning_path(&self, path: &LearningPath) -> String {
        let mut output = self.format_header(&format!("Learning Path: {}", path.target_role), 2);
        output.push_str(&format!(
            "Progress: {}/{} steps ({:.1}%), about {} weeks remaining\n",
            path.completed_steps, path.total_steps, path.progress_percentage, path.estimated_weeks
        ));

        for progress in &path.steps {
            let mark = if progress.is_completed {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("○", Color::BrightBlack)
            };
            let core = if progress.step.is_core { " (core)" } else { "" };
            output.push_str(&format!(
                "  {} {}. {}{}\n",
                mark, progress.step.sequence_order, progress.step.skill_name, core
            ));
            if self.detailed && !progress.step.description.is_empty() {
                output.push_str(&format!("       {}\n", progress.step.description));
            }
        }

        if let Some(next) = &path.next_step {
            let skill = self.colorize(&next.skill_name, Color::Yellow);
            output.push_str(&format!("Next step: {}\n", skill));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, result: &CvAnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CV ANALYSIS", 1));
        output.push_str(&format!(
            "Analyzed: {} | Processing time: {}ms | Words: {}\n",
            result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            result.processing_time_ms,
            result.word_count
        ));

        output.push_str(&self.format_header("Candidate", 2));
        output.push_str(&format!("Email: {}\n", result.contact.email.as_deref().unwrap_or("-")));
        output.push_str(&format!("Phone: {}\n", result.contact.phone.as_deref().unwrap_or("-")));
        output.push_str(&format!(
            "Experience: {} years ({})\n",
            result.experience.total_years, result.experience.level
        ));
        if !result.experience.companies.is_empty() {
            output.push_str(&format!("Companies: {}\n", result.experience.companies.join(", ")));
        }

        output.push_str(&self.format_header("Skills", 2));
        if result.skills.is_empty() {
            output.push_str("No known skills found\n");
        } else if self.detailed {
            for (category, skills) in &result.skills_by_category {
                let names: Vec<&str> = skills.iter().map(String::as_str).collect();
                output.push_str(&format!("  {}: {}\n", category, names.join(", ")));
            }
        } else {
            output.push_str(&format!("  {}\n", result.skills.join(", ")));
        }

        let score = &result.score;
        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Total: {:.1} {}\n",
            score.total_score,
            self.format_level_badge(score.level)
        ));
        output.push_str(&format!(
            "Base: {:.1} ({} of {} required) | Bonus: {:.1} ({} extra skills)\n",
            score.base_score,
            score.exact_matches,
            score.total_required,
            score.bonus_score,
            score.extra_skill_count
        ));

        let recs = &result.recommendations;
        if result.skill_match.total_required > 0 {
            output.push_str(&self.format_header("Gap Analysis", 3));
            output.push_str(&format!("{}\n", recs.gap_analysis.summary));
            if !result.skill_match.matched.is_empty() {
                output.push_str(&format!(
                    "Matched: {}\n",
                    self.colorize(&result.skill_match.matched.join(", "), Color::Green)
                ));
            }
            if !result.skill_match.missing.is_empty() {
                output.push_str(&format!(
                    "Missing: {}\n",
                    self.colorize(&result.skill_match.missing.join(", "), Color::Red)
                ));
            }
        }

        if !recs.gap_skills.is_empty() || !recs.related_skills.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for rec in &recs.gap_skills {
                output.push_str(&self.format_recommendation(rec));
            }
            let related_limit = if self.detailed { recs.related_skills.len() } else { 5 };
            for rec in recs.related_skills.iter().take(related_limit) {
                output.push_str(&self.format_recommendation(rec));
            }
        }

        if let Some(path) = &recs.learning_path {
            output.push_str(&self.format_learning_path(path));
        }

        if !recs.role_suggestions.is_empty() {
            output.push_str(&self.format_header("Role Fit", 3));
            let role_limit = if self.detailed { recs.role_suggestions.len() } else { 3 };
            for suggestion in recs.role_suggestions.iter().take(role_limit) {
                output.push_str(&format!(
                    "  {}: {:.1}% ({}/{})\n",
                    suggestion.role_name,
                    suggestion.match_percentage,
                    suggestion.matched_skills_count,
                    suggestion.total_required_skills
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, result: &CvAnalysisResult) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(result)?)
        } else {
            Ok(serde_json::to_string(result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_level_badge(level: ScoreLevel) -> &'static str {
        match level {
            ScoreLevel::Excellent => "🟢 Excellent",
            ScoreLevel::Good => "🔵 Good",
            ScoreLevel::Fair => "🟡 Fair",
            ScoreLevel::Poor => "🔴 Poor",
        }
    }

    fn recommendation_table(recs: &[SkillRecommendation]) -> String {
        let mut table =
            String::from("| Skill | Priority | Reason |\n|-------|----------|--------|\n");
        for rec in recs {
            table.push_str(&format!(
                "| {} | {} | {} |\n",
                rec.skill_name, rec.priority, rec.reason
            ));
        }
        table.push('\n');
        table
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, result: &CvAnalysisResult) -> Result<String> {
        let mut output = String::from("# CV Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Analyzed:** {} | **Processing Time:** {}ms | **Words:** {}\n\n",
                result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                result.processing_time_ms,
                result.word_count
            ));
        }

        output.push_str("## Candidate\n\n");
        let email = result.contact.email.as_deref().unwrap_or("-");
        let phone = result.contact.phone.as_deref().unwrap_or("-");
        output.push_str(&format!("- **Email:** {}\n", email));
        output.push_str(&format!("- **Phone:** {}\n", phone));
        output.push_str(&format!(
            "- **Experience:** {} years ({})\n",
            result.experience.total_years, result.experience.level
        ));
        if !result.experience.companies.is_empty() {
            output.push_str(&format!(
                "- **Companies:** {}\n",
                result.experience.companies.join(", ")
            ));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        for (category, skills) in &result.skills_by_category {
            let names: Vec<&str> = skills.iter().map(String::as_str).collect();
            output.push_str(&format!("- **{}:** {}\n", category, names.join(", ")));
        }
        output.push('\n');

        let score = &result.score;
        output.push_str("## Score\n\n");
        output.push_str(&format!(
            "**Total:** {:.1} {}\n\n",
            score.total_score,
            Self::markdown_level_badge(score.level)
        ));
        output.push_str("| Component | Score | Detail |\n|-----------|-------|--------|\n");
        output.push_str(&format!(
            "| Base | {:.1} | {} of {} required skills |\n",
            score.base_score, score.exact_matches, score.total_required
        ));
        output.push_str(&format!(
            "| Bonus | {:.1} | {} extra skills |\n\n",
            score.bonus_score, score.extra_skill_count
        ));

        let recs = &result.recommendations;
        output.push_str("## Gap Analysis\n\n");
        output.push_str(&format!("{}\n\n", recs.gap_analysis.summary));

        if !recs.gap_skills.is_empty() {
            output.push_str("### Missing Skills\n\n");
            output.push_str(&Self::recommendation_table(&recs.gap_skills));
        }
        if !recs.related_skills.is_empty() {
            output.push_str("### Related Skills\n\n");
            output.push_str(&Self::recommendation_table(&recs.related_skills));
        }

        if let Some(path) = &recs.learning_path {
            output.push_str(&format!("## Learning Path: {}\n\n", path.target_role));
            output.push_str(&format!(
                "{}/{} steps complete ({:.1}%), about {} weeks remaining.\n\n",
                path.completed_steps,
                path.total_steps,
                path.progress_percentage,
                path.estimated_weeks
            ));
            for progress in &path.steps {
                let check = if progress.is_completed { "x" } else { " " };
                output.push_str(&format!(
                    "- [{}] {}. **{}** {}\n",
                    check,
                    progress.step.sequence_order,
                    progress.step.skill_name,
                    progress.step.description
                ));
            }
            output.push('\n');
        }

        if !recs.role_suggestions.is_empty() {
            output.push_str("## Role Fit\n\n");
            output.push_str("| Role | Match | Skills |\n|------|-------|--------|\n");
            for suggestion in &recs.role_suggestions {
                output.push_str(&format!(
                    "| {} | {:.1}% | {}/{} |\n",
                    suggestion.role_name,
                    suggestion.match_percentage,
                    suggestion.matched_skills_count,
                    suggestion.total_required_skills
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, true, true)
    }

    pub fn generate_report(
        &self,
        result: &CvAnalysisResult,
        format: OutputFormat,
    ) -> Result<String> {
        let formatters: [&dyn OutputFormatter; 3] = [
            &self.console_formatter,
            &self.json_formatter,
            &self.markdown_formatter,
        ];
        formatters
            .into_iter()
            .find(|formatter| formatter.supports_format() == format)
            .ok_or_else(|| {
                CvAnalyzerError::OutputFormatting(format!("No formatter for {:?}", format))
            })?
            .format_report(result)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}
