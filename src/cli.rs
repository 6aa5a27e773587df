//! CLI interface for the CV analyzer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-analyzer")]
#[command(about = "CV skill analysis, scoring and learning-path recommendations")]
#[command(long_about = "Extract contact details, experience and skills from a CV, \
score them against required skills, and recommend what to learn next for a target role")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a CV against required skills
    Analyze {
        /// Path to CV file (PDF, TXT, MD)
        #[arg(long)]
        cv: PathBuf,

        /// Comma-separated required skills
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,

        /// Job description whose skills are added to the required skills
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Target role for the learning path
        #[arg(short, long)]
        role: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// List roles, or show one role's curriculum
    Roles {
        /// Role name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show the skill taxonomy
    Skills,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed_extensions.contains(&ext.to_lowercase().as_str()) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_command() {
        let cli = Cli::try_parse_from([
            "cv-analyzer",
            "analyze",
            "--cv",
            "cv.pdf",
            "--skills",
            "Java,SQL,Docker",
            "--role",
            "Backend Developer",
            "-o",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { cv, skills, role, output, job, .. } => {
                assert_eq!(cv, PathBuf::from("cv.pdf"));
                assert_eq!(skills, vec!["Java", "SQL", "Docker"]);
                assert_eq!(role.as_deref(), Some("Backend Developer"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(job.is_none());
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cv-analyzer", "roles", "--verbose", "--config", "c.toml"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Roles { name: None }));
    }

    #[test]
    fn test_analyze_requires_cv() {
        assert!(Cli::try_parse_from(["cv-analyzer", "analyze", "--skills", "java"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }
}
