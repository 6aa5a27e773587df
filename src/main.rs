//! cv-analyzer: CV skill analysis and learning-path recommendations

use anyhow::Context;
use clap::Parser;
use cv_analyzer::cli::{self, Cli, Commands, ConfigAction};
use cv_analyzer::config::Config;
use cv_analyzer::error::{CvAnalyzerError, Result};
use cv_analyzer::input::InputManager;
use cv_analyzer::output::{save_report_to_file, ReportGenerator};
use cv_analyzer::reference::ReferenceData;
use cv_analyzer::{AnalysisRequest, CvAnalyzer};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Could not read configuration from {}", path.display())),
        None => Config::load().context("Could not load the default configuration"),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            cv,
            skills,
            job,
            role,
            output,
            save,
            detailed,
        } => {
            run_analysis(
                &config,
                AnalyzeArgs {
                    cv,
                    skills,
                    job,
                    role,
                    output,
                    save,
                    detailed,
                },
            )
            .await?;
        }

        Commands::Roles { name } => {
            let reference = ReferenceData::load(&config.reference)?;
            match name {
                Some(name) => {
                    let curriculum = reference.curricula.get(&name)?;
                    println!("{} ({} steps)\n", curriculum.name(), curriculum.steps().len());
                    for step in curriculum.steps() {
                        let core = if step.is_core { " [core]" } else { "" };
                        println!("  {}. {}{}", step.sequence_order, step.skill_name, core);
                        if !step.description.is_empty() {
                            println!("     {}", step.description);
                        }
                    }
                }
                None => {
                    println!("Available roles:\n");
                    for curriculum in reference.curricula.roles() {
                        println!(
                            "  • {} ({} steps)",
                            curriculum.name(),
                            curriculum.steps().len()
                        );
                    }
                }
            }
        }

        Commands::Skills => {
            let reference = ReferenceData::load(&config.reference)?;
            println!("Known skills ({}):", reference.taxonomy.skill_count());
            for category in reference.taxonomy.categories() {
                let names: Vec<&str> = category.skills.iter().map(|s| s.name.as_str()).collect();
                println!("\n{}:\n  {}", category.name, names.join(", "));
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    CvAnalyzerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("⚙️  Current Configuration\n");
                println!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

struct AnalyzeArgs {
    cv: PathBuf,
    skills: Vec<String>,
    job: Option<PathBuf>,
    role: Option<String>,
    output: Option<String>,
    save: Option<PathBuf>,
    detailed: bool,
}

async fn run_analysis(config: &Config, args: AnalyzeArgs) -> Result<()> {
    cli::validate_file_extension(&args.cv, &["pdf", "txt", "md"])
        .map_err(|e| CvAnalyzerError::InvalidInput(format!("CV file: {}", e)))?;
    if let Some(job) = &args.job {
        cli::validate_file_extension(job, &["pdf", "txt", "md"])
            .map_err(|e| CvAnalyzerError::InvalidInput(format!("Job description file: {}", e)))?;
    }

    let output_format = match &args.output {
        Some(output) => cli::parse_output_format(output).map_err(CvAnalyzerError::InvalidInput)?,
        None => config.output.format,
    };

    info!("Starting CV analysis for {}", args.cv.display());
    let analyzer = CvAnalyzer::from_config(config)?;
    let mut input_manager = InputManager::from_config(&config.input);

    let cv_text = input_manager.extract_text(&args.cv).await?;

    let mut required_skills = args.skills;
    if let Some(job) = &args.job {
        let job_text = input_manager.extract_text(job).await?;
        let from_job = analyzer.required_skills_from_text(&job_text);
        info!("Found {} skills in job description", from_job.len());
        required_skills.extend(from_job);
    }

    let mut request = AnalysisRequest::new(cv_text).with_required_skills(&required_skills);
    if let Some(role) = args.role {
        request = request.with_target_role(role);
    }

    let result = analyzer.analyze(&request)?;

    let mut output_config = config.output.clone();
    output_config.detailed |= args.detailed;
    output_config.color_output &= args.save.is_none();
    let generator = ReportGenerator::from_config(&output_config);
    let report = generator.generate_report(&result, output_format)?;

    match &args.save {
        Some(path) => {
            save_report_to_file(&report, path)?;
            println!("✅ Report saved to {}", path.display());
        }
        None => println!("{}", report),
    }

    Ok(())
}
