//! Integration tests for the CV analyzer

use cv_analyzer::config::{Config, OutputFormat};
use cv_analyzer::extraction::ExperienceLevel;
use cv_analyzer::input::InputManager;
use cv_analyzer::matching::ScoreLevel;
use cv_analyzer::output::ReportGenerator;
use cv_analyzer::reference::ReferenceData;
use cv_analyzer::{AnalysisRequest, CvAnalyzer, CvAnalyzerError};
use std::path::Path;

fn default_analyzer() -> CvAnalyzer {
    CvAnalyzer::new(&Config::default(), ReferenceData::builtin().unwrap()).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_cv.txt"))
        .await
        .unwrap();

    assert!(text.contains("Nguyen Van A"));
    assert!(text.contains("Spring Boot"));
    assert!(text.contains("PostgreSQL"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_cv.md"))
        .await
        .unwrap();

    assert!(text.contains("Nguyen Van A"));
    assert!(text.contains("REST API"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_cv.txt");

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(CvAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(CvAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_full_pipeline_with_job_description() {
    let mut manager = InputManager::new();
    let cv_text = manager
        .extract_text(Path::new("tests/fixtures/sample_cv.txt"))
        .await
        .unwrap();
    let job_text = manager
        .extract_text(Path::new("tests/fixtures/job_description.txt"))
        .await
        .unwrap();

    let analyzer = default_analyzer();
    let required = analyzer.required_skills_from_text(&job_text);
    assert!(required.contains(&"kubernetes".to_string()));
    assert!(required.contains(&"kafka".to_string()));

    let request = AnalysisRequest::new(cv_text)
        .with_required_skills(&required)
        .with_target_role("Backend Developer");
    let result = analyzer.analyze(&request).unwrap();

    assert_eq!(result.contact.email.as_deref(), Some("nguyen.van.a@example.com"));
    assert_eq!(result.contact.phone.as_deref(), Some("+84 912 345 678"));
    assert_eq!(result.experience.total_years, 6);
    assert_eq!(result.experience.level, ExperienceLevel::Senior);
    assert_eq!(
        result.experience.companies,
        vec!["Fintech Solutions JSC", "Shopee Vietnam"]
    );

    assert_eq!(result.skill_match.missing, vec!["sql", "kubernetes", "kafka"]);
    assert_eq!(result.skill_match.match_count, 5);
    assert_eq!(result.score.extra_skill_count, 5);
    assert!((result.score.total_score - 72.5).abs() < 1e-9);
    assert_eq!(result.score.level, ScoreLevel::Good);

    let path = result.recommendations.learning_path.as_ref().unwrap();
    assert_eq!(path.completed_steps, 6);
    assert_eq!(path.next_step.as_ref().unwrap().skill_name, "sql");
    assert_eq!(path.estimated_weeks, 4);
    assert_eq!(result.recommendations.role_suggestions[0].role_name, "Backend Developer");

    let report = ReportGenerator::with_options(false, true, true, true)
        .generate_report(&result, OutputFormat::Markdown)
        .unwrap();
    assert!(report.contains("## Learning Path: Backend Developer"));
}

#[test]
fn test_custom_reference_data_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("reference.toml");
    std::fs::write(
        &data_path,
        r#"
[[categories]]
name = "Mainframe"
skills = [{ name = "COBOL" }, { name = "jcl", aliases = ["job control language"] }]

[relations]
cobol = ["db2", "jcl"]

[[roles]]
name = "Mainframe Developer"
steps = [
    { order = 1, skill = "cobol", core = true },
    { order = 2, skill = "jcl" },
    { order = 3, skill = "db2" },
]
"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.reference.data_path = Some(data_path);
    let analyzer = CvAnalyzer::from_config(&config).unwrap();

    let request = AnalysisRequest::new("Twenty years of COBOL and Java")
        .with_required_skills(&["cobol", "jcl"])
        .with_target_role("mainframe developer");
    let result = analyzer.analyze(&request).unwrap();

    // java is unknown to this taxonomy
    assert_eq!(result.skills, vec!["cobol"]);
    assert_eq!(result.skill_match.missing, vec!["jcl"]);
    let related: Vec<&str> = result
        .recommendations
        .related_skills
        .iter()
        .map(|r| r.skill_name.as_str())
        .collect();
    assert_eq!(related, vec!["db2", "jcl"]);
    assert_eq!(
        result.recommendations.learning_path.unwrap().next_step.unwrap().skill_name,
        "jcl"
    );
}

#[test]
fn test_config_file_round_trip_and_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.scoring.levels.excellent = 90.0;
    config.save_to(&path).unwrap();
    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.scoring.levels.excellent, 90.0);

    let mut broken = Config::default();
    broken.scoring.levels.good = 95.0;
    let result = CvAnalyzer::new(&broken, ReferenceData::builtin().unwrap());
    assert!(matches!(result, Err(CvAnalyzerError::Configuration(_))));
}

#[test]
fn test_unknown_role_is_reported() {
    let request = AnalysisRequest::new("Java developer").with_target_role("Chef");
    let err = default_analyzer().analyze(&request).err().unwrap();
    assert_eq!(err.to_string(), "No curriculum is defined for role 'Chef'");
}
