//! Error handling for the CV analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CvAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document decoding error: {0}")]
    DocumentDecode(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction timed out after {0}s")]
    ExtractionTimeout(u64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No curriculum is defined for role '{0}'")]
    UnknownRole(String),

    #[error("Invalid curriculum for role '{role}': {reason}")]
    InvalidCurriculum { role: String, reason: String },

    #[error("Skill matcher error: {0}")]
    Matcher(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CvAnalyzerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CvAnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        CvAnalyzerError::AnalysisFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CvAnalyzerError {
    fn from(err: toml::de::Error) -> Self {
        CvAnalyzerError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_role_message_names_role() {
        let err = CvAnalyzerError::UnknownRole("Data Engineer".to_string());
        assert_eq!(err.to_string(), "No curriculum is defined for role 'Data Engineer'");
    }

    #[test]
    fn test_invalid_curriculum_message() {
        let err = CvAnalyzerError::InvalidCurriculum {
            role: "Backend Developer".to_string(),
            reason: "duplicate sequence order 2".to_string(),
        };
        assert!(err.to_string().contains("Backend Developer"));
        assert!(err.to_string().contains("duplicate sequence order 2"));
    }
}
