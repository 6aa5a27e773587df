//! CV analysis library: skill extraction, matching, scoring and
//! learning-path recommendations

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod input;
pub mod matching;
pub mod normalize;
pub mod output;
pub mod recommendation;
pub mod reference;

pub use analyzer::{AnalysisRequest, CvAnalysisResult, CvAnalyzer};
pub use config::Config;
pub use error::{CvAnalyzerError, Result};
