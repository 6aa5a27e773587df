//! Input manager: routes documents to the right extractor, with a time limit
//! and an optional per-path cache

use crate::config::InputConfig;
use crate::error::{CvAnalyzerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
    timeout: Duration,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new()
            .with_cache(config.enable_cache)
            .with_timeout(Duration::from_secs(config.extraction_timeout_secs))
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Plain text of a PDF, Markdown or text document.
    ///
    /// Extraction that outlives the configured timeout fails with
    /// `ExtractionTimeout` instead of blocking the analysis.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.is_file() {
            return Err(CvAnalyzerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;
        info!("Extracting {:?} text from: {}", file_type, path.display());

        let extraction = async {
            match file_type {
                FileType::Pdf => PdfExtractor.extract(path).await,
                FileType::Text => PlainTextExtractor.extract(path).await,
                FileType::Markdown => MarkdownExtractor.extract(path).await,
                FileType::Unknown => Err(CvAnalyzerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                ))),
            }
        };

        let text = tokio::time::timeout(self.timeout, extraction)
            .await
            .map_err(|_| CvAnalyzerError::ExtractionTimeout(self.timeout.as_secs()))??;

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        if path.extension().is_none() {
            return Err(CvAnalyzerError::InvalidInput(format!(
                "File has no extension: {}",
                path.display()
            )));
        }
        Ok(FileType::from_path(path))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
