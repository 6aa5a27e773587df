//! Text extraction from various file formats

use crate::error::{CvAnalyzerError, Result};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        // pdf-extract is CPU bound and may panic on malformed input
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| CvAnalyzerError::DocumentDecode(format!("PDF decoding aborted: {}", e)))?
        .map_err(|e| {
            CvAnalyzerError::DocumentDecode(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            CvAnalyzerError::DocumentDecode(format!(
                "'{}' is not valid UTF-8: {}",
                path.display(),
                e
            ))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render Markdown to HTML and strip the markup, one non-empty line per block
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br />", "\n")
        .replace("</li>", "\n")
        .replace("</p>", "\n\n");

    // Tags go before entities are decoded, and `&amp;` is decoded last, so
    // escaped text is unescaped exactly once.
    let re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
    let clean_text = re
        .replace_all(&text, "")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    clean_text
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
