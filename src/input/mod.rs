//! Upstream document-text extraction
//! Turns CV and job-description files into the plain text the analyzer consumes

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
