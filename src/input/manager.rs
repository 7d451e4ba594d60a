//! Input manager for handling different file types

use crate::error::{AtsError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Text of a loaded input file.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub file_type: FileType,
    pub text: String,
}

pub struct InputManager {
    cache: HashMap<PathBuf, LoadedDocument>,
    enable_cache: bool,
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
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        Ok(self.load(path).await?.text)
    }

    pub async fn load(&mut self, path: &Path) -> Result<LoadedDocument> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(AtsError::InvalidInput(format!("File does not exist: {}", path.display())));
        }

        let file_type = FileType::from_path(path);
        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(AtsError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (supported: {})",
                    path.display(),
                    FileType::SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
        };

        let document = LoadedDocument {
            path: path.to_path_buf(),
            file_type,
            text,
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), document.clone());
        }

        Ok(document)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
