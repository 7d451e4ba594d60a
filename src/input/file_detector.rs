//! File type detection

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub const SUPPORTED_EXTENSIONS: [&'static str; 4] = ["pdf", "txt", "md", "markdown"];

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    /// Advice for keeping a resume of this type machine-readable.
    pub fn format_recommendations(&self) -> Vec<String> {
        let tips: &[&str] = match self {
            FileType::Pdf => &[
                "Ensure PDF is searchable (not scanned)",
                "Use standard fonts that render well in PDF",
                "Keep file size under 2MB",
                "Avoid complex layouts that might break ATS parsing",
            ],
            FileType::Text | FileType::Markdown => &[
                "Use clear section separators",
                "Maintain consistent indentation",
                "Use standard section headers",
                "Avoid special characters",
            ],
            FileType::Unknown => &[
                "Use standard file formats (PDF or TXT)",
                "Keep formatting simple and consistent",
                "Use clear section headers",
            ],
        };
        tips.iter().map(|tip| tip.to_string()).collect()
    }
}
