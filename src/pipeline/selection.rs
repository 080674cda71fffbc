use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Maximum accepted upload size (10 MiB, matching the server-side cap)
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types the classifier accepts
pub const ACCEPTED_MIME_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

/// Reason a candidate file was refused at selection time
///
/// Rejection never touches pipeline state - the candidate is simply dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectionReason {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("File too large: {size_bytes} bytes")]
    TooLarge { size_bytes: u64 },
}

impl RejectionReason {
    /// Returns a user-friendly message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            RejectionReason::UnsupportedType(_) => {
                "Please choose a JPG, PNG, GIF, BMP or WebP image.".to_string()
            }
            RejectionReason::TooLarge { size_bytes } => {
                let mb = size_bytes / (1024 * 1024);
                format!("Image too large ({}MB). Maximum is 10MB.", mb)
            }
        }
    }
}

/// An unvalidated file picked by the user
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileCandidate {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a candidate from disk, deriving the MIME type from the extension
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_for_extension(
            path.extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default()
                .as_str(),
        );
        Ok(Self::new(name, mime_type, bytes))
    }
}

fn mime_for_extension(extension: &str) -> String {
    match extension.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Preview data derived from an accepted selection, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePreview {
    pub name: String,
    /// `data:<mime>;base64,...` URI of the file bytes
    pub data_uri: String,
    /// Human-readable size, e.g. "1.5 MB"
    pub formatted_size: String,
}

/// A validated selection. Selection is pure replacement - the file is never
/// mutated, a new valid candidate simply takes the slot.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Validate a candidate against the MIME allow-list and the size cap
    pub fn select(candidate: FileCandidate) -> Result<Self, RejectionReason> {
        let mime_type = candidate.mime_type.to_lowercase();
        if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(RejectionReason::UnsupportedType(candidate.mime_type));
        }

        let size_bytes = candidate.bytes.len() as u64;
        if size_bytes > MAX_FILE_SIZE_BYTES {
            return Err(RejectionReason::TooLarge { size_bytes });
        }

        Ok(Self {
            name: candidate.name,
            mime_type,
            size_bytes,
            bytes: candidate.bytes,
        })
    }

    /// Read and validate a file from disk in one step
    pub fn select_path(path: &Path) -> Result<Self, Error> {
        let candidate = FileCandidate::from_path(path)?;
        Ok(Self::select(candidate)?)
    }

    /// Displayable preview of the selected file
    pub fn preview(&self) -> FilePreview {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        FilePreview {
            name: self.name.clone(),
            data_uri: format!("data:{};base64,{}", self.mime_type, encoded),
            formatted_size: format_file_size(self.size_bytes),
        }
    }
}

/// Human-readable file size ("0 Bytes", "1 KB", "1.5 MB", ...)
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    // Two decimals with trailing zeros trimmed, e.g. 1.50 -> 1.5, 1.00 -> 1
    let mut formatted = format!("{:.2}", value);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }

    format!("{} {}", formatted, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(mime: &str, size: usize) -> FileCandidate {
        FileCandidate::new("tile.jpg", mime, vec![0u8; size])
    }

    #[test]
    fn test_rejects_mime_outside_allow_list() {
        let rejected = [
            "text/plain",
            "application/pdf",
            "image/tiff",
            "video/mp4",
            "application/octet-stream",
        ];

        for mime in rejected {
            let result = SelectedFile::select(candidate(mime, 16));
            assert_eq!(
                result.unwrap_err(),
                RejectionReason::UnsupportedType(mime.to_string()),
                "{} should be refused",
                mime
            );
        }
    }

    #[test]
    fn test_accepts_every_allow_listed_mime() {
        for mime in ACCEPTED_MIME_TYPES {
            let file = SelectedFile::select(candidate(mime, 16)).unwrap();
            assert_eq!(file.mime_type, mime);
        }
    }

    #[test]
    fn test_mime_check_is_case_insensitive() {
        let file = SelectedFile::select(candidate("IMAGE/PNG", 16)).unwrap();
        assert_eq!(file.mime_type, "image/png");
    }

    #[test]
    fn test_size_cap_is_exactly_ten_mebibytes() {
        let at_limit = SelectedFile::select(candidate("image/png", 10 * 1024 * 1024));
        assert!(at_limit.is_ok());

        let over_limit = SelectedFile::select(candidate("image/png", 10 * 1024 * 1024 + 1));
        assert_eq!(
            over_limit.unwrap_err(),
            RejectionReason::TooLarge {
                size_bytes: 10485761
            }
        );
    }

    #[test]
    fn test_selection_replaces_previous_file() {
        let first = SelectedFile::select(candidate("image/png", 8)).unwrap();
        let second =
            SelectedFile::select(FileCandidate::new("other.png", "image/png", vec![1u8; 4]))
                .unwrap();

        // Pure replacement - nothing of the first selection survives
        assert_eq!(first.size_bytes, 8);
        assert_eq!(second.name, "other.png");
        assert_eq!(second.size_bytes, 4);
    }

    #[test]
    fn test_preview_data_uri_carries_mime_and_payload() {
        let file =
            SelectedFile::select(FileCandidate::new("a.png", "image/png", vec![1, 2, 3])).unwrap();
        let preview = file.preview();

        assert!(preview.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(preview.name, "a.png");
        assert_eq!(preview.formatted_size, "3 Bytes");
    }

    #[test]
    fn test_format_file_size() {
        let cases = [
            (0u64, "0 Bytes"),
            (512, "512 Bytes"),
            (1024, "1 KB"),
            (1536, "1.5 KB"),
            (1024 * 1024, "1 MB"),
            (10 * 1024 * 1024, "10 MB"),
            (3 * 1024 * 1024 * 1024, "3 GB"),
        ];

        for (bytes, expected) in cases {
            assert_eq!(format_file_size(bytes), expected);
        }
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("JPG"), "image/jpeg");
        assert_eq!(mime_for_extension("jpeg"), "image/jpeg");
        assert_eq!(mime_for_extension("webp"), "image/webp");
        assert_eq!(mime_for_extension("exe"), "application/octet-stream");
    }
}
