use std::path::Path;

use crate::ApiError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file to upload: its name, optional MIME type and contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    filename: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl FileUpload {
    /// The name is reduced to its final path component.
    pub fn new(filename: impl AsRef<str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: sanitize_filename(filename.as_ref()),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let filename = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        let upload = Self::new(filename, bytes);
        Ok(match guess_content_type(path) {
            Some(content_type) => upload.with_content_type(content_type),
            None => upload,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_parts(self) -> (String, String, Vec<u8>) {
        let content_type = self.content_type().to_string();
        (self.filename, content_type, self.bytes)
    }
}

/// Keep only the final component of a path-like name, accepting both `/` and
/// `\` as separators.
pub fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or("")
        .trim();
    match last {
        "" | "." | ".." => "upload".to_string(),
        other => other.to_string(),
    }
}

fn guess_content_type(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_keeps_last_component() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(r"C:\Users\ana\notes.txt"), "notes.txt");
        assert_eq!(sanitize_filename("dir/"), "dir");
        assert_eq!(sanitize_filename(".."), "upload");
        assert_eq!(sanitize_filename(""), "upload");
    }

    #[test]
    fn content_type_defaults_to_octet_stream() {
        let upload = FileUpload::new("blob.bin", vec![1, 2, 3]);
        assert_eq!(upload.content_type(), "application/octet-stream");
        let typed = upload.with_content_type("text/plain");
        assert_eq!(typed.content_type(), "text/plain");
    }

    #[tokio::test]
    async fn from_path_reads_bytes_and_guesses_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Notes.TXT");
        std::fs::write(&path, b"hallo").unwrap();

        let upload = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.filename(), "Notes.TXT");
        assert_eq!(upload.content_type(), "text/plain");
        assert_eq!(upload.bytes(), b"hallo");
    }

    #[tokio::test]
    async fn from_path_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let error = FileUpload::from_path(dir.path().join("missing.pdf")).await.unwrap_err();
        assert!(matches!(error, ApiError::Io { .. }));
        assert!(error.to_string().contains("missing.pdf"));
    }
}
