#![forbid(unsafe_code)]

//! File input holding one selected file's metadata.
//!
//! Direct selection and drag-and-drop are two delivery surfaces for the same
//! [`FileInput::attach`] action; the mode is recorded as a tag and does not
//! change what is stored.

use std::path::Path;

/// Metadata of a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileRef {
    /// File name (last path component, not the full path).
    pub name: String,
    /// Size in bytes, when known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub size: Option<u64>,
    /// MIME type, when known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub mime: Option<String>,
}

impl FileRef {
    /// Create a reference with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            mime: None,
        }
    }

    /// Create a reference named after the last component of a path.
    ///
    /// Returns `None` for paths without a file name (e.g. `..` or `/`).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        let mime = path
            .extension()
            .and_then(|ext| mime_for_extension(&ext.to_string_lossy()))
            .map(str::to_string);
        Some(Self {
            name,
            size: None,
            mime,
        })
    }

    /// Set the file size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "json" => Some("application/json"),
        "txt" => Some("text/plain"),
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// How a file reached the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// Chosen through the file dialog.
    #[default]
    Select,
    /// Dropped onto the input.
    DragDrop,
}

/// A single-file input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    file: Option<FileRef>,
    mode: Option<DeliveryMode>,
}

impl FileInput {
    /// Store a file, replacing any previous one.
    pub fn attach(&mut self, file: FileRef, mode: DeliveryMode) {
        self.file = Some(file);
        self.mode = Some(mode);
    }

    /// The attached file.
    #[must_use]
    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }

    /// Name of the attached file.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    /// How the attached file was delivered.
    #[must_use]
    pub fn delivery_mode(&self) -> Option<DeliveryMode> {
        self.mode
    }

    /// Remove the attached file.
    pub fn clear(&mut self) {
        self.file = None;
        self.mode = None;
    }
}
