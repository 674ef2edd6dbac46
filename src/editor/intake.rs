use std::{
    fmt,
    fs,
    io::Read,
    path::{Path, PathBuf},
    sync::Arc,
};

use percent_encoding::percent_decode_str;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{
    error::IntakeError,
    preview::{PreviewHandle, PreviewStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest image that gets a preview. Bigger images are listed by name only.
pub const DEFAULT_PREVIEW_LIMIT: u64 = 8 * 1024 * 1024;

/// Where a file's contents live. Files from disk stay on disk until a preview needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A dropped or selected file: its name, mime type, size and a handle to its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub source: FileSource,
}

impl RawFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime: mime.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Stats the file without reading it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IntakeError> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).map_err(|source| IntakeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(IntakeError::NotAFile(path.to_path_buf()));
        }
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            name,
            mime: mime_for_path(path).to_string(),
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Contents already held in memory. Files from disk report `None`.
    pub fn loaded_bytes(&self) -> Option<&Arc<[u8]>> {
        match &self.source {
            FileSource::Memory(bytes) => Some(bytes),
            FileSource::Path(_) => None,
        }
    }

    /// Loads the contents for a preview, refusing anything above `limit` bytes.
    fn preview_bytes(&self, limit: u64) -> Result<Option<Arc<[u8]>>, IntakeError> {
        if self.size > limit {
            return Ok(None);
        }
        match &self.source {
            FileSource::Memory(bytes) => Ok(Some(Arc::clone(bytes))),
            FileSource::Path(path) => {
                let mut bytes = Vec::new();
                fs::File::open(path)
                    .and_then(|file| file.take(limit.saturating_add(1)).read_to_end(&mut bytes))
                    .map_err(|source| IntakeError::Read {
                        path: path.clone(),
                        source,
                    })?;
                if bytes.len() as u64 > limit {
                    return Ok(None);
                }
                Ok(Some(bytes.into()))
            }
        }
    }
}

#[derive(Debug)]
pub struct AttachedFile {
    pub id: FileId,
    pub raw: RawFile,
    preview: Option<PreviewHandle>,
}

impl AttachedFile {
    /// Renderable preview source; only image files carry one.
    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewHandle::url)
    }
}

/// Attached files plus the preview resources they own.
#[derive(Debug)]
pub struct FileIntake {
    entries: Vec<AttachedFile>,
    previews: PreviewStore,
    preview_limit: u64,
}

impl Default for FileIntake {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            previews: PreviewStore::default(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
        }
    }
}

impl FileIntake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preview_limit(mut self, limit: u64) -> Self {
        self.preview_limit = limit;
        self
    }

    /// Appends one entry per file, keeping existing entries. Images within the preview
    /// limit get a preview; everything else is listed by name.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = RawFile>) -> Vec<FileId> {
        let mut added = Vec::new();
        for raw in files {
            let preview = if raw.is_image() {
                self.load_preview(&raw)
            } else {
                None
            };
            let id = FileId::new();
            debug!(%id, name = %raw.name, mime = %raw.mime, "attached file");
            self.entries.push(AttachedFile { id, raw, preview });
            added.push(id);
        }
        added
    }

    /// Removes the entry and releases its preview. Unknown ids are ignored.
    pub fn remove_file(&mut self, id: FileId) -> bool {
        let Some(position) = self.entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        let entry = self.entries.remove(position);
        debug!(%id, name = %entry.raw.name, "removed file");
        if let Some(handle) = entry.preview {
            self.previews.release(handle);
        }
        true
    }

    fn load_preview(&mut self, raw: &RawFile) -> Option<PreviewHandle> {
        match raw.preview_bytes(self.preview_limit) {
            Ok(Some(bytes)) => Some(self.previews.allocate(bytes)),
            Ok(None) => {
                debug!(name = %raw.name, size = raw.size, "image too large for a preview");
                None
            }
            Err(err) => {
                warn!(name = %raw.name, error = %err, "could not load preview");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            if let Some(handle) = entry.preview {
                self.previews.release(handle);
            }
        }
    }

    pub fn entries(&self) -> &[AttachedFile] {
        &self.entries
    }

    pub fn get(&self, id: FileId) -> Option<&AttachedFile> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }
}

impl Drop for FileIntake {
    fn drop(&mut self) {
        self.clear();
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Splits drop-zone input into paths.
///
/// Terminals paste dragged files as paths, quoted or with escaped spaces, and some paste
/// `file://` URIs. Paths are separated by unquoted whitespace.
pub fn parse_dropped_paths(input: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match (quote, ch) {
            (Some(open), ch) if ch == open => quote = None,
            (Some(_), ch) => current.push(ch),
            (None, '"' | '\'') => quote = Some(ch),
            (None, '\\') => match chars.peek() {
                Some(next) if next.is_whitespace() || matches!(next, '"' | '\'' | '\\') => {
                    current.push(*next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            (None, ch) if ch.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            (None, ch) => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens.into_iter().map(|token| decode_file_uri(&token)).collect()
}

fn decode_file_uri(token: &str) -> PathBuf {
    let Some(rest) = token.strip_prefix("file://") else {
        return PathBuf::from(token);
    };
    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    PathBuf::from(percent_decode_str(rest).decode_utf8_lossy().into_owned())
}
