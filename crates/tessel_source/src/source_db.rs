//! Loaded netlist files and line/column resolution.

use crate::span::{FileId, Span};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A netlist file with precomputed line starts.
pub struct SourceFile {
    /// Identifier within the owning [`SourceDb`].
    pub id: FileId,
    /// Path on disk, or a synthetic name for in-memory sources.
    pub path: PathBuf,
    /// Full file text.
    pub content: String,
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a source file and indexes its line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                content
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-based (line, column).
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line_idx as u32 + 1, col)
    }

    /// Returns the full text of the line containing `byte_offset`, without
    /// its terminator.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let offset = byte_offset as usize;
        let start = self.content[..offset].rfind('\n').map_or(0, |p| p + 1);
        let end = self.content[offset..]
            .find('\n')
            .map_or(self.content.len(), |p| offset + p);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Returns the text between two byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }
}

/// A span resolved to 1-based line/column coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Path of the file.
    pub file_path: PathBuf,
    /// Starting line.
    pub line: u32,
    /// Starting column.
    pub col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path.display(), self.line, self.col)
    }
}

/// Owns every netlist file read during a run.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds an in-memory source; `name` is shown in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves the start of `span` to a printable location.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let file = self.get_file(span.file);
        let (line, col) = file.line_col(span.start);
        ResolvedSpan {
            file_path: file.path.clone(),
            line,
            col,
        }
    }

    /// Returns the text covered by `span`.
    pub fn snippet(&self, span: Span) -> &str {
        self.get_file(span.file).snippet(span.start, span.end)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
