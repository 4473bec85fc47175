use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::resolver::{PathResolver, MARKDOWN_SUFFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Markdown rewritten through the document pipeline.
    Transform,
    /// Any other file, copied byte for byte.
    Copy,
}

#[derive(Debug, Clone)]
pub struct Job {
    pub source_path: PathBuf,
    /// Slash-separated path relative to the source root.
    pub relative_path: String,
    /// Slash-separated path relative to the destination root.
    pub output_path: String,
    pub kind: JobKind,
}

impl Job {
    pub fn new(source_path: PathBuf, relative_path: String, resolver: &PathResolver) -> Self {
        let output_path = resolver.resolve_output_path(&relative_path);
        let kind = if output_path.ends_with(MARKDOWN_SUFFIX) {
            JobKind::Transform
        } else {
            JobKind::Copy
        };

        Self {
            source_path,
            relative_path,
            output_path,
            kind,
        }
    }

    /// True when the destination name differs from the source name.
    pub fn is_renamed(&self) -> bool {
        Path::new(&self.relative_path).file_name() != Path::new(&self.output_path).file_name()
    }
}

/// Totals for one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub files_parsed: usize,
    pub files_copied: usize,
    pub elapsed: Duration,
}

impl ConversionReport {
    pub fn record(&mut self, kind: JobKind) {
        match kind {
            JobKind::Transform => self.files_parsed += 1,
            JobKind::Copy => self.files_copied += 1,
        }
    }
}
