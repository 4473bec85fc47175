use std::path::{Path, PathBuf};

use log::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::ScanError;
use crate::resolver::PathResolver;
use crate::worker::job::Job;

const GIT_DIRECTORY: &str = ".git";

/// Lists every regular file of a GitBook source tree, in a stable order.
pub struct SourceScanner {
    source_directory: PathBuf,
    excluded_directory: Option<PathBuf>,
    resolver: PathResolver,
}

impl SourceScanner {
    pub fn new<P: AsRef<Path>>(source_directory: P, resolver: PathResolver) -> Self {
        Self {
            source_directory: source_directory.as_ref().to_path_buf(),
            excluded_directory: None,
            resolver,
        }
    }

    /// Skips `directory` while walking, for destinations nested in the source.
    pub fn excluding<P: AsRef<Path>>(mut self, directory: P) -> Self {
        self.excluded_directory = Some(directory.as_ref().to_path_buf());
        self
    }

    /// Walks the source tree. Paths are canonicalized first so the excluded
    /// directory matches however either side was spelled.
    pub fn scan(&self) -> Result<Vec<Job>, ScanError> {
        let root = std::fs::canonicalize(&self.source_directory).map_err(|e| {
            ScanError::Resolve {
                path: self.source_directory.clone(),
                source: e,
            }
        })?;
        // A destination that does not exist yet cannot be inside the walk.
        let excluded = self
            .excluded_directory
            .as_deref()
            .and_then(|dir| std::fs::canonicalize(dir).ok());

        let mut jobs = Vec::new();

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| should_descend(entry, excluded.as_deref()));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::Walk {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone()),
                source: e,
            })?;

            // Directories, symlinks and other special files are not converted.
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&root)
                .map_err(|_| ScanError::StripPrefix {
                    path: entry.path().to_path_buf(),
                })?;

            jobs.push(Job::new(
                entry.path().to_path_buf(),
                to_slash(relative),
                &self.resolver,
            ));
        }

        info!(
            "Scanned {} files in {}",
            jobs.len(),
            self.source_directory.display()
        );
        Ok(jobs)
    }

}

fn should_descend(entry: &DirEntry, excluded: Option<&Path>) -> bool {
    if !entry.file_type().is_dir() {
        return true;
    }

    if entry.file_name() == GIT_DIRECTORY {
        debug!("Skip <{}> directory", GIT_DIRECTORY);
        return false;
    }

    if excluded.is_some_and(|excluded| entry.path() == excluded) {
        debug!("Skip destination directory <{}>", entry.path().display());
        return false;
    }

    true
}

fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
