use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Writes the generated wiki tree under a destination root.
pub struct OutputStorage {
    output_directory: PathBuf,
}

impl OutputStorage {
    pub fn new<P: AsRef<Path>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.as_ref().to_path_buf(),
        }
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn ensure_root(&self) -> Result<(), StorageError> {
        self.ensure_directory(&self.output_directory)
    }

    /// Creates (or truncates) the file at `relative_path`, creating parent
    /// directories as needed.
    pub fn create_file(&self, relative_path: &str) -> Result<(PathBuf, File), StorageError> {
        let path = self.output_directory.join(relative_path);
        if let Some(parent) = path.parent() {
            self.ensure_directory(parent)?;
        }

        let file = File::create(&path).map_err(|e| StorageError::CreateFile {
            path: path.clone(),
            source: e,
        })?;

        Ok((path, file))
    }

    /// Copies `reader` byte for byte into `relative_path`.
    pub fn copy_verbatim<R: Read>(
        &self,
        mut reader: R,
        source_path: &Path,
        relative_path: &str,
    ) -> Result<u64, StorageError> {
        let (path, mut file) = self.create_file(relative_path)?;
        std::io::copy(&mut reader, &mut file).map_err(|e| StorageError::CopyFile {
            from: source_path.to_path_buf(),
            to: path,
            source: e,
        })
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), StorageError> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| StorageError::CreateDirectory {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
        Ok(())
    }
}
