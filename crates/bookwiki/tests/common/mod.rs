//! Test harness for end-to-end conversions.
//!
//! `TestHarness` owns a temporary directory with a `book/` source tree and a
//! `book.wiki/` destination, and runs the `Converter` between them.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use bookwiki::{ConversionReport, ConvertConfig, Converter};

pub const WIKI_BASE: &str = "/kataras/iris/wiki";

pub struct TestHarness {
    /// Keeps the temporary tree alive.
    temp_dir: TempDir,
    pub source_dir: PathBuf,
    pub wiki_dir: PathBuf,
    keep_links: bool,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source_dir = temp_dir.path().join("book");
        let wiki_dir = temp_dir.path().join("book.wiki");
        std::fs::create_dir_all(&source_dir).expect("Failed to create source directory");

        Self {
            temp_dir,
            source_dir,
            wiki_dir,
            keep_links: false,
        }
    }

    pub fn keeping_links(mut self) -> Self {
        self.keep_links = true;
        self
    }

    /// Writes a source file, creating parent directories.
    pub fn add_file(&self, relative: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.source_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write source file");
        self
    }

    pub fn config(&self) -> ConvertConfig {
        ConvertConfig {
            source_directory: self.source_dir.clone(),
            destination_directory: self.wiki_dir.clone(),
            wiki_base: WIKI_BASE.to_string(),
            verbose: false,
            keep_links: self.keep_links,
        }
    }

    pub fn run(&self) -> bookwiki::Result<ConversionReport> {
        Converter::from_config(Arc::new(self.config())).run()
    }

    pub fn wiki_path(&self, relative: &str) -> PathBuf {
        self.wiki_dir.join(relative)
    }

    pub fn read_wiki(&self, relative: &str) -> String {
        let path = self.wiki_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }
}
