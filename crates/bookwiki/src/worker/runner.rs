use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, info_span};

use crate::config::ConvertConfig;
use crate::error::{ConvertError, Result};
use crate::pipeline::DocumentPipeline;
use crate::storage::OutputStorage;

use super::job::{ConversionReport, Job, JobKind};
use super::scanner::SourceScanner;

/// Converts a whole GitBook tree, one file at a time.
pub struct Converter {
    config: Arc<ConvertConfig>,
    scanner: SourceScanner,
    pipeline: DocumentPipeline,
    storage: OutputStorage,
}

impl Converter {
    pub fn from_config(config: Arc<ConvertConfig>) -> Self {
        let pipeline = DocumentPipeline::new(config.resolver_options());
        let scanner = SourceScanner::new(&config.source_directory, pipeline.resolver().clone())
            .excluding(&config.destination_directory);
        let storage = OutputStorage::new(&config.destination_directory);

        Self {
            config,
            scanner,
            pipeline,
            storage,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Runs the conversion. Stops at the first file that fails.
    pub fn run(&self) -> Result<ConversionReport> {
        let _span = info_span!("convert_tree",
            source = %self.config.source_directory.display(),
            destination = %self.config.destination_directory.display(),
        )
        .entered();
        let start = Instant::now();

        self.storage.ensure_root().map_err(ConvertError::from)?;
        let jobs = self.scanner.scan()?;

        let mut report = ConversionReport::default();
        for job in &jobs {
            self.run_job(job)?;
            report.record(job.kind);
        }
        report.elapsed = start.elapsed();

        info!("Total files parsed: {}", report.files_parsed);
        info!("Total files copied: {}", report.files_copied);
        info!("Time taken to complete: {:?}", report.elapsed);
        Ok(report)
    }

    /// Converts or copies a single file into the destination tree.
    pub fn run_job(&self, job: &Job) -> std::result::Result<(), ConvertError> {
        let source = File::open(&job.source_path).map_err(|e| ConvertError::OpenSource {
            path: job.source_path.clone(),
            source: e,
        })?;

        match job.kind {
            JobKind::Transform => {
                if job.is_renamed() {
                    debug!("Parse <{}> as <{}>", job.relative_path, job.output_path);
                } else {
                    debug!("Parse <{}>", job.relative_path);
                }

                let (_, output) = self.storage.create_file(&job.output_path)?;
                self.pipeline
                    .convert(&job.relative_path, source, output)
                    .map_err(|e| ConvertError::Document {
                        path: job.source_path.clone(),
                        source: e,
                    })?;
            }
            JobKind::Copy => {
                debug!("Copy <{}> to <{}>", job.relative_path, job.output_path);
                self.storage
                    .copy_verbatim(source, &job.source_path, &job.output_path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookwikiError;
    use tempfile::TempDir;

    fn config(temp_dir: &TempDir) -> ConvertConfig {
        ConvertConfig {
            source_directory: temp_dir.path().join("book"),
            destination_directory: temp_dir.path().join("book.wiki"),
            wiki_base: "/me/book/wiki".to_string(),
            ..ConvertConfig::default()
        }
    }

    #[test]
    fn test_run_counts_parsed_and_copied() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        let source = &config.source_directory;
        std::fs::create_dir_all(source.join("responses")).unwrap();
        std::fs::write(source.join("README.md"), b"[JSON](responses/json.md)\n").unwrap();
        std::fs::write(source.join("responses/json.md"), b"# JSON\n").unwrap();
        std::fs::write(source.join("logo.svg"), b"<svg/>").unwrap();

        let converter = Converter::from_config(Arc::new(config));
        let report = converter.run().unwrap();

        assert_eq!(report.files_parsed, 2);
        assert_eq!(report.files_copied, 1);

        let wiki = &converter.config().destination_directory;
        assert_eq!(
            std::fs::read_to_string(wiki.join("Home.md")).unwrap(),
            "[[JSON|responses-json]]\n"
        );
        assert!(wiki.join("responses/responses-json.md").exists());
        assert_eq!(std::fs::read(wiki.join("logo.svg")).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_run_stops_on_missing_title() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        std::fs::create_dir_all(&config.source_directory).unwrap();
        std::fs::write(config.source_directory.join("a.md"), b"[](b.md)\n").unwrap();
        std::fs::write(config.source_directory.join("b.md"), b"fine\n").unwrap();

        let converter = Converter::from_config(Arc::new(config));
        let err = converter.run().unwrap_err();

        assert!(matches!(
            err,
            BookwikiError::Convert(ConvertError::Document { .. })
        ));
        assert!(!converter
            .config()
            .destination_directory
            .join("b.md")
            .exists());
    }
}
