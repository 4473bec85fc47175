pub mod config;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod replacer;
pub mod resolver;
pub mod storage;
pub mod worker;

pub use config::{load_config, ConvertConfig, ResolverOptions};
pub use error::{BookwikiError, ConfigError, ConvertError, Result, ScanError, StorageError};
pub use pipeline::{DocumentError, DocumentPipeline, ParserState, ReplaceError};
pub use reader::LineReader;
pub use resolver::PathResolver;
pub use worker::{ConversionReport, Converter, Job, JobKind, SourceScanner};
