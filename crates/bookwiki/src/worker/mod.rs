pub mod job;
pub mod runner;
pub mod scanner;

pub use job::{ConversionReport, Job, JobKind};
pub use runner::Converter;
pub use scanner::SourceScanner;
