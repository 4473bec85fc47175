use std::path::PathBuf;
use thiserror::Error;

use crate::pipeline::DocumentError;

#[derive(Error, Debug)]
pub enum BookwikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to resolve source directory '{path}': {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory scan failed for '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Path '{path}' is not inside the source directory")]
    StripPrefix { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file '{path}': {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}")]
    CopyFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to open source '{path}': {source}")]
    OpenSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to convert '{path}': {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

pub type Result<T> = std::result::Result<T, BookwikiError>;
