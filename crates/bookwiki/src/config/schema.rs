use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,
    #[serde(default = "default_destination_directory")]
    pub destination_directory: PathBuf,
    /// Remote wiki base used to build absolute asset links, e.g. `/owner/repo/wiki`.
    #[serde(default = "default_wiki_base")]
    pub wiki_base: String,
    #[serde(default)]
    pub verbose: bool,
    /// Keep file names and links as they are.
    #[serde(default)]
    pub keep_links: bool,
}

fn default_source_directory() -> PathBuf {
    PathBuf::from("./book")
}

fn default_destination_directory() -> PathBuf {
    PathBuf::from("./book.wiki")
}

fn default_wiki_base() -> String {
    "/wiki".to_string()
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            source_directory: default_source_directory(),
            destination_directory: default_destination_directory(),
            wiki_base: default_wiki_base(),
            verbose: false,
            keep_links: false,
        }
    }
}

impl ConvertConfig {
    pub fn resolver_options(&self) -> ResolverOptions {
        ResolverOptions {
            keep_links: self.keep_links,
            wiki_base: self.wiki_base.clone(),
        }
    }
}

/// The conversion toggles that affect naming and link rewriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    pub keep_links: bool,
    pub wiki_base: String,
}

impl ResolverOptions {
    pub fn new(wiki_base: impl Into<String>) -> Self {
        Self {
            keep_links: false,
            wiki_base: wiki_base.into(),
        }
    }

    pub fn keeping_links(mut self) -> Self {
        self.keep_links = true;
        self
    }
}
