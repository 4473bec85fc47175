//! Naming rules that map GitBook source paths onto the flat wiki namespace.
//!
//! GitHub wikis have no directories: every page is addressed by its base name.
//! Output files stay nested for readability, but their base names carry the
//! flattened directory as a prefix so every page name is globally unique.

use crate::config::ResolverOptions;

/// Asset folder used by GitBook.
pub const GITBOOK_ASSETS_DIR: &str = ".gitbook/assets";
/// Asset folder in the generated wiki.
pub const WIKI_ASSETS_DIR: &str = "_assets";
pub const MARKDOWN_SUFFIX: &str = ".md";

const HOME_PAGE: &str = "Home.md";
const SIDEBAR_PAGE: &str = "_Sidebar.md";
pub(crate) const README_PAGE: &str = "README.md";
pub(crate) const SUMMARY_PAGE: &str = "SUMMARY.md";

/// A source path together with where it lands and how other pages link to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    pub source: String,
    pub destination: String,
    pub link_token: String,
}

#[derive(Debug, Clone, Default)]
pub struct PathResolver {
    options: ResolverOptions,
}

impl PathResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn map(&self, source: &str) -> PathMapping {
        PathMapping {
            source: source.to_string(),
            destination: self.resolve_output_path(source),
            link_token: self.resolve_link_token(source),
        }
    }

    /// Returns the destination path, relative to the output root.
    ///
    /// `../` segments are dropped rather than resolved, so `../view/view.md`
    /// and `view/view.md` land on the same page.
    pub fn resolve_output_path(&self, name: &str) -> String {
        if self.options.keep_links {
            return name.to_string();
        }

        let name = name.replace("../", "");
        let name = name.trim_start_matches("./");
        let (dir, base) = split_path(name);

        match base {
            README_PAGE => join_path(dir, HOME_PAGE),
            SUMMARY_PAGE => join_path(dir, SIDEBAR_PAGE),
            _ => {
                if let Some(rest) = name.strip_prefix(GITBOOK_ASSETS_DIR) {
                    return format!("{}{}", WIKI_ASSETS_DIR, rest);
                }

                // responses/sub/other.md -> responses/sub/responses-sub-other.md
                if dir.is_empty() {
                    return base.to_string();
                }
                let flattened = format!("{}-{}", dir.replace('/', "-"), base);
                join_path(dir, &flattened)
            }
        }
    }

    /// Returns the wiki page token for `name`, or the absolute remote link
    /// when `name` resolves into the wiki asset folder.
    pub fn resolve_link_token(&self, name: &str) -> String {
        let resolved = self.resolve_output_path(name);
        if self.options.keep_links {
            return resolved;
        }

        if resolved.starts_with(WIKI_ASSETS_DIR) {
            return join_url(&self.options.wiki_base, &resolved);
        }

        let (_, base) = split_path(&resolved);
        base.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(base).to_string()
    }
}

/// Returns true when `name` is the table of contents of a GitBook.
pub fn is_table_of_contents(name: &str) -> bool {
    split_path(name).1 == SUMMARY_PAGE
}

/// Splits a slash-separated path into directory and base name.
/// The directory is empty for root-level paths.
fn split_path(name: &str) -> (&str, &str) {
    let name = name.trim_end_matches('/');
    match name.rsplit_once('/') {
        Some((dir, base)) => (dir.trim_end_matches('/'), base),
        None => ("", name),
    }
}

fn join_path(dir: &str, base: &str) -> String {
    if dir.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", dir, base)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path.to_string();
    }
    format!("{}/{}", base, path.trim_start_matches('/'))
}
