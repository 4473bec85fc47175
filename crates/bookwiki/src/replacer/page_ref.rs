use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

use crate::resolver::MARKDOWN_SUFFIX;

use super::{LineContext, LineReplacer, ReplaceError, ReplacerOutcome};

static RE_PAGE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\{% page-ref page="(.*?)" %\}"#).unwrap());

const REFERENCE_PREFIX: &str = "> Reference: ";

/// Replaces GitBook page-ref blocks with a quoted markdown link:
/// `{% page-ref page="../view/view.md" %}` becomes
/// `> Reference: [View](../view/view.md)`.
pub struct PageRefUnescaper;

impl LineReplacer for PageRefUnescaper {
    fn name(&self) -> &'static str {
        "unescape_page_refs"
    }

    fn replace(
        &self,
        line: &[u8],
        _ctx: &mut LineContext<'_>,
    ) -> Result<ReplacerOutcome, ReplaceError> {
        Ok(ReplacerOutcome::Pass(unescape_page_refs(line)))
    }
}

pub fn unescape_page_refs(line: &[u8]) -> Vec<u8> {
    RE_PAGE_REF
        .replace_all(line, |caps: &Captures| {
            let page = &caps[1];
            let title = page_title(page);
            [
                REFERENCE_PREFIX.as_bytes(),
                b"[",
                title.as_bytes(),
                b"](",
                page,
                b")",
            ]
            .concat()
        })
        .into_owned()
}

/// Derives a title from the last path segment: `dependency-injection.md`
/// becomes `Dependency-Injection`.
fn page_title(page: &[u8]) -> String {
    let name = match page.iter().rposition(|&b| b == b'/') {
        Some(idx) if idx + 1 < page.len() => &page[idx + 1..],
        _ => page,
    };
    let name = name
        .strip_suffix(MARKDOWN_SUFFIX.as_bytes())
        .unwrap_or(name);
    title_case(&String::from_utf8_lossy(name))
}

/// Upper-cases the first letter of every word.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = is_word_separator(c);
    }
    result
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}
