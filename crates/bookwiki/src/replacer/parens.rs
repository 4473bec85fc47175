use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

use super::{LineContext, LineReplacer, ReplaceError, ReplacerOutcome};

static RE_ESCAPED_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\((.*?)\\\)").unwrap());

/// Rewrites GitBook's escaped `\(text\)` back into `(text)`.
pub struct ParenUnescaper;

impl LineReplacer for ParenUnescaper {
    fn name(&self) -> &'static str {
        "unescape_parens"
    }

    fn replace(
        &self,
        line: &[u8],
        _ctx: &mut LineContext<'_>,
    ) -> Result<ReplacerOutcome, ReplaceError> {
        Ok(ReplacerOutcome::Pass(unescape_parens(line)))
    }
}

pub fn unescape_parens(line: &[u8]) -> Vec<u8> {
    RE_ESCAPED_PARENS
        .replace_all(line, |caps: &Captures| wrap(&caps[1], b"(", b")"))
        .into_owned()
}

/// Returns `start + src + end`.
pub fn wrap(src: &[u8], start: &[u8], end: &[u8]) -> Vec<u8> {
    [start, src, end].concat()
}
