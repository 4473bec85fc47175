use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::resolver::{PathResolver, MARKDOWN_SUFFIX};

use super::{LineContext, LineReplacer, ReplaceError, ReplacerOutcome};

// group 1: title, group 2: target
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\(([^()]+)\)").unwrap());

const HTTP_PREFIX: &[u8] = b"http";

/// Rewrites markdown links between book pages into wiki links.
///
/// - `[JSON](responses/json.md)` becomes `[[JSON|responses-json]]`
/// - `![img](../.gitbook/assets/a.png)` keeps its syntax, the target becomes
///   the absolute wiki asset link
/// - `http(s)` targets are left alone
pub struct LinkRewriter {
    resolver: PathResolver,
}

impl LinkRewriter {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub fn rewrite(&self, line: &[u8]) -> Result<Vec<u8>, ReplaceError> {
        if self.resolver.options().keep_links {
            return Ok(line.to_vec());
        }

        let mut result = Vec::with_capacity(line.len());
        let mut last = 0;

        for caps in RE_LINK.captures_iter(line) {
            let (Some(whole), Some(title), Some(target)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            let target_bytes = target.as_bytes();
            if target_bytes.starts_with(HTTP_PREFIX) {
                continue;
            }

            let token = self
                .resolver
                .resolve_link_token(&String::from_utf8_lossy(target_bytes));

            if !target_bytes.ends_with(MARKDOWN_SUFFIX.as_bytes()) {
                // Not a page, so it is an asset: only the target changes.
                result.extend_from_slice(&line[last..target.start()]);
                result.extend_from_slice(token.as_bytes());
                last = target.end();
                continue;
            }

            if title.as_bytes().is_empty() {
                return Err(ReplaceError::MissingTitle {
                    link: String::from_utf8_lossy(whole.as_bytes()).into_owned(),
                });
            }

            result.extend_from_slice(&line[last..whole.start()]);
            result.extend_from_slice(b"[[");
            result.extend_from_slice(title.as_bytes());
            result.push(b'|');
            result.extend_from_slice(token.as_bytes());
            result.extend_from_slice(b"]]");
            last = whole.end();
        }

        result.extend_from_slice(&line[last..]);
        Ok(result)
    }
}

impl LineReplacer for LinkRewriter {
    fn name(&self) -> &'static str {
        "unescape_links"
    }

    fn replace(
        &self,
        line: &[u8],
        _ctx: &mut LineContext<'_>,
    ) -> Result<ReplacerOutcome, ReplaceError> {
        self.rewrite(line).map(ReplacerOutcome::Pass)
    }
}
