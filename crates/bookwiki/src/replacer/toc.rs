use crate::resolver::is_table_of_contents;

use super::{LineContext, LineReplacer, ReplaceError, ReplacerOutcome};

const BULLET: &[u8] = b"* ";
const INDENT: &[u8] = b"  ";

/// Turns `SUMMARY.md` into a wiki sidebar.
///
/// ```text
/// ## Compression            * Compression
///                     ->      * [Index](link.md)
/// * [Index](link.md)
/// ```
///
/// Top-level headings are dropped, second-level headings become root bullets
/// and bullets following a root bullet are nested under it. Blank lines are
/// removed so the sidebar has no separators between entries.
pub struct TableOfContents {
    active: bool,
}

impl TableOfContents {
    pub fn for_file(filename: &str) -> Self {
        Self {
            active: is_table_of_contents(filename),
        }
    }
}

impl LineReplacer for TableOfContents {
    fn name(&self) -> &'static str {
        "table_of_contents"
    }

    fn replace(
        &self,
        line: &[u8],
        ctx: &mut LineContext<'_>,
    ) -> Result<ReplacerOutcome, ReplaceError> {
        if !self.active {
            return Ok(ReplacerOutcome::NotResponsible);
        }

        let line = line.trim_ascii();
        if line.is_empty() {
            return Ok(ReplacerOutcome::SkipLine);
        }

        if line.len() < 4 {
            return Ok(ReplacerOutcome::Pass(line.to_vec()));
        }

        ctx.request_skip_next_blank();

        if line[0] == b'#' {
            if line[1] != b'#' {
                // "# Table of Contents" has no sidebar equivalent.
                return Ok(ReplacerOutcome::SkipLine);
            }

            let title = &line[2..];
            let title = title.strip_prefix(b" ").unwrap_or(title);
            return Ok(ReplacerOutcome::Pass([BULLET, title].concat()));
        }

        if line[0] == b'*' {
            let previous = ctx.previous_line();
            if previous.starts_with(BULLET) || previous.starts_with(&[INDENT, BULLET].concat()) {
                return Ok(ReplacerOutcome::Pass([INDENT, line].concat()));
            }
        }

        Ok(ReplacerOutcome::Pass(line.to_vec()))
    }
}
