use std::io::{BufWriter, Read, Write};

use tracing::{debug, debug_span};

use crate::config::ResolverOptions;
use crate::reader::LineReader;
use crate::replacer::{LineContext, ReplacerChain};
use crate::resolver::PathResolver;

use super::error::DocumentError;
use super::state::ParserState;

pub const CODE_FENCE: &[u8] = b"```";

const NEW_LINE: &[u8] = b"\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FenceState {
    Normal,
    InSnippet,
}

/// Converts one GitBook markdown document into a wiki page.
pub struct DocumentPipeline {
    resolver: PathResolver,
}

impl DocumentPipeline {
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            resolver: PathResolver::new(options),
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Reads `src` line by line and writes the rewritten document to `dest`.
    ///
    /// `filename` is the path relative to the source root; it selects the
    /// table of contents handling for `SUMMARY.md`. Code fences are copied
    /// verbatim.
    pub fn convert<R: Read, W: Write>(
        &self,
        filename: &str,
        src: R,
        dest: W,
    ) -> Result<(), DocumentError> {
        let _span = debug_span!("convert_document", file = %filename).entered();

        let mut out = BufWriter::new(dest);
        match self.convert_lines(filename, src, &mut out) {
            Ok(lines_written) => {
                out.flush()?;
                debug!(lines = lines_written, "Document converted");
                Ok(())
            }
            Err(e) => {
                // Drop what is still buffered instead of letting BufWriter flush it.
                let (_, _discarded) = out.into_parts();
                Err(e)
            }
        }
    }

    fn convert_lines<R: Read, W: Write>(
        &self,
        filename: &str,
        src: R,
        out: &mut BufWriter<W>,
    ) -> Result<usize, DocumentError> {
        let mut reader = LineReader::from_reader(src);
        let chain = ReplacerChain::for_document(filename, &self.resolver);
        let mut state = ParserState::new();
        let mut fence = FenceState::Normal;
        let mut lines_written = 0usize;

        while let Some(line) = reader.read_line()? {
            match fence {
                FenceState::InSnippet => {
                    write_line(out, &line)?;
                    lines_written += 1;
                    if line == CODE_FENCE {
                        fence = FenceState::Normal;
                        state.reset();
                    }
                    continue;
                }
                FenceState::Normal if line.starts_with(CODE_FENCE) => {
                    write_line(out, &line)?;
                    lines_written += 1;
                    fence = FenceState::InSnippet;
                    continue;
                }
                FenceState::Normal => {}
            }

            let mut ctx = LineContext::new(&state);
            let replaced = chain.apply(line, &mut ctx)?;
            if ctx.skip_next_blank_requested() {
                reader.skip_next_blank_line()?;
            }

            let Some(line) = replaced else {
                continue;
            };

            // Consecutive quotes need a blank line between them or markdown
            // renders them as a single quote.
            if line.first() == Some(&b'>') && state.previous_line().first() == Some(&b'>') {
                out.write_all(NEW_LINE)?;
            }
            write_line(out, &line)?;
            lines_written += 1;

            state.record(line);
        }

        if fence == FenceState::InSnippet {
            debug!("Document ended inside a code block");
        }

        Ok(lines_written)
    }
}

fn write_line<W: Write>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line)?;
    out.write_all(NEW_LINE)
}
