//! Line-level rewriting rules applied to markdown outside code fences.
//!
//! Each rule looks at one logical line and reports a [`ReplacerOutcome`].
//! Rules run in a fixed order; the order matters because page references
//! produce links that the link rewriter then turns into wiki links.

pub mod links;
pub mod page_ref;
pub mod parens;
pub mod toc;

use thiserror::Error;

use crate::pipeline::ParserState;
use crate::resolver::PathResolver;

pub use links::LinkRewriter;
pub use page_ref::PageRefUnescaper;
pub use parens::{wrap, ParenUnescaper};
pub use toc::TableOfContents;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacerOutcome {
    /// Continue the chain with this line.
    Pass(Vec<u8>),
    /// The rule does not apply; the chain continues with the unchanged line.
    NotResponsible,
    /// Stop the chain and emit nothing for this line.
    SkipLine,
}

#[derive(Error, Debug)]
pub enum ReplaceError {
    #[error("Title is missing from: {link}")]
    MissingTitle { link: String },
}

/// What a rule may see and request while handling one line.
pub struct LineContext<'a> {
    state: &'a ParserState,
    skip_next_blank: bool,
}

impl<'a> LineContext<'a> {
    pub fn new(state: &'a ParserState) -> Self {
        Self {
            state,
            skip_next_blank: false,
        }
    }

    /// The last line written to the output.
    pub fn previous_line(&self) -> &[u8] {
        self.state.previous_line()
    }

    /// Asks the pipeline to drop the next input line if it is blank.
    /// Repeated requests for the same line collapse into one.
    pub fn request_skip_next_blank(&mut self) {
        self.skip_next_blank = true;
    }

    pub fn skip_next_blank_requested(&self) -> bool {
        self.skip_next_blank
    }
}

pub trait LineReplacer: Send + Sync {
    fn name(&self) -> &'static str;
    fn replace(
        &self,
        line: &[u8],
        ctx: &mut LineContext<'_>,
    ) -> Result<ReplacerOutcome, ReplaceError>;
}

pub struct ReplacerChain {
    replacers: Vec<Box<dyn LineReplacer>>,
}

impl ReplacerChain {
    /// Builds the chain used for the document at `filename` (relative to the
    /// source root).
    pub fn for_document(filename: &str, resolver: &PathResolver) -> Self {
        Self::new(vec![
            Box::new(TableOfContents::for_file(filename)),
            Box::new(ParenUnescaper),
            Box::new(PageRefUnescaper),
            Box::new(LinkRewriter::new(resolver.clone())),
        ])
    }

    pub fn new(replacers: Vec<Box<dyn LineReplacer>>) -> Self {
        Self { replacers }
    }

    /// Threads `line` through every rule. Returns `None` when a rule asked
    /// for the line to be dropped.
    pub fn apply(
        &self,
        mut line: Vec<u8>,
        ctx: &mut LineContext<'_>,
    ) -> Result<Option<Vec<u8>>, ReplaceError> {
        for replacer in &self.replacers {
            match replacer.replace(&line, ctx)? {
                ReplacerOutcome::Pass(replaced) => line = replaced,
                ReplacerOutcome::NotResponsible => continue,
                ReplacerOutcome::SkipLine => {
                    tracing::trace!(replacer = replacer.name(), "line dropped");
                    return Ok(None);
                }
            }
        }
        Ok(Some(line))
    }
}
