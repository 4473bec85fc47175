/// Per-document context shared with stateful replacers.
///
/// Tracks the last line written to the output, which is not always the last
/// line read: dropped lines never update it, and a replacer that consumes a
/// blank line ahead of time bypasses it. Only the table of contents replacer
/// reads ahead.
#[derive(Debug, Default)]
pub struct ParserState {
    prev_line: Vec<u8>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_line(&self) -> &[u8] {
        &self.prev_line
    }

    pub fn record(&mut self, line: Vec<u8>) {
        self.prev_line = line;
    }

    /// Forgets the previous line, e.g. after a code block.
    pub fn reset(&mut self) {
        self.prev_line.clear();
    }
}
