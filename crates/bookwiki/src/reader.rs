use std::io::{self, BufRead, BufReader, Read};

/// Pulls logical lines out of a byte stream.
///
/// A logical line is everything up to the next `\n` (or `\r\n`), no matter
/// how many reads of the underlying stream it takes to collect it. The
/// terminator is not part of the returned line. A trailing fragment without a
/// terminator is returned as a complete line.
///
/// The reader keeps a single line of lookahead so callers can ask whether the
/// next line is blank without losing their position.
pub struct LineReader<R> {
    inner: R,
    peeked: Option<Vec<u8>>,
}

impl<R: Read> LineReader<BufReader<R>> {
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            peeked: None,
        }
    }

    /// Returns the next logical line, or `None` once the stream is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        if let Some(line) = self.peeked.take() {
            return Ok(Some(line));
        }
        self.read_physical()
    }

    /// Reports whether the next line exists and is empty. Does not advance.
    pub fn peek_is_blank(&mut self) -> io::Result<bool> {
        if self.peeked.is_none() {
            self.peeked = self.read_physical()?;
        }
        Ok(self.peeked.as_ref().is_some_and(|line| line.is_empty()))
    }

    /// Consumes the next line only if it is blank.
    pub fn consume_if_blank(&mut self) -> io::Result<bool> {
        if !self.peek_is_blank()? {
            return Ok(false);
        }
        self.peeked = None;
        Ok(true)
    }

    /// Drops an immediately following blank line, if there is one.
    pub fn skip_next_blank_line(&mut self) -> io::Result<bool> {
        self.consume_if_blank()
    }

    fn read_physical(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut line = Vec::new();
        // read_until keeps appending buffer refills until it sees the delimiter.
        if self.inner.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
