use crate::errors::*;
use crate::*;
use log::{debug, trace};
use regex::Regex;
use std::io::BufRead;

/// Reads clause batches from a line-oriented source.
///
/// A batch is every clause line up to a blank line or the end of input.
/// Blank lines before the first clause line are skipped, as are `c` comment
/// lines and `p cnf` header lines. Bytes that are not valid UTF-8 are
/// replaced, so they end up in tokens that parse as nothing.
pub struct BatchReader<R> {
    reader: R,
    literal: Regex,
    header: Regex,
    buf: Vec<u8>,
}

impl<R: BufRead> BatchReader<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        BatchReader {
            reader,
            literal: literal_regex(),
            header: Regex::new(r"^p\s+cnf\s+(\d+)\s+(\d+)").expect("header pattern is valid"),
            buf: vec![],
        }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).trim().to_string()))
    }

    /// Read the next batch.
    ///
    /// Returns `None` once the input is exhausted before any clause line.
    pub fn next_batch(&mut self) -> Result<Option<Vec<Clause>>> {
        let mut clauses = vec![];

        while let Some(line) = self.next_line()? {
            if line.is_empty() {
                if clauses.is_empty() {
                    continue;
                }
                return Ok(Some(clauses));
            }
            if is_comment(&line) {
                continue;
            }
            if let Some(cap) = self.header.captures(&line) {
                debug!("skipping header: {} vars, {} clauses", &cap[1], &cap[2]);
                continue;
            }
            clauses.push(parse_clause(&self.literal, &line));
        }

        Ok(if clauses.is_empty() { None } else { Some(clauses) })
    }

    /// Read one reply line, trimmed.
    pub fn read_reply(&mut self) -> Result<Option<String>> {
        self.next_line()
    }
}

fn is_comment(line: &str) -> bool {
    line.split_whitespace().next() == Some("c")
}

fn literal_regex() -> Regex {
    Regex::new(r"^[+-]?\d+$").expect("literal pattern is valid")
}

/// Parse one clause line.
///
/// Tokens that are not signed 32-bit decimal integers are ignored, as is
/// the `0` terminator.
pub fn parse_clause(literal: &Regex, line: &str) -> Clause {
    let mut lits = vec![];
    for token in line.split_whitespace() {
        if !literal.is_match(token) {
            trace!("ignoring token {:?}", token);
            continue;
        }
        let value = match token.parse::<i32>() {
            Ok(v) => v,
            Err(e) => {
                trace!("ignoring token {:?}: {}", token, e);
                continue;
            }
        };
        if let Some(lit) = Lit::from_dimacs(value) {
            lits.push(lit);
        }
    }
    Clause { lits }
}

/// Parse a whole text into batches.
pub fn parse_batches(text: &str) -> Result<Vec<Vec<Clause>>> {
    let mut reader = BatchReader::new(text.as_bytes());
    let mut batches = vec![];
    while let Some(batch) = reader.next_batch()? {
        batches.push(batch);
    }
    Ok(batches)
}
