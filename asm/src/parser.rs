use arch::MAX_LINE_LENGTH;

use crate::error::{Diag, Error};

// ----------------------------------------------------------------------------
// Source line
//
// label   opcode  arg0  arg1  arg2  comment...
//
// A label is present iff the line does not start with whitespace.
// Words after the third argument are ignored.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 0-based line index in the source file
    pub idx: usize,
    pub raw: String,
    pub label: Option<String>,
    pub opcode: String,
    pub args: Vec<String>,
}

/// Longest line content accepted: the buffer also holds the newline and a terminator.
pub const MAX_CONTENT_LENGTH: usize = MAX_LINE_LENGTH - 2;

impl Line {
    pub fn parse(idx: usize, raw: &str) -> Result<Option<Line>, Error> {
        if raw.len() > MAX_CONTENT_LENGTH {
            return Err(Error::LineTooLong(raw.len(), MAX_CONTENT_LENGTH));
        }

        let mut words = raw.split_whitespace().peekable();
        if words.peek().is_none() {
            return Ok(None);
        }

        let label = match raw.starts_with(char::is_whitespace) {
            true => None,
            false => words.next().map(str::to_string),
        };
        let opcode = words.next().unwrap_or_default().to_string();
        let args = words.take(3).map(str::to_string).collect();

        Ok(Some(Line {
            idx,
            raw: raw.to_string(),
            label,
            opcode,
            args,
        }))
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

/// Split source text into non-blank lines. The position of a line in the
/// result is its address.
pub fn read_lines(source: &str) -> Result<Vec<Line>, Diag> {
    let mut lines = vec![];
    for (idx, raw) in source.lines().enumerate() {
        match Line::parse(idx, raw) {
            Ok(Some(line)) => lines.push(line),
            Ok(None) => {}
            Err(err) => return Err(Diag::new(err, idx, raw)),
        }
    }
    Ok(lines)
}
