use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Line too long: {0} bytes (limit {1})")]
    LineTooLong(usize, usize),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String),

    #[error("Undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("Invalid register `{0}`: {1}")]
    InvalidRegister(String, &'static str),

    #[error("Offset out of range [-32768, 32767]: {0}")]
    OffsetRange(String),

    #[error("Value does not fit in a 32-bit word: `{0}`")]
    FillRange(String),

    #[error("Unsupported opcode: `{0}`")]
    UnsupportedOpcode(String),

    #[error("`{0}` requires argument {1}")]
    MissingOperand(&'static str, usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn print(&self) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(source) = std::error::Error::source(self) {
            cprintln!("     <blue>=</> {}", source);
        }
    }
}

/// An error pinned to a source line.
#[derive(Debug)]
pub struct Diag {
    pub error: Error,
    /// 0-based line index in the source file
    pub line_idx: usize,
    pub raw: String,
    pub note: Option<(String, usize, String)>,
}

impl Diag {
    pub fn new(error: Error, line_idx: usize, raw: &str) -> Self {
        Diag {
            error,
            line_idx,
            raw: raw.to_string(),
            note: None,
        }
    }

    pub fn with_note(mut self, msg: String, line_idx: usize, raw: &str) -> Self {
        self.note = Some((msg, line_idx, raw.to_string()));
        self
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print(&self, file: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);
        print_location(file, self.line_idx, &self.raw);
        if let Some((msg, line_idx, raw)) = &self.note {
            cprintln!("<green,bold>note</>: {}", msg);
            print_location(file, *line_idx, raw);
        }
    }
}

fn print_location(file: &str, line_idx: usize, raw: &str) {
    let line_num = line_idx + 1;
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", line_num, raw);
    cprintln!("      <blue>|</>");
}
