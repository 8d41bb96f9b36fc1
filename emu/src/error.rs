use color_print::cprintln;
use thiserror::Error;

use crate::model::Status;

/// Fatal conditions while running a program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("pc {pc} is outside the loaded program (0..{loaded})")]
    FetchOutOfRange { pc: usize, loaded: usize },

    #[error("negative address {0}")]
    NegativeAddress(i64),

    #[error("address {0} is outside memory")]
    MemoryOutOfRange(i64),

    #[error("infinite loop: more than {0} instructions executed")]
    RuntimeBudgetExceeded(u64),

    #[error("unrecognized opcode {0}")]
    UnrecognizedOpcode(u8),

    #[error("machine is not running ({0:?})")]
    NotRunning(Status),
}

/// Problems building the machine image.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("error in reading address {index}: `{record}`")]
    MalformedMemoryRecord { index: usize, record: String },

    #[error("program does not fit in {capacity} words of memory")]
    ImageTooLarge { capacity: usize },
}

/// Problems with the dump configuration or the final state file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Invalid YAML in {0}")]
    Yaml(String, #[source] serde_yaml::Error),
}

pub fn print(err: &dyn std::error::Error) {
    cprintln!("<red,bold>error</>: {}", err);
    if let Some(source) = err.source() {
        cprintln!("     <blue>=</> {}", source);
    }
}
