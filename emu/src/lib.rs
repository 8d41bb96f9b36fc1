//! Instruction-level LC-2K simulator.

pub mod error;
pub mod hooks;
pub mod model;

pub use error::{ConfigError, Fault, LoadError};
pub use model::{parse_image, Snapshot, State, Status, Step};
