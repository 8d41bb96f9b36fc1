pub mod dump;
pub mod trace;

use crate::model::{State, Step};

/// Side effects run around the fetch-execute loop.
pub trait Hook {
    /// Called once before the first instruction.
    fn init(&mut self, _state: &State) {}

    /// Called after every instruction that did not fault.
    fn exec(&mut self, step: &Step, state: &State);
}
