use super::Hook;
use crate::model::{State, Step};

/// Logs every executed instruction at trace level.
pub struct Trace;

impl Hook for Trace {
    fn exec(&mut self, step: &Step, _state: &State) {
        log::trace!("[{:0>4}] {:>5}: {}", step.count, step.addr, step.inst.cformat());
    }
}
