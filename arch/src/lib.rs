//! LC-2K instruction set shared by the assembler and the emulator.

pub mod inst;
pub mod op;
pub mod reg;
pub mod word;

/// Number of general purpose registers.
pub const NUM_REGS: usize = 8;

/// Words of addressable memory.
pub const MEM_CAPACITY: usize = 65536;

/// Size of a source line buffer, terminator included.
pub const MAX_LINE_LENGTH: usize = 1000;

/// Default instruction count at which the emulator gives up.
pub const DEFAULT_TMAX: u64 = 200;
