use std::fmt;
use std::path::Path;

use arch::inst::Inst;
use arch::reg::Reg;
use arch::word::Word;
use arch::{MEM_CAPACITY, NUM_REGS};
use serde::Serialize;

use crate::error::{Fault, LoadError};
use crate::hooks::Hook;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Running,
    Halted,
    Faulted,
}

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Instructions executed so far, this one included
    pub count: u64,
    /// Where the instruction was fetched from
    pub addr: usize,
    pub inst: Inst,
}

pub struct State {
    pc: usize,
    mem: Vec<Word>,
    reg: [Word; NUM_REGS],
    loaded: usize,
    count: u64,
    status: Status,
}

// Memory access
impl State {
    pub fn get(&self, reg: Reg) -> Word {
        self.reg[reg.index()]
    }

    /// Register 0 is not special at run time.
    pub fn set(&mut self, reg: Reg, val: Word) {
        self.reg[reg.index()] = val;
    }

    pub fn load(&self, addr: usize) -> Word {
        self.mem.get(addr).copied().unwrap_or(0)
    }

    pub fn store(&mut self, addr: usize, val: Word) -> Result<(), Fault> {
        match self.mem.get_mut(addr) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(Fault::MemoryOutOfRange(addr as i64)),
        }
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn regs(&self) -> &[Word; NUM_REGS] {
        &self.reg
    }

    /// Words read from the machine code file.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_halted(&self) -> bool {
        self.status == Status::Halted
    }
}

// Loading
impl State {
    pub fn new(words: &[Word]) -> Result<Self, LoadError> {
        if words.len() > MEM_CAPACITY {
            return Err(LoadError::ImageTooLarge {
                capacity: MEM_CAPACITY,
            });
        }
        let mut mem = vec![0; MEM_CAPACITY];
        mem[..words.len()].copy_from_slice(words);
        Ok(State {
            pc: 0,
            mem,
            reg: [0; NUM_REGS],
            loaded: words.len(),
            count: 0,
            status: Status::Running,
        })
    }

    pub fn load_image_file(path: &Path) -> Result<Self, LoadError> {
        let name = path.display().to_string();
        let text = std::fs::read(path).map_err(|err| LoadError::FileOpen(name.clone(), err))?;
        let text = String::from_utf8(text).map_err(|err| {
            LoadError::FileRead(
                name,
                std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            )
        })?;
        let state = State::new(&parse_image(&text)?)?;
        log::info!("loaded {} words from {}", state.loaded, path.display());
        Ok(state)
    }
}

/// One signed decimal word per line.
pub fn parse_image(text: &str) -> Result<Vec<Word>, LoadError> {
    text.lines()
        .enumerate()
        .map(|(index, record)| {
            record
                .trim()
                .parse::<Word>()
                .map_err(|_| LoadError::MalformedMemoryRecord {
                    index,
                    record: record.to_string(),
                })
        })
        .collect()
}

// Execution
impl State {
    /// Fetch, decode and execute one instruction. Any fault leaves the
    /// machine `Faulted`.
    pub fn step(&mut self, tmax: u64) -> Result<Step, Fault> {
        if self.status != Status::Running {
            return Err(Fault::NotRunning(self.status));
        }
        let result = self.exec(tmax);
        if result.is_err() {
            self.status = Status::Faulted;
        }
        result
    }

    /// Step until halt, calling every hook after each instruction.
    pub fn run(&mut self, tmax: u64, hooks: &mut [Box<dyn Hook + '_>]) -> Result<(), Fault> {
        for hook in hooks.iter_mut() {
            hook.init(self);
        }
        while self.status == Status::Running {
            let step = self.step(tmax)?;
            for hook in hooks.iter_mut() {
                hook.exec(&step, self);
            }
        }
        log::info!("halted after {} instructions", self.count);
        Ok(())
    }

    fn exec(&mut self, tmax: u64) -> Result<Step, Fault> {
        let addr = self.pc;
        if addr >= self.loaded {
            return Err(Fault::FetchOutOfRange {
                pc: addr,
                loaded: self.loaded,
            });
        }
        let bin = self.mem[addr] as u32;

        self.pc += 1;
        self.count += 1;
        if self.count > tmax {
            return Err(Fault::RuntimeBudgetExceeded(tmax));
        }

        let inst = Inst::from_bin(bin).map_err(|err| Fault::UnrecognizedOpcode(err.number))?;

        match inst {
            Inst::ADD(a, b, dest) => self.set(dest, self.get(a).wrapping_add(self.get(b))),
            Inst::NOR(a, b, dest) => self.set(dest, !(self.get(a) | self.get(b))),
            Inst::LW(a, b, offset) => {
                let addr = self.effective(a, offset)?;
                self.set(b, self.mem[addr]);
            }
            Inst::SW(a, b, offset) => {
                let addr = self.effective(a, offset)?;
                self.store(addr, self.get(b))?;
            }
            Inst::BEQ(a, b, offset) => {
                if self.get(a) == self.get(b) {
                    self.pc = jump_target(self.pc as i64 + offset as i64)?;
                }
            }
            Inst::JALR(a, link) => {
                // read the target first: a and link may be the same register
                let target = self.get(a);
                self.set(link, self.pc as Word);
                self.pc = jump_target(target as i64)?;
            }
            Inst::HALT() => self.status = Status::Halted,
            Inst::NOOP() => {}
        }

        Ok(Step {
            count: self.count,
            addr,
            inst,
        })
    }

    fn effective(&self, base: Reg, offset: i16) -> Result<usize, Fault> {
        let addr = self.get(base) as i64 + offset as i64;
        if addr < 0 {
            return Err(Fault::NegativeAddress(addr));
        }
        if addr >= MEM_CAPACITY as i64 {
            return Err(Fault::MemoryOutOfRange(addr));
        }
        Ok(addr as usize)
    }
}

fn jump_target(addr: i64) -> Result<usize, Fault> {
    usize::try_from(addr).map_err(|_| Fault::NegativeAddress(addr))
}

// ----------------------------------------------------------------------------
// Reporting

/// Final machine state as written by `--final-state`.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub status: Status,
    pub pc: usize,
    pub instructions: u64,
    pub registers: Vec<Word>,
    pub memory: Vec<Word>,
}

impl State {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            pc: self.pc,
            instructions: self.count,
            registers: self.reg.to_vec(),
            memory: self.mem[..self.loaded].to_vec(),
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n@@@\nstate:")?;
        writeln!(f, "\tpc {}", self.pc)?;
        writeln!(f, "\tmemory:")?;
        for (addr, word) in self.mem[..self.loaded].iter().enumerate() {
            writeln!(f, "\t\tmem[ {} ] {}", addr, word)?;
        }
        writeln!(f, "\tregisters:")?;
        for (idx, word) in self.reg.iter().enumerate() {
            writeln!(f, "\t\treg[ {} ] {}", idx, word)?;
        }
        write!(f, "end state")
    }
}
