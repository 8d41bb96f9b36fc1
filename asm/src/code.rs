use arch::{
    inst::Inst,
    op::{Mnemonic, OpCode},
    reg::Reg,
    word::Word,
};
use color_print::cformat;

use crate::{error::Error, parser::Line, symbol::Symbols};

// ----------------------------------------------------------------------------
// Operation with unresolved operands

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    ADD(Reg, Reg, Reg),
    NOR(Reg, Reg, Reg),
    LW(Reg, Reg, Imm),
    SW(Reg, Reg, Imm),
    BEQ(Reg, Reg, Imm),
    JALR(Reg, Reg),
    HALT(),
    NOOP(),
    FILL(Imm),
}

impl Code {
    pub fn parse(line: &Line) -> Result<Code, Error> {
        let mnemonic = Mnemonic::parse(&line.opcode)
            .ok_or_else(|| Error::UnsupportedOpcode(line.opcode.clone()))?;

        // arg!(i): i-th argument as text
        macro_rules! arg {
            ($index:expr) => {
                line.arg($index)
                    .ok_or(Error::MissingOperand(mnemonic.as_str(), $index))?
            };
        }

        // reg!(i): i-th argument as a source register
        macro_rules! reg {
            ($index:expr) => {{
                let arg = arg!($index);
                Reg::parse(arg).ok_or_else(|| {
                    Error::InvalidRegister(arg.to_string(), "expected an integer in 0..8")
                })?
            }};
        }

        // dest!(i): i-th argument as a writable register
        macro_rules! dest {
            ($index:expr) => {{
                let reg = reg!($index);
                if reg == Reg::ZERO {
                    return Err(Error::InvalidRegister(
                        arg!($index).to_string(),
                        "register 0 cannot be a destination",
                    ));
                }
                reg
            }};
        }

        macro_rules! imm {
            ($index:expr) => {
                Imm::parse(arg!($index))
            };
        }

        let code = match mnemonic {
            Mnemonic::Op(op) => match op {
                OpCode::ADD => Code::ADD(reg!(0), reg!(1), dest!(2)),
                OpCode::NOR => Code::NOR(reg!(0), reg!(1), dest!(2)),
                OpCode::LW => Code::LW(reg!(0), reg!(1), imm!(2)),
                OpCode::SW => Code::SW(reg!(0), reg!(1), imm!(2)),
                OpCode::BEQ => Code::BEQ(reg!(0), reg!(1), imm!(2)),
                OpCode::JALR => Code::JALR(reg!(0), reg!(1)),
                OpCode::HALT => Code::HALT(),
                OpCode::NOOP => Code::NOOP(),
            },
            Mnemonic::Fill => Code::FILL(imm!(0)),
        };
        Ok(code)
    }

    /// Resolve labels and encode. `addr` is the address of this line.
    pub fn resolve(&self, symbols: &Symbols, addr: usize) -> Result<Word, Error> {
        let inst = match self {
            Code::ADD(a, b, dest) => Inst::ADD(*a, *b, *dest),
            Code::NOR(a, b, dest) => Inst::NOR(*a, *b, *dest),
            Code::LW(a, b, imm) => Inst::LW(*a, *b, imm.offset(symbols)?),
            Code::SW(a, b, imm) => Inst::SW(*a, *b, imm.offset(symbols)?),
            Code::BEQ(a, b, imm) => Inst::BEQ(*a, *b, imm.branch(symbols, addr)?),
            Code::JALR(a, b) => Inst::JALR(*a, *b),
            Code::HALT() => Inst::HALT(),
            Code::NOOP() => Inst::NOOP(),
            Code::FILL(imm) => return imm.fill(symbols),
        };
        Ok(inst.to_word())
    }
}

impl Code {
    pub fn cformat(&self) -> String {
        macro_rules! opfmt {
            ($name:expr, $a:expr, $b:expr, $c:expr) => {
                cformat!("<red>{:<6}</><blue>{:<2} {:<2} {:<6}</>", $name, $a, $b, $c)
            };
        }
        match self {
            Code::ADD(a, b, dest) => opfmt!("add", a, b, dest),
            Code::NOR(a, b, dest) => opfmt!("nor", a, b, dest),
            Code::LW(a, b, imm) => opfmt!("lw", a, b, imm.cfmt()),
            Code::SW(a, b, imm) => opfmt!("sw", a, b, imm.cfmt()),
            Code::BEQ(a, b, imm) => opfmt!("beq", a, b, imm.cfmt()),
            Code::JALR(a, b) => opfmt!("jalr", a, b, ""),
            Code::HALT() => opfmt!("halt", "", "", ""),
            Code::NOOP() => opfmt!("noop", "", "", ""),
            Code::FILL(imm) => opfmt!(".fill", imm.cfmt(), "", ""),
        }
    }
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Number(String),
    Ident(String),
}

impl Imm {
    fn parse(s: &str) -> Imm {
        match is_decimal(s) {
            true => Imm::Number(s.to_string()),
            false => Imm::Ident(s.to_string()),
        }
    }

    /// lw / sw: a literal or a label's address, as a 16-bit offset.
    fn offset(&self, symbols: &Symbols) -> Result<i16, Error> {
        match self {
            Imm::Number(s) => {
                let value = s.parse().map_err(|_| Error::OffsetRange(s.clone()))?;
                to_offset(value, || s.clone())
            }
            Imm::Ident(name) => {
                let target = symbols.resolve(name)? as i64;
                to_offset(target, || format!("`{name}` at {target}"))
            }
        }
    }

    /// beq: labels become relative to the following instruction.
    fn branch(&self, symbols: &Symbols, addr: usize) -> Result<i16, Error> {
        match self {
            Imm::Number(_) => self.offset(symbols),
            Imm::Ident(name) => {
                let target = symbols.resolve(name)? as i64;
                let offset = target - addr as i64 - 1;
                to_offset(offset, || format!("`{name}` is {offset} words away"))
            }
        }
    }

    fn fill(&self, symbols: &Symbols) -> Result<Word, Error> {
        match self {
            Imm::Number(s) => s.parse().map_err(|_| Error::FillRange(s.clone())),
            Imm::Ident(name) => Ok(symbols.resolve(name)? as Word),
        }
    }

    pub fn cfmt(&self) -> String {
        match self {
            Imm::Number(s) => cformat!("<y>{}</>", s),
            Imm::Ident(s) => cformat!("<g>{}</>", s),
        }
    }
}

fn to_offset(value: i64, describe: impl FnOnce() -> String) -> Result<i16, Error> {
    i16::try_from(value).map_err(|_| Error::OffsetRange(describe()))
}

/// Optional sign followed by base-10 digits only.
fn is_decimal(s: &str) -> bool {
    let digits = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
