use std::fmt;

use color_print::cformat;
use num_enum::TryFromPrimitiveError;

use crate::{
    op::OpCode,
    reg::Reg,
    word::{dec_format, enc_format, sext16, Word},
};

/// A decoded LC-2K instruction.
///
/// Operands are written in source order: `ADD(regA, regB, dest)`,
/// `LW(regA, regB, offset)`, `JALR(regA, regB)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inst {
    ADD(Reg, Reg, Reg),
    NOR(Reg, Reg, Reg),
    LW(Reg, Reg, i16),
    SW(Reg, Reg, i16),
    BEQ(Reg, Reg, i16),
    JALR(Reg, Reg),
    HALT(),
    NOOP(),
}

impl Inst {
    pub fn opcode(&self) -> OpCode {
        match self {
            Inst::ADD(..) => OpCode::ADD,
            Inst::NOR(..) => OpCode::NOR,
            Inst::LW(..) => OpCode::LW,
            Inst::SW(..) => OpCode::SW,
            Inst::BEQ(..) => OpCode::BEQ,
            Inst::JALR(..) => OpCode::JALR,
            Inst::HALT() => OpCode::HALT,
            Inst::NOOP() => OpCode::NOOP,
        }
    }

    pub fn to_bin(&self) -> u32 {
        let op: u8 = self.opcode().into();
        match *self {
            Inst::ADD(a, b, dest) | Inst::NOR(a, b, dest) => {
                enc_format(op, a.into(), b.into(), u32::from(dest) as u16)
            }
            Inst::LW(a, b, offset) | Inst::SW(a, b, offset) | Inst::BEQ(a, b, offset) => {
                enc_format(op, a.into(), b.into(), offset as u16)
            }
            Inst::JALR(a, b) => enc_format(op, a.into(), b.into(), 0),
            Inst::HALT() | Inst::NOOP() => enc_format(op, 0, 0, 0),
        }
    }

    pub fn to_word(&self) -> Word {
        self.to_bin() as Word
    }

    /// Decode a word. Bits above the opcode field are ignored.
    pub fn from_bin(bin: u32) -> Result<Inst, TryFromPrimitiveError<OpCode>> {
        let (op, a, b, low) = dec_format(bin);
        let (a, b) = (Reg::from_field(a), Reg::from_field(b));
        let offset = sext16(low) as i16;
        Ok(match OpCode::try_from(op)? {
            OpCode::ADD => Inst::ADD(a, b, Reg::from_field(low as u32)),
            OpCode::NOR => Inst::NOR(a, b, Reg::from_field(low as u32)),
            OpCode::LW => Inst::LW(a, b, offset),
            OpCode::SW => Inst::SW(a, b, offset),
            OpCode::BEQ => Inst::BEQ(a, b, offset),
            OpCode::JALR => Inst::JALR(a, b),
            OpCode::HALT => Inst::HALT(),
            OpCode::NOOP => Inst::NOOP(),
        })
    }

    pub fn from_word(word: Word) -> Result<Inst, TryFromPrimitiveError<OpCode>> {
        Inst::from_bin(word as u32)
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.opcode().mnemonic();
        match self {
            Inst::ADD(a, b, c) | Inst::NOR(a, b, c) => write!(f, "{name} {a} {b} {c}"),
            Inst::LW(a, b, off) | Inst::SW(a, b, off) | Inst::BEQ(a, b, off) => {
                write!(f, "{name} {a} {b} {off}")
            }
            Inst::JALR(a, b) => write!(f, "{name} {a} {b}"),
            Inst::HALT() | Inst::NOOP() => write!(f, "{name}"),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! rrr {
            ($name:expr, $a:expr, $b:expr, $c:expr) => {
                cformat!("<r>{:<5}</><b>{:<2} {:<2} {:<2}</>", $name, $a, $b, $c)
            };
        }

        macro_rules! rri {
            ($name:expr, $a:expr, $b:expr, $off:expr) => {
                cformat!("<r>{:<5}</><b>{:<2} {:<2} <y>{}</></>", $name, $a, $b, $off)
            };
        }

        let name = self.opcode().mnemonic();
        match self {
            Inst::ADD(a, b, dest) | Inst::NOR(a, b, dest) => rrr!(name, a, b, dest),
            Inst::LW(a, b, off) | Inst::SW(a, b, off) | Inst::BEQ(a, b, off) => {
                rri!(name, a, b, off)
            }
            Inst::JALR(a, b) => rrr!(name, a, b, ""),
            Inst::HALT() | Inst::NOOP() => rrr!(name, "", "", ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(n: usize) -> Reg {
        Reg::new(n).unwrap()
    }

    macro_rules! test_inst {
        ($($name:ident: $inst:expr => $word:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let inst = $inst;
                    let word = inst.to_word();
                    assert_eq!(word, $word, "{inst}");
                    assert_eq!(Inst::from_word(word).unwrap(), inst);
                }
            )*
        }
    }

    test_inst! {
        test_add: Inst::ADD(r(1), r(2), r(1)) => 655361,
        test_nor: Inst::NOR(r(3), r(4), r(5)) => (1 << 22) | (3 << 19) | (4 << 16) | 5,
        test_lw: Inst::LW(r(0), r(1), 100) => 8454244,
        test_lw_label: Inst::LW(r(0), r(1), 7) => 8454151,
        test_sw: Inst::SW(r(7), r(6), -1) => (3 << 22) | (7 << 19) | (6 << 16) | 0xFFFF,
        test_beq_forward: Inst::BEQ(r(0), r(1), 2) => 16842754,
        test_beq_backward: Inst::BEQ(r(0), r(0), -3) => 16842749,
        test_beq_min: Inst::BEQ(r(0), r(0), i16::MIN) => (4 << 22) | 0x8000,
        test_jalr: Inst::JALR(r(2), r(3)) => (5 << 22) | (2 << 19) | (3 << 16),
        test_halt: Inst::HALT() => 25165824,
        test_noop: Inst::NOOP() => 29360128,
    }

    #[test]
    fn rtype_fields_survive_round_trip() {
        for a in 0..8 {
            for b in 0..8 {
                for dest in 1..8 {
                    for inst in [
                        Inst::ADD(r(a), r(b), r(dest)),
                        Inst::NOR(r(a), r(b), r(dest)),
                    ] {
                        let (op, da, db, low) = dec_format(inst.to_bin());
                        assert_eq!(op, u8::from(inst.opcode()));
                        assert_eq!((da as usize, db as usize), (a, b));
                        assert_eq!(low as usize, dest);
                        assert_eq!(Inst::from_bin(inst.to_bin()).unwrap(), inst);
                    }
                }
            }
        }
    }

    #[test]
    fn upper_bits_ignored() {
        let word = Inst::HALT().to_bin() | 0xFE00_0000;
        assert_eq!(Inst::from_bin(word).unwrap(), Inst::HALT());
    }

    #[test]
    fn display() {
        assert_eq!(Inst::ADD(r(1), r(2), r(3)).to_string(), "add 1 2 3");
        assert_eq!(Inst::BEQ(r(0), r(0), -3).to_string(), "beq 0 0 -3");
        assert_eq!(Inst::JALR(r(4), r(7)).to_string(), "jalr 4 7");
        assert_eq!(Inst::HALT().to_string(), "halt");
    }
}
