use bimap::BiMap;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use once_cell::sync::Lazy;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumIter,
    IntoStaticStr,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum OpCode {
    ADD,
    NOR,
    LW,
    SW,
    BEQ,
    JALR,
    HALT,
    NOOP,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Two source registers and a destination.
    R,
    /// Two registers and a signed 16-bit offset.
    I,
    /// Indirect jump with return address.
    J,
    /// No operands.
    O,
}

impl OpCode {
    pub fn family(self) -> Family {
        use OpCode::*;
        match self {
            ADD | NOR => Family::R,
            LW | SW | BEQ => Family::I,
            JALR => Family::J,
            HALT | NOOP => Family::O,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        self.into()
    }
}

// ----------------------------------------------------------------------------
// Source level mnemonics: every opcode plus the `.fill` directive

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Op(OpCode),
    Fill,
}

static MNEMONICS: Lazy<BiMap<&'static str, Mnemonic>> = Lazy::new(|| {
    let mut table = BiMap::new();
    for op in OpCode::iter() {
        table.insert(op.mnemonic(), Mnemonic::Op(op));
    }
    table.insert(".fill", Mnemonic::Fill);
    table
});

impl Mnemonic {
    /// Exact, case-sensitive lookup.
    pub fn parse(s: &str) -> Option<Mnemonic> {
        MNEMONICS.get_by_left(s).copied()
    }

    pub fn as_str(&self) -> &'static str {
        MNEMONICS.get_by_right(self).copied().unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_numbers() {
        let nums: Vec<u8> = OpCode::iter().map(u8::from).collect();
        assert_eq!(nums, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(OpCode::try_from(4u8).unwrap(), OpCode::BEQ);
        assert!(OpCode::try_from(8u8).is_err());
    }

    #[test]
    fn mnemonic_lookup() {
        assert_eq!(Mnemonic::parse("add"), Some(Mnemonic::Op(OpCode::ADD)));
        assert_eq!(Mnemonic::parse("jalr"), Some(Mnemonic::Op(OpCode::JALR)));
        assert_eq!(Mnemonic::parse(".fill"), Some(Mnemonic::Fill));
        assert_eq!(Mnemonic::parse("ADD"), None);
        assert_eq!(Mnemonic::parse("sub"), None);
        assert_eq!(Mnemonic::Op(OpCode::NOOP).as_str(), "noop");
        assert_eq!(Mnemonic::Fill.as_str(), ".fill");
    }

    #[test]
    fn families() {
        assert_eq!(OpCode::NOR.family(), Family::R);
        assert_eq!(OpCode::SW.family(), Family::I);
        assert_eq!(OpCode::JALR.family(), Family::J);
        assert_eq!(OpCode::HALT.family(), Family::O);
    }
}
