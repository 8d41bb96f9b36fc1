use std::fmt;

use crate::NUM_REGS;

/// A register number in `0..NUM_REGS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Reg(u8);

impl Reg {
    pub const ZERO: Reg = Reg(0);

    pub fn new(n: usize) -> Option<Self> {
        (n < NUM_REGS).then_some(Reg(n as u8))
    }

    /// Parse a base-10 register number. Anything outside `0..NUM_REGS`
    /// or not an integer is rejected.
    pub fn parse(s: &str) -> Option<Self> {
        let n: i64 = s.parse().ok()?;
        usize::try_from(n).ok().and_then(Reg::new)
    }

    /// Take the low three bits of a decoded field.
    pub(crate) fn from_field(bits: u32) -> Self {
        Reg((bits & 0b111) as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<Reg> for u32 {
    fn from(reg: Reg) -> u32 {
        reg.0 as u32
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        for n in 0..8 {
            assert_eq!(Reg::parse(&n.to_string()), Some(Reg(n as u8)));
        }
        assert_eq!(Reg::parse("+3"), Some(Reg(3)));
    }

    #[test]
    fn parse_invalid() {
        assert_eq!(Reg::parse("8"), None);
        assert_eq!(Reg::parse("-1"), None);
        assert_eq!(Reg::parse("r1"), None);
        assert_eq!(Reg::parse("1.0"), None);
        assert_eq!(Reg::parse(""), None);
        assert_eq!(Reg::parse("99999999999999999999"), None);
    }
}
