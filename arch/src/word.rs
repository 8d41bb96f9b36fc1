/// A machine word as it appears in memory and in machine-code files.
pub type Word = i32;

// ----------------------------------------------------------------------------
// Field layout
//
//  24   22 21  19 18  16 15                0
// +-------+------+------+-------------------+
// |  op   | regA | regB |  low (dest/offset)|
// +-------+------+------+-------------------+

const OP_SHIFT: u32 = 22;
const REG_A_SHIFT: u32 = 19;
const REG_B_SHIFT: u32 = 16;

pub fn enc_format(opcode: u8, reg_a: u32, reg_b: u32, low: u16) -> u32 {
    ((opcode as u32 & 0b111) << OP_SHIFT)
        | ((reg_a & 0b111) << REG_A_SHIFT)
        | ((reg_b & 0b111) << REG_B_SHIFT)
        | (low as u32)
}

pub fn dec_format(bin: u32) -> (u8, u32, u32, u16) {
    let opcode = ((bin >> OP_SHIFT) & 0b111) as u8;
    let reg_a = (bin >> REG_A_SHIFT) & 0b111;
    let reg_b = (bin >> REG_B_SHIFT) & 0b111;
    let low = (bin & 0xFFFF) as u16;
    (opcode, reg_a, reg_b, low)
}

pub fn sext16(low: u16) -> i32 {
    low as i16 as i32
}

#[test]
fn test_format_all() {
    for opcode in 0..8 {
        for reg_a in 0..8 {
            for reg_b in 0..8 {
                for low in [0, 1, 7, 100, 0x7FFF, 0x8000, 0xFFFD, 0xFFFF] {
                    let bin = enc_format(opcode, reg_a, reg_b, low);
                    assert_eq!(dec_format(bin), (opcode, reg_a, reg_b, low));
                }
            }
        }
    }
}

#[test]
fn test_sext16() {
    assert_eq!(sext16(0x0000), 0);
    assert_eq!(sext16(0x7FFF), 32767);
    assert_eq!(sext16(0x8000), -32768);
    assert_eq!(sext16(0xFFFD), -3);
}
