use color_print::cformat;

use crate::{code::Code, Assembled};

pub fn print_dump(out: &Assembled) {
    println!("-------+-------------+-------------+-----------------------------------");
    for (addr, (line, word)) in out.lines.iter().zip(&out.words).enumerate() {
        let bin = *word as u32;
        let label = match &line.label {
            Some(label) => cformat!("<g>{:<7}</>", label),
            None => format!("{:<7}", ""),
        };
        let code = Code::parse(line)
            .map(|code| code.cformat())
            .unwrap_or_else(|_| line.opcode.clone());
        println!(
            "[{:>5}] {:02X} {:02X} {:02X} {:02X} | {:>11} | {:>4}: {}{}",
            addr,
            (bin >> 24) & 0xFF,
            (bin >> 16) & 0xFF,
            (bin >> 8) & 0xFF,
            bin & 0xFF,
            word,
            line.idx + 1,
            label,
            code
        );
    }
    println!("-------+-------------+-------------+-----------------------------------");
    for (name, addr) in out.symbols.iter() {
        println!("{}", cformat!("  <g>{:<16}</> {:>5}", name, addr));
    }
}
