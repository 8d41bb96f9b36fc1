//! Two-pass assembler for LC-2K.
//!
//! Pass 1 collects labels, pass 2 encodes one word per non-blank line:
//! ```
//! let out = lc2kasm::assemble("\tlw 0 1 five\n\thalt\nfive .fill 5\n").unwrap();
//! assert_eq!(out.words, vec![8454146, 25165824, 5]);
//! ```

pub mod code;
pub mod error;
pub mod parser;
pub mod symbol;
pub mod util;

use std::io::{BufWriter, Write};
use std::path::Path;

use arch::word::Word;

pub use code::Code;
pub use error::{Diag, Error};
pub use parser::Line;
pub use symbol::Symbols;

/// Result of a successful run. `words[i]` is the encoding of `lines[i]`.
#[derive(Debug)]
pub struct Assembled {
    pub lines: Vec<Line>,
    pub symbols: Symbols,
    pub words: Vec<Word>,
}

pub fn assemble(source: &str) -> Result<Assembled, Diag> {
    let lines = parser::read_lines(source)?;

    let symbols = Symbols::build(&lines)?;
    log::info!("pass 1: {} labels in {} lines", symbols.len(), lines.len());

    let mut words = Vec::with_capacity(lines.len());
    for (addr, line) in lines.iter().enumerate() {
        let word = Code::parse(line)
            .and_then(|code| code.resolve(&symbols, addr))
            .map_err(|err| Diag::new(err, line.idx, &line.raw))?;
        log::debug!("(Address {}): {}", addr, word);
        words.push(word);
    }
    log::info!("pass 2: {} words", words.len());

    Ok(Assembled {
        lines,
        symbols,
        words,
    })
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    let name = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|err| Error::FileOpen(name.clone(), err))?;
    String::from_utf8(bytes).map_err(|err| {
        Error::FileRead(
            name,
            std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        )
    })
}

/// One decimal word per line.
pub fn write_words<W: Write>(out: W, words: &[Word]) -> std::io::Result<()> {
    let mut out = BufWriter::new(out);
    for word in words {
        writeln!(out, "{}", word)?;
    }
    out.flush()
}

pub fn write_file(path: &Path, words: &[Word]) -> Result<(), Error> {
    let name = path.display().to_string();
    let file = std::fs::File::create(path).map_err(|err| Error::FileCreate(name.clone(), err))?;
    write_words(file, words).map_err(|err| Error::FileWrite(name, err))
}
