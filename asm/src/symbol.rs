use indexmap::IndexMap;

use crate::{
    error::{Diag, Error},
    parser::Line,
};

/// Label name to address, in definition order.
#[derive(Debug, Default)]
pub struct Symbols(IndexMap<String, usize>);

impl Symbols {
    pub fn new() -> Self {
        Symbols(IndexMap::new())
    }

    /// Collect every label. A label's address is the index of its line.
    pub fn build(lines: &[Line]) -> Result<Self, Diag> {
        let mut symbols = Symbols::new();
        for (addr, line) in lines.iter().enumerate() {
            let Some(label) = &line.label else {
                continue;
            };
            if let Err(err) = symbols.insert(label, addr) {
                let mut diag = Diag::new(err, line.idx, &line.raw);
                if let Some(prev) = symbols.get(label).and_then(|prev| lines.get(prev)) {
                    diag = diag.with_note("Already defined here".to_string(), prev.idx, &prev.raw);
                }
                return Err(diag);
            }
        }
        Ok(symbols)
    }

    pub fn insert(&mut self, name: &str, addr: usize) -> Result<(), Error> {
        if self.0.contains_key(name) {
            return Err(Error::DuplicateLabel(name.to_string()));
        }
        self.0.insert(name.to_string(), addr);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    pub fn resolve(&self, name: &str) -> Result<usize, Error> {
        self.get(name)
            .ok_or_else(|| Error::UndefinedLabel(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, addr)| (name.as_str(), *addr))
    }
}
