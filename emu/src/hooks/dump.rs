use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use color_print::cprintln;
use serde::Deserialize;

use super::Hook;
use crate::error::ConfigError;
use crate::model::{State, Step};

/// Prints the machine state before every fetch, plus configured memory
/// words whenever the instruction at a listed address runs.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    quiet: bool,
    list: List,
}

/// pc -> memory addresses to print
#[derive(Debug, Default, Deserialize)]
struct List(HashMap<usize, Vec<usize>>);

impl Dump {
    pub fn arg(file: Option<String>, quiet: bool) -> Result<Self, ConfigError> {
        let list = match &file {
            Some(fname) => {
                let reader = File::open(fname)
                    .map(BufReader::new)
                    .map_err(|err| ConfigError::FileOpen(fname.clone(), err))?;
                serde_yaml::from_reader(reader)
                    .map_err(|err| ConfigError::Yaml(fname.clone(), err))?
            }
            None => List::default(),
        };
        Ok(Dump { file, quiet, list })
    }

    fn get(&self, pc: usize) -> Option<&Vec<usize>> {
        self.list.0.get(&pc)
    }
}

impl Hook for Dump {
    fn init(&mut self, state: &State) {
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
        if !self.quiet {
            println!("{}", state);
        }
    }

    fn exec(&mut self, step: &Step, state: &State) {
        if let Some(addrs) = self.get(step.addr) {
            print_words(step, state, addrs);
        }
        // the final state is reported by the caller after halt
        if !self.quiet && !state.is_halted() {
            println!("{}", state);
        }
    }
}

fn print_words(step: &Step, state: &State, addrs: &[usize]) {
    cprintln!(" +-------[<y>{:>5}</>: {}]", step.addr, step.inst.cformat());
    for addr in addrs {
        cprintln!(" | <b>{:>5}</> : {}", addr, state.load(*addr));
    }
    println!(" +-------------------------------------");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_yaml() {
        let list: List = serde_yaml::from_str("3: [100, 101]\n7: []\n").unwrap();
        assert_eq!(list.0.get(&3), Some(&vec![100, 101]));
        assert_eq!(list.0.get(&7), Some(&vec![]));
    }

    #[test]
    fn missing_config_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("dump.yaml").display().to_string();
        assert!(matches!(
            Dump::arg(Some(path), true),
            Err(ConfigError::FileOpen(..))
        ));
    }

    #[test]
    fn bad_config_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("dump.yaml");
        std::fs::write(&path, "3: [not a number]\n").unwrap();
        let result = Dump::arg(Some(path.display().to_string()), true);
        assert!(matches!(result, Err(ConfigError::Yaml(..))));
    }
}
