use std::fs::File;
use std::path::Path;
use std::process::ExitCode;

use clap::{error::ErrorKind, Parser};

use arch::DEFAULT_TMAX;
use lc2kemu::error::{self, ConfigError};
use lc2kemu::hooks::{dump::Dump, trace::Trace, Hook};
use lc2kemu::model::State;

#[derive(Parser, Debug)]
#[clap(
    name = "LC-2K Emulator",
    version = "v0.1.0",
    about = "Instruction-level simulator for the LC-2K ISA"
)]
struct Args {
    /// Stop with an error after this many instructions
    #[arg(short = 't', long, default_value_t = DEFAULT_TMAX)]
    tmax: u64,

    /// Do not print the state before every instruction
    #[arg(short, long)]
    quiet: bool,

    /// YAML map of pc -> memory addresses to print
    #[arg(short, long)]
    dump_cfg: Option<String>,

    /// Write the final state as YAML
    #[arg(short = 'o', long)]
    final_state: Option<String>,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Machine code file (one decimal word per line)
    input_file: String,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                let _ = err.print();
                return ExitCode::FAILURE;
            }
        },
    };
    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if let Err(err) = simple_logger::SimpleLogger::new().with_level(level).init() {
        eprintln!("logger: {err}");
    }

    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = match State::load_image_file(Path::new(&args.input_file)) {
        Ok(state) => state,
        Err(err) => {
            error::print(&err);
            return ExitCode::FAILURE;
        }
    };
    if !args.quiet {
        for addr in 0..state.loaded() {
            println!("memory[{}]={}", addr, state.load(addr));
        }
    }

    // ------------------------------------------------------------------------
    // Initialize hooks
    let dump = match Dump::arg(args.dump_cfg, args.quiet) {
        Ok(dump) => dump,
        Err(err) => {
            error::print(&err);
            return ExitCode::FAILURE;
        }
    };
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(dump), Box::new(Trace)];

    // ------------------------------------------------------------------------
    // Main loop
    if let Err(fault) = state.run(args.tmax, &mut hooks) {
        error::print(&fault);
        return ExitCode::FAILURE;
    }

    println!("machine halted");
    println!("total of {} instructions executed", state.count());
    println!("final state of machine:");
    println!("{}", state);

    if let Some(fname) = &args.final_state {
        if let Err(err) = write_state(fname, &state) {
            error::print(&err);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn write_state(fname: &str, state: &State) -> Result<(), ConfigError> {
    let file = File::create(fname).map_err(|err| ConfigError::FileCreate(fname.to_string(), err))?;
    serde_yaml::to_writer(file, &state.snapshot())
        .map_err(|err| ConfigError::Yaml(fname.to_string(), err))
}
