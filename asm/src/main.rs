use std::path::Path;
use std::process::ExitCode;

use lc2kasm::util::print_dump;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Assembly source file
    input: String,

    /// Machine code file (one decimal word per line)
    output: String,

    /// Dump the assembled listing
    #[clap(short, long)]
    dump: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    use clap::{error::ErrorKind, Parser};

    // usage errors exit 1 like every other failure
    let args: Args = match Args::try_parse() {
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

    println!("LC-2K Assembler");

    println!("1. Read File");
    println!("  < {}", args.input);
    let source = match lc2kasm::read_source(Path::new(&args.input)) {
        Ok(source) => source,
        Err(err) => {
            err.print();
            return ExitCode::FAILURE;
        }
    };

    println!("2. Resolve Labels & Generate Words");
    let out = match lc2kasm::assemble(&source) {
        Ok(out) => out,
        Err(diag) => {
            diag.print(&args.input);
            return ExitCode::FAILURE;
        }
    };

    println!("  > {}", args.output);
    if let Err(err) = lc2kasm::write_file(Path::new(&args.output), &out.words) {
        err.print();
        return ExitCode::FAILURE;
    }

    if args.dump {
        print_dump(&out);
    }
    ExitCode::SUCCESS
}
