//! `minipack-unpack`: decode binary (stdin) to JSON (stdout).
//!
//! Usage:
//!   minipack-unpack [--pretty] [--all] [--max-depth N]

use std::io::{self, Read, Write};

use minipack::cli::{init_logging, parse_unpack_args, unpack, CliError};

fn run() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_unpack_args(&args)?;

    let mut buf = Vec::new();
    io::stdin().read_to_end(&mut buf)?;
    let json = unpack(&buf, options)?;
    let mut stdout = io::stdout();
    stdout.write_all(json.as_bytes())?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        tracing::error!(error = %e, "unpack failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
