//! `minipack-pack`: encode JSON (stdin) to binary (stdout).
//!
//! Usage:
//!   minipack-pack [--compact-floats] [--max-depth N]

use std::io::{self, Read, Write};

use minipack::cli::{init_logging, pack, parse_pack_args, CliError};

fn run() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_pack_args(&args)?;

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    let bytes = pack(buf.trim(), config)?;
    io::stdout().write_all(&bytes)?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        tracing::error!(error = %e, "pack failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
