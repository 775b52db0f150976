//! Core logic behind the `minipack-pack` and `minipack-unpack` binaries.
//!
//! - `minipack-pack`: encode JSON (stdin) to binary (stdout)
//! - `minipack-unpack`: decode binary (stdin) to JSON (stdout)

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{DecoderConfig, EncoderConfig};
use crate::{MsgPackDecoder, MsgPackEncoder, MsgPackError, Value};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    MsgPack(#[from] MsgPackError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
    #[error("Invalid value for {flag}: {value:?}")]
    InvalidFlagValue { flag: String, value: String },
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn flag_value<'a>(
    flag: &str,
    args: &mut impl Iterator<Item = &'a String>,
) -> Result<usize, CliError> {
    let value = args.next().cloned().unwrap_or_default();
    value.parse().map_err(|_| CliError::InvalidFlagValue {
        flag: flag.to_string(),
        value,
    })
}

// ── minipack-pack ─────────────────────────────────────────────────────────

/// Parses `minipack-pack` flags: `--compact-floats`, `--max-depth N`.
pub fn parse_pack_args(args: &[String]) -> Result<EncoderConfig, CliError> {
    let mut config = EncoderConfig::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--compact-floats" => config.compact_floats = true,
            "--max-depth" => config.max_depth = flag_value(arg, &mut iter)?,
            other => return Err(CliError::UnknownFlag(other.to_string())),
        }
    }
    Ok(config)
}

/// Encodes a JSON document.
pub fn pack(json: &str, config: EncoderConfig) -> Result<Vec<u8>, CliError> {
    let value = Value::from(serde_json::from_str::<serde_json::Value>(json)?);
    let mut encoder = MsgPackEncoder::with_config(config);
    Ok(encoder.encode(&value)?)
}

// ── minipack-unpack ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnpackOptions {
    pub decoder: DecoderConfig,
    /// Emit indented JSON.
    pub pretty: bool,
    /// Decode every concatenated value, one JSON document per line.
    pub all: bool,
}

/// Parses `minipack-unpack` flags: `--pretty`, `--all`, `--max-depth N`.
pub fn parse_unpack_args(args: &[String]) -> Result<UnpackOptions, CliError> {
    let mut options = UnpackOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--pretty" => options.pretty = true,
            "--all" => options.all = true,
            "--max-depth" => options.decoder.max_depth = flag_value(arg, &mut iter)?,
            other => return Err(CliError::UnknownFlag(other.to_string())),
        }
    }
    Ok(options)
}

/// Decodes binary input to JSON text.
pub fn unpack(bytes: &[u8], options: UnpackOptions) -> Result<String, CliError> {
    let mut decoder = MsgPackDecoder::with_config(bytes, options.decoder);
    let mut docs = Vec::new();
    loop {
        let json = serde_json::Value::from(decoder.read_any()?);
        docs.push(if options.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        });
        if !options.all || decoder.is_empty() {
            break;
        }
    }
    Ok(docs.join("\n"))
}
