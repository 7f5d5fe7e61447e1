//! Command-line front end for table-huffman.
//!
//! ```bash
//! table-huffman encode -i input.txt -t table.txt -o data.bin
//! table-huffman decode -t table.txt -i data.bin -o restored.txt
//! ```
//!
//! Logging is controlled via `RUST_LOG` (tracing-subscriber `EnvFilter`),
//! default `warn,table_huffman=info`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use table_huffman::{Codec, CodecConfig};

#[derive(Parser)]
#[command(name = "table-huffman", version, about)]
struct Cli {
    /// JSON codec configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print statistics as JSON.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a file into a code table and a packed data file.
    Encode {
        #[arg(short = 'i', value_name = "INPUT_FILE")]
        input: PathBuf,
        #[arg(short = 't', value_name = "TABLE_OUTPUT_FILE")]
        table: PathBuf,
        #[arg(short = 'o', value_name = "DATA_OUTPUT_FILE")]
        output: PathBuf,
    },
    /// Decode a packed data file using its code table.
    Decode {
        #[arg(short = 't', value_name = "TABLE_INPUT_FILE")]
        table: PathBuf,
        #[arg(short = 'i', value_name = "COMPRESSED_INPUT_FILE")]
        input: PathBuf,
        #[arg(short = 'o', value_name = "OUTPUT_FILE")]
        output: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,table_huffman=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => CodecConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    let codec = Codec::new(config);

    match cli.command {
        Command::Encode {
            input,
            table,
            output,
        } => {
            if !exists(&input) {
                return Ok(ExitCode::FAILURE);
            }
            println!("... encoding your file");
            let stats = codec
                .encode_file(&input, &table, &output)
                .with_context(|| format!("encoding {}", input.display()))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("...done!");
                println!("table stored in: {}", absolute(&table).display());
                println!("compressed data stored in: {}", absolute(&output).display());
                println!("initial size: {} bytes", stats.initial_size);
                println!("compressed size: {} bytes", stats.compressed_size);
                println!(
                    "space saved: {} bytes ({:.2}%)",
                    stats.space_saved(),
                    stats.space_saved_percent()
                );
            }
        }
        Command::Decode {
            table,
            input,
            output,
        } => {
            if !exists(&table) || !exists(&input) {
                return Ok(ExitCode::FAILURE);
            }
            println!("... decoding your file");
            let stats = codec
                .decode_file(&table, &input, &output)
                .with_context(|| format!("decoding {}", input.display()))?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("...done!");
                println!("text written to: {}", absolute(&output).display());
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn exists(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    println!("{} does not exist!", path.display());
    false
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
