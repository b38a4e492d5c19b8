use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use huffman::{ByteRepr, Config, DEFAULT_CHUNK_SIZE};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(about = "Build a Huffman code for a file, and check that it round-trips")]
struct Args {
    /// How the input is split into symbols
    #[arg(long, value_enum, default_value_t = Alphabet::Bytes)]
    alphabet: Alphabet,

    /// Size of the chunks read from the input and written to the output, in bytes
    #[arg(long, env = "HUFFMAN_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Log more (repeat for even more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode the input, decode it again, and write the decoded symbols
    RoundTrip {
        /// The file to read
        input: PathBuf,
        /// Where to write the decoded output
        output: PathBuf,
    },
    /// Print each symbol's frequency and code
    Table {
        /// The file to read
        input: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Alphabet {
    /// Every byte is a symbol
    Bytes,
    /// Every UTF-8 encoded character is a symbol
    Chars,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config {
        chunk_size: args.chunk_size,
    };

    match args.alphabet {
        Alphabet::Bytes => run::<u8>(&args.command, config),
        Alphabet::Chars => run::<char>(&args.command, config),
    }
}

fn run<S: ByteRepr>(command: &Command, config: Config) -> anyhow::Result<()> {
    match command {
        Command::RoundTrip { input, output } => {
            let (codec, symbols) = huffman::read_codec::<S>(open(input)?, config)
                .with_context(|| format!("could not build a code for {}", input.display()))?;
            // Only create the output once there's a code to write it with.
            let file = File::create(output)
                .with_context(|| format!("could not create {}", output.display()))?;

            let summary =
                huffman::write_round_trip(&codec, &symbols, BufWriter::new(file), config)
                    .with_context(|| format!("round trip of {} failed", input.display()))?;
            info!(
                symbols = summary.symbols,
                distinct = summary.distinct,
                encoded_bits = summary.encoded_bits,
                "done"
            );
            println!(
                "{}: {} symbols, {} distinct, {} encoded bits -> {}",
                input.display(),
                summary.symbols,
                summary.distinct,
                summary.encoded_bits,
                output.display()
            );
        }
        Command::Table { input } => {
            let report = huffman::report::<S>(open(input)?, config)
                .with_context(|| format!("could not build a code for {}", input.display()))?;
            println!("{report}");
        }
    }
    Ok(())
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    Ok(BufReader::new(file))
}
