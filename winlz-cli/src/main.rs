//! winlz CLI - aPLib, LZNT1 and XPRESS from the command line.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use tracing_subscriber::util::SubscriberInitExt;
use winlz::aplib::{AP32_HEADER_SIZE, Ap32Header};
use winlz::lznt1::chunks;
use winlz::xpress::XpressLevel;
use winlz::{Backend, CodecConfig, Format, compress_with, decompress_with};
use winlz_core::crc::Crc32;
use winlz_core::error::WinlzError;

#[derive(Parser)]
#[command(name = "winlz")]
#[command(
    author,
    version,
    about = "aPLib, LZNT1 and XPRESS compression - pure Rust with an optional native backend"
)]
#[command(long_about = "
winlz compresses and decompresses the LZ77 formats used by Windows
(LZNT1, XPRESS) and the aPLib format, optionally wrapped in an AP32 header.

Examples:
  winlz compress -f lznt1 -i data.bin -o data.lznt1
  winlz compress -f xpress -l 8 -i data.bin -o data.xp
  winlz compress -f aplib-safe -i data.bin -o data.ap32
  winlz compress -f lznt1 -b native -i data.bin -o data.lznt1
  winlz decompress -f aplib --strict -i data.ap32 -o data.bin
  winlz info data.ap32
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Report timing, sizes and CRC-32s, and show codec debug logs
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// Compressed format
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Implementation to use
        #[arg(short, long, value_enum, default_value = "rust")]
        backend: BackendArg,

        /// XPRESS level (1-8)
        #[arg(short, long, default_value_t = 7, value_parser = clap::value_parser!(u8).range(1..=8))]
        level: u8,

        /// aPLib match window in bytes
        #[arg(short, long, default_value_t = winlz::aplib::DEFAULT_WINDOW)]
        window: usize,

        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Compressed format
        #[arg(short, long, value_enum)]
        format: FormatArg,

        /// Implementation to use
        #[arg(short, long, value_enum, default_value = "rust")]
        backend: BackendArg,

        /// Verify the AP32 header (aPLib only)
        #[arg(long)]
        strict: bool,

        /// Input file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show the AP32 header or LZNT1 chunk layout of a file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        file: PathBuf,

        /// List LZNT1 chunks
        #[arg(long)]
        chunks: bool,
    },
}

/// Compressed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// aPLib stream without header
    Aplib,
    /// aPLib stream with AP32 header
    AplibSafe,
    /// LZNT1 chunks
    Lznt1,
    /// XPRESS (LZ77, no Huffman)
    Xpress,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Aplib => Format::Aplib,
            FormatArg::AplibSafe => Format::AplibSafe,
            FormatArg::Lznt1 => Format::Lznt1,
            FormatArg::Xpress => Format::Xpress,
        }
    }
}

/// Implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum BackendArg {
    /// Pure Rust (default)
    #[default]
    Rust,
    /// RtlCompressBuffer / RtlDecompressBuffer (Windows only)
    Native,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Rust => Backend::Rust,
            BackendArg::Native => Backend::Native,
        }
    }
}

/// Log level for the codec crates' `log` records.
fn log_level(verbose: bool) -> Level {
    if verbose { Level::DEBUG } else { Level::WARN }
}

fn init_logging(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbose))
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    // Forward `log` records from the codec crates into the subscriber.
    if let Err(e) = subscriber.try_init() {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);

    let result = match cli.command {
        Commands::Compress {
            format,
            backend,
            level,
            window,
            input,
            output,
        } => cmd_compress(
            format.into(),
            backend.into(),
            level,
            window,
            &input,
            &output,
            verbose,
        ),
        Commands::Decompress {
            format,
            backend,
            strict,
            input,
            output,
        } => cmd_decompress(
            format.into(),
            backend.into(),
            strict,
            &input,
            &output,
            verbose,
        ),
        Commands::Info { file, chunks } => cmd_info(&file, chunks),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_compress(
    format: Format,
    backend: Backend,
    level: u8,
    window: usize,
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = XpressLevel::new(level)
        .ok_or_else(|| WinlzError::unsupported_method(format!("xpress level {}", level)))?;
    let config = CodecConfig::new(backend)
        .with_level(level)
        .with_window(window);

    let source = fs::read(input)?;
    let start = Instant::now();
    let result = compress_with(&source, format, &config)?;
    let elapsed = start.elapsed();
    fs::write(output, &result)?;

    if verbose {
        report(format, backend, elapsed, &source, &result);
    }
    Ok(())
}

fn cmd_decompress(
    format: Format,
    backend: Backend,
    strict: bool,
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = match format {
        Format::Aplib if strict => Format::AplibSafe,
        Format::Lznt1 | Format::Xpress if strict => {
            eprintln!("Warning: --strict only applies to aPLib; ignored");
            format
        }
        other => other,
    };
    let config = CodecConfig::new(backend);

    let source = fs::read(input)?;
    let start = Instant::now();
    let result = decompress_with(&source, format, &config)?;
    let elapsed = start.elapsed();
    fs::write(output, &result)?;

    if verbose {
        report(format, backend, elapsed, &source, &result);
    }
    Ok(())
}

fn report(
    format: Format,
    backend: Backend,
    elapsed: std::time::Duration,
    input: &[u8],
    output: &[u8],
) {
    eprintln!("format:        {} ({})", format, backend);
    eprintln!("elapsed time:  {:?}", elapsed);
    eprintln!("input length:  {}", input.len());
    eprintln!("input crc32:   {:08x}", Crc32::compute(input));
    eprintln!("output length: {}", output.len());
    eprintln!("output crc32:  {:08x}", Crc32::compute(output));
    if !input.is_empty() {
        eprintln!(
            "ratio:         {:.1}%",
            output.len() as f64 / input.len() as f64 * 100.0
        );
    }
}

fn cmd_info(file: &Path, list_chunks: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;

    println!("File Information");
    println!("================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());

    match Ap32Header::parse(&data)? {
        Some(header) => {
            println!();
            println!("AP32 Header:");
            println!("  Header size: {} bytes", header.header_size);
            println!("  Packed size: {} bytes", header.packed_size);
            println!("  Packed CRC-32: {:08x}", header.packed_crc);
            println!("  Original size: {} bytes", header.orig_size);
            println!("  Original CRC-32: {:08x}", header.orig_crc);

            let payload = header.payload(&data)?;
            let status = match header.verify_packed(payload) {
                Ok(()) => "ok",
                Err(_) => "MISMATCH",
            };
            println!("  Payload check: {}", status);
            if header.header_size as usize > AP32_HEADER_SIZE {
                println!(
                    "  Extra header bytes: {}",
                    header.header_size as usize - AP32_HEADER_SIZE
                );
            }
        }
        None => {
            println!();
            println!("No AP32 header");
        }
    }

    if list_chunks {
        let list = chunks(&data)?;
        let compressed = list.iter().filter(|c| c.header.is_compressed()).count();

        println!();
        println!("LZNT1 Chunks: {} ({} compressed)", list.len(), compressed);
        println!("{:>10}  {:>6}  {:>6}  Kind", "Offset", "Header", "Body");
        for chunk in &list {
            println!(
                "{:>10}  {:04x}    {:>6}  {}",
                chunk.offset,
                chunk.header.raw(),
                chunk.header.body_len(),
                if chunk.header.is_compressed() {
                    "compressed"
                } else {
                    "stored"
                }
            );
        }
    }

    Ok(())
}
