//! HuffPack CLI - Huffman file compressor
//!
//! Compresses a single file into a self-describing Huffman-coded image and
//! back. The zero byte is outside the encodable alphabet; compressing a file
//! that contains it fails rather than silently dropping data.

use clap::{Parser, Subcommand};
use huffpack_codec::{FrequencyTable, header};
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "huffpack")]
#[command(author, version, about = "Pure Rust Huffman file compressor")]
#[command(long_about = "
HuffPack compresses a single file with Huffman coding over byte values and
writes a self-describing image: a textual code-table header followed by a
bit-packed body.

Examples:
  huffpack compress notes.txt notes.txt.hp
  huffpack decompress notes.txt.hp notes.txt
  huffpack info notes.txt.hp

Note: files containing the zero byte cannot be compressed; the byte value 0
is outside the encodable alphabet.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a compressed file without decompressing it
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            verbose,
        } => cmd_compress(&input, &output, verbose),
        Commands::Decompress {
            input,
            output,
            verbose,
        } => cmd_decompress(&input, &output, verbose),
        Commands::Info { file } => cmd_info(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Reject blank path arguments before touching the filesystem.
fn validate_path(path: &Path, role: &str) -> Result<(), Box<dyn std::error::Error>> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(format!("invalid {} path", role).into());
    }
    Ok(())
}

fn cmd_compress(
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_path(input, "input")?;
    validate_path(output, "destination")?;

    let data = std::fs::read(input)?;
    let compressed = huffpack_codec::compress(&data)?;
    std::fs::write(output, &compressed)?;

    println!(
        "Compressed {} ({} bytes) to {} ({} bytes, {:.1}%)",
        input.display(),
        data.len(),
        output.display(),
        compressed.len(),
        (compressed.len() as f64 / data.len() as f64) * 100.0
    );

    if verbose {
        let freq = FrequencyTable::from_bytes(&data)?;
        println!("  Distinct symbols: {}", freq.distinct());
    }

    Ok(())
}

fn cmd_decompress(
    input: &Path,
    output: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    validate_path(input, "input")?;
    validate_path(output, "destination")?;

    let data = std::fs::read(input)?;
    let decompressed = huffpack_codec::decompress(&data)?;
    std::fs::write(output, &decompressed)?;

    println!(
        "Decompressed {} ({} bytes) to {} ({} bytes)",
        input.display(),
        data.len(),
        output.display(),
        decompressed.len()
    );

    if verbose {
        println!(
            "  Expansion: {:.2}x",
            decompressed.len() as f64 / data.len() as f64
        );
    }

    Ok(())
}

fn cmd_info(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    validate_path(file, "input")?;

    let data = std::fs::read(file)?;
    let mut cursor = Cursor::new(&data);
    let table = header::read_header(&mut cursor)?;
    let header_size = cursor.position();

    println!("Compressed File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!();
    println!("Header: {} bytes", header_size);
    println!("  Symbols: {}", table.len());
    println!("  Shortest code: {} bits", table.min_code_len());
    println!("  Longest code: {} bits", table.max_code_len());
    println!("Body: {} bytes", data.len() as u64 - header_size);

    Ok(())
}
