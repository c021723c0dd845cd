use huffc_rs::{compress_with_stats, decompress, render, Container};
use std::env;
use std::fs;
use std::process;

/// Demo mirroring the codec's intended UI collaborator: compress a file to
/// `<file>.huff`, print size statistics, then decode the container back and
/// self-check it against the original.
///
/// Usage: cargo run --example compress_file <filename> [--table]
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <filename> [--table]", args[0]);
        process::exit(1);
    }
    let filename = &args[1];
    let show_table = args.get(2).map(|a| a.as_str() == "--table").unwrap_or(false);

    let original = fs::read(filename).unwrap_or_else(|e| {
        eprintln!("Cannot read \"{}\": {}", filename, e);
        process::exit(1);
    });

    let (container, stats) = match compress_with_stats(&original) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Compression failed: {}", e);
            process::exit(1);
        }
    };

    let out_path = format!("{}.huff", filename);
    let bytes = container.to_bytes();
    if let Err(e) = fs::write(&out_path, &bytes) {
        eprintln!("Cannot write \"{}\": {}", out_path, e);
        process::exit(1);
    }

    println!("Original file size: {} bytes", stats.original_bytes);
    println!("Compressed file size: {} bytes", stats.compressed_bytes);
    println!("Compression ratio: {:.2}%", stats.ratio());
    println!("Written to {}", out_path);

    if show_table {
        println!("\n{}", render::code_table(container.table()));
    }

    // Self-check: decode from the written bytes alone and compare.
    let decoded = Container::from_bytes(&bytes)
        .and_then(|parsed| decompress(&parsed))
        .unwrap_or_else(|e| {
            eprintln!("Self-check decode failed: {}", e);
            process::exit(1);
        });

    if decoded == original {
        println!("Self-check passed: decompressed output matches the input.");
    } else {
        eprintln!("WARNING: decompressed output does NOT match the input!");
        process::exit(1);
    }
}
