//! Prints the menus extracted from a local PDF (or its text dump) as JSON.
//!
//! Usage: `extract <restaurant> <file.pdf|file.txt> [weekday] [--text]`
//!
//! `--text` prints the raw text layer instead, with line numbers.

use std::fs;

use anyhow::{bail, Context};
use mensa_menu_api::fetch::{PdfTextExtractor, TextExtractor};
use mensa_menu_api::{extract_menus, DayFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let dump_text = args.iter().any(|a| a == "--text");
    let positional: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();
    let [restaurant, path, rest @ ..] = positional.as_slice() else {
        bail!("usage: extract <restaurant> <file.pdf|file.txt> [weekday] [--text]");
    };

    let bytes = fs::read(path).with_context(|| format!("reading {path}"))?;
    let text = if path.to_lowercase().ends_with(".pdf") {
        PdfTextExtractor.extract(&bytes)?
    } else {
        String::from_utf8(bytes).with_context(|| format!("{path} is not UTF-8 text"))?
    };

    if dump_text {
        for (i, line) in text.lines().enumerate() {
            if !line.trim().is_empty() {
                println!("{i}: {line:?}");
            }
        }
        return Ok(());
    }

    // Same leniency as the HTTP route: anything but 0..=6 means all days.
    let day = rest
        .first()
        .and_then(|value| DayFilter::from_path_segment(value).weekday());
    let selection = extract_menus(&text, restaurant, day)?;
    println!("{}", serde_json::to_string_pretty(&selection)?);
    Ok(())
}
