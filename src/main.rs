use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use likeplot::{csv_reader, data::Table, parser, runtime, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "likeplot")]
#[command(about = "Render engagement charts from CSV data", long_about = None)]
struct Args {
    /// Chart spec (e.g., 'boxplot(x: Platform, y: Likes)')
    spec: String,

    /// Read a JSON array of objects from stdin instead of CSV
    #[arg(long)]
    json: bool,

    /// Render options as JSON (e.g., '{"width":800,"height":600,"type":"svg"}')
    #[arg(long)]
    options: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = if args.json {
        let value = serde_json::from_reader(io::stdin().lock())
            .context("Failed to read JSON from stdin")?;
        Table::from_json(&value).context("Failed to build table from JSON")?
    } else {
        csv_reader::read_table_from_stdin().context("Failed to read CSV from stdin")?
    };

    let chart_spec = match parser::parse_chart_spec(&args.spec) {
        Ok((remaining, spec)) => {
            if !remaining.trim().is_empty() {
                eprintln!("Warning: unparsed input: '{}'", remaining);
            }
            spec
        }
        Err(e) => {
            eprintln!("Parse error: {:?}", e);
            std::process::exit(1);
        }
    };

    let options: RenderOptions = match &args.options {
        Some(json) => serde_json::from_str(json).context("Failed to parse render options")?,
        None => RenderOptions::default(),
    };

    let image_bytes = runtime::render_chart(&chart_spec, &table, &options)
        .context("Failed to render chart")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(&image_bytes)
        .context("Failed to write image to stdout")?;
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
