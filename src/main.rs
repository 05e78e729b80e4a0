use std::path::PathBuf;
use std::process;

use clap::Parser;

use docx_paginate::{Config, DocumentInput, Error, PaginationReport};

/// Estimate which page each block of a DOCX document lands on, without rendering it.
#[derive(Parser)]
#[command(name = "docx-paginate", version, about)]
struct Cli {
    /// Input .docx file, or a .json element list from another extractor
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// JSON file with `layout` and/or `classifier` tunables
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fraction of the content height treated as page capacity
    #[arg(long)]
    threshold_fraction: Option<f32>,

    /// Average character width as a fraction of the font size
    #[arg(long)]
    char_width_ratio: Option<f32>,

    /// Line height as a multiple of the font size
    #[arg(long)]
    line_spacing: Option<f32>,

    /// Font size assumed when the document does not specify one
    #[arg(long)]
    font_size: Option<f32>,

    /// Print geometry, page count and page breaks only
    #[arg(long)]
    summary: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

fn load_config(cli: &Cli) -> Result<Config, Error> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let layout = &mut config.layout;
    if let Some(v) = cli.threshold_fraction {
        layout.threshold_fraction = v;
    }
    if let Some(v) = cli.char_width_ratio {
        layout.char_width_ratio = v;
    }
    if let Some(v) = cli.line_spacing {
        layout.line_spacing = v;
    }
    if let Some(v) = cli.font_size {
        layout.default_font_size = v;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<String, Error> {
    let config = load_config(cli)?;

    let is_json = cli
        .input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let report: PaginationReport = if is_json {
        let text = std::fs::read_to_string(&cli.input)?;
        docx_paginate::paginate_input(&DocumentInput::from_json(&text)?, &config)?
    } else {
        docx_paginate::paginate_docx(&cli.input, &config)?
    };

    let json = match (cli.summary, cli.compact) {
        (true, true) => serde_json::to_string(&report.summary())?,
        (true, false) => serde_json::to_string_pretty(&report.summary())?,
        (false, true) => serde_json::to_string(&report)?,
        (false, false) => serde_json::to_string_pretty(&report)?,
    };

    for group in report.split_groups() {
        log::info!(
            "Group {} at element {} spans pages {}-{}",
            group.pattern,
            group.span.start,
            group.span.first_page,
            group.span.last_page
        );
    }
    Ok(json)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
