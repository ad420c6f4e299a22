//! Write the OpenAPI document to stdout.

use std::io::Write;

use clap::{Parser, ValueEnum};
use dispatch_board::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the dispatch board OpenAPI document")]
struct Cli {
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();
    let rendered = match cli.format {
        Format::Json => doc.to_pretty_json()?,
        Format::Yaml => doc.to_yaml()?,
    };
    writeln!(std::io::stdout().lock(), "{rendered}")?;
    Ok(())
}
