use clap::Parser;
use sor_rs::{OffsetMode, ParseOptions, export};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sor2csv")]
#[command(about = "Convert SOR files to CSV")]
#[command(version)]
struct Cli {
    /// Input .sor file to convert
    sor_file: PathBuf,

    /// Output CSV filename (default: <input>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Loss reference level: STV, AFL or anything else for none
    #[arg(long, default_value = "STV")]
    offset: String,

    /// Also write the decoded blocks as JSON to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> sor_rs::Result<PathBuf> {
    let options = ParseOptions::default().with_offset_mode(OffsetMode::from_code(&cli.offset));
    let (sor, output) = export::convert_to_csv_with(&cli.sor_file, cli.output.as_deref(), options)?;

    if let Some(summary) = &cli.summary {
        export::save_summary_to_file(&sor, summary)?;
    }
    Ok(output)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(output) => {
            log::debug!("Wrote {}", output.display());
            log::info!("Conversion completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            log::error!("Conversion failed");
            ExitCode::FAILURE
        }
    }
}
