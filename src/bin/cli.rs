use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tabled::{settings::Style, Table, Tabled};
use tracing_subscriber::EnvFilter;

use pageguard::{fingerprint, BuildReport, PageGuardError, Pipeline};

#[derive(Parser)]
#[command(name = "pageguard")]
#[command(about = "Build-time code protection: obfuscation, minification, integrity fingerprinting")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Produce both artifacts (protected + minified) and report stats
    Build {
        /// Markup template to protect
        template: PathBuf,

        /// Pin the renamer seed for reproducible aliases
        #[arg(long)]
        seed: Option<u64>,

        /// Report format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Produce only the protected artifact (renamed scripts + anti-debug snippet)
    Protect {
        /// Markup template to protect
        template: PathBuf,

        /// Pin the renamer seed for reproducible aliases
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Produce only the minified artifact (minified assets + integrity guard)
    Minify {
        /// Markup template to minify
        template: PathBuf,
    },

    /// Print the integrity fingerprint of a file
    Fingerprint {
        /// File to fingerprint
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ArtifactRow {
    #[tabled(rename = "Artifact")]
    output: String,
    #[tabled(rename = "Size (KB)")]
    size_kb: String,
    #[tabled(rename = "Compression")]
    compression: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pageguard=debug,info")
    } else {
        EnvFilter::new("pageguard=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn print_error(err: &PageGuardError) {
    eprintln!("\x1b[31m✗ Error:\x1b[0m {}", err);
}

async fn run(cli: Cli) -> pageguard::Result<()> {
    match cli.command {
        Commands::Build { template, seed, output } => {
            let pipeline = with_seed(Pipeline::new(), seed);
            let report = pipeline.build(&template).await?;
            print_report(&report, output)?;
        }

        Commands::Protect { template, seed } => {
            let pipeline = with_seed(Pipeline::new(), seed);
            let artifact = pipeline.protect(&template)?;
            println!(
                "{} {}",
                "✓ Protected artifact written:".green(),
                artifact.output_path.display()
            );
        }

        Commands::Minify { template } => {
            let pipeline = Pipeline::new();
            let artifact = pipeline.minify(&template).await?;
            println!(
                "{} {} ({:.2}% compression)",
                "✓ Minified artifact written:".green(),
                artifact.output_path.display(),
                artifact.compression_ratio
            );
        }

        Commands::Fingerprint { file } => {
            let content = std::fs::read_to_string(&file)?;
            println!("{}", fingerprint(&content));
        }
    }

    Ok(())
}

fn with_seed(pipeline: Pipeline, seed: Option<u64>) -> Pipeline {
    match seed {
        Some(seed) => pipeline.with_renamer_seed(seed),
        None => pipeline,
    }
}

fn print_report(report: &BuildReport, output: OutputFormat) -> pageguard::Result<()> {
    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Table => {
            let rows: Vec<ArtifactRow> = report
                .artifacts
                .iter()
                .map(|a| ArtifactRow {
                    output: a.output_path.display().to_string(),
                    size_kb: format!("{:.2}", a.size_bytes as f64 / 1024.0),
                    compression: format!("{:.2}%", a.compression_ratio),
                })
                .collect();

            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{}", table);
            println!(
                "{} {} scripts, {} styles, {:.2} KB original",
                "✓ Build complete:".green(),
                report.script_count,
                report.style_count,
                report.original_bytes as f64 / 1024.0
            );
        }
    }
    Ok(())
}
