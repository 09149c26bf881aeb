//! doccorpus CLI - structured corpus extraction tool

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use doccorpus::{ExtractionMode, ExtractionPipeline, PipelineOptions, Result};

#[derive(Parser)]
#[command(name = "doccorpus")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract a structured JSONL corpus from a PDF document", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    output: PathBuf,

    /// Extraction mode (content page coverage)
    #[arg(short, long, value_enum, default_value = "full")]
    mode: Mode,

    /// Override the document title used in records
    #[arg(short, long, value_name = "TITLE")]
    title: Option<String>,

    /// Content-count threshold for the report verdict
    #[arg(long, value_name = "N", default_value = "1000")]
    threshold: usize,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract only the table of contents and print it
    Toc {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON instead of a tree listing
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Every page
    Full,
    /// First 600 pages
    Extended,
    /// First 200 pages
    Standard,
}

impl From<Mode> for ExtractionMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Full => ExtractionMode::Full,
            Mode::Extended => ExtractionMode::Extended,
            Mode::Standard => ExtractionMode::Standard,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Toc { input, json }) => cmd_toc(input, *json),
        None => match cli.input.clone() {
            Some(input) => cmd_extract(&cli, &input),
            None => {
                eprintln!("{}: no input file given", "Error".red().bold());
                std::process::exit(2);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_extract(cli: &Cli, input: &PathBuf) -> Result<()> {
    let mut options = PipelineOptions::new()
        .with_mode(cli.mode.into())
        .with_output_dir(cli.output.clone())
        .with_report_threshold(cli.threshold);
    if let Some(title) = &cli.title {
        options = options.with_doc_title(title.clone());
    }

    let output = ExtractionPipeline::new(options).run(input)?;
    let counts = output.outcome.counts();

    println!("\n{}", "Extraction summary:".green().bold());
    println!("  TOC entries:    {}", counts.toc_entries);
    println!("  Content items:  {}", counts.content_items);
    println!("  Pages covered:  {}", counts.pages);
    println!("  Major sections: {}", counts.major_sections);
    println!("  Paragraphs:     {}", counts.paragraphs);

    let status = if output.report.status == doccorpus::ReportStatus::Pass {
        output.report.status.as_str().green().bold()
    } else {
        output.report.status.as_str().red().bold()
    };
    println!("  Status:         {}", status);
    println!(
        "\n{} {}",
        "Saved to".green(),
        cli.output.display()
    );
    Ok(())
}

fn cmd_toc(input: &PathBuf, json: bool) -> Result<()> {
    let entries = doccorpus::extract_toc(input)?;
    if json {
        for entry in &entries {
            println!("{}", serde_json::to_string(entry)?);
        }
    } else {
        for entry in &entries {
            let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
            println!(
                "{}{} {} (p.{})",
                indent,
                entry.section_id.cyan(),
                entry.title,
                entry.page
            );
        }
        println!(
            "\n{} {} entries",
            "Done!".green().bold(),
            entries.len()
        );
    }
    Ok(())
}
