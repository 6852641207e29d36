//! untract CLI - flatten document-analysis output

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use untract::{
    flatten_part, parse_part, BlockType, FsStore, JsonFormat, ProcessOptions, Processor,
    QueryConfig, VendorMatcher,
};

#[derive(Parser)]
#[command(name = "untract")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Flatten document-analysis output into fields and line items", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten one raw part file into its output object
    Flatten {
        /// Input part JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Document file name fed to the reference deriver
        #[arg(long, value_name = "NAME")]
        doc_ref: Option<String>,
    },

    /// Process every part of a document against a local store
    Process {
        /// Store root directory
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Canonical document file name
        #[arg(short, long, value_name = "NAME")]
        file_name: String,

        /// Document classification (storage sub-prefix)
        #[arg(short, long, value_name = "CLASS")]
        classification: String,

        /// Prefix part files are read from
        #[arg(long, default_value = "raw")]
        raw_prefix: String,

        /// Prefix output objects are written to
        #[arg(long, default_value = "processed")]
        processed_prefix: String,
    },

    /// Show part information (block counts, queries, tables)
    Info {
        /// Input part JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Resolve the vendor and query set for a file name
    Vendor {
        /// Incoming file name to match
        #[arg(value_name = "NAME")]
        name: String,

        /// Vendor rule file (JSON array of {pattern, vendor})
        #[arg(short, long, value_name = "FILE")]
        mapping: PathBuf,

        /// Query configuration file (JSON map vendor -> queries)
        #[arg(short, long, value_name = "FILE")]
        queries: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Flatten {
            input,
            output,
            compact,
            doc_ref,
        } => cmd_flatten(&input, output.as_deref(), compact, doc_ref.as_deref()),
        Commands::Process {
            root,
            file_name,
            classification,
            raw_prefix,
            processed_prefix,
        } => cmd_process(
            &root,
            &file_name,
            &classification,
            &raw_prefix,
            &processed_prefix,
        ),
        Commands::Info { input } => cmd_info(&input),
        Commands::Vendor {
            name,
            mapping,
            queries,
        } => cmd_vendor(&name, &mapping, queries.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_flatten(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    doc_ref: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let file_name = doc_ref
        .map(str::to_string)
        .unwrap_or_else(|| input.file_stem().unwrap_or_default().to_string_lossy().into_owned());

    log::debug!("flattening {} as {:?}", input.display(), file_name);
    let part = flatten_part(&bytes, &file_name)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = part.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_process(
    root: &Path,
    file_name: &str,
    classification: &str,
    raw_prefix: &str,
    processed_prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = FsStore::new(root);
    let options = ProcessOptions::new()
        .with_raw_prefix(raw_prefix)
        .with_processed_prefix(processed_prefix);
    let processor = Processor::with_options(&store, options);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {}...", file_name));

    let written = processor.process_document(file_name, classification)?;
    pb.finish_and_clear();

    println!(
        "{} {} output object(s)",
        "Wrote".green().bold(),
        written.len()
    );
    for (i, key) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() {
            "└─"
        } else {
            "├─"
        };
        println!("  {} {}", branch.dimmed(), key);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let result = parse_part(&bytes)?;

    println!("{}", "Part Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Blocks".bold(), result.blocks.len());
    for block_type in [
        BlockType::Page,
        BlockType::Line,
        BlockType::Word,
        BlockType::Table,
        BlockType::Cell,
        BlockType::SelectionElement,
        BlockType::Query,
        BlockType::QueryResult,
    ] {
        let count = result.count_of(block_type);
        if count > 0 {
            println!("  {} {:?}: {}", "├─".dimmed(), block_type, count);
        }
    }

    let flattened = untract::flatten_blocks(&result.blocks);

    println!();
    println!("{}", "Extraction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Resolved queries".bold(), flattened.fields.len());
    for (alias, entry) in &flattened.fields {
        println!(
            "  {} {} ({})",
            "├─".dimmed(),
            alias,
            if entry.confidence.is_empty() {
                "no confidence"
            } else {
                &entry.confidence
            }
        );
    }
    println!("{}: {}", "Line items".bold(), flattened.line_items.len());

    Ok(())
}

fn cmd_vendor(
    name: &str,
    mapping: &Path,
    queries: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let matcher = VendorMatcher::from_json(&fs::read(mapping)?)?;
    let vendor = matcher.match_file(name);

    println!("{}: {}", "Vendor".bold(), vendor.green());

    if let Some(path) = queries {
        let config = QueryConfig::from_json(&fs::read(path)?)?;
        let specs = config.queries_for(vendor);
        println!("{}: {}", "Queries".bold(), specs.len());
        for spec in specs {
            println!("  {} {}: {}", "├─".dimmed(), spec.alias, spec.text);
        }
    }

    Ok(())
}
