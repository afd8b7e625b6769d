//! cutlist-convert - CLI tool to convert cut-list exports to saw cut lists.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutlist_convert_rs::config::{DEFAULT_MAX_OCCURRENCES_PER_LINE, DEFAULT_OUTPUT_DIR};
use cutlist_convert_rs::parser::{collect_dat_files, InputFilter};
use cutlist_convert_rs::{
    build_tree, combine, convert_dat_file, generate_master_csv, generate_tiger, Conversion,
    ConvertConfig, ConvertError, TigerSettings, TracingSink,
};

/// Convert cabinet cut-list exports (.dat) to length-stop saw cut lists (.tiger).
#[derive(Parser, Debug)]
#[command(name = "cutlist-convert")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input export files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory, or - to print the cut lists to stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Maximum room/cabinet occurrences per saw line item
    #[arg(short, long = "max-per-line", default_value_t = DEFAULT_MAX_OCCURRENCES_PER_LINE)]
    max_per_line: usize,

    /// Don't split long line items
    #[arg(short = 's', long, alias = "nosplit")]
    no_split: bool,

    /// Use the note column
    #[arg(short, long)]
    extra: bool,

    /// Directories to skip when scanning inputs (the output directory is always skipped)
    #[arg(short = 'i', long = "ignore")]
    ignore: Vec<PathBuf>,

    /// Skip inputs whose full path contains this text
    #[arg(short = 'I', long = "IGNORE")]
    ignore_text: Vec<String>,

    /// Print output file names only, don't write anything
    #[arg(short, long, alias = "namesonly")]
    names_only: bool,

    /// Print the room/cabinet tree for each input
    #[arg(long)]
    tree: bool,

    /// Group the tree by thickness first
    #[arg(long)]
    width_first: bool,

    /// Write a consolidated master cut list to this path
    #[arg(long)]
    master: Option<PathBuf>,

    /// Output debug information as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ConvertConfig::new(args.max_per_line)
        .with_split(!args.no_split)
        .with_extra_data(args.extra);

    let to_stdout = args.output.as_os_str() == "-";

    let mut ignore_dirs = args.ignore.clone();
    if !to_stdout {
        ignore_dirs.push(args.output.clone());
    }
    let filter = InputFilter::new()
        .with_ignored_dirs(ignore_dirs)
        .with_ignored_text(args.ignore_text.clone());

    let files = collect_dat_files(&args.inputs, &filter).context("Failed to collect inputs")?;
    if files.is_empty() {
        anyhow::bail!("No .dat files found");
    }
    info!("Found {} export file(s)", files.len());

    let mut sink = TracingSink;
    let mut conversions = Vec::new();
    let mut failed = 0;
    for path in &files {
        info!("Processing: {}", path.display());
        match convert_dat_file(path, &config, &mut sink) {
            Ok(conversion) => conversions.push(conversion),
            Err(err @ ConvertError::Split(_)) => {
                return Err(err).context("Invalid configuration");
            }
            Err(err) => {
                error!("{}: {}", path.display(), err);
                failed += 1;
            }
        }
    }

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&conversions)?;
        println!("{}", json);
        return finish(&conversions, failed);
    }

    if args.tree {
        for conversion in &conversions {
            println!("{}", conversion.batch.source);
            let tree = build_tree(conversion.batch.cut_list(), args.width_first);
            print!("{}", tree.render());
        }
    }

    if args.names_only {
        for conversion in &conversions {
            for width_file in &conversion.width_files {
                if to_stdout {
                    println!("{}", width_file.file_name);
                } else {
                    println!("{}", args.output.join(&width_file.file_name).display());
                }
            }
        }
        return finish(&conversions, failed);
    }

    if !to_stdout {
        fs::create_dir_all(&args.output)
            .with_context(|| format!("Failed to create {}", args.output.display()))?;
    }

    let settings = TigerSettings::default();
    for conversion in &conversions {
        for width_file in &conversion.width_files {
            let xml = generate_tiger(width_file, &settings, config.use_extra_data)
                .with_context(|| format!("Failed to generate {}", width_file.file_name))?;
            if to_stdout {
                info!("Printing: {}", width_file.file_name);
                print!("{}", xml);
                continue;
            }
            let output_path = available_path(&args.output.join(&width_file.file_name));
            fs::write(&output_path, &xml)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Generated: {}", output_path.display());
        }
    }

    if let Some(master_path) = &args.master {
        let combined = combine(
            conversions
                .iter()
                .flat_map(|c| c.width_files.iter())
                .flat_map(|w| w.records.iter()),
        );
        let csv = generate_master_csv(&combined, config.use_extra_data)?;
        let master_path = available_path(master_path);
        fs::write(&master_path, csv)
            .with_context(|| format!("Failed to write {}", master_path.display()))?;
        info!("Generated: {} ({} parts)", master_path.display(), combined.len());
    }

    finish(&conversions, failed)
}

/// Report totals and fail if any row or file was rejected.
fn finish(conversions: &[Conversion], failed: usize) -> Result<()> {
    let rejected: usize = conversions.iter().map(|c| c.batch.rejected.len()).sum();
    let mismatches: usize = conversions.iter().map(|c| c.batch.mismatches).sum();

    if mismatches > 0 {
        warn!("{} record(s) with mismatched quantities", mismatches);
    }
    if failed > 0 {
        anyhow::bail!("{} file(s) failed", failed);
    }
    if rejected > 0 {
        anyhow::bail!("{} row(s) rejected", rejected);
    }

    Ok(())
}

/// Find a path that doesn't exist yet by appending ` (n)` to the stem.
fn available_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = path.extension().and_then(|e| e.to_str());

    (1..)
        .map(|n| {
            let name = match extension {
                Some(ext) => format!("{} ({}).{}", stem, n, ext),
                None => format!("{} ({})", stem, n),
            };
            path.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
