//! CLI entry point for dirtree

use std::error::Error as StdError;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use dirtree::{EntryKind, Format, OutputConfig, TreeFormatter, TreeWalker, WalkerConfig};
use log::debug;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "List a directory tree and save its structure to an XML file")]
#[command(version)]
struct Args {
    /// Directory to list
    directory: PathBuf,

    /// List all files, including hidden files
    #[arg(short = 'a', long = "all")]
    all: bool,

    /// List directories only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// List files only
    #[arg(short = 'f', long = "files-only", conflicts_with = "dirs_only")]
    files_only: bool,

    /// Descend at most N levels below the directory
    #[arg(short = 'p', long = "max-depth", value_name = "N")]
    max_depth: Option<usize>,

    /// Print the full path of each entry
    #[arg(short = 't', long = "full-path")]
    full_path: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Format of the saved directory structure
    #[arg(long = "format", value_name = "FORMAT", default_value = "xml")]
    format: Format,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let root = std::fs::canonicalize(&args.directory).unwrap_or_else(|e| {
        eprintln!(
            "dirtree: cannot access '{}': {}",
            args.directory.display(),
            e
        );
        process::exit(1);
    });

    if let Err(e) = run(&args, root) {
        eprintln!("dirtree: {}", error_chain(e.as_ref()));
        process::exit(1);
    }
}

fn run(args: &Args, root: PathBuf) -> Result<(), Box<dyn StdError>> {
    let walker_config = WalkerConfig {
        show_all: args.all,
        kind: EntryKind::from_flags(args.dirs_only, args.files_only)?,
        max_depth: args.max_depth,
    };
    debug!("walking {} with {:?}", root.display(), walker_config);

    let tree = TreeWalker::new(walker_config).walk(&root)?;

    let formatter = TreeFormatter::new(OutputConfig {
        use_color: should_use_color(args.color),
        full_path: args.full_path,
    });
    formatter.print(&tree)?;

    let handler = args.format.handler();
    let output_file = handler.default_file(&std::env::current_dir()?);
    handler.save(&tree, &output_file)?;
    println!("Directory structure saved to {}", output_file.display());

    Ok(())
}

/// Join an error with its sources: "outer: inner: root cause".
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
