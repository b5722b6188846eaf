//! booq - inspect and render e-book document trees

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use booq::io::{read_augmentations, read_nodes, write_json_to_writer};
use booq::{
    BooqPath, BooqRange, Error, FragmentConfig, NavigationMode, RenderOptions, Result,
    build_fragment_with_config, build_navigation, extract_toc, node_for_path, position_for_path,
    preview_for_path, render_nodes, text_for_range,
};

#[derive(Parser)]
#[command(name = "booq")]
#[command(version, about = "Inspect and render e-book document trees", long_about = None)]
#[command(after_help = "EXAMPLES:
    booq toc book.json                      List headings
    booq text book.json 3-0 --end 5         Text between two paths
    booq render book.json -a notes.json     Render with highlights
    booq nav book.json notes.json --full    Headings and notes in order")]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the table of contents as JSON
    Toc {
        /// Document JSON file
        document: PathBuf,
    },
    /// Print the node at a path as JSON
    Node { document: PathBuf, path: BooqPath },
    /// Print the text within a range
    Text {
        document: PathBuf,
        /// Range start (e.g. 3-0-2)
        start: BooqPath,
        /// Range end, exclusive (defaults to end of document)
        #[arg(long)]
        end: Option<BooqPath>,
    },
    /// Print a text snippet starting at a path
    Preview {
        document: PathBuf,
        path: BooqPath,
        /// Maximum number of characters
        #[arg(short, long, default_value_t = 120)]
        length: usize,
    },
    /// Print the position of a path
    Position { document: PathBuf, path: BooqPath },
    /// Print the fragment holding a path as JSON
    Fragment {
        document: PathBuf,
        path: BooqPath,
        /// Target chunk size in characters
        #[arg(long, default_value_t = booq::DEFAULT_CHUNK_LENGTH)]
        chunk_length: usize,
    },
    /// Render the document (or a range of it) as JSON
    Render {
        document: PathBuf,
        /// Augmentations JSON file
        #[arg(short, long)]
        augmentations: Option<PathBuf>,
        /// Displayed range start
        #[arg(long)]
        start: Option<BooqPath>,
        /// Displayed range end, exclusive
        #[arg(long)]
        end: Option<BooqPath>,
    },
    /// Print navigation nodes for a set of annotations as JSON
    Nav {
        document: PathBuf,
        /// Annotations JSON file (augmentation format)
        annotations: PathBuf,
        /// Emit every heading and annotation instead of grouped annotations
        #[arg(long)]
        full: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Toc { document } => {
            let nodes = load(&document)?;
            print_json(&extract_toc(&nodes))
        }
        Command::Node { document, path } => {
            let nodes = load(&document)?;
            let node =
                node_for_path(&nodes, &path).ok_or_else(|| Error::PathNotFound(path.to_string()))?;
            print_json(node)
        }
        Command::Text {
            document,
            start,
            end,
        } => {
            let nodes = load(&document)?;
            let text = text_for_range(&nodes, &BooqRange { start, end });
            print_line(&text)
        }
        Command::Preview {
            document,
            path,
            length,
        } => {
            let nodes = load(&document)?;
            print_line(&preview_for_path(&nodes, &path, Some(length)))
        }
        Command::Position { document, path } => {
            let nodes = load(&document)?;
            print_line(&position_for_path(&nodes, &path).to_string())
        }
        Command::Fragment {
            document,
            path,
            chunk_length,
        } => {
            let nodes = load(&document)?;
            let config = FragmentConfig::new().with_chunk_length(chunk_length);
            print_json(&build_fragment_with_config(&nodes, &path, &config))
        }
        Command::Render {
            document,
            augmentations,
            start,
            end,
        } => {
            let nodes = load(&document)?;
            let augmentations = match augmentations {
                Some(path) => read_augmentations(path)?,
                None => Vec::new(),
            };
            let range = BooqRange {
                start: start.unwrap_or_default(),
                end,
            };
            info!(augmentations = augmentations.len(), "rendering {}", document.display());
            let options = RenderOptions::new()
                .with_range(range)
                .with_augmentations(augmentations);
            print_json(&render_nodes(&nodes, &options))
        }
        Command::Nav {
            document,
            annotations,
            full,
        } => {
            let nodes = load(&document)?;
            let annotations = read_augmentations(annotations)?;
            let toc = extract_toc(&nodes);
            let mode = if full {
                NavigationMode::Full
            } else {
                NavigationMode::Annotations
            };
            print_json(&build_navigation(&toc, &annotations, mode))
        }
    }
}

fn load(path: &Path) -> Result<Vec<booq::BooqNode>> {
    let nodes = read_nodes(path)?;
    info!(nodes = nodes.len(), "loaded {}", path.display());
    Ok(nodes)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_json_to_writer(value, &mut stdout)?;
    writeln!(stdout)?;
    Ok(())
}

fn print_line(text: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
