use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xmlsame")]
#[command(about = "Compare XML documents for identity and similarity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Compare two XML documents and report their differences.
    Diff(DiffArgs),
    /// Show the parsed structure of a single XML document.
    Inspect(InspectArgs),
    /// Apply pre-comparison filters to a document and re-serialize it.
    Normalize(NormalizeArgs),
}

#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// The baseline document.
    pub control: PathBuf,
    /// The document compared against the baseline.
    pub test: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Stop at the first breaking difference instead of listing them all.
    #[arg(long)]
    pub fail_fast: bool,
    /// Trim text nodes and drop whitespace-only ones before comparing.
    #[arg(long)]
    pub ignore_whitespace: bool,
    /// Strip comment nodes before comparing.
    #[arg(long)]
    pub ignore_comments: bool,
    /// Skip the attribute order check.
    #[arg(long)]
    pub ignore_attr_order: bool,
    /// Treat CDATA sections and text nodes as fully interchangeable.
    #[arg(long)]
    pub cdata_as_text: bool,
    /// Treat reordered (but matched) siblings as similar, not different.
    #[arg(long)]
    pub reorder_similar: bool,
    /// Match same-named sibling elements by the value of this attribute.
    /// May be given more than once.
    #[arg(long = "key-attr")]
    pub key_attrs: Vec<String>,
    /// Print the summary line only.
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    /// Maximum depth of the printed tree.
    #[arg(long, default_value_t = 6)]
    pub depth: usize,
}

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    pub file: PathBuf,
    /// Remove comment nodes.
    #[arg(long)]
    pub strip_comments: bool,
    /// Trim text nodes and drop whitespace-only ones.
    #[arg(long)]
    pub trim_text: bool,
    /// Write the result here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
