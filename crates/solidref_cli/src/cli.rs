//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use solidref_core::ExampleKind;

#[derive(Parser, Debug)]
#[clap(
    name = "solidref",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query the SOLID principles reference corpus: definitions, examples and citations."
)]
pub(crate) struct Cli {
    #[clap(flatten)]
    pub global: GlobalArgs,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub(crate) struct GlobalArgs {
    /// Absolute directory of Markdown documents to load instead of the embedded corpus.
    #[clap(long, global = true, env = "SOLIDREF_CORPUS_DIR")]
    pub corpus_dir: Option<String>,
    /// Document variant used for citation lookups (e.g. `readme`, `readme-v2`).
    #[clap(long, global = true, env = "SOLIDREF_VARIANT")]
    pub variant: Option<String>,
    /// Log level: trace|debug|info|warn|error. Requires `--log-dir`.
    #[clap(long, global = true, env = "SOLIDREF_LOG_LEVEL", requires = "log_dir")]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files. Logging is off when unset.
    #[clap(long, global = true, env = "SOLIDREF_LOG_DIR")]
    pub log_dir: Option<String>,
    /// Print results as JSON.
    #[clap(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print core linkage and version.
    Ping,
    /// List the five principles in canonical order.
    List,
    /// Show one principle's definition, goal and benefits.
    Show {
        /// Principle acronym (SRP, OCP, LSP, ISP, DIP).
        id: String,
    },
    /// Show violation/adherence examples for one principle.
    Examples {
        id: String,
        /// Only show examples of this kind.
        #[clap(long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Resolve a citation marker to its URL.
    Cite { marker: u32 },
    /// List citations referenced by one principle and its examples.
    Citations { id: String },
    /// List document variants and their titles.
    Variants,
    /// Full-text search over principles and examples.
    Search {
        #[clap(required = true)]
        terms: Vec<String>,
        /// Restrict hits to one principle.
        #[clap(long)]
        principle: Option<String>,
        #[clap(long)]
        limit: Option<u32>,
        /// Treat the terms as a raw FTS5 expression.
        #[clap(long)]
        raw: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub(crate) enum KindArg {
    Violation,
    Adherence,
}

impl From<KindArg> for ExampleKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Violation => ExampleKind::Violation,
            KindArg::Adherence => ExampleKind::Adherence,
        }
    }
}
