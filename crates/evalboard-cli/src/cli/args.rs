use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "evalboard",
    version,
    about = "Chatbot evaluation metrics and knowledge-base files from the dashboard backend"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score time series for one chatbot
    Metrics(MetricsArgs),
    /// File catalog of a knowledge base
    Kb(KbArgs),
    /// List the configured scores
    Scores(ScoresArgs),
    /// Write a sample score config
    Init(InitArgs),
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base url
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log filter, e.g. `info` or `evalboard_core=debug`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreConfigArgs {
    /// Score config (JSON or YAML with a `scores` list)
    #[arg(long)]
    pub scores: Option<PathBuf>,

    /// Reject unknown keys in the score config
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct MetricsArgs {
    /// Chatbot name; without it the empty series are printed
    #[arg(long)]
    pub chatbot: Option<String>,

    /// Fetch the chatbot listing and the run history at the same time
    #[arg(long)]
    pub concurrent: bool,

    #[command(flatten)]
    pub config: ScoreConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct KbArgs {
    /// Knowledge base id
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ScoresArgs {
    #[command(flatten)]
    pub config: ScoreConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, default_value = evalboard_core::config::DEFAULT_SCORES_PATH)]
    pub scores: PathBuf,
}
