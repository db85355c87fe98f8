use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Telnyx account readiness probe CLI
#[derive(Parser, Debug)]
#[command(name = "telnyx-preflight")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TELNYX_PREFLIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Suppress progress indicators
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full probe suite against the Telnyx API
    Run(RunArgs),

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Validate a configuration file
    Validate(ValidateArgs),

    /// List the probes the suite runs, in order
    ListProbes,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Telnyx API key (bearer token)
    #[arg(long, env = "TELNYX_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Destination phone number for SMS/voice probes (E.164, e.g. +15551234567)
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Outbound number owned by the account, used as the SMS/voice sender
    #[arg(long, env = "TELNYX_FROM_NUMBER")]
    pub from_number: Option<String>,

    /// Override the Telnyx API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output format for the summary
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Human)]
    pub output: OutputFormatArg,

    /// Override the results file path
    #[arg(long)]
    pub results_file: Option<PathBuf>,

    /// Never prompt for missing values; fail instead
    #[arg(long, default_value_t = false)]
    pub non_interactive: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output path for the configuration file
    #[arg(short, long, default_value = "./telnyx-preflight.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(value_name = "CONFIG", default_value = "./telnyx-preflight.toml")]
    pub config: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum OutputFormatArg {
    #[default]
    Human,
    Json,
}

impl From<OutputFormatArg> for crate::config::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => crate::config::OutputFormat::Human,
            OutputFormatArg::Json => crate::config::OutputFormat::Json,
        }
    }
}
