use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::granularity::Granularity;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute throughput, cumulative flow, cycle/lead time and SLA metrics
    Metrics {
        #[command(flatten)]
        query: QueryArgs,
    },
    /// Forecast velocity from the resolved tickets' history
    Forecast {
        #[command(flatten)]
        query: QueryArgs,
        /// Number of future periods to forecast
        #[arg(long)]
        horizon: Option<usize>,
        /// Sprint length in days
        #[arg(long)]
        sprint_length: Option<u32>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Ticket YAML or JSON file
    #[arg(short, long)]
    pub tickets: String,
    /// Output file (.json, .yaml or .yml)
    #[arg(short, long)]
    pub output: String,
    /// Optional engine config YAML
    #[arg(short, long)]
    pub config: Option<String>,
    /// First day of the queried range (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// Last day of the queried range (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub end_date: Option<String>,
    /// Bucket size: day, week, month or year
    #[arg(short, long)]
    pub granularity: Option<Granularity>,
    /// Only tickets of this project
    #[arg(long)]
    pub project: Option<String>,
    /// Only tickets assigned to this user
    #[arg(long)]
    pub assignee: Option<String>,
    /// Only tickets currently in this status
    #[arg(long)]
    pub status: Option<String>,
    /// Only tickets of this customer
    #[arg(long)]
    pub customer: Option<String>,
    /// Only tickets carrying this label
    #[arg(long)]
    pub label: Option<String>,
}
