use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "protocfg",
    about = "protocfg — prototype-chained configuration, shown on a car fleet",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve and print every car's make, model and year
    Show(ShowArgs),
    /// Show each store's own entry count and resolved key set
    Keys(FleetArgs),
    /// List the registered configuration keys
    Registry,
}

#[derive(Args)]
pub struct FleetArgs {
    /// Make set on the company store and inherited by every car
    #[arg(long, default_value = "VW")]
    pub make: String,
    /// Make set locally on the Golf, overriding the company make
    #[arg(long)]
    pub golf_make: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub fleet: FleetArgs,
    /// Only show the car with this label (jetta, golf)
    #[arg(long)]
    pub car: Option<String>,
}
