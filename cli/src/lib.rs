use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod gml;

pub use gml::GmlArgs;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Gml(args) => gml::run(args),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "n2g",
    bin_name = "n2g",
    version,
    about = "Netlist to graph exporter",
    long_about = None,
    arg_required_else_help = true,
    disable_help_subcommand = true,
    subcommand_required = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Write a GML multigraph of a Yosys JSON netlist")]
    Gml(gml::GmlArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
