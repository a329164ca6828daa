mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use fin_analysis_core::FinAnalysisError;

use commands::amortization::AmortizationArgs;
use commands::lease::LeaseArgs;
use commands::tools::ToolsArgs;

/// Loan and lease amortization schedules with decimal precision
#[derive(Parser)]
#[command(
    name = "fina",
    version,
    about = "Loan and lease amortization schedules with decimal precision",
    long_about = "A CLI for building amortizing payment schedules for installment loans \
                  and leases with a residual value. Inputs come from flags, a JSON/YAML \
                  file, or piped stdin; the tool catalog is also served over JSON-RPC."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true, env = "FINA_OUTPUT")]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true, env = "FINA_LOG")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fully-amortizing loan schedule
    Amortization(AmortizationArgs),
    /// Build a lease schedule that amortizes down to a residual value
    Lease(LeaseArgs),
    /// List or call the analysis tools by name
    Tools(ToolsArgs),
    /// Serve line-delimited JSON-RPC requests on stdin/stdout
    Rpc,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortization(args) => commands::amortization::run_amortization(args),
        Commands::Lease(args) => commands::lease::run_lease(args),
        Commands::Tools(args) => commands::tools::run_tools(args),
        Commands::Rpc => match commands::rpc::serve_stdio() {
            Ok(()) => return,
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("fina {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            report_error(e.as_ref());
            process::exit(1);
        }
    }
}

fn report_error(e: &(dyn std::error::Error + 'static)) {
    match e.downcast_ref::<FinAnalysisError>().and_then(|fe| fe.issues()) {
        Some(issues) => {
            eprintln!("{}: invalid input", "error".red().bold());
            for issue in issues {
                eprintln!("  {} {} ({:?})", issue.path.bold(), issue.message, issue.code);
            }
        }
        None => eprintln!("{}: {}", "error".red().bold(), e),
    }
}
