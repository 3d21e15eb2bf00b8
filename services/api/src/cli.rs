use crate::render::{run_levels, run_report, run_summary};
use crate::server;
use ai_maturity::assessment::Variant;
use ai_maturity::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "AI Maturity Assessment",
    about = "Score hospital AI maturity surveys from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the maturity report for one submission
    Report(ReportArgs),
    /// Print the population summary across every submission
    Summary(DataArgs),
    /// Print the level reference table
    Levels(VariantArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct VariantArgs {
    /// Scoring variant (a: rescaled bands, b: percentage thresholds)
    #[arg(long)]
    pub(crate) variant: Option<Variant>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Survey CSV export; repeat to build a fallback chain
    #[arg(long = "csv")]
    pub(crate) csv: Vec<PathBuf>,
    #[command(flatten)]
    pub(crate) variant: VariantArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) data: DataArgs,
    /// Submission to report on; falls back to the population summary when absent
    #[arg(long)]
    pub(crate) submission_id: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Summary(args) => run_summary(args),
        Command::Levels(args) => run_levels(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_accepts_repeated_csv_and_variant() {
        let cli = Cli::try_parse_from([
            "ai-maturity-api",
            "report",
            "--csv",
            "primary.csv",
            "--csv",
            "backup.csv",
            "--variant",
            "b",
            "--submission-id",
            "42",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(
                    args.data.csv,
                    vec![PathBuf::from("primary.csv"), PathBuf::from("backup.csv")]
                );
                assert_eq!(args.data.variant.variant, Some(Variant::B));
                assert_eq!(args.submission_id.as_deref(), Some("42"));
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        let result = Cli::try_parse_from(["ai-maturity-api", "levels", "--variant", "c"]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["ai-maturity-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
