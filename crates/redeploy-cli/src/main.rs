//! `redeploy` — update a deployed CloudFormation stack in place.
//!
//! Fetches the stack's current parameters, repackages build artifacts with
//! SAM, and redeploys, re-supplying every parameter explicitly so the
//! update never resets one to its template default. On failure of any
//! external invocation the process exits with that invocation's own exit
//! code.

use clap::Parser;
use tracing::{error, Level};

use redeploy_core::{init_tracing, run_update, StackUpdate, SystemRunner};

#[derive(Parser)]
#[command(name = "redeploy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Update a deployed CloudFormation stack, preserving its parameters", long_about = None)]
struct Cli {
    /// CloudFormation stack name used for your deployed developer portal
    #[arg(short = 'n', long)]
    stack_name: String,

    /// S3 bucket used to store build assets, passed to SAM
    #[arg(short = 'b', long)]
    s3_bucket: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let update = StackUpdate {
        stack_name: cli.stack_name,
        s3_bucket: cli.s3_bucket,
    };

    let runner = SystemRunner::new();
    if let Err(err) = run_update(&runner, &update) {
        error!(error = %err, "stack update failed");
        std::process::exit(err.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_short_flags() {
        let cli = Cli::try_parse_from(["redeploy", "-n", "demo", "-b", "assets"]).unwrap();
        assert_eq!(cli.stack_name, "demo");
        assert_eq!(cli.s3_bucket, "assets");
        assert!(!cli.verbose);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_accepts_long_flags() {
        let cli = Cli::try_parse_from([
            "redeploy",
            "--stack-name",
            "demo",
            "--s3-bucket",
            "assets",
            "--verbose",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.stack_name, "demo");
        assert_eq!(cli.s3_bucket, "assets");
        assert!(cli.verbose);
        assert!(cli.json);
    }

    #[test]
    fn test_cli_requires_stack_name_and_bucket() {
        assert!(Cli::try_parse_from(["redeploy"]).is_err());
        assert!(Cli::try_parse_from(["redeploy", "-n", "demo"]).is_err());
        assert!(Cli::try_parse_from(["redeploy", "-b", "assets"]).is_err());
    }
}
