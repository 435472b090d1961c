use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use aws_key_audit::commands;
use aws_key_audit::config::{ConfigOverrides, ReportConfig};

#[derive(Parser)]
#[command(name = "aws-key-audit")]
#[command(about = "Report IAM users with active access keys across AWS accounts", long_about = None)]
#[command(version)]
struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assume a role in each account and export active access keys to CSV
    Report {
        /// Target AWS account IDs (12 digits each)
        account_ids: Vec<String>,

        /// Role to assume in every account
        #[arg(long)]
        role_name: Option<String>,

        /// Output CSV file path [default: boto_credentials.csv]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON config file with accounts, role_name and other settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Session name passed to AssumeRole [default: AssumeRoleSession]
        #[arg(long)]
        session_name: Option<String>,

        /// Named AWS profile for the base identity
        #[arg(long)]
        profile: Option<String>,

        /// AWS region for API endpoints
        #[arg(long)]
        region: Option<String>,
    },

    /// Generate shell completion scripts
    GenerateCompletion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            account_ids,
            role_name,
            output,
            config,
            session_name,
            profile,
            region,
        } => {
            init_tracing(&cli.log_level);
            let overrides = ConfigOverrides {
                accounts: account_ids,
                role_name,
                report_name: output,
                session_name,
                profile,
                region,
            };
            let config = ReportConfig::resolve(config.as_deref(), overrides)?;
            commands::active_keys::run(&config).await
        }
        Commands::GenerateCompletion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "aws-key-audit", &mut std::io::stdout());
            Ok(())
        }
    }
}
