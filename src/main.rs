//! B12 application submission CLI
//!
//! Entry point for the `b12-apply` command-line tool. Zero-argument
//! invocation is the normal CI path; every flag is an explicit override
//! on top of the environment.

use clap::Parser;
use std::process;

use b12_apply::config::{Overrides, ResolvedConfig};
use b12_apply::pipeline::{self, PipelineResult};

#[derive(Parser)]
#[command(name = "b12-apply")]
#[command(about = "Submit a signed application to B12", version)]
struct Cli {
    /// Applicant name (overrides APPLICANT_NAME)
    #[arg(long)]
    name: Option<String>,

    /// Applicant email (overrides APPLICANT_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// Resume URL (overrides RESUME_LINK)
    #[arg(long)]
    resume_link: Option<String>,

    /// Repository URL (overrides GITHUB_REPOSITORY_URL and derived values)
    #[arg(long)]
    repository_link: Option<String>,

    /// CI run URL (overrides the value derived from GITHUB_RUN_ID)
    #[arg(long)]
    action_run_link: Option<String>,

    /// Submission endpoint URL (overrides B12_ENDPOINT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides B12_TIMEOUT_SECONDS)
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the signed payload without submitting
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_cli(cli: Cli) -> PipelineResult<()> {
    let overrides = Overrides {
        name: cli.name,
        email: cli.email,
        resume_link: cli.resume_link,
        repository_link: cli.repository_link,
        action_run_link: cli.action_run_link,
        endpoint: cli.endpoint,
        timeout_seconds: cli.timeout,
    };
    let config = ResolvedConfig::from_env(&overrides)?;

    if cli.dry_run {
        pipeline::dry_run(&config)
    } else {
        pipeline::run(&config).map(|_| ())
    }
}
