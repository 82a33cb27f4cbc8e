use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spamsurvey")]
#[command(
    version,
    about = "Cross-wiki contribution surveyor for spam and sockpuppet cleanup"
)]
struct Cli {
    /// Username to survey, without the User: prefix
    #[arg(required_unless_present_any = ["show_config", "show_config_paths"])]
    username: Option<String>,

    /// Category whose user-namespace members join the survey (recursive)
    category: Option<String>,

    #[arg(long, short, help = "Report output path (default: spam.txt)")]
    output: Option<PathBuf>,

    #[arg(long, short, help = "Explicit config file")]
    config: Option<PathBuf>,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,

    #[arg(long, help = "Print the effective configuration and exit")]
    show_config: bool,

    #[arg(long, help = "Print configuration file paths and exit")]
    show_config_paths: bool,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.show_config_paths {
        spamsurvey::cli::commands::config::paths()?;
        return Ok(());
    }

    if cli.show_config {
        spamsurvey::cli::commands::config::show(cli.config.as_deref())?;
        return Ok(());
    }

    // clap enforces this unless a --show-* flag short-circuited above
    let Some(username) = cli.username.as_deref() else {
        anyhow::bail!("a username is required (see --help)");
    };

    spamsurvey::cli::commands::survey::run(
        username,
        cli.category.as_deref(),
        cli.output.as_deref(),
        cli.config.as_deref(),
    )?;

    Ok(())
}
