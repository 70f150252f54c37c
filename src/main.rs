//! Sheihu Launcher CLI

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use sheihu_launcher::cli::{self, Cli, Commands};
use sheihu_launcher::config::Config;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHEIHU_LOG").unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "sheihu", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Launch(args) => cli::launch::run(&config, args).await,
        Commands::Download(args) => cli::download::run(&config, args).await,
        Commands::Versions(args) => cli::versions::run(args),
        Commands::Servers(args) => cli::servers::run(args),
        Commands::Export(args) => cli::export::run(&config, args).await,
        Commands::Mods(args) => cli::assistant::run_mods(&config, args).await,
        Commands::Chat(args) => cli::assistant::run_chat(&config, args).await,
        Commands::Completions { .. } => Ok(()),
    }
}
