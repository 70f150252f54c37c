//! Repository maintenance tasks: `cargo run -p xtask -- <task>`

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sheihu_launcher::cli::Cli;

#[derive(Parser)]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Regenerate the CLI reference
    GenDocs {
        #[arg(long, default_value = "docs/cli/reference.md")]
        out: PathBuf,
    },
}

fn main() -> std::io::Result<()> {
    match Xtask::parse().task {
        Task::GenDocs { out } => {
            if let Some(dir) = out.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&out, clap_markdown::help_markdown::<Cli>())?;
            println!("Wrote {}", out.display());
        }
    }
    Ok(())
}
