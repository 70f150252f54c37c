//! `sheihu versions` command implementation

use anyhow::Result;
use clap::Args;

use crate::versions::{VersionCatalog, VersionFilter};

#[derive(Args)]
pub struct VersionsArgs {
    /// Which versions to show
    #[arg(long, value_enum, default_value_t = VersionFilter::All)]
    pub filter: VersionFilter,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: VersionsArgs) -> Result<()> {
    let catalog = VersionCatalog::default();
    let versions: Vec<_> = catalog.list(args.filter).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&versions)?);
        return Ok(());
    }

    if versions.is_empty() {
        println!("No versions match.");
        return Ok(());
    }

    println!("{:<12} {:<10} {:<12} STATUS", "VERSION", "TYPE", "RELEASED");
    for v in versions {
        println!(
            "{:<12} {:<10} {:<12} {}",
            v.id,
            v.kind.to_string(),
            v.release_time,
            v.status.to_string()
        );
    }
    Ok(())
}
