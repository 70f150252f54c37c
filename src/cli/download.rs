//! `sheihu download` command implementation

use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::operation::{OperationKind, OperationState, SystemClock, Tracker};
use crate::runner;
use crate::session::download_parameters;
use crate::versions::VersionCatalog;

#[derive(Args)]
pub struct DownloadArgs {
    /// Version id (e.g. 1.20.4, 23w45a). Unlisted ids are fetched first.
    pub id: String,

    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: DownloadArgs) -> Result<()> {
    let mut catalog = VersionCatalog::default();
    let id = args.id.trim().to_string();

    if catalog.get(&id).is_none() {
        let added = catalog.add(&id)?;
        if !args.json {
            println!("Fetched {} ({})", added.id, added.kind);
        }
    }
    catalog.begin_download(&id)?;

    let mut tracker = Tracker::new(SystemClock, config.schedule.build()?);
    let handle = tracker.start_kind(OperationKind::Download, download_parameters(&id))?;

    let json = args.json;
    tracker.subscribe(&handle, move |event| super::print_event(event, json))?;

    let state = runner::drive(&mut tracker, &handle, super::ctrl_c()).await?;
    tracker.dispose(&handle)?;

    let status = catalog.finish_download(&id, state)?;
    tracing::info!(version = %id, %status, "Download finished");

    if state != OperationState::Complete {
        bail!("Download of {} {}", id, state);
    }
    if !json {
        println!();
        println!("✓ Installed {}", id);
    }
    Ok(())
}
