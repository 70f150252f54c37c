//! `sheihu export` command implementation

use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::operation::{OperationKind, OperationState, Parameters, SystemClock, Tracker};
use crate::runner;

pub const BUNDLE_NAME: &str = "SheihuLauncher_Portable.zip";

#[derive(Args)]
pub struct ExportArgs {
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: ExportArgs) -> Result<()> {
    let mut tracker = Tracker::new(SystemClock, config.schedule.build()?);
    let handle = tracker.start_kind(OperationKind::ExportBundle, Parameters::new())?;

    let json = args.json;
    tracker.subscribe(&handle, move |event| super::print_event(event, json))?;

    let state = runner::drive(&mut tracker, &handle, super::ctrl_c()).await?;
    tracker.dispose(&handle)?;

    if state != OperationState::Complete {
        bail!("Export {}", state);
    }
    if !json {
        println!();
        println!("✓ Application bundle '{}' generated", BUNDLE_NAME);
    }
    Ok(())
}
