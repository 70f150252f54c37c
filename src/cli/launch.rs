//! `sheihu launch` command implementation

use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::operation::{OperationKind, OperationState, SystemClock, Tracker};
use crate::runner;
use crate::session::{LaunchRequest, Session};

#[derive(Args)]
pub struct LaunchArgs {
    /// Game version to boot
    #[arg(default_value = "1.20.1")]
    pub version: String,

    /// JVM memory ceiling (overrides java.max_ram)
    #[arg(long)]
    pub max_ram: Option<String>,

    /// Profile name for the simulated sign-in
    #[arg(long, conflicts_with = "guest")]
    pub user: Option<String>,

    /// Launch without signing in
    #[arg(long)]
    pub guest: bool,

    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(config: &Config, args: LaunchArgs) -> Result<()> {
    let session = if args.guest {
        Session::signed_out()
    } else {
        match &args.user {
            Some(name) => Session::offline_as(name),
            None => Session::offline(),
        }
    };

    let mut java = config.java.clone();
    if let Some(max_ram) = args.max_ram {
        java.max_ram = max_ram;
    }

    let parameters = LaunchRequest {
        version: &args.version,
        java: &java,
        session: &session,
    }
    .parameters()?;

    let mut tracker = Tracker::new(SystemClock, config.schedule.build()?);
    let handle = tracker.start_kind(OperationKind::LaunchSequence, parameters)?;

    let json = args.json;
    tracker.subscribe(&handle, move |event| super::print_event(event, json))?;

    let state = runner::drive(&mut tracker, &handle, super::ctrl_c()).await?;
    tracker.dispose(&handle)?;

    match state {
        OperationState::Complete => {
            if !json {
                println!();
                println!("✓ Minecraft {} is running (JVM memory {})", args.version, java.max_ram);
            }
            Ok(())
        }
        other => bail!("Launch of {} {}", args.version, other),
    }
}
