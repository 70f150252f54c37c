//! `sheihu mods` and `sheihu chat` command implementations

use anyhow::Result;
use clap::Args;

use crate::assistant::{self, GeminiClient};
use crate::config::Config;

#[derive(Args)]
pub struct ModsArgs {
    /// Theme to base the suggestions on (e.g. "tech", "performance")
    pub theme: String,
}

#[derive(Args)]
pub struct ChatArgs {
    /// Message for the assistant
    pub message: String,
}

pub async fn run_mods(config: &Config, args: ModsArgs) -> Result<()> {
    let client = GeminiClient::from_env(&config.assistant)?;
    let mods = assistant::suggest_mods(&client, &args.theme).await?;

    if mods.is_empty() {
        println!("No suggestions for '{}'.", args.theme);
        return Ok(());
    }
    for m in mods {
        println!("• {} [{}]", m.name, m.category);
        println!("  {}", m.description);
        println!("  Why: {}", m.reason);
    }
    Ok(())
}

pub async fn run_chat(config: &Config, args: ChatArgs) -> Result<()> {
    let client = GeminiClient::from_env(&config.assistant)?;
    let reply = assistant::chat(&client, &[], &args.message).await?;
    println!("{}", reply);
    Ok(())
}
