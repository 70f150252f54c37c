//! `sheihu servers` command implementation

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::servers::{Server, ServerList};

#[derive(Args)]
pub struct ServersArgs {
    #[command(subcommand)]
    pub command: Option<ServersCommand>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum ServersCommand {
    /// List saved servers (default)
    List,

    /// Add a server
    Add {
        /// Display name
        name: String,
        /// Server address (e.g. play.server.com)
        ip: String,
    },

    /// Remove a server by id
    #[command(alias = "rm")]
    Remove {
        /// Server id as shown by `sheihu servers`
        id: String,
    },
}

pub fn run(args: ServersArgs) -> Result<()> {
    let mut list = ServerList::default();

    match args.command.unwrap_or(ServersCommand::List) {
        ServersCommand::List => {}
        ServersCommand::Add { name, ip } => {
            let server = list.add(&name, &ip)?;
            if !args.json {
                println!("✓ Added {} ({}) as {}", server.name, server.ip, server.id);
                println!();
            }
        }
        ServersCommand::Remove { id } => {
            let server = list.remove(&id)?;
            if !args.json {
                println!("✓ Removed {} ({})", server.name, server.ip);
                println!();
            }
        }
    }

    print_list(&list, args.json)
}

fn print_list(list: &ServerList, json: bool) -> Result<()> {
    let servers: Vec<&Server> = list.iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&servers)?);
        return Ok(());
    }

    if servers.is_empty() {
        println!("No servers saved.");
        return Ok(());
    }

    println!("{:<34} {:<20} ADDRESS", "ID", "NAME");
    for s in servers {
        println!("{:<34} {:<20} {}", s.id, s.name, s.ip);
    }
    Ok(())
}
