//! Command dispatch.

pub mod config_cmd;
pub mod default_gateway;
pub mod gateways;
pub mod interfaces;
pub mod util;
pub mod vlans;

use pfsense_api::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route an appliance command to its handler.
pub async fn dispatch(cmd: Command, client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Interfaces(args) => interfaces::handle(client, args, global).await,
        Command::Vlans(args) => vlans::handle(client, args, global).await,
        Command::Gateways(args) => gateways::handle(client, args, global).await,
        Command::DefaultGateway(args) => default_gateway::handle(client, args, global).await,
        // Config and Completions are handled before a client is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
