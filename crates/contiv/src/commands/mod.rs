//! Command dispatch: bridges CLI args to client calls and output formatting.

pub mod config_cmd;
pub mod groups;
pub mod login;
pub mod networks;
pub mod policies;
pub mod provision;
pub mod rules;
pub mod tenants;

use contiv_api::ContivClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &ContivClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Tenant(args) => tenants::handle(client, args, global).await,
        Command::Network(args) => networks::handle(client, args, global).await,
        Command::Policy(args) => policies::handle(client, args, global).await,
        Command::Rule(args) => rules::handle(client, args, global).await,
        Command::Group(args) => groups::handle(client, args, global).await,
        Command::Provision(args) => provision::handle(client, args, global).await,
        // Login, Config and Completions are handled before dispatch
        Command::Login | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
