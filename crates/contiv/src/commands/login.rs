use serde_json::json;
use tracing::info;

use contiv_api::ContivClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Log in explicitly. Unlike other commands, a rejected login is an error
/// here. The token itself is never printed.
pub async fn handle(client: &ContivClient, global: &GlobalOpts) -> Result<(), CliError> {
    client.login().await?;
    info!(url = %client.base_url(), "token issued");

    let summary = json!({
        "controller": client.base_url().as_str(),
        "user": client.username(),
        "authenticated": client.has_token(),
    });
    output::emit(global.output, &summary, global.quiet)
}
