use contiv_api::ContivClient;

use crate::cli::{GlobalOpts, PolicyArgs, PolicyCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &ContivClient,
    args: PolicyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PolicyCommand::Create { tenant, policy } => {
            let answer = client.create_policy(&tenant, &policy).await?;
            output::emit(global.output, &answer, global.quiet)
        }
        PolicyCommand::Delete { tenant, policy } => {
            client.delete_policy(&tenant, &policy).await?;
            output::status(&format!("Policy '{tenant}:{policy}' deleted"), global.quiet);
            Ok(())
        }
    }
}
