use contiv_api::ContivClient;

use crate::cli::{GlobalOpts, GroupArgs, GroupCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &ContivClient,
    args: GroupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        GroupCommand::Create(spec) => {
            let answer = client
                .create_endpoint_group(&spec.tenant, &spec.network, &spec.group, &spec.policies)
                .await?;
            output::emit(global.output, &answer, global.quiet)
        }
        GroupCommand::Update(spec) => {
            let answer = client
                .update_endpoint_group(&spec.tenant, &spec.network, &spec.group, &spec.policies)
                .await?;
            output::emit(global.output, &answer, global.quiet)
        }
        GroupCommand::Delete { tenant, group } => {
            client.delete_endpoint_group(&tenant, &group).await?;
            output::status(
                &format!("Endpoint group '{tenant}:{group}' deleted"),
                global.quiet,
            );
            Ok(())
        }
    }
}
