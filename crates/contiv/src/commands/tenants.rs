use contiv_api::ContivClient;

use crate::cli::{GlobalOpts, TenantArgs, TenantCommand};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    client: &ContivClient,
    args: TenantArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TenantCommand::Create { tenant } => {
            let answer = client.create_tenant(&tenant).await?;
            output::emit(global.output, &answer, global.quiet)
        }
        TenantCommand::Delete { tenant } => {
            client.delete_tenant(&tenant).await?;
            output::status(&format!("Tenant '{tenant}' deleted"), global.quiet);
            Ok(())
        }
    }
}
