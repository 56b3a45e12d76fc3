use contiv_api::{ContivClient, Encap, NetworkSpec};

use crate::cli::{EncapArg, GlobalOpts, NetworkArgs, NetworkCommand};
use crate::error::CliError;
use crate::output;

impl From<EncapArg> for Encap {
    fn from(arg: EncapArg) -> Self {
        match arg {
            EncapArg::Vxlan => Self::Vxlan,
            EncapArg::Vlan => Self::Vlan,
        }
    }
}

pub async fn handle(
    client: &ContivClient,
    args: NetworkArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworkCommand::Create {
            tenant,
            name,
            encap,
            nw_type,
            gateway,
            subnet,
        } => {
            let mut spec = NetworkSpec::for_tenant(&tenant, gateway, subnet);
            spec.encap = encap.into();
            spec.nw_type = nw_type;
            if let Some(name) = name {
                spec.network_name = name;
            }

            let answer = client.create_network(&tenant, &spec).await?;
            output::emit(global.output, &answer, global.quiet)
        }
        NetworkCommand::Delete { tenant } => {
            client.delete_network(&tenant).await?;
            output::status(
                &format!("Network of tenant '{tenant}' deleted"),
                global.quiet,
            );
            Ok(())
        }
    }
}
