use contiv_api::{ContivClient, RuleAction, RuleDirection, RuleProtocol, RuleSpec, RuleTarget};

use crate::cli::{
    ActionArg, DirectionArg, GlobalOpts, ProtocolArg, RuleArgs, RuleCommand, RuleCreateArgs,
    RuleTargetArgs,
};
use crate::error::CliError;
use crate::output;

impl From<ActionArg> for RuleAction {
    fn from(arg: ActionArg) -> Self {
        match arg {
            ActionArg::Allow => Self::Allow,
            ActionArg::Deny => Self::Deny,
        }
    }
}

impl From<DirectionArg> for RuleDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::In => Self::In,
            DirectionArg::Out => Self::Out,
        }
    }
}

impl From<ProtocolArg> for RuleProtocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Tcp => Self::Tcp,
            ProtocolArg::Udp => Self::Udp,
            ProtocolArg::Icmp => Self::Icmp,
        }
    }
}

impl TryFrom<RuleTargetArgs> for RuleTarget {
    type Error = CliError;

    fn try_from(args: RuleTargetArgs) -> Result<Self, Self::Error> {
        match (args.to_group, args.to_network, args.to_ip) {
            (Some(group), None, None) => Ok(Self::EndpointGroup(group)),
            (None, Some(network), None) => Ok(Self::Network(network)),
            (None, None, Some(ip)) => Ok(Self::IpAddress(ip)),
            _ => Err(CliError::Validation {
                field: "target".into(),
                reason: "exactly one of --to-group, --to-network, --to-ip is required".into(),
            }),
        }
    }
}

fn rule_spec(args: RuleCreateArgs) -> Result<RuleSpec, CliError> {
    Ok(RuleSpec {
        rule_id: args.rule_id,
        priority: args.priority,
        action: args.action.into(),
        direction: args.direction.into(),
        protocol: args.protocol.into(),
        port: args.port,
        target: args.target.try_into()?,
    })
}

pub async fn handle(
    client: &ContivClient,
    args: RuleArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RuleCommand::Create(args) => {
            let tenant = args.tenant.clone();
            let policy = args.policy.clone();
            let spec = rule_spec(args)?;

            let answer = client.create_rule(&tenant, &policy, &spec).await?;
            output::emit(global.output, &answer, global.quiet)
        }
        RuleCommand::Delete {
            tenant,
            policy,
            rule_id,
        } => {
            client.delete_rule(&tenant, &policy, &rule_id).await?;
            output::status(
                &format!("Rule '{tenant}:{policy}:{rule_id}' deleted"),
                global.quiet,
            );
            Ok(())
        }
    }
}
