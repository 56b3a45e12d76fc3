//! Clap derive structures for the `contiv` CLI.
//!
//! Defines the command tree, global flags, and the value enums shared by
//! network and rule commands. Compiled into build.rs as well, so this file
//! depends on nothing but clap and clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// contiv -- manage tenants, networks and policies on a Contiv controller
#[derive(Debug, Parser)]
#[command(
    name = "contiv",
    version,
    about = "Manage a Contiv container-networking controller",
    long_about = "Create and delete tenants, networks, policies, rules and endpoint \
        groups through the Contiv REST API.\n\n\
        Settings come from the config file, CONTIV_* environment variables \
        and the flags below, in increasing order of priority.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "CONTIV_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Controller host name or address
    #[arg(long, short = 'H', global = true)]
    pub host: Option<String>,

    /// Controller API port
    #[arg(long, short = 'P', global = true)]
    pub port: Option<u16>,

    /// Login user
    #[arg(long, short = 'u', global = true)]
    pub user: Option<String>,

    /// Full controller URL (replaces https://HOST:PORT)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// PEM bundle used to verify the controller certificate
    #[arg(long, global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Verify the controller certificate against the system store
    #[arg(long, global = true)]
    pub verify_tls: bool,

    /// Prompt for the login password
    #[arg(long, global = true)]
    pub ask_password: bool,

    /// Output format
    #[arg(long, short = 'o', default_value = "json", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Resource value enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EncapArg {
    Vxlan,
    Vlan,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ActionArg {
    Allow,
    Deny,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProtocolArg {
    Tcp,
    Udp,
    Icmp,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and check that the controller issues a token
    Login,

    /// Manage tenants
    #[command(alias = "t")]
    Tenant(TenantArgs),

    /// Manage a tenant's network
    #[command(alias = "net")]
    Network(NetworkArgs),

    /// Manage network policies
    #[command(alias = "pol")]
    Policy(PolicyArgs),

    /// Manage policy rules
    Rule(RuleArgs),

    /// Manage endpoint groups
    #[command(alias = "epg")]
    Group(GroupArgs),

    /// Provision ready-made tenant setups
    Provision(ProvisionArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Tenants ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TenantArgs {
    #[command(subcommand)]
    pub command: TenantCommand,
}

#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    /// Create a tenant
    Create {
        /// Tenant name
        tenant: String,
    },

    /// Delete a tenant
    #[command(alias = "rm")]
    Delete {
        /// Tenant name
        tenant: String,
    },
}

// ── Networks ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkArgs {
    #[command(subcommand)]
    pub command: NetworkCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworkCommand {
    /// Create the tenant network (keyed TENANT:TENANT-net)
    Create {
        /// Tenant name
        tenant: String,

        /// Display name (defaults to TENANT-net)
        #[arg(long)]
        name: Option<String>,

        /// Encapsulation
        #[arg(long, default_value = "vxlan")]
        encap: EncapArg,

        /// Network type
        #[arg(long, default_value = "data")]
        nw_type: String,

        /// Gateway address (e.g. 10.1.1.1)
        #[arg(long)]
        gateway: String,

        /// Subnet in CIDR form (e.g. 10.1.1.0/24)
        #[arg(long)]
        subnet: String,
    },

    /// Delete the tenant network
    #[command(alias = "rm")]
    Delete {
        /// Tenant name
        tenant: String,
    },
}

// ── Policies ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PolicyArgs {
    #[command(subcommand)]
    pub command: PolicyCommand,
}

#[derive(Debug, Subcommand)]
pub enum PolicyCommand {
    /// Create a policy
    Create { tenant: String, policy: String },

    /// Delete a policy and its rules
    #[command(alias = "rm")]
    Delete { tenant: String, policy: String },
}

// ── Rules ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RuleArgs {
    #[command(subcommand)]
    pub command: RuleCommand,
}

#[derive(Debug, Subcommand)]
pub enum RuleCommand {
    /// Add a rule to a policy
    Create(RuleCreateArgs),

    /// Remove a rule from a policy
    #[command(alias = "rm")]
    Delete {
        tenant: String,
        policy: String,
        rule_id: String,
    },
}

#[derive(Debug, Args)]
pub struct RuleCreateArgs {
    pub tenant: String,
    pub policy: String,
    pub rule_id: String,

    /// Rule priority
    #[arg(long, default_value = "1")]
    pub priority: i32,

    #[arg(long)]
    pub action: ActionArg,

    #[arg(long)]
    pub direction: DirectionArg,

    #[arg(long)]
    pub protocol: ProtocolArg,

    /// Destination port (omit for any)
    #[arg(long)]
    pub port: Option<u16>,

    #[command(flatten)]
    pub target: RuleTargetArgs,
}

/// Exactly one rule target.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct RuleTargetArgs {
    /// Match traffic to an endpoint group
    #[arg(long)]
    pub to_group: Option<String>,

    /// Match traffic to a network
    #[arg(long)]
    pub to_network: Option<String>,

    /// Match traffic to an IP address or CIDR
    #[arg(long)]
    pub to_ip: Option<String>,
}

// ── Endpoint groups ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create an endpoint group
    Create(GroupSpecArgs),

    /// Replace the policies attached to an endpoint group
    Update(GroupSpecArgs),

    /// Delete an endpoint group
    #[command(alias = "rm")]
    Delete { tenant: String, group: String },
}

#[derive(Debug, Args)]
pub struct GroupSpecArgs {
    pub tenant: String,

    /// Network name inside the tenant (e.g. TENANT-net)
    pub network: String,

    pub group: String,

    /// Policy to attach (repeatable)
    #[arg(long = "policy")]
    pub policies: Vec<String>,
}

// ── Provisioning ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    #[command(subcommand)]
    pub command: ProvisionCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProvisionCommand {
    /// Tenant with a vxlan network, one endpoint group and a NAT policy
    ///
    /// The policy allows outbound ICMP, TCP and UDP to the tenant network
    /// at priority 30 and denies them at priority 20.
    Nat {
        /// Tenant name
        tenant: String,

        /// Gateway address of the tenant network
        #[arg(long)]
        gateway: String,

        /// Subnet of the tenant network in CIDR form
        #[arg(long)]
        subnet: String,

        /// Name of the policy to create
        #[arg(long, default_value = "nat-policy")]
        policy: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (password masked)
    Show,

    /// Print the default config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
