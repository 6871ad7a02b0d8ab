//! Clap derive structures for the `pfsense` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pfsense -- manage pfSense interfaces and routing over the REST API
#[derive(Debug, Parser)]
#[command(
    name = "pfsense",
    version,
    about = "Manage pfSense interfaces, VLANs and gateways from the command line",
    long_about = "Talks to the pfSense REST API (api/v1).\n\n\
        Interface and routing changes are staged on the appliance until they\n\
        are applied, either with --apply on the change or a separate `apply`.",
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
    /// Appliance profile to use
    #[arg(long, short = 'p', env = "PFSENSE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Appliance URL (overrides profile)
    #[arg(long, short = 'u', env = "PFSENSE_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PFSENSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PFSENSE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "PFSENSE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage interface assignments
    #[command(alias = "if", alias = "i")]
    Interfaces(InterfacesArgs),

    /// List VLANs
    Vlans(VlansArgs),

    /// Manage monitored gateways
    #[command(alias = "gw", alias = "g")]
    Gateways(GatewaysArgs),

    /// Set the system default gateway
    DefaultGateway(DefaultGatewayArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Interfaces ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    #[command(subcommand)]
    pub command: InterfacesCommand,
}

#[derive(Debug, Subcommand)]
pub enum InterfacesCommand {
    /// List assigned interfaces
    #[command(alias = "ls")]
    List,

    /// Show one interface by name (wan, lan, opt1, ...)
    Get { name: String },

    /// Assign a new interface from a JSON request file
    Create {
        /// JSON file holding the interface request
        #[arg(long, short = 'f')]
        from_file: PathBuf,

        /// Apply immediately
        #[arg(long)]
        apply: bool,
    },

    /// Update an interface from a JSON request file
    Update {
        /// Interface id (wan, lan, opt1, ...)
        id: String,

        /// JSON file holding the interface request
        #[arg(long, short = 'f')]
        from_file: PathBuf,

        /// Apply immediately
        #[arg(long)]
        apply: bool,
    },

    /// Remove an interface assignment
    #[command(alias = "rm")]
    Delete { id: String },

    /// Apply staged interface changes
    Apply,
}

// ── VLANs ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct VlansArgs {
    #[command(subcommand)]
    pub command: VlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum VlansCommand {
    /// List configured VLANs
    #[command(alias = "ls")]
    List,
}

// ── Gateways ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GatewaysArgs {
    #[command(subcommand)]
    pub command: GatewaysCommand,
}

#[derive(Debug, Subcommand)]
pub enum GatewaysCommand {
    /// List gateways
    #[command(alias = "ls")]
    List,

    /// Show one gateway by name
    Get { name: String },

    /// Create a gateway
    Create(GatewaySpec),

    /// Update a gateway by list position
    Update {
        /// Gateway id as shown by `gateways list`
        id: u32,

        #[command(flatten)]
        spec: GatewaySpec,
    },

    /// Delete a gateway by list position
    #[command(alias = "rm")]
    Delete {
        /// Gateway id as shown by `gateways list`
        id: u32,
    },

    /// Apply staged routing changes
    Apply,
}

#[derive(Debug, Args)]
pub struct GatewaySpec {
    /// Gateway name
    #[arg(long)]
    pub name: Option<String>,

    /// Gateway address
    #[arg(long)]
    pub gateway: Option<String>,

    /// Interface the gateway sits on (wan, opt1, ...)
    #[arg(long)]
    pub interface: Option<String>,

    /// Address family
    #[arg(long, value_parser = ["inet", "inet6"])]
    pub ipprotocol: Option<String>,

    /// Description
    #[arg(long)]
    pub descr: Option<String>,

    /// Alternative monitor IP
    #[arg(long)]
    pub monitor: Option<String>,

    /// Create or keep the gateway disabled
    #[arg(long)]
    pub disabled: bool,

    /// Apply immediately
    #[arg(long)]
    pub apply: bool,
}

// ── Default gateway ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DefaultGatewayArgs {
    #[command(subcommand)]
    pub command: DefaultGatewayCommand,
}

#[derive(Debug, Subcommand)]
pub enum DefaultGatewayCommand {
    /// Set the IPv4 and/or IPv6 default gateway
    Set {
        /// IPv4 gateway name
        #[arg(long)]
        v4: Option<String>,

        /// IPv6 gateway name
        #[arg(long)]
        v6: Option<String>,

        /// Apply immediately
        #[arg(long)]
        apply: bool,
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
    /// Print the config file path
    Path,

    /// Show profiles (secrets redacted)
    Show,

    /// Store a secret for a profile in the system keyring
    SetSecret {
        /// Which secret to store
        #[arg(value_parser = ["password", "client-token", "token"])]
        entry: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
