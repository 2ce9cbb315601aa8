// crates/example-deed-cli/src/main.rs
// ============================================================================
// Module: Example Deed CLI Entry Point
// Description: Command dispatcher for configuration and deed contract workflows.
// Purpose: Provide a safe CLI for inspecting networks and calling the contract.
// Dependencies: clap, example-deed-config, example-deed-core, example-deed-rpc
// ============================================================================

//! ## Overview
//! The Example Deed CLI validates network configuration and drives a deployed
//! `ExampleDeed` contract over JSON-RPC. All user-facing strings are routed
//! through the message catalog. Contract calls are recorded by the audit sink
//! selected in configuration.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy_primitives::Address;
use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use example_deed_cli::session::Session;
use example_deed_cli::session::SessionError;
use example_deed_cli::t;
use example_deed_config::DEFAULT_NETWORK;
use example_deed_config::DeedConfig;
use example_deed_config::config_toml_example;
use example_deed_core::ContractError;
use example_deed_core::DeedContract;
use example_deed_core::DeedId;
use example_deed_core::TxReceipt;
use example_deed_core::TxRequest;
use example_deed_core::Wei;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "example-deed", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Options shared by every subcommand.
    #[command(flatten)]
    globals: GlobalArgs,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
struct GlobalArgs {
    /// Network profile to use.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_NETWORK, global = true)]
    network: String,
    /// Deployed contract address (overrides contract.address).
    #[arg(long, value_name = "ADDR", global = true)]
    contract: Option<Address>,
    /// Optional config file path (defaults to example-deed.toml or env override).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Network profile utilities.
    Networks {
        /// Selected networks subcommand.
        #[command(subcommand)]
        command: NetworksCommand,
    },
    /// Deed contract operations.
    Deed {
        /// Selected deed subcommand.
        #[command(subcommand)]
        command: DeedCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an Example Deed configuration file.
    Validate,
    /// Print a canonical example configuration.
    Example,
}

/// Networks subcommands.
#[derive(Subcommand, Debug)]
enum NetworksCommand {
    /// List configured network profiles.
    List,
}

/// Deed contract subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
enum DeedCommand {
    /// Count all deeds, or those held by one owner.
    Count {
        /// Count only deeds held by this owner.
        #[arg(long, value_name = "ADDR")]
        owner: Option<Address>,
    },
    /// Look up the deed at a position in an owner's list.
    OwnerIndex {
        /// Deed owner.
        #[arg(long, value_name = "ADDR")]
        owner: Address,
        /// Zero-based position in the owner's list.
        #[arg(long, value_name = "N")]
        index: u64,
    },
    /// Create a deed owned by the sender.
    Create {
        /// Deed name.
        #[arg(long)]
        name: String,
        /// Beneficiary address.
        #[arg(long, value_name = "ADDR")]
        beneficiary: Address,
        /// Sending account.
        #[arg(long, value_name = "ADDR")]
        from: Option<Address>,
    },
    /// Destroy a deed.
    Destroy {
        /// Deed identifier (decimal or 0x hex).
        #[arg(long, value_name = "ID")]
        id: DeedId,
        /// Sending account.
        #[arg(long, value_name = "ADDR")]
        from: Option<Address>,
    },
    /// Appropriate a deed, optionally attaching a payment.
    Appropriate {
        /// Deed identifier (decimal or 0x hex).
        #[arg(long, value_name = "ID")]
        id: DeedId,
        /// Payment in wei.
        #[arg(long, value_name = "WEI", default_value = "0")]
        value: Wei,
        /// Sending account.
        #[arg(long, value_name = "ADDR")]
        from: Option<Address>,
    },
}

impl DeedCommand {
    /// Returns the `--from` override for state-changing commands.
    ///
    /// The outer `None` marks read-only commands.
    const fn sender_flag(&self) -> Option<Option<Address>> {
        match self {
            Self::Count {
                ..
            }
            | Self::OwnerIndex {
                ..
            } => None,
            Self::Create {
                from,
                ..
            }
            | Self::Destroy {
                from,
                ..
            }
            | Self::Appropriate {
                from,
                ..
            } => Some(*from),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for catalog error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(&cli.globals, &command),
        Commands::Networks {
            command,
        } => command_networks(&cli.globals, &command),
        Commands::Deed {
            command,
        } => command_deed(&cli.globals, &command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(globals: &GlobalArgs, command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate => {
            let config = load_config(globals)?;
            write_stdout_line(&t!("config.validate.ok", count = config.networks.len()))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ConfigCommand::Example => {
            write_stdout_bytes(config_toml_example().as_bytes())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration using the global `--config` override.
fn load_config(globals: &GlobalArgs) -> CliResult<DeedConfig> {
    DeedConfig::load(globals.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

// ============================================================================
// SECTION: Network Commands
// ============================================================================

/// Dispatches networks subcommands.
fn command_networks(globals: &GlobalArgs, command: &NetworksCommand) -> CliResult<ExitCode> {
    match command {
        NetworksCommand::List => {
            let config = load_config(globals)?;
            for line in render_networks(&config) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders one line per configured network, in name order.
fn render_networks(config: &DeedConfig) -> Vec<String> {
    config
        .networks
        .iter()
        .map(|(name, profile)| match profile.gas {
            Some(gas) => t!(
                "networks.entry.gas",
                name = name,
                endpoint = profile.endpoint_url(),
                network_id = profile.network_id,
                gas = gas
            ),
            None => t!(
                "networks.entry",
                name = name,
                endpoint = profile.endpoint_url(),
                network_id = profile.network_id
            ),
        })
        .collect()
}

// ============================================================================
// SECTION: Deed Commands
// ============================================================================

/// Executes a deed subcommand against the configured contract.
fn command_deed(globals: &GlobalArgs, command: &DeedCommand) -> CliResult<ExitCode> {
    let network = globals.network.as_str();
    let session = Session::load(globals.config.as_deref(), network)
        .map_err(|err| session_error(network, &err))?;
    let contract =
        session.open_contract(globals.contract).map_err(|err| session_error(network, &err))?;
    let sender = match command.sender_flag() {
        Some(explicit) => {
            Some(session.resolve_sender(explicit).map_err(|err| session_error(network, &err))?)
        }
        None => None,
    };
    let output = execute_deed(&contract, command, sender).map_err(|err| {
        CliError::new(t!("deed.call_failed", operation = deed_operation_label(command), error = err))
    })?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Formats a session setup failure.
fn session_error(network: &str, error: &SessionError) -> CliError {
    CliError::new(t!("session.failed", network = network, error = error))
}

/// Runs `command` against `contract` and renders the result line.
fn execute_deed(
    contract: &dyn DeedContract,
    command: &DeedCommand,
    sender: Option<Address>,
) -> Result<String, ContractError> {
    let tx = || {
        sender.map(TxRequest::sender).ok_or_else(|| {
            ContractError::InvalidInput("a sending account is required".to_string())
        })
    };
    match command {
        DeedCommand::Count {
            owner: None,
        } => Ok(t!("deed.count", count = contract.count_of_deeds()?)),
        DeedCommand::Count {
            owner: Some(owner),
        } => Ok(t!("deed.count", count = contract.count_of_deeds_by_owner(*owner)?)),
        DeedCommand::OwnerIndex {
            owner,
            index,
        } => Ok(t!("deed.owner_index", id = contract.deed_of_owner_by_index(*owner, *index)?)),
        DeedCommand::Create {
            name,
            beneficiary,
            ..
        } => contract.create(&tx()?, name, *beneficiary).map(|receipt| render_receipt(&receipt)),
        DeedCommand::Destroy {
            id,
            ..
        } => contract.destroy(&tx()?, *id).map(|receipt| render_receipt(&receipt)),
        DeedCommand::Appropriate {
            id,
            value,
            ..
        } => contract
            .appropriate(&tx()?.with_value(*value), *id)
            .map(|receipt| render_receipt(&receipt)),
    }
}

/// Returns the contract function name behind a deed subcommand.
const fn deed_operation_label(command: &DeedCommand) -> &'static str {
    match command {
        DeedCommand::Count {
            owner: None,
        } => "countOfDeeds",
        DeedCommand::Count {
            owner: Some(_),
        } => "countOfDeedsByOwner",
        DeedCommand::OwnerIndex {
            ..
        } => "deedOfOwnerByIndex",
        DeedCommand::Create {
            ..
        } => "create",
        DeedCommand::Destroy {
            ..
        } => "destroy",
        DeedCommand::Appropriate {
            ..
        } => "appropriate",
    }
}

/// Renders a transaction receipt as one line.
fn render_receipt(receipt: &TxReceipt) -> String {
    let block = receipt.block_number.map_or_else(|| t!("deed.tx.pending"), |block| block.to_string());
    let gas = receipt.gas_used.map_or_else(|| t!("deed.tx.unknown"), |gas| gas.to_string());
    t!("deed.tx", hash = receipt.tx_hash, block = block, gas = gas)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
