//! Multisig Wallet CLI
//!
//! Command-line interface for operating a threshold multisig wallet
//! persisted as a local state file.

use clap::{Parser, Subcommand};
use multisig_wallet::cli::commands;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "vault")]
#[command(version = "0.1.0")]
#[command(about = "A threshold multisig transaction authorization engine", long_about = None)]
struct Cli {
    /// Data directory for wallet state
    #[arg(short, long, default_value = ".vault_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new wallet
    Init {
        /// Owner identities (one per flag, up to 10)
        #[arg(short, long, required = true)]
        owner: Vec<String>,

        /// Confirmations required to execute
        #[arg(short, long)]
        threshold: usize,
    },

    /// Credit the pooled balance
    Deposit {
        /// Identity of the sender (need not be an owner)
        #[arg(short, long)]
        sender: String,

        /// Amount to credit
        #[arg(short, long)]
        amount: u64,
    },

    /// Propose a new transaction
    Submit {
        /// Calling owner
        #[arg(short, long)]
        caller: String,

        /// Destination identity for the external call
        #[arg(long)]
        target: String,

        /// Pooled value to transfer with the call
        #[arg(short, long, default_value = "0")]
        value: u64,

        /// Hex-encoded payload passed to the target
        #[arg(short, long)]
        payload: Option<String>,

        /// Function name on the target side
        #[arg(long)]
        selector: String,
    },

    /// Confirm a pending transaction
    Confirm {
        #[arg(short, long)]
        caller: String,

        /// Transaction index
        index: u64,
    },

    /// Withdraw a previous confirmation
    Revoke {
        #[arg(short, long)]
        caller: String,

        /// Transaction index
        index: u64,
    },

    /// Execute a transaction that has reached the threshold
    Execute {
        #[arg(short, long)]
        caller: String,

        /// Transaction index
        index: u64,
    },

    /// Show one transaction
    Show {
        /// Transaction index
        index: u64,
    },

    /// List all transactions
    List,

    /// List the wallet owners
    Owners,

    /// Show the pooled balance
    Balance,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;

    let result = match cli.command {
        Commands::Init { owner, threshold } => commands::cmd_init(&data_dir, owner, threshold),
        Commands::Deposit { sender, amount } => commands::cmd_deposit(&data_dir, sender, amount),
        Commands::Submit {
            caller,
            target,
            value,
            payload,
            selector,
        } => commands::cmd_submit(&data_dir, caller, target, value, payload, selector),
        Commands::Confirm { caller, index } => commands::cmd_confirm(&data_dir, caller, index),
        Commands::Revoke { caller, index } => commands::cmd_revoke(&data_dir, caller, index),
        Commands::Execute { caller, index } => commands::cmd_execute(&data_dir, caller, index),
        Commands::Show { index } => commands::cmd_show(&data_dir, index),
        Commands::List => commands::cmd_list(&data_dir),
        Commands::Owners => commands::cmd_owners(&data_dir),
        Commands::Balance => commands::cmd_balance(&data_dir),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
