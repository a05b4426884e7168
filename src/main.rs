//! hostsmate - Hosts-file ad blocker
//!
//! Blocks ads, trackers and malware domains through the system hosts file.

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use hostsmate::cli::{Cli, Commands};
use hostsmate::config::{default_log_dir, Config};
use hostsmate::{commands, logging, HostsmateError};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // An unreadable config is reported by the command itself
    let log_dir = Config::load_or_default(&cli.config)
        .map(|config| config.log_dir())
        .unwrap_or_else(|_| default_log_dir());
    logging::init(cli.verbose, cli.quiet, &log_dir);

    let result = match cli.command {
        Commands::Update {
            backup_dir,
            dry_run,
        } => commands::update::run(backup_dir, dry_run, &cli.config).await,
        Commands::Suspend => commands::suspend::run(&cli.config),
        Commands::Resume => commands::resume::run(&cli.config),
        Commands::Block { domains } => commands::block::run(&domains, &cli.config),
        Commands::Whitelist { domain } => commands::whitelist::run(&domain, &cli.config),
        Commands::Backup { dir } => commands::backup::run(dir, &cli.config),
        Commands::Status => commands::status::run(&cli.config),
        Commands::Init { force } => commands::init::run(force, &cli.config),
        Commands::Version => {
            println!("hostsmate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<HostsmateError>()
                .map(HostsmateError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
