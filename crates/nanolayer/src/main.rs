//! nanolayer binary.

#![allow(clippy::print_stderr)]

use nanolayer::cli::{
    self, CliError, Commands, EXIT_OK, InstallCommands, exit_code_for, render_error,
};
use nanolayer::commands;
use nanolayer::tracing::{TracingConfig, TracingFormat, init_tracing};

fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {panic_info}");
        eprintln!("Internal error occurred. Run with RUST_LOG=debug for more information.");
    }));

    let cli = cli::parse();

    let tracing_config = TracingConfig {
        format: if cli.json {
            TracingFormat::Json
        } else {
            TracingFormat::Compact
        },
        level: cli.level.into(),
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("{e:?}");
    }

    let result = match &cli.command {
        Commands::Install {
            source: InstallCommands::Github(args),
        } => run_async(commands::install::execute_install_github(args, cli.json)),
        Commands::System => commands::system::execute_system(cli.json),
        Commands::Version => commands::execute_version(cli.json),
    };

    match result {
        Ok(()) => std::process::exit(EXIT_OK),
        Err(err) => {
            render_error(&err, cli.json);
            std::process::exit(exit_code_for(&err));
        }
    }
}

/// Drive `future` to completion on a fresh tokio runtime.
fn run_async<F>(future: F) -> Result<(), CliError>
where
    F: std::future::Future<Output = Result<(), CliError>>,
{
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::install(format!("Failed to create tokio runtime: {e}")))?;
    rt.block_on(future)
}
