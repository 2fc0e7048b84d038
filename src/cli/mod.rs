//! Command-line interface layer.

use std::thread;

use anyhow::Result;

use crate::core::ScanCancellation;

pub mod args;
mod commands;
mod exit_status;
mod logging;
pub mod report;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init_tracing(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match args.command {
        Some(Command::Scan(cmd)) => {
            let cancel = ScanCancellation::new();
            listen_for_interrupt(cancel.clone());
            commands::scan::scan(cmd, &cancel)
        }
        Some(Command::Init(cmd)) => commands::init::init(cmd),
        None => Ok(ExitStatus::Success),
    }
}

/// Flip `cancel` on Ctrl-C. The listener runs a single-threaded tokio
/// runtime on its own thread so the scan itself stays on rayon.
fn listen_for_interrupt(cancel: ScanCancellation) {
    let spawned = thread::Builder::new()
        .name("gtaa-interrupt".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    tracing::warn!("cannot install interrupt handler: {}", e);
                    return;
                }
            };
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("interrupt received, cancelling scan");
                    cancel.cancel();
                }
            });
        });

    if let Err(e) = spawned {
        tracing::warn!("cannot spawn interrupt listener: {}", e);
    }
}
