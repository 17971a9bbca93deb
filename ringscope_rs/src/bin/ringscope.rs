use std::any::Any;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use ringscope::cli::{Cli, commands};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.parse().unwrap_or_default()),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    install_broken_pipe_handler();

    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match commands::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("[ringscope] Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
