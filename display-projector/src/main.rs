use clap::Parser;
use display_projector::app::{exit_code, ProjectorApp};
use display_projector::args::Args;
use std::process::ExitCode;
use tracing::debug;

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "display_projector={0},projector_display={0},projector_core={0}",
                    log_level
                )
                .into()
            }),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let app = ProjectorApp::new(args)?;
    let stdout = std::io::stdout();
    app.run(&mut stdout.lock())
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose);
    debug!("Starting display-projector {}", env!("CARGO_PKG_VERSION"));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("display-projector: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}
