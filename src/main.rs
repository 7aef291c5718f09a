use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use bomcheck::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    init_logging(global.verbose);

    match cli.command {
        Commands::Check(args) => bomcheck::cli::commands::check::run(args, &global),
        Commands::Parse(args) => bomcheck::cli::commands::parse::run(args, &global),
        Commands::Config(cmd) => bomcheck::cli::commands::config::run(cmd),
        Commands::Completions(args) => bomcheck::cli::commands::completions::run(args),
    }
}

/// Diagnostic logs go to stderr; RUST_LOG overrides the verbosity flag
fn init_logging(verbose: bool) {
    let default = if verbose { "bomcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
