use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod output;
mod write;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("sheetsync error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();
    init_tracing(&flags)?;

    let command = cli
        .command
        .unwrap_or_else(|| cli::Commands::Run(cli::RunArgs::default()));

    match command {
        cli::Commands::Schema(args) => commands::schema::handle(&args, &flags),
        cli::Commands::Publish => commands::publish::handle(&flags),
        command => match command.into_run_args() {
            Some(args) => commands::run::handle(&args, &flags).await,
            None => Ok(()),
        },
    }
}

fn init_tracing(flags: &cli::GlobalFlags) -> anyhow::Result<()> {
    let level = if flags.quiet {
        "error"
    } else if flags.verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SHEETSYNC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
