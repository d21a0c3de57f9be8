use census_tracker::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("census_tracker=debug,info")
    } else {
        EnvFilter::new("census_tracker=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Track(args) => {
            cli::track::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
