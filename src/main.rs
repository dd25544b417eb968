use clap::Parser;
use tickvol::cli::{Cli, Commands};
use tickvol::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    tickvol::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Estimate(args) => {
            tracing::info!(input = %args.input.display(), "starting estimation");
            args.execute(config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Session: {} - {}", config.session.open, config.session.close);
            println!("  Anchor policy: {:?}", config.session.anchor_policy);
            println!(
                "  Monte Carlo: {} trials, annualization {}",
                config.montecarlo.trials, config.montecarlo.annualization_factor
            );
            println!(
                "  Scheduler: {:?} (threads: {})",
                config.scheduler.backend,
                config
                    .scheduler
                    .threads
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("  Output: {:?}", config.output.format);
        }
    }

    Ok(())
}
