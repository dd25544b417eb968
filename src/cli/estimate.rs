//! Estimate command implementation

use crate::config::{Config, OutputFormat, SchedulerBackend};
use crate::data::{ResultWriter, TickLoader};
use crate::pipeline::Pipeline;
use crate::scheduler::CancelToken;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Tick CSV with `timestamp,price` columns
    #[arg(long)]
    pub input: PathBuf,

    /// Output file; omit to write to stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Monte Carlo trials per day (overrides config)
    #[arg(long)]
    pub trials: Option<usize>,

    /// Run seed for reproducible output (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Process days one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

impl EstimateArgs {
    pub fn execute(&self, mut config: Config) -> anyhow::Result<()> {
        if let Some(trials) = self.trials {
            config.montecarlo.trials = trials;
        }
        if let Some(seed) = self.seed {
            config.montecarlo.seed = Some(seed);
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.sequential {
            config.scheduler.backend = SchedulerBackend::Sequential;
        }

        let loader = TickLoader::new(config.session.clone());
        let observations = loader.load(&self.input)?;

        let pipeline = Pipeline::new(config.clone())?;
        let report = pipeline.run(observations, &CancelToken::new());

        let writer = ResultWriter::new(config.output.format);
        match &self.output {
            Some(path) => {
                writer.write_to_path(&report.estimates, path)?;
                tracing::info!(path = %path.display(), "wrote estimates");
            }
            None => writer.write(&report.estimates, std::io::stdout().lock())?,
        }

        Ok(())
    }
}
