//! Per-day estimate export

use crate::config::OutputFormat;
use crate::session::DayVolatilityEstimate;
use std::io::Write;
use std::path::Path;

/// Writes date-sorted estimates as CSV or JSON
pub struct ResultWriter {
    format: OutputFormat,
}

impl ResultWriter {
    /// Create a writer for the given format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write estimates to a file
    pub fn write_to_path(
        &self,
        estimates: &[DayVolatilityEstimate],
        path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        self.write(estimates, file)
    }

    /// Write estimates to any sink
    pub fn write(
        &self,
        estimates: &[DayVolatilityEstimate],
        sink: impl Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let mut writer = csv::Writer::from_writer(sink);
                for estimate in estimates {
                    writer.serialize(estimate)?;
                }
                writer.flush()?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(sink, estimates)?;
            }
        }
        Ok(())
    }
}
