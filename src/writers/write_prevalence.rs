use super::write_provenance;
use crate::prevalence::PrevalenceBand;
use crate::utils::{dates::day_to_iso_string, Result};
use std::io::Write;

/// Writes one row per day of a prevalence band series.
pub struct PrevalenceWriter<W: Write> {
    writer: W,
    mutation: String,
}

impl<W: Write> PrevalenceWriter<W> {
    pub fn new(mut writer: W, mutation: &str) -> Result<Self> {
        write_provenance(&mut writer)?;
        writeln!(writer, "#mutation\tday\tdate\tlow\tmedian\thigh")
            .map_err(|e| format!("Failed to write header: {}", e))?;
        Ok(Self {
            writer,
            mutation: mutation.to_string(),
        })
    }

    /// Writes `bands` with the first band on `first_day`.
    pub fn write_series(&mut self, first_day: i64, bands: &[PrevalenceBand]) -> Result<()> {
        for (day, band) in (first_day..).zip(bands) {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}",
                self.mutation,
                day,
                day_to_iso_string(day),
                band.low,
                band.median,
                band.high
            )
            .map_err(|e| format!("Failed to write day {}: {}", day, e))?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().map_err(|e| e.to_string())?;
        Ok(self.writer)
    }
}
