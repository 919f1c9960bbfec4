//! CSV export of the benchmark convergence series
//!
//! Both writers produce the same layout: a `step,difference` header followed
//! by one row per benchmark update, in the order the updates happened.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    Error, Result,
    analysis::{ConvergencePoint, ConvergenceSeries},
    pipeline::TrainingResult,
    ports::Observer,
};

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create CSV file {}", path.display()),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Write a whole series to `writer`
pub fn write_convergence<W: Write>(writer: W, series: &ConvergenceSeries) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    // serialize() only emits a header with the first record
    if series.is_empty() {
        writer.write_record(["step", "difference"])?;
    }
    for point in series.points() {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a whole series to a CSV file at `path`
pub fn write_convergence_csv<P: AsRef<Path>>(path: P, series: &ConvergenceSeries) -> Result<()> {
    write_convergence(create(path.as_ref())?, series)
}

/// Streams benchmark updates to a CSV file as training runs
pub struct ConvergenceCsvObserver {
    writer: csv::Writer<BufWriter<File>>,
    rows: u64,
}

impl ConvergenceCsvObserver {
    /// Create the file and write the header
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(create(path.as_ref())?);
        writer.write_record(["step", "difference"])?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }
}

impl Observer for ConvergenceCsvObserver {
    fn on_benchmark_update(&mut self, point: ConvergencePoint) -> Result<()> {
        self.writer.serialize(point)?;
        self.rows += 1;
        Ok(())
    }

    fn on_training_end(&mut self, _result: &TrainingResult) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
