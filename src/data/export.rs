use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Dataset, ObservationRow};

// ---------------------------------------------------------------------------
// CSV export of the filtered view
// ---------------------------------------------------------------------------

/// Write the filtered view as CSV.
///
/// The canonical header is always written — a zero-row export still carries
/// the schema — and column order is byte-identical to
/// [`ObservationRow::COLUMNS`], so an exported file re-loads to the same
/// rows and types.
pub fn write_filtered_csv<W: Write>(
    writer: W,
    dataset: &Dataset,
    indices: &[usize],
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(ObservationRow::COLUMNS)
        .context("writing CSV header")?;
    for &i in indices {
        wtr.serialize(&dataset.rows[i])
            .with_context(|| format!("writing row {i}"))?;
    }
    wtr.flush().context("flushing CSV output")?;
    Ok(())
}

/// File wrapper around [`write_filtered_csv`].
pub fn export_csv(path: &Path, dataset: &Dataset, indices: &[usize]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_filtered_csv(file, dataset, indices)?;
    log::info!("exported {} rows to {}", indices.len(), path.display());
    Ok(())
}
