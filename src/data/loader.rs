use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray, UInt32Array,
    UInt64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{Dataset, ObservationRow};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can go wrong while turning an input file into a
/// [`Dataset`]. Fatal at startup; shown as a status message when triggered
/// from the Open… dialog.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}, column '{column}': '{value}' is not a valid {expected}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("column '{column}' has unsupported type {datatype}")]
    ColumnType { column: &'static str, datatype: String },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the observation table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the canonical columns (primary format)
/// * `.json`    – records array, `df.to_json(orient='records')` shape
/// * `.parquet` – scalar columns with the canonical names
pub fn load_file(path: &Path) -> Result<Dataset, DataLoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DataLoadError::UnsupportedExtension(other.to_string())),
    }
}

fn open(path: &Path) -> Result<std::fs::File, DataLoadError> {
    std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row.
struct ColumnIndex {
    positions: [usize; 16],
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataLoadError> {
        let mut positions = [0usize; 16];
        for (slot, name) in positions.iter_mut().zip(ObservationRow::COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))?;
        }
        Ok(ColumnIndex { positions })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, column: usize) -> &'r str {
        record.get(self.positions[column]).unwrap_or("")
    }
}

fn parse<T: std::str::FromStr>(
    raw: &str,
    row: usize,
    column: &'static str,
    expected: &'static str,
) -> Result<T, DataLoadError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| DataLoadError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
            expected,
        })
}

fn load_csv(path: &Path) -> Result<Dataset, DataLoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);
    let index = ColumnIndex::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let rec = result?;
        rows.push(ObservationRow {
            country: index.get(&rec, 0).to_string(),
            // Coerced to integer here, never later.
            year: parse(index.get(&rec, 1), row_no, "year", "integer")?,
            total_buyers: parse(index.get(&rec, 2), row_no, "total_buyers", "integer")?,
            total_spend_usd: parse(index.get(&rec, 3), row_no, "total_spend_usd", "number")?,
            avg_spend_usd: parse(index.get(&rec, 4), row_no, "avg_spend_usd", "number")?,
            avg_income_usd: parse(index.get(&rec, 5), row_no, "avg_income_usd", "number")?,
            total_items: parse(index.get(&rec, 6), row_no, "total_items", "integer")?,
            avg_items: parse(index.get(&rec, 7), row_no, "avg_items", "number")?,
            avg_age: parse(index.get(&rec, 8), row_no, "avg_age", "number")?,
            pct_satisfied: parse(index.get(&rec, 9), row_no, "pct_satisfied", "number")?,
            pct_recommend: parse(index.get(&rec, 10), row_no, "pct_recommend", "number")?,
            pct_first_time: parse(index.get(&rec, 11), row_no, "pct_first_time", "number")?,
            top_channel: index.get(&rec, 12).to_string(),
            top_platform: index.get(&rec, 13).to_string(),
            top_category: index.get(&rec, 14).to_string(),
            top_motivation: index.get(&rec, 15).to_string(),
        });
    }

    log::info!("loaded {} observations from {}", rows.len(), path.display());
    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "country": "Perú", "year": 2020, "total_buyers": 100, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset, DataLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<ObservationRow> = serde_json::from_str(&text)?;
    log::info!("loaded {} observations from {}", rows.len(), path.display());
    Ok(Dataset::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with the canonical scalar columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): integer columns may be Int32/Int64
/// or UInt32/UInt64, floats may be Float32 or Float64, strings may be
/// Utf8 or LargeUtf8.
fn load_parquet(path: &Path) -> Result<Dataset, DataLoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let col = |name: &'static str| -> Result<Arc<dyn Array>, DataLoadError> {
            let idx = schema
                .index_of(name)
                .map_err(|_| DataLoadError::MissingColumn(name.to_string()))?;
            Ok(batch.column(idx).clone())
        };

        let country = col("country")?;
        let year = col("year")?;
        let total_buyers = col("total_buyers")?;
        let total_spend_usd = col("total_spend_usd")?;
        let avg_spend_usd = col("avg_spend_usd")?;
        let avg_income_usd = col("avg_income_usd")?;
        let total_items = col("total_items")?;
        let avg_items = col("avg_items")?;
        let avg_age = col("avg_age")?;
        let pct_satisfied = col("pct_satisfied")?;
        let pct_recommend = col("pct_recommend")?;
        let pct_first_time = col("pct_first_time")?;
        let top_channel = col("top_channel")?;
        let top_platform = col("top_platform")?;
        let top_category = col("top_category")?;
        let top_motivation = col("top_motivation")?;

        for row in 0..batch.num_rows() {
            rows.push(ObservationRow {
                country: string_at(&country, row, "country")?,
                year: int_at(&year, row, "year")? as i32,
                total_buyers: int_at(&total_buyers, row, "total_buyers")? as u64,
                total_spend_usd: float_at(&total_spend_usd, row, "total_spend_usd")?,
                avg_spend_usd: float_at(&avg_spend_usd, row, "avg_spend_usd")?,
                avg_income_usd: float_at(&avg_income_usd, row, "avg_income_usd")?,
                total_items: int_at(&total_items, row, "total_items")? as u64,
                avg_items: float_at(&avg_items, row, "avg_items")?,
                avg_age: float_at(&avg_age, row, "avg_age")?,
                pct_satisfied: float_at(&pct_satisfied, row, "pct_satisfied")?,
                pct_recommend: float_at(&pct_recommend, row, "pct_recommend")?,
                pct_first_time: float_at(&pct_first_time, row, "pct_first_time")?,
                top_channel: string_at(&top_channel, row, "top_channel")?,
                top_platform: string_at(&top_platform, row, "top_platform")?,
                top_category: string_at(&top_category, row, "top_category")?,
                top_motivation: string_at(&top_motivation, row, "top_motivation")?,
            });
        }
    }

    log::info!("loaded {} observations from {}", rows.len(), path.display());
    Ok(Dataset::from_rows(rows))
}

// -- Arrow column helpers --

fn column_type_error(col: &Arc<dyn Array>, column: &'static str) -> DataLoadError {
    DataLoadError::ColumnType {
        column,
        datatype: format!("{:?}", col.data_type()),
    }
}

fn string_at(
    col: &Arc<dyn Array>,
    row: usize,
    column: &'static str,
) -> Result<String, DataLoadError> {
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(column_type_error(col, column)),
    }
}

fn int_at(col: &Arc<dyn Array>, row: usize, column: &'static str) -> Result<i64, DataLoadError> {
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row) as i64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row))
        }
        DataType::UInt32 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt32Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row) as i64)
        }
        DataType::UInt64 => {
            let arr = col
                .as_any()
                .downcast_ref::<UInt64Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row) as i64)
        }
        _ => Err(column_type_error(col, column)),
    }
}

fn float_at(col: &Arc<dyn Array>, row: usize, column: &'static str) -> Result<f64, DataLoadError> {
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .ok_or_else(|| column_type_error(col, column))?;
            Ok(arr.value(row) as f64)
        }
        // Integer-typed numeric columns are fine where a float is expected.
        _ => int_at(col, row, column).map(|v| v as f64),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str = "country,year,total_buyers,total_spend_usd,avg_spend_usd,avg_income_usd,\
total_items,avg_items,avg_age,pct_satisfied,pct_recommend,pct_first_time,top_channel,\
top_platform,top_category,top_motivation";

    fn csv_file(body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn csv_load_parses_typed_rows() {
        let file = csv_file(
            "Perú,2020,100,2500.5,25.0,1200.0,300,3.0,31.5,80.0,75.0,20.0,Online,Vinted,Ropa casual,Precio\n\
             México,2021,80,2000.0,25.0,1100.0,240,3.0,29.0,78.0,70.0,25.0,Mercado,Instagram,Vestidos,Sostenibilidad\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].country, "Perú");
        assert_eq!(ds.rows[0].year, 2020);
        assert_eq!(ds.rows[0].total_buyers, 100);
        assert_eq!(ds.rows[0].total_spend_usd, 2500.5);
        assert_eq!(ds.rows[1].top_platform, "Instagram");
    }

    #[test]
    fn csv_columns_may_be_reordered() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        // year first: columns are located by name, not position
        writeln!(
            file,
            "year,country,total_buyers,total_spend_usd,avg_spend_usd,avg_income_usd,total_items,\
avg_items,avg_age,pct_satisfied,pct_recommend,pct_first_time,top_channel,top_platform,\
top_category,top_motivation"
        )
        .unwrap();
        writeln!(
            file,
            "2020,Perú,100,2500.0,25.0,1200.0,300,3.0,31.5,80.0,75.0,20.0,Online,Vinted,Ropa casual,Precio"
        )
        .unwrap();
        file.flush().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.rows[0].country, "Perú");
        assert_eq!(ds.rows[0].year, 2020);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "country,total_buyers").unwrap();
        writeln!(file, "Perú,100").unwrap();
        file.flush().unwrap();

        match load_file(file.path()) {
            Err(DataLoadError::MissingColumn(name)) => assert_eq!(name, "year"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_coercible_year_is_invalid_value() {
        let file = csv_file(
            "Perú,veinte,100,2500.0,25.0,1200.0,300,3.0,31.5,80.0,75.0,20.0,Online,Vinted,Ropa casual,Precio\n",
        );
        match load_file(file.path()) {
            Err(DataLoadError::InvalidValue { row, column, value, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "year");
                assert_eq!(value, "veinte");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn unknown_extension_is_rejected() {
        match load_file(Path::new("dataset.xlsx")) {
            Err(DataLoadError::UnsupportedExtension(ext)) => assert_eq!(ext, "xlsx"),
            other => panic!("expected UnsupportedExtension, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        match load_file(Path::new("/nonexistent/dataset.csv")) {
            Err(DataLoadError::Io { .. }) => {}
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn json_and_csv_agree() {
        let csv = csv_file(
            "Perú,2020,100,2500.0,25.0,1200.0,300,3.0,31.5,80.0,75.0,20.0,Online,Vinted,Ropa casual,Precio\n",
        );
        let from_csv = load_file(csv.path()).unwrap();

        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            json,
            r#"[{{"country":"Perú","year":2020,"total_buyers":100,"total_spend_usd":2500.0,
"avg_spend_usd":25.0,"avg_income_usd":1200.0,"total_items":300,"avg_items":3.0,"avg_age":31.5,
"pct_satisfied":80.0,"pct_recommend":75.0,"pct_first_time":20.0,"top_channel":"Online",
"top_platform":"Vinted","top_category":"Ropa casual","top_motivation":"Precio"}}]"#
        )
        .unwrap();
        json.flush().unwrap();
        let from_json = load_file(json.path()).unwrap();

        assert_eq!(from_csv.rows, from_json.rows);
    }
}
