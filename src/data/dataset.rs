//! Loading the aggregated Parquet dataset.
//!
//! The file holds one row per (month, agent) with paired `<channel>_pct` /
//! `<channel>` columns. It is read once through the Arrow reader and kept in
//! memory for the rest of the session, see [`DatasetCache`].

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow_array::cast::AsArray;
use arrow_array::timezone::Tz;
use arrow_array::types::{
    Date32Type, Date64Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow_array::{Array, ArrayRef, RecordBatch};
use arrow_schema::{DataType, TimeUnit};
use chrono::{DateTime, Datelike, NaiveDate};
use once_cell::sync::OnceCell;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::channels::{Channel, PCT_SUFFIX};

pub const MONTH_COLUMN: &str = "ano_mes";
pub const AGENT_COLUMN: &str = "vendedor_conclusao";

/// Default location of the aggregated dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "dados_agregados.parquet";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("arrow: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("column `{column}` has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: DataType },
    #[error("invalid month value `{0}`")]
    InvalidMonth(String),
    #[error("null value in column `{0}`")]
    NullValue(String),
}

/// A month normalized to `YYYY-MM`; string order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MonthKey(String);

impl MonthKey {
    pub fn from_ym(year: i32, month: u32) -> Self {
        MonthKey(format!("{year:04}-{month:02}"))
    }

    /// Accepts `YYYY-MM` or anything starting with an ISO date (`YYYY-MM-DD…`).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(date) = s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) {
            return Some(Self::from_ym(date.year(), date.month()));
        }
        let (y, m) = s.split_once('-')?;
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if y.len() != 4 || !(1..=12).contains(&month) {
            return None;
        }
        Some(Self::from_ym(year, month))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Percentage and absolute count of one channel within a record.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelShare {
    pub pct: f64,
    pub qtd: i64,
}

/// One (month, agent) row of the aggregated table.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    pub month: MonthKey,
    pub agent: String,
    pub channels: BTreeMap<Channel, ChannelShare>,
}

impl AggregatedRecord {
    pub fn share(&self, channel: Channel) -> Option<ChannelShare> {
        self.channels.get(&channel).copied()
    }

    /// Sum of the absolute counts over every channel column of the row.
    pub fn total_count(&self) -> i64 {
        self.channels.values().map(|s| s.qtd).sum()
    }
}

/// The loaded, immutable table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<AggregatedRecord>,
    channels: Vec<Channel>,
}

impl Dataset {
    /// Build a dataset from records. `channels` is reordered to registry order.
    pub fn new(records: Vec<AggregatedRecord>, mut channels: Vec<Channel>) -> Self {
        channels.sort();
        channels.dedup();
        Self { records, channels }
    }

    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    /// Channels whose paired columns exist in the file, in registry order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read the aggregated dataset from a Parquet file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();

    let mut channels = Vec::new();
    for field in schema.fields() {
        let Some(base) = field.name().strip_suffix(PCT_SUFFIX) else {
            continue;
        };
        match Channel::from_name(base) {
            Some(ch) if schema.field_with_name(ch.count_column()).is_ok() => channels.push(ch),
            Some(ch) => warn!(channel = %ch, "percentage column without count column, ignoring"),
            None => warn!(column = %field.name(), "column does not name a known channel, ignoring"),
        }
    }
    for required in [MONTH_COLUMN, AGENT_COLUMN] {
        if schema.field_with_name(required).is_err() {
            return Err(LoadError::MissingColumn(required.to_string()));
        }
    }

    let mut records = Vec::new();
    for batch in builder.build()? {
        let batch = batch?;
        read_batch(&batch, &channels, &mut records)?;
    }

    info!(
        path = %path.display(),
        rows = records.len(),
        channels = channels.len(),
        "loaded aggregated dataset"
    );
    Ok(Dataset::new(records, channels))
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, LoadError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn read_batch(
    batch: &RecordBatch,
    channels: &[Channel],
    out: &mut Vec<AggregatedRecord>,
) -> Result<(), LoadError> {
    let months = column(batch, MONTH_COLUMN)?;
    let agents = column(batch, AGENT_COLUMN)?;
    let paired = channels
        .iter()
        .map(|ch| {
            Ok((
                *ch,
                column(batch, &ch.pct_column())?,
                column(batch, ch.count_column())?,
            ))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;

    for row in 0..batch.num_rows() {
        let month = month_at(months, row)?;
        let agent = text_at(agents, AGENT_COLUMN, row)?
            .ok_or_else(|| LoadError::NullValue(AGENT_COLUMN.to_string()))?;
        let mut shares = BTreeMap::new();
        for (ch, pct_col, qtd_col) in &paired {
            let pct = number_at(pct_col, &ch.pct_column(), row)?.unwrap_or(0.0);
            let qtd = number_at(qtd_col, ch.count_column(), row)?.unwrap_or(0.0);
            shares.insert(
                *ch,
                ChannelShare {
                    pct,
                    qtd: qtd.trunc() as i64,
                },
            );
        }
        out.push(AggregatedRecord {
            month,
            agent,
            channels: shares,
        });
    }
    debug!(rows = batch.num_rows(), "read record batch");
    Ok(())
}

fn text_at(array: &ArrayRef, name: &str, row: usize) -> Result<Option<String>, LoadError> {
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Utf8 => array.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => array.as_string::<i64>().value(row).to_string(),
        DataType::Utf8View => array.as_string_view().value(row).to_string(),
        other => {
            return Err(LoadError::UnsupportedType {
                column: name.to_string(),
                data_type: other.clone(),
            })
        }
    };
    Ok(Some(value))
}

fn number_at(array: &ArrayRef, name: &str, row: usize) -> Result<Option<f64>, LoadError> {
    if array.is_null(row) {
        return Ok(None);
    }
    let v = match array.data_type() {
        DataType::Float64 => array.as_primitive::<Float64Type>().value(row),
        DataType::Float32 => array.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Int32 => array.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int16 => array.as_primitive::<Int16Type>().value(row) as f64,
        DataType::Int8 => array.as_primitive::<Int8Type>().value(row) as f64,
        DataType::UInt64 => array.as_primitive::<UInt64Type>().value(row) as f64,
        DataType::UInt32 => array.as_primitive::<UInt32Type>().value(row) as f64,
        DataType::UInt16 => array.as_primitive::<UInt16Type>().value(row) as f64,
        DataType::UInt8 => array.as_primitive::<UInt8Type>().value(row) as f64,
        other => {
            return Err(LoadError::UnsupportedType {
                column: name.to_string(),
                data_type: other.clone(),
            })
        }
    };
    // NaN comes from pandas' missing values
    Ok(if v.is_nan() { None } else { Some(v) })
}

fn month_at(array: &ArrayRef, row: usize) -> Result<MonthKey, LoadError> {
    if array.is_null(row) {
        return Err(LoadError::NullValue(MONTH_COLUMN.to_string()));
    }
    let from_millis = |ms: i64| {
        DateTime::from_timestamp_millis(ms)
            .map(|dt| MonthKey::from_ym(dt.year(), dt.month()))
            .ok_or_else(|| LoadError::InvalidMonth(ms.to_string()))
    };
    match array.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let s = text_at(array, MONTH_COLUMN, row)?.unwrap_or_default();
            MonthKey::parse(&s).ok_or(LoadError::InvalidMonth(s))
        }
        DataType::Date32 => {
            let days = array.as_primitive::<Date32Type>().value(row);
            from_millis(days as i64 * 86_400_000)
        }
        DataType::Date64 => from_millis(array.as_primitive::<Date64Type>().value(row)),
        DataType::Timestamp(unit, tz) => {
            let raw = match unit {
                TimeUnit::Second => array.as_primitive::<TimestampSecondType>().value(row),
                TimeUnit::Millisecond => array.as_primitive::<TimestampMillisecondType>().value(row),
                TimeUnit::Microsecond => array.as_primitive::<TimestampMicrosecondType>().value(row),
                TimeUnit::Nanosecond => array.as_primitive::<TimestampNanosecondType>().value(row),
            };
            let utc = match unit {
                TimeUnit::Second => DateTime::from_timestamp(raw, 0),
                TimeUnit::Millisecond => DateTime::from_timestamp_millis(raw),
                TimeUnit::Microsecond => DateTime::from_timestamp_micros(raw),
                TimeUnit::Nanosecond => Some(DateTime::from_timestamp_nanos(raw)),
            }
            .ok_or_else(|| LoadError::InvalidMonth(raw.to_string()))?;
            // zoned values keep their wall-clock month
            match tz {
                Some(tz) => {
                    let tz: Tz = tz.parse()?;
                    let local = utc.with_timezone(&tz);
                    Ok(MonthKey::from_ym(local.year(), local.month()))
                }
                None => Ok(MonthKey::from_ym(utc.year(), utc.month())),
            }
        }
        other => Err(LoadError::UnsupportedType {
            column: MONTH_COLUMN.to_string(),
            data_type: other.clone(),
        }),
    }
}

/// Load-once holder for the dataset.
///
/// The first successful [`get_or_load`](Self::get_or_load) stores the table;
/// every later call returns the same `Arc` without touching storage. Failed
/// loads are not stored.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_load<P: AsRef<Path>>(&self, path: P) -> Result<Arc<Dataset>, LoadError> {
        self.get_or_load_with(|| load_dataset(path))
    }

    /// Like [`get_or_load`](Self::get_or_load) with a custom loader.
    pub fn get_or_load_with<F>(&self, load: F) -> Result<Arc<Dataset>, LoadError>
    where
        F: FnOnce() -> Result<Dataset, LoadError>,
    {
        self.cell
            .get_or_try_init(|| load().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.cell.get().cloned()
    }
}

static SHARED: DatasetCache = DatasetCache::new();

/// Process-wide cached dataset.
pub fn shared_dataset<P: AsRef<Path>>(path: P) -> Result<Arc<Dataset>, LoadError> {
    SHARED.get_or_load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_key_accepts_year_month_and_dates() {
        assert_eq!(MonthKey::parse("2024-03").unwrap().as_str(), "2024-03");
        assert_eq!(MonthKey::parse("2024-3").unwrap().as_str(), "2024-03");
        assert_eq!(MonthKey::parse("2024-03-01").unwrap().as_str(), "2024-03");
        assert_eq!(
            MonthKey::parse("2024-11-01 00:00:00").unwrap().as_str(),
            "2024-11"
        );
        assert!(MonthKey::parse("2024-13").is_none());
        assert!(MonthKey::parse("março").is_none());
    }

    #[test]
    fn month_keys_sort_chronologically() {
        let mut keys = vec![
            MonthKey::parse("2024-10").unwrap(),
            MonthKey::parse("2023-12").unwrap(),
            MonthKey::parse("2024-02").unwrap(),
        ];
        keys.sort();
        let s: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
        assert_eq!(s, ["2023-12", "2024-02", "2024-10"]);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let cache = DatasetCache::new();
        let err = cache.get_or_load_with(|| Err(LoadError::MissingColumn("x".into())));
        assert!(err.is_err());
        assert!(cache.get().is_none());
        let ok = cache.get_or_load_with(|| Ok(Dataset::default()));
        assert!(ok.is_ok());
        assert!(cache.get().is_some());
    }
}
