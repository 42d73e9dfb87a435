use crate::models::TxRecord;
use chrono::NaiveDate;
use serde::Deserialize;
use std::{env, fs::File, path::Path, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: invalid date '{value}'")]
    BadDate { line: usize, value: String },
    #[error("csv contained no data rows")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    // The source file carries a pandas-style unnamed index column; it is
    // not listed here, so deserialization drops it.
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Count")]
    count: i64,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<TxRecord>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub count_min: i64,
    pub count_max: i64,
}

impl Dataset {
    pub fn from_records(mut records: Vec<TxRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }
        records.sort_by_key(|record| record.date);

        let first_date = records[0].date;
        let last_date = records[records.len() - 1].date;
        let mut count_min = i64::MAX;
        let mut count_max = i64::MIN;
        for record in &records {
            count_min = count_min.min(record.count);
            count_max = count_max.max(record.count);
        }

        Ok(Self {
            records,
            first_date,
            last_date,
            count_min,
            count_max,
        })
    }

    pub fn total_count(&self) -> i64 {
        self.records.iter().map(|record| record.count).sum()
    }
}

pub fn resolve_csv_path() -> PathBuf {
    if let Ok(path) = env::var("DASHBOARD_CSV") {
        return PathBuf::from(path);
    }

    PathBuf::from("static/fraud.csv")
}

pub fn load_dataset(path: &Path) -> Result<Dataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let raw = row?;
        let value = raw.date.trim();
        let date = value.parse::<NaiveDate>().map_err(|_| DataError::BadDate {
            line: index + 2,
            value: value.to_string(),
        })?;
        records.push(TxRecord::new(date, raw.count));
    }

    Dataset::from_records(records)
}
