use crate::dataset::Dataset;
use crate::models::{BucketPoint, DatePoint, DayClass, DayPoint};
use chrono::{Datelike, Duration, Months, NaiveDate};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggPeriod {
    OneWeek,
    TwoWeeks,
    OneMonth,
}

impl AggPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            AggPeriod::OneWeek => "1w",
            AggPeriod::TwoWeeks => "2w",
            AggPeriod::OneMonth => "1m",
        }
    }
}

impl FromStr for AggPeriod {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "1w" => Ok(AggPeriod::OneWeek),
            "2w" => Ok(AggPeriod::TwoWeeks),
            "1m" => Ok(AggPeriod::OneMonth),
            _ => Err(()),
        }
    }
}

pub fn day_class_series(dataset: &Dataset, class: DayClass) -> Vec<DatePoint> {
    dataset
        .records
        .iter()
        .filter(|record| record.day_class == class)
        .map(|record| DatePoint {
            date: record.date.to_string(),
            count: record.count,
        })
        .collect()
}

pub fn resample_sum(dataset: &Dataset, period: AggPeriod) -> Vec<BucketPoint> {
    let anchor = week_start(dataset.first_date);
    let mut sums: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in &dataset.records {
        *sums.entry(bucket_start(record.date, period, anchor)).or_insert(0) += record.count;
    }

    let (Some(first), Some(last)) = (
        sums.keys().next().copied(),
        sums.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    // Occupied range only, with empty buckets in between emitted as zero.
    let mut points = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        points.push(BucketPoint {
            start: cursor.to_string(),
            end: bucket_end(cursor, period).to_string(),
            count: sums.get(&cursor).copied().unwrap_or(0),
        });
        cursor = next_bucket(cursor, period);
    }
    points
}

pub fn month_series(dataset: &Dataset, month: u32) -> Vec<DayPoint> {
    dataset
        .records
        .iter()
        .filter(|record| record.date.month() == month)
        .map(|record| DayPoint {
            day: record.date.day(),
            count: record.count,
        })
        .collect()
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

fn bucket_start(date: NaiveDate, period: AggPeriod, anchor: NaiveDate) -> NaiveDate {
    match period {
        AggPeriod::OneWeek => week_start(date),
        AggPeriod::TwoWeeks => {
            let offset = ((date - anchor).num_days() / 14) * 14;
            anchor + Duration::days(offset)
        }
        AggPeriod::OneMonth => month_start(date),
    }
}

fn bucket_end(start: NaiveDate, period: AggPeriod) -> NaiveDate {
    match period {
        AggPeriod::OneWeek => start + Duration::days(6),
        AggPeriod::TwoWeeks => start + Duration::days(13),
        AggPeriod::OneMonth => (start + Months::new(1)) - Duration::days(1),
    }
}

fn next_bucket(start: NaiveDate, period: AggPeriod) -> NaiveDate {
    match period {
        AggPeriod::OneWeek => start + Duration::days(7),
        AggPeriod::TwoWeeks => start + Duration::days(14),
        AggPeriod::OneMonth => start + Months::new(1),
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}
