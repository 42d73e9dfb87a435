use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayClass {
    Workday,
    Weekend,
}

impl DayClass {
    pub fn of(date: NaiveDate) -> Self {
        if date.weekday().num_days_from_monday() < 5 {
            DayClass::Workday
        } else {
            DayClass::Weekend
        }
    }
}

#[derive(Debug, Clone)]
pub struct TxRecord {
    pub date: NaiveDate,
    pub count: i64,
    pub day_class: DayClass,
    pub week_in_month: u8,
}

impl TxRecord {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self {
            date,
            count,
            day_class: DayClass::of(date),
            week_in_month: ((date.day() - 1) / 7) as u8,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AggregateParams {
    pub period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MonthsParams {
    pub months: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DatePoint {
    pub date: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub first_date: String,
    pub last_date: String,
    pub workday: Vec<DatePoint>,
    pub weekend: Vec<DatePoint>,
}

#[derive(Debug, Serialize)]
pub struct BucketPoint {
    pub start: String,
    pub end: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct AggregateResponse {
    pub period: String,
    pub points: Vec<BucketPoint>,
}

#[derive(Debug, Serialize)]
pub struct DayPoint {
    pub day: u32,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MonthSeries {
    pub month: u32,
    pub label: String,
    pub points: Vec<DayPoint>,
}

#[derive(Debug, Serialize)]
pub struct MonthsResponse {
    pub count_min: i64,
    pub count_max: i64,
    pub series: Vec<MonthSeries>,
}
