use crate::errors::AppError;
use crate::models::{
    AggregateParams, AggregateResponse, DayClass, MonthSeries, MonthsParams, MonthsResponse,
    OverviewResponse,
};
use crate::state::AppState;
use crate::stats::{self, AggPeriod};
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.dataset))
}

pub async fn overview(State(state): State<AppState>) -> Result<Json<OverviewResponse>, AppError> {
    let dataset = &state.dataset;
    Ok(Json(OverviewResponse {
        first_date: dataset.first_date.to_string(),
        last_date: dataset.last_date.to_string(),
        workday: stats::day_class_series(dataset, DayClass::Workday),
        weekend: stats::day_class_series(dataset, DayClass::Weekend),
    }))
}

pub async fn aggregate(
    State(state): State<AppState>,
    Query(params): Query<AggregateParams>,
) -> Result<Json<AggregateResponse>, AppError> {
    let period = match params.period.as_deref() {
        None => AggPeriod::OneMonth,
        Some(raw) => raw.parse::<AggPeriod>().map_err(|_| {
            AppError::bad_request(format!("unknown period '{raw}', expected 1w, 2w or 1m"))
        })?,
    };

    Ok(Json(AggregateResponse {
        period: period.as_str().to_string(),
        points: stats::resample_sum(&state.dataset, period),
    }))
}

pub async fn months(
    State(state): State<AppState>,
    Query(params): Query<MonthsParams>,
) -> Result<Json<MonthsResponse>, AppError> {
    let months = parse_months(params.months.as_deref().unwrap_or(""))?;
    let dataset = &state.dataset;

    let series = months
        .into_iter()
        .map(|month| MonthSeries {
            month,
            label: stats::month_name(month).to_string(),
            points: stats::month_series(dataset, month),
        })
        .collect();

    Ok(Json(MonthsResponse {
        count_min: dataset.count_min,
        count_max: dataset.count_max,
        series,
    }))
}

fn parse_months(raw: &str) -> Result<Vec<u32>, AppError> {
    let mut months = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let month: u32 = part
            .parse()
            .map_err(|_| AppError::bad_request(format!("invalid month '{part}'")))?;
        if !(1..=12).contains(&month) {
            return Err(AppError::bad_request(format!(
                "month {month} is out of range 1-12"
            )));
        }
        if !months.contains(&month) {
            months.push(month);
        }
    }
    Ok(months)
}
