use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DatePoint {
    date: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    first_date: String,
    last_date: String,
    workday: Vec<DatePoint>,
    weekend: Vec<DatePoint>,
}

#[derive(Debug, Deserialize)]
struct BucketPoint {
    start: String,
    end: String,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct AggregateResponse {
    period: String,
    points: Vec<BucketPoint>,
}

#[derive(Debug, Deserialize)]
struct DayPoint {
    day: u32,
    count: i64,
}

#[derive(Debug, Deserialize)]
struct MonthSeries {
    month: u32,
    label: String,
    points: Vec<DayPoint>,
}

#[derive(Debug, Deserialize)]
struct MonthsResponse {
    count_min: i64,
    count_max: i64,
    series: Vec<MonthSeries>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

// 2017-05-01 is a Monday. Two full May weeks with counts 1..=14, then two
// June workdays, so weekly, biweekly and monthly sums are all known.
fn fixture_csv() -> String {
    let mut out = String::from(",Date,Count\n");
    for day in 1..=14 {
        out.push_str(&format!("{},2017-05-{:02},{}\n", day - 1, day, day));
    }
    out.push_str("14,2017-06-05,100\n");
    out.push_str("15,2017-06-06,50\n");
    out
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_csv_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "fraud_dashboard_http_{}_{}.csv",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/overview")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let csv_path = unique_csv_path();
    std::fs::write(&csv_path, fixture_csv()).expect("write fixture csv");

    let child = Command::new(env!("CARGO_BIN_EXE_fraud-dashboard"))
        .env("PORT", port.to_string())
        .env("DASHBOARD_CSV", csv_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_index_serves_dashboard_page() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body = response.text().await.unwrap();
    assert!(body.contains("Transaction Statistics"));
    assert!(body.contains("2017-05-01"));
    assert!(body.contains("2017-06-06"));
}

#[tokio::test]
async fn http_overview_splits_workdays_and_weekends() {
    let server = shared_server().await;
    let client = Client::new();

    let overview: OverviewResponse = client
        .get(format!("{}/api/overview", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(overview.first_date, "2017-05-01");
    assert_eq!(overview.last_date, "2017-06-06");
    assert_eq!(overview.workday.len(), 12);
    assert_eq!(overview.weekend.len(), 4);

    let weekend_dates: Vec<&str> = overview
        .weekend
        .iter()
        .map(|point| point.date.as_str())
        .collect();
    assert_eq!(
        weekend_dates,
        ["2017-05-06", "2017-05-07", "2017-05-13", "2017-05-14"]
    );

    let total: i64 = overview
        .workday
        .iter()
        .chain(overview.weekend.iter())
        .map(|point| point.count)
        .sum();
    assert_eq!(total, 255);
}

#[tokio::test]
async fn http_aggregate_defaults_to_monthly() {
    let server = shared_server().await;
    let client = Client::new();

    let aggregate: AggregateResponse = client
        .get(format!("{}/api/aggregate", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(aggregate.period, "1m");
    assert_eq!(aggregate.points.len(), 2);
    assert_eq!(aggregate.points[0].start, "2017-05-01");
    assert_eq!(aggregate.points[0].end, "2017-05-31");
    assert_eq!(aggregate.points[0].count, 105);
    assert_eq!(aggregate.points[1].start, "2017-06-01");
    assert_eq!(aggregate.points[1].count, 150);
}

#[tokio::test]
async fn http_aggregate_weekly_fills_gaps() {
    let server = shared_server().await;
    let client = Client::new();

    let aggregate: AggregateResponse = client
        .get(format!("{}/api/aggregate?period=1w", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(aggregate.period, "1w");
    let counts: Vec<i64> = aggregate.points.iter().map(|point| point.count).collect();
    assert_eq!(counts, [28, 77, 0, 0, 0, 150]);
    assert_eq!(aggregate.points[0].start, "2017-05-01");
    assert_eq!(aggregate.points[5].start, "2017-06-05");
}

#[tokio::test]
async fn http_aggregate_rejects_unknown_period() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/aggregate?period=3w", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_months_filters_selected_months() {
    let server = shared_server().await;
    let client = Client::new();

    let months: MonthsResponse = client
        .get(format!("{}/api/months?months=5,6", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(months.count_min, 1);
    assert_eq!(months.count_max, 100);
    assert_eq!(months.series.len(), 2);

    let may = &months.series[0];
    assert_eq!(may.month, 5);
    assert_eq!(may.label, "May");
    assert_eq!(may.points.len(), 14);

    let june = &months.series[1];
    assert_eq!(june.month, 6);
    assert_eq!(june.label, "June");
    assert_eq!(june.points.len(), 2);
    assert_eq!(june.points[0].day, 5);
    assert_eq!(june.points[0].count, 100);
    assert_eq!(june.points[1].day, 6);
    assert_eq!(june.points[1].count, 50);
}

#[tokio::test]
async fn http_months_empty_selection_yields_no_series() {
    let server = shared_server().await;
    let client = Client::new();

    let months: MonthsResponse = client
        .get(format!("{}/api/months", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(months.series.is_empty());
    assert_eq!(months.count_min, 1);
    assert_eq!(months.count_max, 100);
}

#[tokio::test]
async fn http_months_rejects_out_of_range_month() {
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/months?months=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .get(format!("{}/api/months?months=1,abc", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
