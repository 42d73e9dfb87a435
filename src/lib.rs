pub mod app;
pub mod dataset;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod state;
pub mod ui;

pub use app::router;
pub use dataset::{load_dataset, resolve_csv_path, Dataset};
pub use state::AppState;
