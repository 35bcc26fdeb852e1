pub mod app;
pub mod appointments;
pub mod config;
pub mod doctors;
pub mod error;
pub mod records;
pub mod state;
pub mod store;
pub mod testimonials;
pub mod users;

pub use app::{build_app, serve};
pub use config::AppConfig;
pub use error::ApiError;
pub use state::AppState;
