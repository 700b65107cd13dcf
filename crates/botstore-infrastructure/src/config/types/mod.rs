//! Configuration data types

mod app;
mod logging;
mod store;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use store::StoreConfig;
