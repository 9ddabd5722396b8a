pub mod app;

pub use app::{AllowedOrigins, AppConfig, MongoSettings};
