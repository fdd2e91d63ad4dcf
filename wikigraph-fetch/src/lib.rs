pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod response;

pub use client::WikiClient;
pub use config::ClientConfig;
pub use error::FetchError;
pub use params::QueryParams;
pub use response::ApiResponse;
