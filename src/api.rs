pub mod client;
pub mod logging;
pub mod mock_client;
pub mod prompt;
pub mod schema;
pub mod validate;

pub use client::{ApiClient, HttpTransport, ModelTransport};
