pub mod error;
pub mod implementation;

use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://api.sendsculpt.com/api/v1";
pub const DEFAULT_ENVIRONMENT: &str = "live";
pub const API_KEY_HEADER: &str = "x-sendsculpt-key";

/// Long-lived SendSculpt API client. Holds immutable configuration only,
/// so a single instance can be cloned and shared across tasks.
#[derive(Clone)]
pub struct SendSculptClient {
    api_key: String,
    environment: String,
    base_url: String,
    client: Client,
}
