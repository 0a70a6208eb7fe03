use std::path::PathBuf;

#[derive(Clone)]
pub struct Config {
    /// Base URL of the subscriptions API, without a trailing slash.
    pub api_base_url: String,
    /// Where an unauthorized session gets sent.
    pub login_url: String,
    pub logs_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_base_url: std::env::var("API_BASE_URL")
                .unwrap_or("http://127.0.0.1:5000/api".to_string()),
            login_url: std::env::var("LOGIN_URL").unwrap_or("/login".to_string()),
            logs_path: std::env::var("LOGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(PathBuf::from("logs")),
        }
    }
}
