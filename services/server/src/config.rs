/// Mock server configuration loaded from environment variables.
#[derive(Debug)]
pub struct ServerConfig {
    /// Fixture root directory. Env var: `CANNED_ROOT`.
    pub root: String,
    /// TCP port to listen on (default 3200). Env var: `CANNED_PORT`.
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            root: std::env::var("CANNED_ROOT").expect("CANNED_ROOT"),
            port: std::env::var("CANNED_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3200),
        }
    }
}
