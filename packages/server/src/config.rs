//! Server configuration.

/// Wandbox compile endpoint used when none is configured
pub const DEFAULT_EXECUTOR_URL: &str = "https://wandbox.org/api/compile.json";

/// Compiler used by `POST /api/execute` when the request names none
pub const DEFAULT_COMPILER: &str = "nodejs-20.17.0";

/// Runtime settings collected from the command line and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS; empty means any origin
    pub allowed_origins: Vec<String>,
    pub executor_url: String,
    pub default_compiler: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            allowed_origins: Vec::new(),
            executor_url: DEFAULT_EXECUTOR_URL.to_string(),
            default_compiler: DEFAULT_COMPILER.to_string(),
        }
    }
}
