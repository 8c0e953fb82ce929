// Settings for the frontend host.
// Loaded with the 'config' crate, after '.env' has been read through 'dotenv'.

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_address: String,
    // Base URL of the knowledge-graph search API, e.g. http://host:5000/api
    pub backend_url: String,
    // Optional proxy for backend traffic
    pub proxy_url: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Config::builder()
            // Defaults
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("backend_url", "http://127.0.0.1:5000/api")?
            // Optional config.toml next to the binary's working directory
            .add_source(File::with_name("config").required(false))
            // Environment overrides, e.g. APP__BACKEND_URL
            .add_source(Environment::with_prefix("APP").prefix_separator("__").separator("__"));

        let settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Full URL of the query endpoint.
    pub fn query_endpoint(&self) -> String {
        format!("{}/query", self.backend_url.trim_end_matches('/'))
    }
}
