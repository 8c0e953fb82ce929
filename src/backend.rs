// Calls to the knowledge-graph search backend.

use std::future::Future;

use anyhow::{Context, Result};
use reqwest::{Client, Proxy};

use crate::config::Settings;
use crate::error::TransportError;
use crate::models::{QueryRequest, QueryResponse};

/// Anything that can answer a [`QueryRequest`].
///
/// An `Ok` means the backend answered with a decodable body, whatever its
/// `success` flag says; transport problems and non-2xx statuses are `Err`.
pub trait SearchBackend: Send + Sync + 'static {
    fn search(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryResponse, TransportError>> + Send;
}

// Talks to POST {backend_url}/query over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(proxy_url) = settings.proxy_url.as_deref().filter(|p| !p.is_empty()) {
            let proxy = Proxy::all(proxy_url).with_context(|| format!("Invalid proxy URL '{}'", proxy_url))?;
            builder = builder.proxy(proxy);
            tracing::info!("Routing backend traffic through configured proxy.");
        }
        let client = builder.build().context("Failed to build reqwest client")?;

        Ok(HttpBackend::with_client(client, settings.query_endpoint()))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        HttpBackend {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchBackend for HttpBackend {
    fn search(
        &self,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryResponse, TransportError>> + Send {
        async move {
            tracing::debug!(endpoint = %self.endpoint, query = %request.query, "Sending query to backend");

            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(%status, "Backend answered with a non-success status");
                return Err(TransportError::Status(status.as_u16()));
            }

            let body = response.json::<QueryResponse>().await?;
            Ok(body)
        }
    }
}
