//! hyper-based adapter for the account-scoped endpoints.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, header};
use http_body_util::{BodyExt, Empty};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{debug, instrument};
use url::Url;

use crate::config::OnboardingClientConfig;
use crate::error::ProbeError;
use crate::resources::{FetchOutcome, OnboardingResources, Resource};

pub struct HttpOnboardingResources {
    client: Client<HttpsConnector<HttpConnector>, Empty<Bytes>>,
    base_url: Url,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl HttpOnboardingResources {
    /// # Errors
    /// Returns `ProbeError::InvalidBaseUrl` for an unparsable base URL and
    /// `ProbeError::Tls` if the TLS roots cannot be loaded.
    pub fn new(
        config: &OnboardingClientConfig,
        bearer_token: Option<String>,
    ) -> Result<Self, ProbeError> {
        // Paths are joined relative to the base, so it must end with '/'.
        let mut base = config.api_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::aws_lc_rs::default_provider())
            .map_err(|e| ProbeError::Tls(e.to_string()))?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self {
            client: Client::builder(TokioExecutor::new()).build(connector),
            base_url,
            bearer_token: bearer_token.filter(|t| !t.is_empty()),
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    fn url_for(&self, resource: Resource) -> Result<Url, ProbeError> {
        Ok(self.base_url.join(resource.path())?)
    }
}

#[async_trait]
impl OnboardingResources for HttpOnboardingResources {
    #[instrument(skip(self), fields(url = tracing::field::Empty))]
    async fn fetch(&self, resource: Resource) -> Result<FetchOutcome, ProbeError> {
        let url = self.url_for(resource)?;
        tracing::Span::current().record("url", url.as_str());

        let mut request = Request::get(url.as_str()).header(header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = request.body(Empty::new())?;

        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| ProbeError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| ProbeError::Transport(e.to_string()))?
                .to_bytes();
            Ok::<_, ProbeError>((status, body))
        };

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let (status, body) = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| ProbeError::Timeout(timeout_ms))??;

        debug!(status = status.as_u16(), "probe finished");
        Ok(FetchOutcome {
            success: status.is_success(),
            body: body.to_vec(),
        })
    }
}
