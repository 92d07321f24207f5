//! HEAD-request liveness probe

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::redirect::Policy;
use url::Url;

use super::{LivenessProbe, RetrieverError};

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probes URLs with a HEAD request. Redirects are reported, not followed,
/// so a 3xx counts as reachable.
pub struct HttpLivenessProbe {
    client: Client,
}

impl HttpLivenessProbe {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("credence/0.1")
                .timeout(PROBE_TIMEOUT)
                .redirect(Policy::none())
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

impl Default for HttpLivenessProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LivenessProbe for HttpLivenessProbe {
    async fn probe(&self, url: &Url) -> Result<u16, RetrieverError> {
        let response = self.client.head(url.as_str()).send().await?;
        let status = response.status().as_u16();
        tracing::trace!(url = %url, status = status, "Probed URL");
        Ok(status)
    }
}
