use crate::domain::ports::MessageDispatcher;
use crate::utils::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Hands the message to the relay hardware with a single GET against the
/// fixed local endpoint, the message url-encoded in the `msg` query
/// parameter. Which box actually answers depends entirely on the wireless
/// association active at the time of the call.
#[derive(Debug, Clone)]
pub struct HttpDispatchClient {
    client: Client,
}

impl HttpDispatchClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MessageDispatcher for HttpDispatchClient {
    async fn send(&self, endpoint: &Url, message: &str) -> Result<()> {
        tracing::debug!(endpoint = %endpoint, "Dispatching message");
        let response = self
            .client
            .get(endpoint.clone())
            .query(&[("msg", message)])
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Dispatch response");
        if !response.status().is_success() {
            return Err(RelayError::DispatchRejected {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
