use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::poll::error::PollError;
use crate::poll::record::{decode_batch, Record};

pub trait MessageSource {
    /// `Ok(None)` when the server had nothing to say this cycle.
    fn fetch(&mut self) -> Result<Option<Vec<Record>>, PollError>;
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> anyhow::Result<Self> {
        let url = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        info!(url = url.as_str(), timeout = %humantime::format_duration(timeout), "Polling endpoint");

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

impl MessageSource for HttpSource {
    fn fetch(&mut self) -> Result<Option<Vec<Record>>, PollError> {
        let response = self.client.get(&self.url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::Status(status));
        }

        let body = response.text()?;
        debug!(bytes = body.len(), "Received response");
        decode_batch(&body)
    }
}
